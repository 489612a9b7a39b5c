//! CLI command handlers for ghi.
//!
//! Each handler loads its records (behind the spinner), formats them and
//! prints the result.
//!
//! # Commands
//!
//! - [`issues`] - Issue listing with its filter header
//! - [`show`] - Issue detail view, optionally followed by its comments
//! - [`comments`] - Comment listing
//! - [`milestones`] - Milestone listing and milestone detail output
//! - [`config`] - Show or initialize the configuration file

mod comments;
mod config;
mod issues;
mod milestones;
mod show;

pub use comments::comments_command;
pub use config::config_command;
pub use issues::issues_command;
pub use milestones::{milestone_command, milestones_command};
pub use show::show_command;

use crate::error::{GhiError, Result};
use crate::records::{self, RecordKind};
use crate::spinner::throb;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read raw JSON from `path`, where `-` means stdin.
fn read_source(path: &Path) -> Result<String> {
    let wrap = |source| GhiError::RecordSource {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut json = String::new();
        io::stdin().read_to_string(&mut json).map_err(wrap)?;
        Ok(json)
    } else {
        fs::read_to_string(path).map_err(wrap)
    }
}

/// Load a JSON array of records while the spinner runs.
fn load_many<T: RecordKind>(path: &Path) -> Result<Vec<T>> {
    let records = throb(|| records::parse_many(&read_source(path)?))?;
    tracing::debug!(kind = T::KIND, count = records.len(), path = %path.display(), "records loaded");
    Ok(records)
}

/// Load a single record while the spinner runs.
fn load_one<T: RecordKind>(path: &Path) -> Result<T> {
    let record = throb(|| records::parse_one(&read_source(path)?))?;
    tracing::debug!(kind = T::KIND, path = %path.display(), "record loaded");
    Ok(record)
}
