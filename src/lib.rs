pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod output;
pub mod records;
pub mod spinner;
pub mod style;
pub mod terminal;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{GhiError, Result};
pub use format::{Formatter, IssueFilter, IssueQuery, Listing};
pub use records::{Comment, Issue, Label, Milestone, State, User};
pub use spinner::{throb, ThrobOptions};
pub use style::{Color, ColorChoice, Layer, StyleScope, Styler};
