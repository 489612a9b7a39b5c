//! Milestone command handlers.

use super::{load_many, load_one};
use crate::error::Result;
use crate::format::Formatter;
use crate::output::{emit, emit_listing};
use crate::records::Milestone;
use std::path::Path;

pub fn milestones_command(formatter: &Formatter, path: &Path) -> Result<()> {
    let milestones: Vec<Milestone> = load_many(path)?;
    emit_listing(formatter, &formatter.format_milestones(&milestones))?;
    Ok(())
}

pub fn milestone_command(formatter: &Formatter, path: &Path) -> Result<()> {
    let milestone: Milestone = load_one(path)?;
    emit(formatter, &formatter.format_milestone(&milestone))?;
    Ok(())
}
