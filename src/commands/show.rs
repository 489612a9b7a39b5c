//! Show command handler.

use super::{load_many, load_one};
use crate::error::Result;
use crate::format::Formatter;
use crate::output::{emit, emit_listing};
use crate::records::{Comment, Issue};
use std::path::Path;

/// Print the detail view of the issue in `path`, followed by the comments in
/// `comments` when given.
pub fn show_command(formatter: &Formatter, path: &Path, comments: Option<&Path>) -> Result<()> {
    let issue: Issue = load_one(path)?;
    emit(formatter, &formatter.format_issue(&issue))?;

    if let Some(comments) = comments {
        let comments: Vec<Comment> = load_many(comments)?;
        emit_listing(formatter, &formatter.format_comments(&comments))?;
    }
    Ok(())
}
