//! Comments command handler.

use super::load_many;
use crate::error::Result;
use crate::format::Formatter;
use crate::output::emit_listing;
use crate::records::Comment;
use std::path::Path;

pub fn comments_command(formatter: &Formatter, path: &Path) -> Result<()> {
    let comments: Vec<Comment> = load_many(path)?;
    emit_listing(formatter, &formatter.format_comments(&comments))?;
    Ok(())
}
