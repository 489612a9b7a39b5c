//! Issues command handler.

use super::load_many;
use crate::error::Result;
use crate::format::{Formatter, IssueQuery};
use crate::output::{emit, emit_listing};
use crate::records::Issue;
use std::path::Path;

/// Print the filter header and one row per issue in `path`.
///
/// Global listings (no `--repo`) always show the repository column.
pub fn issues_command(
    formatter: &Formatter,
    path: &Path,
    query: &IssueQuery,
    include_repo: bool,
) -> Result<()> {
    let issues: Vec<Issue> = load_many(path)?;
    let include_repo = include_repo || query.repo.is_none();

    emit(formatter, &formatter.format_issues_header(query))?;
    emit_listing(formatter, &formatter.format_issues(&issues, include_repo))?;
    Ok(())
}
