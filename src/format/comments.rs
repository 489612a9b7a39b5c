//! Comment blocks.

use super::{Formatter, Listing};
use crate::records::{timestamp, Comment};

impl Formatter {
    pub fn format_comments(&self, comments: &[Comment]) -> Listing {
        if comments.is_empty() {
            return Listing::Empty;
        }
        Listing::Rows(comments.iter().map(|c| self.format_comment(c)).collect())
    }

    /// `@login commented <time>:`, a blank line, then the indented body.
    pub fn format_comment(&self, comment: &Comment) -> String {
        format!(
            "@{} commented {}:\n\n{}\n",
            comment.user.login,
            timestamp(&comment.created_at),
            self.indent(&comment.body, 4)
        )
    }
}
