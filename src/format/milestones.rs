//! Milestone listing and milestone detail view.

use super::{collapse_trailing_blank_lines, Formatter, Listing};
use crate::layout::rjust;
use crate::records::{timestamp, Milestone};
use crate::style::{Color, Layer};
use chrono::Utc;

/// Columns taken by the row prefix: two spaces, the colon and a separator.
const ROW_OVERHEAD: usize = 4;

impl Formatter {
    /// One row per milestone; titles of overdue milestones are red.
    pub fn format_milestones(&self, milestones: &[Milestone]) -> Listing {
        if milestones.is_empty() {
            return Listing::Empty;
        }

        let now = Utc::now();
        let width = milestones
            .iter()
            .map(|m| m.number.to_string().len())
            .max()
            .unwrap_or(0);

        Listing::Rows(
            milestones
                .iter()
                .map(|m| {
                    let number = self.style().bright(rjust(&m.number.to_string(), width));
                    let title = self.truncate(&m.title, width + ROW_OVERHEAD);
                    let overdue = m.is_overdue(now).then_some(Color::Red);
                    format!("  {number}: {}", self.style().fg(overdue, title))
                })
                .collect(),
        )
    }

    /// Detail view of a single milestone.
    pub fn format_milestone(&self, milestone: &Milestone) -> String {
        let state = milestone.state.as_str();
        let mut out = self.heading(milestone.number, &milestone.title);
        out.push('\n');

        out.push_str(&format!(
            "@{} created this milestone {}. {}\n",
            milestone.creator.login,
            timestamp(&milestone.created_at),
            self.format_state(state, &self.style().format_tag(state), Layer::Bg)
        ));

        if let Some(due_on) = milestone.due_on {
            let overdue = milestone.is_overdue(Utc::now()).then_some(Color::Red);
            out.push_str(&format!(
                "Due on {}.\n",
                self.style()
                    .fg(overdue, due_on.format("%Y-%m-%d").to_string())
            ));
        }

        if let Some(description) = milestone
            .description
            .as_deref()
            .filter(|description| !description.is_empty())
        {
            out.push('\n');
            out.push_str(&self.indent(description, 4));
        }
        out.push('\n');

        collapse_trailing_blank_lines(out)
    }
}
