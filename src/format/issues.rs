//! Issue listing and issue detail view.

use super::{collapse_trailing_blank_lines, Formatter, Listing};
use crate::layout::{display_width, rjust};
use crate::records::{timestamp, Issue};
use crate::style::{Color, Layer};

/// Columns a listing row spends outside of its measured fields.
const ROW_OVERHEAD: usize = 8;
/// Width of the pull request or self-assignment marker plus its separator.
const MARKER_WIDTH: usize = 2;

const PULL_REQUEST_MARKER: Color = Color::Rgb(0xaa, 0xaa, 0xaa);

impl Formatter {
    /// One row per issue, with numbers (and repository names when
    /// `include_repo` is set) right-aligned across the listing.
    pub fn format_issues(&self, issues: &[Issue], include_repo: bool) -> Listing {
        if issues.is_empty() {
            return Listing::Empty;
        }

        let repos: Vec<Option<&str>> = issues
            .iter()
            .map(|issue| include_repo.then(|| issue.repo_name()).flatten())
            .collect();
        let number_width = issues
            .iter()
            .map(|issue| issue.number.to_string().len())
            .max()
            .unwrap_or(0);
        let repo_width = repos
            .iter()
            .map(|repo| repo.map_or(0, display_width))
            .max()
            .unwrap_or(0);

        Listing::Rows(
            issues
                .iter()
                .zip(repos)
                .map(|(issue, repo)| self.issue_row(issue, repo, number_width, repo_width))
                .collect(),
        )
    }

    fn issue_row(
        &self,
        issue: &Issue,
        repo: Option<&str>,
        number_width: usize,
        repo_width: usize,
    ) -> String {
        let labels = self.format_labels(&issue.labels);
        let labels_width = self
            .style()
            .no_color(|| self.format_labels(&issue.labels))
            .map_or(0, |plain| display_width(&plain));
        let mine = issue.is_assigned_to(self.current_user());
        let pull = issue.is_pull_request();

        let mut reserved = ROW_OVERHEAD + number_width + repo_width + labels_width;
        if mine {
            reserved += MARKER_WIDTH;
        }
        if pull {
            reserved += MARKER_WIDTH;
        }

        let mut fields = vec![" ".to_string()];
        if let Some(repo) = repo {
            fields.push(rjust(repo, repo_width));
        }
        fields.push(format!(
            "{}:",
            self.style()
                .bright(rjust(&issue.number.to_string(), number_width))
        ));
        let title = self.truncate(&issue.title, reserved);
        if !title.is_empty() {
            fields.push(title);
        }
        fields.extend(labels);
        if pull {
            fields.push(self.style().fg(PULL_REQUEST_MARKER, "↑"));
        }
        if mine {
            fields.push(self.style().fg(Color::Yellow, "@"));
        }
        fields.join(" ")
    }

    /// Detail view of a single issue.
    pub fn format_issue(&self, issue: &Issue) -> String {
        let state = issue.state.as_str();
        let mut out = self.heading(issue.number, &issue.title);
        out.push('\n');

        out.push_str(&format!(
            "@{} opened this issue {}. {}",
            issue.user.login,
            timestamp(&issue.created_at),
            self.format_state(state, &self.style().format_tag(state), Layer::Bg)
        ));
        if let Some(assignee) = &issue.assignee {
            out.push_str(&format!(" @{} is assigned.", assignee.login));
        }
        if let Some(labels) = self.format_labels(&issue.labels) {
            out.push(' ');
            out.push_str(&labels);
        }
        out.push('\n');

        if let Some(body) = issue.body.as_deref().filter(|body| !body.is_empty()) {
            out.push('\n');
            out.push_str(&self.indent(body, 4));
            out.push('\n');
        }

        collapse_trailing_blank_lines(out)
    }
}
