//! Issue listing header.

use super::Formatter;
use crate::style::Layer;
use clap::ValueEnum;

/// Predefined global issue filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IssueFilter {
    #[default]
    Assigned,
    Created,
    Mentioned,
    Subscribed,
}

impl IssueFilter {
    fn phrase(self) -> &'static str {
        match self {
            IssueFilter::Assigned => " assigned to you",
            IssueFilter::Created => " you created",
            IssueFilter::Mentioned => " that mention you",
            IssueFilter::Subscribed => " you're subscribed to",
        }
    }
}

/// Display options of an issue listing, as supplied by the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueQuery {
    /// `owner/name`; `None` lists issues across all repositories.
    pub repo: Option<String>,
    pub state: Option<String>,
    /// A login, `*` for any assignee or `none` for unassigned issues.
    pub assignee: Option<String>,
    pub mentioned: Option<String>,
    /// Only used for global listings.
    pub filter: Option<IssueFilter>,
    /// Comma-separated label names.
    pub labels: Option<String>,
    pub sort: Option<String>,
    pub reverse: bool,
}

impl Formatter {
    /// One-line description of `query`, colored by the listed state.
    pub fn format_issues_header(&self, query: &IssueQuery) -> String {
        let state = query.state.as_deref().unwrap_or("open");
        let mut header = format!(
            "# {} {state} issues",
            query.repo.as_deref().unwrap_or("Global,")
        );

        if query.repo.is_some() {
            if let Some(assignee) = query.assignee.as_deref() {
                match assignee {
                    "*" => header.push_str(", assigned"),
                    "none" => header.push_str(", unassigned"),
                    login => header.push_str(&format!(", assigned to {}", self.you(login))),
                }
            }
            if let Some(mentioned) = query.mentioned.as_deref() {
                header.push_str(&format!(", mentioning {}", self.you(mentioned)));
            }
        } else {
            header.push_str(query.filter.unwrap_or_default().phrase());
        }

        if let Some(labels) = query.labels.as_deref() {
            header.push_str(&format!(", labeled {}", labels.replace(',', ", ")));
        }
        if let Some(sort) = query.sort.as_deref() {
            let direction = if query.reverse {
                "ascending"
            } else {
                "descending"
            };
            header.push_str(&format!(", by {sort} {direction}"));
        }

        self.format_state(state, &header, Layer::Fg)
    }
}
