//! Record formatters.
//!
//! A [`Formatter`] turns issues, comments and milestones into styled, laid-out
//! text. It owns the style context, the current user's login and the layout
//! width source; it performs no I/O beyond the terminal width query.
//!
//! - [`header`] - One-line description of the active issue filter
//! - [`issues`] - Issue listing rows and the issue detail view
//! - [`comments`] - Comment blocks
//! - [`milestones`] - Milestone listing rows and the milestone detail view

mod comments;
mod header;
mod issues;
mod milestones;

pub use header::{IssueFilter, IssueQuery};

use crate::layout;
use crate::records::Label;
use crate::style::{Color, Layer, Styler};
use crate::terminal::LayoutWidth;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static TRAILING_BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}\z").expect("valid trailing blank pattern"));

/// Result of a list formatter: either no records at all, or one rendered
/// entry per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Empty,
    Rows(Vec<String>),
}

impl Listing {
    /// What an empty listing renders as.
    pub const NONE: &'static str = "None.";

    pub fn is_empty(&self) -> bool {
        matches!(self, Listing::Empty)
    }

    /// Rendered entries; an empty listing yields the single `"None."` entry.
    pub fn entries(&self) -> Vec<&str> {
        match self {
            Listing::Empty => vec![Self::NONE],
            Listing::Rows(rows) => rows.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries().join("\n"))
    }
}

pub struct Formatter {
    style: Styler,
    current_user: Option<String>,
    mention: Option<Regex>,
    width: LayoutWidth,
}

impl Formatter {
    pub fn new(style: Styler) -> Self {
        Self {
            style,
            current_user: None,
            mention: None,
            width: LayoutWidth::Terminal,
        }
    }

    /// Set the logged-in user. An empty login counts as no user.
    pub fn with_current_user(mut self, login: Option<String>) -> Self {
        let login = login.filter(|l| !l.is_empty());
        self.mention = login
            .as_deref()
            .and_then(|l| Regex::new(&format!(r"@{}\b", regex::escape(l))).ok());
        self.current_user = login;
        self
    }

    pub fn with_width(mut self, width: LayoutWidth) -> Self {
        self.width = width;
        self
    }

    pub fn style(&self) -> &Styler {
        &self.style
    }

    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Highlight `@<current user>` mentions in `text`.
    pub fn highlight_mentions(&self, text: &str) -> String {
        match &self.mention {
            Some(pattern) => self.style.highlight(text, pattern),
            None => text.to_string(),
        }
    }

    /// `text` in green for open items and red for closed ones.
    pub fn format_state(&self, state: &str, text: &str, layer: Layer) -> String {
        let color = if state == "closed" {
            Color::Red
        } else {
            Color::Green
        };
        self.style.paint(layer, color, text)
    }

    /// Labels as space-separated tags on their own colors; `None` when there
    /// are no labels.
    pub fn format_labels(&self, labels: &[Label]) -> Option<String> {
        if labels.is_empty() {
            return None;
        }
        let tags: Vec<String> = labels
            .iter()
            .map(|label| {
                let color = label
                    .color
                    .as_deref()
                    .and_then(|hex| Color::from_hex(hex).ok());
                self.style.bg(color, self.style.format_tag(&label.name))
            })
            .collect();
        Some(tags.join(" "))
    }

    /// "you" when `login` is the current user.
    fn you<'a>(&self, login: &'a str) -> &'a str {
        if self.current_user() == Some(login) {
            "you"
        } else {
            login
        }
    }

    fn columns(&self) -> usize {
        self.width.columns()
    }

    fn truncate(&self, text: &str, reserved: usize) -> String {
        layout::truncate_within(text, self.columns() as isize - reserved as isize)
    }

    fn indent(&self, text: &str, level: usize) -> String {
        layout::indent_within(text, level, self.columns())
    }

    /// Bold `#<number>: <title>` heading wrapped to the layout width.
    fn heading(&self, number: u64, title: &str) -> String {
        self.style
            .bright(self.indent(&format!("#{number}: {title}"), 0))
    }
}

/// Collapse a trailing run of two or more newlines to exactly two.
fn collapse_trailing_blank_lines(text: String) -> String {
    TRAILING_BLANKS.replace(&text, "\n\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{color_formatter, label, plain_formatter};

    #[test]
    fn test_listing_empty_renders_none() {
        assert_eq!(Listing::Empty.to_string(), "None.");
        assert!(Listing::Empty.is_empty());
        assert_eq!(Listing::Empty.entries(), vec!["None."]);
    }

    #[test]
    fn test_listing_rows_join_with_newline() {
        let listing = Listing::Rows(vec!["a".into(), "b".into()]);
        assert_eq!(listing.to_string(), "a\nb");
        assert!(!listing.is_empty());
    }

    #[test]
    fn test_format_state_colors() {
        let f = color_formatter();
        assert_eq!(f.format_state("open", "open", Layer::Fg), "\x1b[32mopen\x1b[39m");
        assert_eq!(f.format_state("closed", "closed", Layer::Fg), "\x1b[31mclosed\x1b[39m");
        assert_eq!(
            f.format_state("closed", " closed ", Layer::Bg),
            "\x1b[37;41m closed \x1b[39;49m"
        );
    }

    #[test]
    fn test_format_labels_empty_is_none() {
        assert_eq!(plain_formatter().format_labels(&[]), None);
    }

    #[test]
    fn test_format_labels_plain() {
        let labels = [label("bug", "fc2929"), label("help wanted", "159818")];
        assert_eq!(
            plain_formatter().format_labels(&labels).as_deref(),
            Some("[bug] [help wanted]")
        );
    }

    #[test]
    fn test_format_labels_colored() {
        let labels = [label("bug", "fc2929")];
        let rendered = color_formatter().format_labels(&labels).unwrap();
        assert!(rendered.starts_with("\x1b[37;48;5;"));
        assert!(rendered.contains(" bug "));
    }

    #[test]
    fn test_format_labels_bad_color_still_renders_tag() {
        let labels = [label("odd", "not-a-color")];
        assert_eq!(
            color_formatter().format_labels(&labels).as_deref(),
            Some(" odd ")
        );
    }

    #[test]
    fn test_highlight_mentions_only_current_user() {
        let f = color_formatter();
        let out = f.highlight_mentions("cc @alice @bob");
        assert!(out.contains("\x1b[33m@alice\x1b[39m"));
        assert!(out.ends_with(" @bob"));
    }

    #[test]
    fn test_highlight_mentions_without_user() {
        let f = Formatter::new(Styler::new(true)).with_current_user(Some(String::new()));
        assert_eq!(f.highlight_mentions("cc @alice"), "cc @alice");
        assert_eq!(f.current_user(), None);
    }

    #[test]
    fn test_you() {
        let f = plain_formatter();
        assert_eq!(f.you("alice"), "you");
        assert_eq!(f.you("bob"), "bob");
    }

    #[test]
    fn test_collapse_trailing_blank_lines() {
        assert_eq!(collapse_trailing_blank_lines("a\n\n\n\n".into()), "a\n\n");
        assert_eq!(collapse_trailing_blank_lines("a\n".into()), "a\n");
        assert_eq!(collapse_trailing_blank_lines("a\n\n\nb\n".into()), "a\n\n\nb\n");
    }
}
