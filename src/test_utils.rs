//! Test utilities shared across modules.
//!
//! Record builders with sensible defaults, formatters pinned to an 80 column
//! layout, and an in-memory writer that can be handed to a spinner thread.

use crate::format::Formatter;
use crate::records::{Comment, Issue, Label, Milestone, State, User};
use crate::style::Styler;
use crate::terminal::LayoutWidth;
use chrono::{DateTime, TimeZone, Utc};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

pub fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn user(login: &str) -> User {
    User {
        login: login.to_string(),
    }
}

pub fn label(name: &str, color: &str) -> Label {
    Label {
        name: name.to_string(),
        color: Some(color.to_string()),
    }
}

pub fn issue(number: u64, title: &str) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        state: State::Open,
        user: user("alice"),
        created_at: created(),
        url: None,
        assignee: None,
        labels: Vec::new(),
        body: None,
        pull_request: None,
    }
}

pub fn comment(login: &str, body: &str) -> Comment {
    Comment {
        user: user(login),
        created_at: created(),
        body: body.to_string(),
    }
}

pub fn milestone(number: u64, title: &str, due_on: Option<DateTime<Utc>>) -> Milestone {
    Milestone {
        number,
        title: title.to_string(),
        state: State::Open,
        creator: user("alice"),
        created_at: created(),
        due_on,
        description: None,
    }
}

/// Formatter without color, 80 columns wide, logged in as `alice`.
pub fn plain_formatter() -> Formatter {
    Formatter::new(Styler::plain())
        .with_width(LayoutWidth::Fixed(80))
        .with_current_user(Some("alice".to_string()))
}

/// Formatter with color, 80 columns wide, logged in as `alice`.
pub fn color_formatter() -> Formatter {
    Formatter::new(Styler::new(true))
        .with_width(LayoutWidth::Fixed(80))
        .with_current_user(Some("alice".to_string()))
}

/// Clonable in-memory writer; every clone appends to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
