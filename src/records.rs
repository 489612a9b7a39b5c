//! Typed issue, comment and milestone records.
//!
//! Records arrive as GitHub REST JSON and are validated once, when they are
//! deserialized. Required fields missing from the payload fail there with a
//! diagnostic naming the field; optional fields that are absent or `null`
//! become `None` or an empty list.

use crate::error::{GhiError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::LazyLock;

static REPO_IN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/repos/[^/]+/([^/]+)").expect("valid repo url pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Open,
    Closed,
}

impl State {
    pub fn as_str(self) -> &'static str {
        match self {
            State::Open => "open",
            State::Closed => "closed",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    pub name: String,
    /// Hex color without the leading `#`, as GitHub sends it.
    #[serde(default)]
    pub color: Option<String>,
}

/// Links present on issues that are pull requests.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct PullRequestLinks {
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub state: State,
    pub user: User,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub assignee: Option<User>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub pull_request: Option<PullRequestLinks>,
}

impl Issue {
    /// Repository name taken from the API url (`.../repos/<owner>/<name>/...`).
    pub fn repo_name(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        REPO_IN_URL
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    pub fn is_pull_request(&self) -> bool {
        self.pull_request
            .as_ref()
            .is_some_and(|pr| pr.html_url.is_some())
    }

    pub fn is_assigned_to(&self, login: Option<&str>) -> bool {
        match (login, &self.assignee) {
            (Some(login), Some(assignee)) => !login.is_empty() && assignee.login == login,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub user: User,
    pub created_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub state: State,
    pub creator: User,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Milestone {
    /// A milestone is overdue once its due date is at or before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_on.is_some_and(|due| due <= now)
    }
}

/// Timestamp as GitHub prints it, e.g. `2024-03-01T12:00:00Z`.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Record kinds the loader knows how to name in diagnostics.
pub trait RecordKind: DeserializeOwned {
    const KIND: &'static str;
}

impl RecordKind for Issue {
    const KIND: &'static str = "issue";
}

impl RecordKind for Comment {
    const KIND: &'static str = "comment";
}

impl RecordKind for Milestone {
    const KIND: &'static str = "milestone";
}

/// Parse a single record.
pub fn parse_one<T: RecordKind>(json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|source| GhiError::InvalidRecord {
        kind: T::KIND,
        source,
    })
}

/// Parse a JSON array of records.
pub fn parse_many<T: RecordKind>(json: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| GhiError::InvalidRecord {
        kind: T::KIND,
        source,
    })
}
