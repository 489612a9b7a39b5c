use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GhiError {
    #[error("Invalid {kind} record: {source}")]
    InvalidRecord {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not read records from {path}: {source}")]
    RecordSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GhiError>;
