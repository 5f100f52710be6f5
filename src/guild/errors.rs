use std::fmt;

use thiserror::Error;

/// Which kind of keyed record an operation referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Member,
    Quest,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Member => write!(f, "Member"),
            RecordKind::Quest => write!(f, "Quest"),
        }
    }
}

/// Errors raised while reading or writing the guild data file.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Wrapper around IO errors (open, lock, write, rename).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON encoding and decoding errors.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by guild store operations. None of them are fatal.
#[derive(Debug, Error)]
pub enum GuildError {
    /// Caller-supplied text failed a precondition (empty after trimming).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Returned when the named member or quest does not exist.
    #[error("{kind} '{name}' not found")]
    NotFound { kind: RecordKind, name: String },

    /// The change was applied in memory but could not be written to disk.
    #[error("could not save guild data: {0}")]
    Persistence(#[from] PersistenceError),
}

impl GuildError {
    pub fn not_found(kind: RecordKind, name: &str) -> Self {
        GuildError::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GuildError::NotFound { .. })
    }
}
