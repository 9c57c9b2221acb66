//! Board Errors
//!
//! Error type shared by the board store, layout persistence and task service.

use serde::{Deserialize, Serialize};

/// Common result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;

/// Board-level errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardError {
    NotFound(String),
    InvalidInput(String),
    /// Task service rejected or never answered a request
    Request(String),
    Storage(String),
    /// Persisted column layout could not be decoded
    Layout(String),
}

impl BoardError {
    /// The bare message, without the category prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            BoardError::NotFound(msg)
            | BoardError::InvalidInput(msg)
            | BoardError::Request(msg)
            | BoardError::Storage(msg)
            | BoardError::Layout(msg) => msg,
        }
    }
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::NotFound(msg) => write!(f, "Not found: {}", msg),
            BoardError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            BoardError::Request(msg) => write!(f, "Request failed: {}", msg),
            BoardError::Storage(msg) => write!(f, "Storage error: {}", msg),
            BoardError::Layout(msg) => write!(f, "Invalid column layout: {}", msg),
        }
    }
}

impl std::error::Error for BoardError {}
