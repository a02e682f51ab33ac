//! Error types for hugnin.
//!
//! Every fallible operation in the crate returns [`NoteResult`]. Errors are
//! never handled locally; they propagate to the binary, which maps them to an
//! exit code with [`NoteError::exit_code`].

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for note operations
pub type NoteResult<T> = Result<T, NoteError>;

/// Main error type for note operations
#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database not initialized at {}: run `hugnin init` first", .0.display())]
    NotInitialized(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NoteError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        NoteError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        NoteError::Config(message.into())
    }

    /// Process exit code for this error kind.
    ///
    /// 2 for bad input, 3 for an unusable environment (missing database,
    /// broken config), 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            NoteError::Validation { .. } => 2,
            NoteError::NotInitialized(_) | NoteError::Config(_) => 3,
            NoteError::Database(_) | NoteError::Io(_) | NoteError::Json(_) => 1,
        }
    }
}
