//! Error types for tender-board
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (unknown task or lane, bad seed/config)
//! - 4: Operation failed (IO, serialization, terminal)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the tender-board CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for tender-board operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Task not found: {0}")]
    TaskNotFound(u32),

    #[error("Unknown lane: {0} (expected to-do|in-progress|not-started|completed)")]
    UnknownLane(String),

    #[error("Invalid seed file {path}: {message}")]
    InvalidSeed { path: PathBuf, message: String },

    #[error("Duplicate task id: {0}")]
    DuplicateTaskId(u32),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_)
            | Error::TaskNotFound(_)
            | Error::UnknownLane(_)
            | Error::InvalidSeed { .. }
            | Error::DuplicateTaskId(_) => exit_codes::USER_ERROR,

            Error::Io(_)
            | Error::Json(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        }
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::TaskNotFound(id) => Some(serde_json::json!({ "id": id })),
            Error::UnknownLane(lane) => Some(serde_json::json!({ "lane": lane })),
            Error::DuplicateTaskId(id) => Some(serde_json::json!({ "id": id })),
            Error::InvalidSeed { path, message } => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "message": message,
            })),
            Error::InvalidConfig(message) => Some(serde_json::json!({ "message": message })),
            _ => None,
        }
    }
}

/// Result type alias for tender-board operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error body of the JSON error envelope
#[derive(serde::Serialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}
