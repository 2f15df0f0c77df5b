//! Error types for settings loading and watching.
//!
//! Canvas operations themselves never fail: bad ids, duplicate connections
//! and undersized resizes all degrade to no-ops. Only the ambient file work
//! around the canvas can error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher could not be created or attached
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    /// Settings parsed but hold an unusable value
    #[error("Invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
