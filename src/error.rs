//! Error types for configuration and trace files.
//!
//! The input pipeline itself never fails; these cover the file-facing edges.

use thiserror::Error;

/// Errors that can occur while loading, saving or watching the config file
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Values that parse but cannot be used
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// File watcher could not be set up
    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

/// Result type alias for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading a replay trace
#[derive(Error, Debug)]
pub enum TraceError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A line that is not a valid trace record
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for trace operations
pub type TraceResult<T> = Result<T, TraceError>;

impl From<String> for ConfigError {
    fn from(s: String) -> Self {
        ConfigError::Invalid(s)
    }
}

impl From<&str> for ConfigError {
    fn from(s: &str) -> Self {
        ConfigError::Invalid(s.to_string())
    }
}
