//! Error types for qs-core

use thiserror::Error;

/// Core error type for QueryShape
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {0}")]
    ConfigParseError(#[from] serde_yaml::Error),

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: IO error with file path context
    #[error("[C004] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
