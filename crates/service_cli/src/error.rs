//! CLI error types

use billing_core::types::DateError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `billcycle` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to parse subscriptions file {path}: {message}")]
    Subscriptions { path: String, message: String },

    #[error("{count} invalid subscription record(s)")]
    InvalidSubscriptions { count: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Date(#[from] DateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::FileNotFound("subs.toml".to_string());
        assert_eq!(err.to_string(), "File not found: subs.toml");

        let err = CliError::InvalidSubscriptions { count: 2 };
        assert_eq!(err.to_string(), "2 invalid subscription record(s)");
    }

    #[test]
    fn test_date_error_is_transparent() {
        let err: CliError = DateError::ParseError("2024-13-01".to_string()).into();
        assert_eq!(err.to_string(), "Date parse error: 2024-13-01");
    }
}
