//! Error handling for histscrub
//!
//! File-level errors abort processing of one history file and propagate to
//! the caller. Record-level errors only ever drop a single command record.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for histscrub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a command line cannot be split into shell words
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("unterminated single-quoted string")]
    UnterminatedSingleQuote,

    #[error("unterminated double-quoted string")]
    UnterminatedDoubleQuote,

    #[error("unterminated backslash escape")]
    UnterminatedEscape,
}

/// Main error type for histscrub operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// History file not found
    #[error("History file not found: {path}")]
    HistoryFileNotFound { path: PathBuf },

    /// Home directory could not be determined
    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// Invalid command line arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {field} - {reason}")]
    ConfigValidation { field: String, reason: String },

    /// Command line could not be tokenized
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Timestamp header or marker did not hold a valid epoch
    #[error("Invalid timestamp format: {timestamp}")]
    InvalidTimestamp { timestamp: String },

    /// A declared option that takes a value had none
    #[error("Option {option} is missing its argument")]
    MissingOptionArgument { option: String },

    /// Nothing left to redact after tokenization
    #[error("Empty command line")]
    EmptyCommand,

    /// Record lines do not have the shape their dialect requires
    #[error("Invalid history record: {reason}")]
    InvalidRecord { reason: String },
}

impl Error {
    /// Create an invalid arguments error
    pub fn invalid_arguments<S: Into<String>>(message: S) -> Self {
        Error::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create a config validation error
    pub fn config_validation<S: Into<String>>(field: S, reason: S) -> Self {
        Error::ConfigValidation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error only invalidates a single history record
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            Error::Parse(_)
                | Error::InvalidTimestamp { .. }
                | Error::MissingOptionArgument { .. }
                | Error::EmptyCommand
                | Error::InvalidRecord { .. }
        )
    }

    /// Get the error category for logging purposes
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Json(_) => "json",
            Error::HistoryFileNotFound { .. } => "history",
            Error::HomeDirectoryNotFound => "system",
            Error::InvalidArguments { .. } => "arguments",
            Error::ConfigValidation { .. } => "config",
            Error::Parse(_) => "tokenize",
            Error::InvalidTimestamp { .. } => "timestamp",
            Error::InvalidRecord { .. } => "history",
            Error::MissingOptionArgument { .. } | Error::EmptyCommand => "redaction",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_invalid_arguments_error() {
        let err = Error::invalid_arguments("no history file");
        assert_eq!(err.to_string(), "Invalid arguments: no history file");
        assert_eq!(err.category(), "arguments");
        assert!(!err.is_record_level());
    }

    #[test]
    fn test_config_validation_error() {
        let err = Error::config_validation("preview.lines", "must be greater than 0");
        assert_eq!(
            err.to_string(),
            "Configuration validation failed: preview.lines - must be greater than 0"
        );
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_history_file_not_found() {
        let path = Path::new("/nonexistent/.bash_history").to_path_buf();
        let err = Error::HistoryFileNotFound { path: path.clone() };
        assert_eq!(
            err.to_string(),
            format!("History file not found: {}", path.display())
        );
        assert_eq!(err.category(), "history");
        assert!(!err.is_record_level());
    }

    #[test]
    fn test_parse_error_is_record_level() {
        let err: Error = ParseError::UnterminatedDoubleQuote.into();
        assert_eq!(
            err.to_string(),
            "Parse error: unterminated double-quoted string"
        );
        assert_eq!(err.category(), "tokenize");
        assert!(err.is_record_level());
    }

    #[test]
    fn test_record_level_errors() {
        assert!(Error::EmptyCommand.is_record_level());
        assert!(
            Error::MissingOptionArgument {
                option: "output".to_string()
            }
            .is_record_level()
        );
        assert!(
            Error::InvalidTimestamp {
                timestamp: "abc".to_string()
            }
            .is_record_level()
        );
        let record = Error::InvalidRecord {
            reason: "fish entry does not start with `- cmd:`".to_string(),
        };
        assert!(record.is_record_level());
        assert_eq!(record.category(), "history");
        let io = Error::Io(io::Error::other("disk gone"));
        assert!(!io.is_record_level());
    }
}
