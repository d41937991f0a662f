//! Error types and handling infrastructure for tabless.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should provide actionable feedback
//! - **Context preservation**: Include relevant information for debugging
//! - **Graceful degradation**: Only a missing or unreadable file is fatal;
//!   sniffing and decoding failures recover locally
//! - **Consistency**: Standardized Result type across all modules

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tabless operations.
///
/// This enum covers all possible error conditions that can occur during
/// file handling, dialect sniffing, row parsing, and UI interactions.
#[derive(Error, Debug)]
pub enum TablessError {
    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// Dialect sniffing could not determine a delimiter from the sample.
    /// Recoverable: callers fall back to the default dialect.
    #[error("Dialect sniffing failed: {message}")]
    SniffError { message: String },

    /// Row-level parse errors surfaced by the underlying reader
    #[error("Parse error: {message}")]
    ParseError { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Invalid command line arguments
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for tabless operations.
///
/// This type alias provides a consistent error handling interface across
/// all modules in the tabless codebase.
pub type Result<T> = std::result::Result<T, TablessError>;

impl TablessError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a SniffError with a descriptive message
    pub fn sniff(message: impl Into<String>) -> Self {
        Self::SniffError {
            message: message.into(),
        }
    }

    /// Create a ParseError with a descriptive message
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to TablessError
impl From<std::io::Error> for TablessError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                // The specific path is added at the call site when known
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

// Row-level reader errors map to ParseError; the feeder decides whether
// they stop the load.
impl From<csv::Error> for TablessError {
    fn from(err: csv::Error) -> Self {
        Self::ParseError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_messages() {
        let path = PathBuf::from("/test/data.csv");

        let file_not_found = TablessError::FileNotFound { path: path.clone() };
        assert_eq!(file_not_found.to_string(), "File not found: /test/data.csv");

        let not_a_file = TablessError::NotAFile { path: path.clone() };
        assert_eq!(
            not_a_file.to_string(),
            "Path is not a regular file: /test/data.csv"
        );

        let sniff_error = TablessError::sniff("no candidate delimiter");
        assert_eq!(
            sniff_error.to_string(),
            "Dialect sniffing failed: no candidate delimiter"
        );
    }

    #[test]
    fn test_error_constructors() {
        let parse_err = TablessError::parse("unterminated quote");
        assert!(matches!(parse_err, TablessError::ParseError { .. }));

        let ui_err = TablessError::ui("Terminal resize failed");
        assert!(matches!(ui_err, TablessError::UIError { .. }));

        let arg_err = TablessError::invalid_argument("bad geometry");
        assert!(matches!(arg_err, TablessError::InvalidArgument { .. }));

        let other_err = TablessError::other("Unknown error");
        assert!(matches!(other_err, TablessError::Other { .. }));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let tabless_err: TablessError = io_err.into();

        match tabless_err {
            TablessError::FileError { message, .. } => {
                assert_eq!(message, "File not found");
            }
            _ => panic!("Expected FileError variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        let result = returns_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
    }
}
