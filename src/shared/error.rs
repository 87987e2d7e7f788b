use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish argument mistakes from
/// failures that happened while resolving the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the visible graph was resolved and presented
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (payload error, malformed key in strict mode, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for deep dependency graph resolution.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// `MalformedKey` is the only variant the resolution core itself produces;
/// the rest belong to the payload, navigation and output edges of the tool.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DdgError {
    #[error("Malformed visibility key: {key:?}\nReason: {reason}\n\n💡 Hint: Drop the visibilityKey parameter to fall back to the default view")]
    MalformedKey { key: String, reason: String },

    #[error("DDG payload file not found: {path}\n\n💡 Hint: {suggestion}")]
    PayloadNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse DDG payload: {path}\nDetails: {details}\n\n💡 Hint: The payload must be a JSON array of paths, each an array of {{\"service\", \"operation\"}} objects")]
    PayloadParseError { path: PathBuf, details: String },

    #[error("Payload path #{path_index} does not contain the focal node {service}::{operation}\n\n💡 Hint: Every path must pass through the focal operation; check --service and --operation")]
    FocalNodeMissing {
        path_index: usize,
        service: String,
        operation: String,
    },

    #[error("DDG payload contains no paths\n\n💡 Hint: The payload must contain at least one path through the focal operation")]
    EmptyPayload,

    #[error("Invalid DDG model: {reason}")]
    InvalidModel { reason: String },

    #[error("Invalid navigation query: {query:?}\nReason: {reason}")]
    InvalidNavigationQuery { query: String, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for user supplied values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl DdgError {
    pub fn malformed_key(key: &str, reason: impl Into<String>) -> Self {
        DdgError::MalformedKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_malformed_key(&self) -> bool {
        matches!(self, DdgError::MalformedKey { .. })
    }
}
