//! Precondition failures.

use thiserror::Error;

/// Bytes in one mebibyte, used when formatting file sizes.
const MIB: f64 = 1024.0 * 1024.0;

/// A precondition that failed before any background work was started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One or more required form fields were left empty.
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please choose a file to upload")]
    EmptyFilePath,

    #[error("Please enter a title")]
    EmptyTitle,

    #[error("File does not exist: {path}")]
    FileNotFound { path: String },

    #[error("Cannot access file {path}: {message}")]
    FileUnreadable { path: String, message: String },

    #[error("File too large: {:.2} MB (max {:.0} MB)", *size as f64 / MIB, *limit as f64 / MIB)]
    FileTooLarge { size: u64, limit: u64 },

    #[error("No user logged in")]
    NotLoggedIn,

    #[error("Remote client not initialized")]
    NoClient,
}

impl ValidationError {
    /// Short code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "VAL_MISSING_FIELDS",
            ValidationError::EmptyFilePath => "VAL_EMPTY_PATH",
            ValidationError::EmptyTitle => "VAL_EMPTY_TITLE",
            ValidationError::FileNotFound { .. } => "VAL_FILE_NOT_FOUND",
            ValidationError::FileUnreadable { .. } => "VAL_FILE_UNREADABLE",
            ValidationError::FileTooLarge { .. } => "VAL_FILE_TOO_LARGE",
            ValidationError::NotLoggedIn => "VAL_NOT_LOGGED_IN",
            ValidationError::NoClient => "VAL_NO_CLIENT",
        }
    }
}
