//! Unified error type for the application.

use thiserror::Error;

use super::category::ErrorCategory;
use super::connection::ConnectionError;
use super::remote::RemoteError;
use super::validation::ValidationError;

/// Any runtime error the application can observe.
///
/// Internal invariant violations are not represented here; they are
/// prevented by construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),
}

impl AppError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::Validation(_) => ErrorCategory::Validation,
            AppError::Remote(_) => ErrorCategory::Remote,
            AppError::Connection(_) => ErrorCategory::Connection,
        }
    }

    /// Short, human readable description for the message overlay.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(err) => err.to_string(),
            AppError::Remote(err) => err.user_message(),
            AppError::Connection(_) => "Notification connection lost".to_string(),
        }
    }

    /// Short code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(err) => err.error_code(),
            AppError::Remote(err) => err.error_code(),
            AppError::Connection(err) => err.error_code(),
        }
    }
}

/// Result alias used across the crate.
pub type AppResult<T> = Result<T, AppError>;
