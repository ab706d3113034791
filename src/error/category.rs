//! Error category classification.
//!
//! Every runtime error belongs to one of three classes, and the class alone
//! decides how the application reacts to it.

use std::fmt;

/// High-level classification of a runtime error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Precondition failure caught before any background work starts.
    /// Reported to the user, fully recoverable.
    Validation,

    /// RPC or upload stream failure. Reported to the user; state keeps its
    /// last-known-good value.
    Remote,

    /// Push socket dial or read failure. Logged only; the channel falls back
    /// to disconnected and waits for an explicit reconnect.
    Connection,
}

impl ErrorCategory {
    /// Short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Remote => "remote",
            ErrorCategory::Connection => "connection",
        }
    }

    /// Whether errors of this category should interrupt the user with a message.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ErrorCategory::Connection)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Validation.as_str(), "validation");
        assert_eq!(ErrorCategory::Remote.as_str(), "remote");
        assert_eq!(ErrorCategory::Connection.as_str(), "connection");
    }

    #[test]
    fn test_connection_errors_are_silent() {
        assert!(ErrorCategory::Validation.is_user_facing());
        assert!(ErrorCategory::Remote.is_user_facing());
        assert!(!ErrorCategory::Connection.is_user_facing());
    }

    #[test]
    fn test_display_matches_label() {
        assert_eq!(ErrorCategory::Remote.to_string(), "remote");
    }
}
