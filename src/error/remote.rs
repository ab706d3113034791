//! RPC and upload stream failures.

use thiserror::Error;

/// Failure talking to the remote service.
///
/// Messages are kept to a single line so they can be shown to the user
/// without leaking transport internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Credentials were rejected or the user does not exist.
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// The request never got a response (refused, reset, timed out).
    #[error("Connection failed: {message}")]
    Transport { message: String },

    /// The service answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Invalid response: {message}")]
    Decode { message: String },

    /// The upload stream was closed before the final acknowledgment.
    #[error("Upload stream closed unexpectedly")]
    StreamClosed,

    /// Reading the local source failed mid-transfer.
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl RemoteError {
    /// Short code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            RemoteError::Auth { .. } => "REMOTE_AUTH",
            RemoteError::Transport { .. } => "REMOTE_TRANSPORT",
            RemoteError::Status { .. } => "REMOTE_STATUS",
            RemoteError::Decode { .. } => "REMOTE_DECODE",
            RemoteError::StreamClosed => "REMOTE_STREAM_CLOSED",
            RemoteError::Io { .. } => "REMOTE_IO",
        }
    }

    /// One-line description for the user.
    pub fn user_message(&self) -> String {
        match self {
            RemoteError::Auth { message } => format!("Authentication failed: {}", first_line(message)),
            RemoteError::Transport { .. } => {
                "Unable to reach the server. Please check that it is running.".to_string()
            }
            RemoteError::Status { status, message } => match *status {
                400 => format!("The request was rejected: {}", first_line(message)),
                500..=599 => "The server is experiencing issues. Please try again later.".to_string(),
                _ => format!("The server returned an error (HTTP {})", status),
            },
            RemoteError::Decode { .. } => "The server sent an unexpected response.".to_string(),
            RemoteError::StreamClosed => "The upload was interrupted by the server.".to_string(),
            RemoteError::Io { message } => format!("Could not read the file: {}", first_line(message)),
        }
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            RemoteError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            RemoteError::Decode {
                message: err.to_string(),
            }
        } else {
            RemoteError::Transport {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for RemoteError {
    fn from(err: std::io::Error) -> Self {
        RemoteError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            RemoteError::Status {
                status: 500,
                message: "boom".to_string()
            }
            .to_string(),
            "Server error (500): boom"
        );
        assert_eq!(
            RemoteError::StreamClosed.to_string(),
            "Upload stream closed unexpectedly"
        );
    }

    #[test]
    fn test_user_message_is_single_line() {
        let err = RemoteError::Auth {
            message: "invalid password\nstack trace follows".to_string(),
        };
        assert_eq!(err.user_message(), "Authentication failed: invalid password");

        let err = RemoteError::Transport {
            message: "tcp connect error: Connection refused (os error 111)".to_string(),
        };
        assert!(!err.user_message().contains("os error"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: RemoteError = io.into();
        assert!(matches!(err, RemoteError::Io { .. }));
        assert_eq!(err.error_code(), "REMOTE_IO");
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RemoteError = json_err.into();
        assert!(matches!(err, RemoteError::Decode { .. }));
    }
}
