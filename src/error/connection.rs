//! Push channel failures.

use thiserror::Error;

/// Failure on the notification socket. Never shown as an interrupt; the
/// channel logs it and returns to disconnected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("Invalid notification endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Dial failed: {0}")]
    Dial(String),

    #[error("Read failed: {0}")]
    Read(String),
}

impl ConnectionError {
    /// Short code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConnectionError::InvalidEndpoint(_) => "CONN_INVALID_ENDPOINT",
            ConnectionError::Dial(_) => "CONN_DIAL",
            ConnectionError::Read(_) => "CONN_READ",
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for ConnectionError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        use tokio_tungstenite::tungstenite::Error as WsError;
        match err {
            WsError::Url(e) => ConnectionError::InvalidEndpoint(e.to_string()),
            other => ConnectionError::Read(other.to_string()),
        }
    }
}
