//! Push endpoint trait abstraction.
//!
//! Splits dialing from reading so the notification channel can count dials
//! and tests can inject frames without a socket.

use async_trait::async_trait;

use crate::error::ConnectionError;

/// Opens push connections.
#[async_trait]
pub trait PushConnector: Send + Sync {
    /// Dial the push endpoint at `url`.
    async fn dial(&self, url: &str) -> Result<Box<dyn PushStream>, ConnectionError>;
}

/// One live push connection, owned exclusively by its read loop.
#[async_trait]
pub trait PushStream: Send {
    /// Receive the next text frame.
    ///
    /// Returns `None` once the remote has closed the connection.
    async fn recv(&mut self) -> Option<Result<String, ConnectionError>>;

    /// Close the connection. Safe to call more than once.
    async fn close(&mut self);
}
