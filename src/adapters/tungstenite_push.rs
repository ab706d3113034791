//! Tungstenite-based push adapter.
//!
//! Dials the notification endpoint with tokio-tungstenite and yields text
//! frames. Binary frames are decoded lossily; control frames are skipped.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

use crate::error::ConnectionError;
use crate::traits::{PushConnector, PushStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Push connector using tokio-tungstenite.
///
/// # Example
///
/// ```ignore
/// use codek7::adapters::TungsteniteConnector;
/// use codek7::traits::PushConnector;
///
/// let mut stream = TungsteniteConnector::new().dial("ws://localhost:8080/ws/u-1").await?;
/// while let Some(Ok(text)) = stream.recv().await {
///     println!("{}", text);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TungsteniteConnector;

impl TungsteniteConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PushConnector for TungsteniteConnector {
    async fn dial(&self, url: &str) -> Result<Box<dyn PushStream>, ConnectionError> {
        info!("Connecting to push endpoint: {}", url);
        let (ws, _response) = connect_async(url).await.map_err(|e| match e {
            WsError::Url(e) => ConnectionError::InvalidEndpoint(e.to_string()),
            other => ConnectionError::Dial(other.to_string()),
        })?;

        Ok(Box::new(TungstenitePushStream { ws, closed: false }))
    }
}

/// One open push socket.
pub struct TungstenitePushStream {
    ws: WsStream,
    closed: bool,
}

#[async_trait]
impl PushStream for TungstenitePushStream {
    async fn recv(&mut self) -> Option<Result<String, ConnectionError>> {
        if self.closed {
            return None;
        }

        loop {
            match self.ws.next().await? {
                Ok(Message::Text(text)) => return Some(Ok(text)),
                Ok(Message::Binary(data)) => {
                    return Some(Ok(String::from_utf8_lossy(&data).into_owned()))
                }
                // tungstenite queues the pong reply itself
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => continue,
                Ok(Message::Close(frame)) => {
                    debug!("Push endpoint closed the connection: {:?}", frame);
                    self.closed = true;
                    return None;
                }
                Err(WsError::ConnectionClosed) | Err(WsError::AlreadyClosed) => {
                    self.closed = true;
                    return None;
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = self.ws.close(None).await {
            debug!("Error closing push socket: {}", e);
        }
        // flush the close frame
        let _ = self.ws.flush().await;
    }
}
