//! Mock push connector for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::error::ConnectionError;
use crate::traits::{PushConnector, PushStream};

type Frame = Result<String, ConnectionError>;

struct Connection {
    tx: Option<mpsc::UnboundedSender<Frame>>,
    closed: Arc<AtomicBool>,
}

#[derive(Default)]
struct Inner {
    dialed: Vec<String>,
    connections: Vec<Connection>,
    failure: Option<ConnectionError>,
    dial_delay: Option<Duration>,
}

/// Mock push connector with frame injection.
///
/// Every successful dial opens a new in-memory connection. The `push_*`
/// methods and [`hang_up`](Self::hang_up) act on the most recent one.
#[derive(Clone, Default)]
pub struct MockPushConnector {
    inner: Arc<Mutex<Inner>>,
}

impl MockPushConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose every dial fails with `err`.
    pub fn failing(err: ConnectionError) -> Self {
        let connector = Self::new();
        connector.lock().failure = Some(err);
        connector
    }

    /// Hold every dial open for `delay` before it resolves.
    pub fn with_dial_delay(self, delay: Duration) -> Self {
        self.lock().dial_delay = Some(delay);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// URLs dialed so far, including failed attempts.
    pub fn dialed_urls(&self) -> Vec<String> {
        self.lock().dialed.clone()
    }

    pub fn dial_count(&self) -> usize {
        self.lock().dialed.len()
    }

    /// Connections opened and not yet closed by the client.
    pub fn open_connections(&self) -> usize {
        self.lock()
            .connections
            .iter()
            .filter(|c| !c.closed.load(Ordering::SeqCst))
            .count()
    }

    /// Whether the client closed connection `index` (0-based, in dial order).
    pub fn was_closed(&self, index: usize) -> bool {
        self.lock()
            .connections
            .get(index)
            .map(|c| c.closed.load(Ordering::SeqCst))
            .unwrap_or(false)
    }

    fn deliver(&self, frame: Frame) -> bool {
        let inner = self.lock();
        match inner.connections.last().and_then(|c| c.tx.as_ref()) {
            Some(tx) => tx.send(frame).is_ok(),
            None => false,
        }
    }

    /// Deliver a text frame. Returns false if no connection is listening.
    pub fn push_text(&self, text: &str) -> bool {
        self.deliver(Ok(text.to_string()))
    }

    /// Deliver a read error.
    pub fn push_error(&self, err: ConnectionError) -> bool {
        self.deliver(Err(err))
    }

    /// Close the latest connection from the server side.
    pub fn hang_up(&self) {
        if let Some(conn) = self.lock().connections.last_mut() {
            conn.tx = None;
        }
    }
}

#[async_trait]
impl PushConnector for MockPushConnector {
    async fn dial(&self, url: &str) -> Result<Box<dyn PushStream>, ConnectionError> {
        let delay = {
            let mut inner = self.lock();
            inner.dialed.push(url.to_string());
            inner.dial_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.lock();
        if let Some(err) = &inner.failure {
            return Err(err.clone());
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let closed = Arc::new(AtomicBool::new(false));
        inner.connections.push(Connection {
            tx: Some(tx),
            closed: closed.clone(),
        });
        Ok(Box::new(MockPushStream { rx, closed }))
    }
}

struct MockPushStream {
    rx: mpsc::UnboundedReceiver<Frame>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl PushStream for MockPushStream {
    async fn recv(&mut self) -> Option<Frame> {
        if self.closed.load(Ordering::SeqCst) {
            return None;
        }
        self.rx.recv().await
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
        self.rx.close();
    }
}
