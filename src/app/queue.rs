//! Work queue from background tasks to the render loop.
//!
//! Background tasks never touch the [`App`](super::App). They mutate
//! [`SharedState`](crate::state::SharedState) and post an [`AppMessage`];
//! the render loop drains the receiving end on its own turn and is the only
//! place where screen state changes.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::AppMessage;

/// Cloneable sending half of the UI queue.
#[derive(Debug, Clone)]
pub struct UiQueue {
    tx: mpsc::UnboundedSender<AppMessage>,
}

impl UiQueue {
    /// Create a queue and the receiver the render loop drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AppMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue a message for the render loop.
    ///
    /// Returns false once the render loop has gone away; the message is
    /// dropped in that case.
    pub fn post(&self, msg: AppMessage) -> bool {
        match self.tx.send(msg) {
            Ok(()) => true,
            Err(e) => {
                debug!("UI queue closed, dropping {:?}", e.0);
                false
            }
        }
    }

    /// Enqueue a message after `delay` without blocking the caller.
    pub fn post_after(&self, delay: Duration, msg: AppMessage) {
        let queue = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            queue.post(msg);
        });
    }

    /// Whether the render loop is still receiving.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_delivers_in_order() {
        let (queue, mut rx) = UiQueue::channel();
        assert!(queue.post(AppMessage::ShowMessage("one".to_string())));
        assert!(queue.post(AppMessage::ShowMessage("two".to_string())));

        match rx.try_recv() {
            Ok(AppMessage::ShowMessage(text)) => assert_eq!(text, "one"),
            other => panic!("Expected first message, got {:?}", other),
        }
        match rx.try_recv() {
            Ok(AppMessage::ShowMessage(text)) => assert_eq!(text, "two"),
            other => panic!("Expected second message, got {:?}", other),
        }
    }

    #[test]
    fn test_post_after_receiver_dropped() {
        let (queue, rx) = UiQueue::channel();
        drop(rx);
        assert!(!queue.is_open());
        assert!(!queue.post(AppMessage::ReturnToDashboard));
    }

    #[tokio::test]
    async fn test_post_after_delay() {
        let (queue, mut rx) = UiQueue::channel();
        queue.post_after(Duration::from_millis(20), AppMessage::ReturnToDashboard);

        assert!(rx.try_recv().is_err());
        let msg = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("delayed message should arrive");
        assert!(matches!(msg, Some(AppMessage::ReturnToDashboard)));
    }
}
