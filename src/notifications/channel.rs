//! Notification channel lifecycle.
//!
//! Holds at most one push connection per process. `connect` dials and hands
//! the connection to a read loop running as its own task; the loop pumps
//! decoded notifications into [`SharedState`] and asks the render loop for a
//! redraw through the [`UiQueue`]. Errors end the connection instance only;
//! there is no automatic reconnect.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::app::{AppMessage, UiQueue};
use crate::state::SharedState;
use crate::traits::{PushConnector, PushStream};

use super::frame::decode_frame;

/// Lifecycle of the push connection.
///
/// `Disconnected -> Connecting -> Connected -> Disconnected`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Push endpoint for a user: `<base>/<url-encoded user id>`.
pub fn endpoint_for(base_url: &str, user_id: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(user_id)
    )
}

#[derive(Debug)]
struct Control {
    state: ConnectionState,
    /// Bumped on every dial so a finished read loop cannot clobber the state
    /// of a newer connection.
    generation: u64,
    stop_tx: Option<watch::Sender<bool>>,
}

impl Control {
    fn lock(control: &Mutex<Control>) -> MutexGuard<'_, Control> {
        control.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Manages the process-wide push connection.
pub struct NotificationChannel {
    connector: Arc<dyn PushConnector>,
    base_url: String,
    state: SharedState,
    ui: UiQueue,
    control: Arc<Mutex<Control>>,
}

impl NotificationChannel {
    pub fn new(
        connector: Arc<dyn PushConnector>,
        base_url: impl Into<String>,
        state: SharedState,
        ui: UiQueue,
    ) -> Self {
        Self {
            connector,
            base_url: base_url.into(),
            state,
            ui,
            control: Arc::new(Mutex::new(Control {
                state: ConnectionState::Disconnected,
                generation: 0,
                stop_tx: None,
            })),
        }
    }

    /// Current lifecycle state.
    pub fn connection_state(&self) -> ConnectionState {
        Control::lock(&self.control).state
    }

    pub fn is_connected(&self) -> bool {
        self.connection_state() == ConnectionState::Connected
    }

    /// Open the push connection for `user_id` and start the read loop.
    ///
    /// No-op while already connecting or connected. Dial failures are logged
    /// and leave the channel disconnected; they are never returned to the
    /// caller. Returns the state the channel ends up in.
    pub async fn connect(&self, user_id: &str) -> ConnectionState {
        let generation = {
            let mut control = Control::lock(&self.control);
            if control.state != ConnectionState::Disconnected {
                debug!("Notification channel already {:?}, skipping connect", control.state);
                return control.state;
            }
            control.state = ConnectionState::Connecting;
            control.generation += 1;
            control.generation
        };

        let url = endpoint_for(&self.base_url, user_id);
        info!("Connecting to notification endpoint {}", url);

        let mut stream = match self.connector.dial(&url).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!("Notification connection failed: {}", e);
                let mut control = Control::lock(&self.control);
                if control.generation == generation {
                    control.state = ConnectionState::Disconnected;
                }
                return control.state;
            }
        };

        let (stop_tx, stop_rx) = watch::channel(false);
        let cancelled = {
            let mut control = Control::lock(&self.control);
            if control.generation == generation {
                control.state = ConnectionState::Connected;
                control.stop_tx = Some(stop_tx);
                self.state.set_push_connected(true);
                None
            } else {
                Some(control.state)
            }
        };
        if let Some(current) = cancelled {
            info!("Notification dial cancelled, closing connection");
            stream.close().await;
            return current;
        }
        info!("Notification channel connected");
        self.ui.post(AppMessage::PushConnectionChanged(true));

        let read_loop = ReadLoop {
            control: self.control.clone(),
            generation,
            state: self.state.clone(),
            ui: self.ui.clone(),
        };
        tokio::spawn(read_loop.run(stream, stop_rx));

        ConnectionState::Connected
    }

    /// Stop the read loop and mark the channel disconnected.
    ///
    /// No-op when already disconnected. A dial still in flight is cancelled:
    /// its connection is closed as soon as it opens. The loop may still be
    /// unwinding when this returns, but it appends nothing after observing
    /// the stop signal.
    pub fn disconnect(&self) {
        {
            let mut control = Control::lock(&self.control);
            match control.state {
                ConnectionState::Disconnected => return,
                ConnectionState::Connecting => {
                    control.generation += 1;
                    control.state = ConnectionState::Disconnected;
                    drop(control);
                    info!("Notification dial cancelled");
                    return;
                }
                ConnectionState::Connected => {}
            }
            if let Some(stop_tx) = control.stop_tx.take() {
                let _ = stop_tx.send(true);
            }
            control.state = ConnectionState::Disconnected;
            self.state.set_push_connected(false);
        }
        info!("Notification channel disconnected");
        self.ui.post(AppMessage::PushConnectionChanged(false));
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

struct ReadLoop {
    control: Arc<Mutex<Control>>,
    generation: u64,
    state: SharedState,
    ui: UiQueue,
}

impl ReadLoop {
    async fn run(self, mut stream: Box<dyn PushStream>, mut stop_rx: watch::Receiver<bool>) {
        loop {
            tokio::select! {
                biased;

                // A dropped sender counts as a stop request too.
                _ = stop_rx.changed() => {
                    debug!("Stop signal received, leaving read loop");
                    break;
                }

                frame = stream.recv() => {
                    match frame {
                        Some(Ok(text)) => {
                            if *stop_rx.borrow() {
                                break;
                            }
                            let notification = decode_frame(&text);
                            debug!(
                                kind = %notification.kind,
                                "Notification: {}",
                                notification.message
                            );
                            self.state.append_notification(notification.clone());
                            self.ui.post(AppMessage::NotificationReceived(notification));
                        }
                        Some(Err(e)) => {
                            warn!("Notification read error: {}", e);
                            break;
                        }
                        None => {
                            info!("Notification stream closed by server");
                            break;
                        }
                    }
                }
            }
        }

        stream.close().await;
        self.finish();
    }

    fn finish(self) {
        let mut control = Control::lock(&self.control);
        if control.generation != self.generation || control.state == ConnectionState::Disconnected {
            return;
        }
        control.state = ConnectionState::Disconnected;
        control.stop_tx = None;
        self.state.set_push_connected(false);
        drop(control);
        self.ui.post(AppMessage::PushConnectionChanged(false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockPushConnector;
    use crate::error::ConnectionError;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn channel_with(
        connector: MockPushConnector,
    ) -> (NotificationChannel, SharedState, mpsc::UnboundedReceiver<AppMessage>) {
        let state = SharedState::new();
        let (ui, rx) = UiQueue::channel();
        let channel = NotificationChannel::new(
            Arc::new(connector),
            "ws://localhost:8080/ws",
            state.clone(),
            ui,
        );
        (channel, state, rx)
    }

    async fn wait_for<F: Fn() -> bool>(condition: F) {
        for _ in 0..200 {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("condition not reached in time");
    }

    #[test]
    fn test_endpoint_for() {
        assert_eq!(
            endpoint_for("ws://localhost:8080/ws", "u-1"),
            "ws://localhost:8080/ws/u-1"
        );
        assert_eq!(
            endpoint_for("ws://localhost:8080/ws/", "a b"),
            "ws://localhost:8080/ws/a%20b"
        );
    }

    #[tokio::test]
    async fn test_connect_transitions_to_connected() {
        let connector = MockPushConnector::new();
        let (channel, state, _rx) = channel_with(connector.clone());

        assert_eq!(channel.connection_state(), ConnectionState::Disconnected);
        assert_eq!(channel.connect("u-1").await, ConnectionState::Connected);
        assert!(channel.is_connected());
        assert!(state.is_push_connected());
        assert_eq!(connector.dialed_urls(), vec!["ws://localhost:8080/ws/u-1"]);
    }

    #[tokio::test]
    async fn test_connect_twice_dials_once() {
        let connector = MockPushConnector::new();
        let (channel, _state, _rx) = channel_with(connector.clone());

        channel.connect("u-1").await;
        channel.connect("u-1").await;

        assert_eq!(connector.dial_count(), 1);
        assert_eq!(connector.open_connections(), 1);
        assert!(channel.is_connected());
    }

    #[tokio::test]
    async fn test_dial_failure_returns_to_disconnected() {
        let connector = MockPushConnector::failing(ConnectionError::Dial("refused".to_string()));
        let (channel, state, _rx) = channel_with(connector.clone());

        assert_eq!(channel.connect("u-1").await, ConnectionState::Disconnected);
        assert!(!state.is_push_connected());
        assert_eq!(connector.dial_count(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_when_disconnected_is_noop() {
        let (channel, _state, mut rx) = channel_with(MockPushConnector::new());
        channel.disconnect();
        channel.disconnect();
        assert_eq!(channel.connection_state(), ConnectionState::Disconnected);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_frames_are_appended_in_order() {
        let connector = MockPushConnector::new();
        let (channel, state, mut rx) = channel_with(connector.clone());
        channel.connect("u-1").await;

        connector.push_text(r#"{"type":"upload","message":"first"}"#);
        connector.push_text(r#"{"type":"upload","message":"second"}"#);

        wait_for(|| state.notifications().len() == 2).await;
        let log = state.notifications();
        assert_eq!(log[0].message, "first");
        assert_eq!(log[1].message, "second");

        // connected, then one redraw per notification
        assert!(matches!(rx.recv().await, Some(AppMessage::PushConnectionChanged(true))));
        assert!(matches!(rx.recv().await, Some(AppMessage::NotificationReceived(_))));
        assert!(matches!(rx.recv().await, Some(AppMessage::NotificationReceived(_))));
    }

    #[tokio::test]
    async fn test_read_error_disconnects_without_reconnect() {
        let connector = MockPushConnector::new();
        let (channel, state, _rx) = channel_with(connector.clone());
        channel.connect("u-1").await;

        connector.push_error(ConnectionError::Read("reset".to_string()));

        wait_for(|| channel.connection_state() == ConnectionState::Disconnected).await;
        assert!(!state.is_push_connected());
        wait_for(|| connector.was_closed(0)).await;
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(connector.dial_count(), 1);
    }

    #[tokio::test]
    async fn test_server_hang_up_disconnects() {
        let connector = MockPushConnector::new();
        let (channel, _state, _rx) = channel_with(connector.clone());
        channel.connect("u-1").await;

        connector.hang_up();

        wait_for(|| !channel.is_connected()).await;
    }

    #[tokio::test]
    async fn test_disconnect_stops_appending() {
        let connector = MockPushConnector::new();
        let (channel, state, _rx) = channel_with(connector.clone());
        channel.connect("u-1").await;

        connector.push_text(r#"{"type":"a","message":"before"}"#);
        wait_for(|| state.notifications().len() == 1).await;

        channel.disconnect();
        assert_eq!(channel.connection_state(), ConnectionState::Disconnected);
        assert!(!state.is_push_connected());

        connector.push_text(r#"{"type":"a","message":"after"}"#);
        wait_for(|| connector.was_closed(0)).await;
        assert_eq!(state.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_disconnect_while_dialing_cancels_connection() {
        let connector = MockPushConnector::new().with_dial_delay(Duration::from_millis(100));
        let (channel, state, _rx) = channel_with(connector.clone());
        let channel = Arc::new(channel);

        let dialing = {
            let channel = channel.clone();
            tokio::spawn(async move { channel.connect("u-1").await })
        };
        wait_for(|| connector.dial_count() == 1).await;
        assert_eq!(channel.connection_state(), ConnectionState::Connecting);

        channel.disconnect();
        state.logout();
        assert_eq!(channel.connection_state(), ConnectionState::Disconnected);

        assert_eq!(dialing.await.unwrap(), ConnectionState::Disconnected);
        assert_eq!(channel.connection_state(), ConnectionState::Disconnected);
        assert!(!state.is_push_connected());
        assert!(connector.was_closed(0));
        assert_eq!(connector.open_connections(), 0);

        assert!(!connector.push_text(r#"{"type":"upload","message":"late"}"#));
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(state.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_connect_after_cancelled_dial_succeeds() {
        let connector = MockPushConnector::new().with_dial_delay(Duration::from_millis(50));
        let (channel, _state, _rx) = channel_with(connector.clone());
        let channel = Arc::new(channel);

        let first = {
            let channel = channel.clone();
            tokio::spawn(async move { channel.connect("u-1").await })
        };
        wait_for(|| connector.dial_count() == 1).await;
        channel.disconnect();

        assert_eq!(channel.connect("u-2").await, ConnectionState::Connected);
        first.await.unwrap();

        // The stale dial closed its own connection and left the new one alone.
        assert_eq!(connector.dial_count(), 2);
        assert!(connector.was_closed(0) || connector.was_closed(1));
        assert!(channel.is_connected());
        assert_eq!(connector.open_connections(), 1);
    }

    #[tokio::test]
    async fn test_reconnect_after_disconnect_opens_new_connection() {
        let connector = MockPushConnector::new();
        let (channel, state, _rx) = channel_with(connector.clone());

        channel.connect("u-1").await;
        channel.disconnect();
        wait_for(|| connector.was_closed(0)).await;

        assert_eq!(channel.connect("u-1").await, ConnectionState::Connected);
        assert_eq!(connector.dial_count(), 2);

        // The first loop finishing late must not flip the new connection off.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(channel.is_connected());
        assert!(state.is_push_connected());
    }
}
