//! Application state and logic for the TUI.
//!
//! [`App`] is the screen state machine. Background tasks never touch it;
//! they post an [`AppMessage`] through the [`UiQueue`] and the render loop
//! applies it with [`App::handle_message`].

mod actions;
mod handlers;
mod messages;
mod navigation;
mod queue;
mod types;

pub use messages::AppMessage;
pub use queue::UiQueue;
pub use types::{Form, FormField, MenuItem, Screen, DASHBOARD_MENU, MAIN_MENU};

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::catalog::RecentVideos;
use crate::models::Notification;
use crate::notifications::NotificationChannel;
use crate::startup::AppConfig;
use crate::state::SharedState;
use crate::traits::PushConnector;
use crate::upload::UploadPipeline;

/// Main application state
pub struct App {
    /// State shared with background tasks
    pub state: SharedState,
    /// Sender handed to background tasks
    pub ui: UiQueue,
    /// Receiver for background messages; taken by the main loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    pub notifications: Arc<NotificationChannel>,
    pub uploads: UploadPipeline,
    pub config: AppConfig,
    pub screen: Screen,
    /// Selected entry of the visible menu
    pub menu_index: usize,
    /// Input state of the visible form screen
    pub form: Form,
    /// Modal message; swallows keys until dismissed
    pub overlay: Option<String>,
    /// Status line for work in progress
    pub busy: Option<String>,
    /// Last recent-videos lookup
    pub recent: Option<RecentVideos>,
    /// Selected row on list screens
    pub list_index: usize,
    /// Most recent push notification, shown in the status bar
    pub last_notification: Option<Notification>,
    pub should_quit: bool,
    /// Redraw on the next loop iteration
    pub needs_redraw: bool,
    /// Tick counter for the busy spinner
    pub tick_count: u64,
}

impl App {
    /// Create the app around existing shared state.
    ///
    /// The remote client is read from `state` when an action needs it;
    /// `connector` is used for the notification channel.
    pub fn new(state: SharedState, connector: Arc<dyn PushConnector>, config: AppConfig) -> Self {
        let (ui, message_rx) = UiQueue::channel();
        let notifications = Arc::new(NotificationChannel::new(
            connector,
            config.notify_addr.clone(),
            state.clone(),
            ui.clone(),
        ));
        let uploads =
            UploadPipeline::new(state.clone(), ui.clone()).with_summary_delay(config.summary_delay);

        Self {
            state,
            ui,
            message_rx: Some(message_rx),
            notifications,
            uploads,
            config,
            screen: Screen::Menu,
            menu_index: 0,
            form: Form::default(),
            overlay: None,
            busy: None,
            recent: None,
            list_index: 0,
            last_notification: None,
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance the tick counter. Only the busy spinner animates.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.busy.is_some() {
            self.mark_dirty();
        }
    }

    /// Apply every message already queued. Returns how many were handled.
    pub fn process_pending_messages(&mut self) -> usize {
        let mut pending = Vec::new();
        if let Some(rx) = self.message_rx.as_mut() {
            while let Ok(msg) = rx.try_recv() {
                pending.push(msg);
            }
        }
        let count = pending.len();
        for msg in pending {
            self.handle_message(msg);
        }
        count
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Show a modal message.
    pub fn show_message(&mut self, message: impl Into<String>) {
        self.overlay = Some(message.into());
        self.mark_dirty();
    }

    /// Switch screens, resetting per-screen selection and input.
    pub fn navigate_to(&mut self, screen: Screen) {
        self.screen = screen;
        self.menu_index = 0;
        self.list_index = 0;
        self.form = match screen {
            Screen::Login => Form::login(),
            Screen::Register => Form::register(),
            Screen::Upload => Form::upload(),
            _ => Form::default(),
        };
        self.mark_dirty();
    }

    /// Entries of the menu on the current screen, if it has one.
    pub fn current_menu(&self) -> &'static [MenuItem] {
        match self.screen {
            Screen::Menu => &MAIN_MENU,
            Screen::Dashboard => &DASHBOARD_MENU,
            _ => &[],
        }
    }

    /// Number of rows on the current list screen.
    pub fn list_len(&self) -> usize {
        match self.screen {
            Screen::Videos => self.state.videos().len(),
            Screen::RecentVideos => self.recent.as_ref().map(|r| r.videos.len()).unwrap_or(0),
            Screen::Notifications => self.state.notifications().len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::adapters::mock::{MockPushConnector, MockRemoteClient};
    use std::time::Duration;

    pub fn app_with(remote: Option<MockRemoteClient>, push: MockPushConnector) -> App {
        let state = SharedState::new();
        if let Some(remote) = remote {
            state.set_remote_client(Arc::new(remote));
        }
        let config = AppConfig::default()
            .with_summary_delay(Duration::ZERO)
            .with_refresh_delay(Duration::ZERO);
        App::new(state, Arc::new(push), config)
    }

    /// Wait for the next background message and apply it.
    pub async fn pump(app: &mut App) -> AppMessage {
        let msg = tokio::time::timeout(
            Duration::from_secs(5),
            app.message_rx.as_mut().expect("receiver present").recv(),
        )
        .await
        .expect("message in time")
        .expect("queue open");
        app.handle_message(msg.clone());
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::adapters::mock::MockPushConnector;

    #[test]
    fn test_new_app_starts_at_menu() {
        let app = app_with(None, MockPushConnector::new());
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.needs_redraw);
        assert_eq!(app.current_menu(), &MAIN_MENU);
    }

    #[test]
    fn test_tick_redraws_only_while_busy() {
        let mut app = app_with(None, MockPushConnector::new());
        app.needs_redraw = false;
        app.tick();
        assert!(!app.needs_redraw);
        app.busy = Some("Uploading".to_string());
        app.tick();
        assert!(app.needs_redraw);
        assert_eq!(app.tick_count, 2);
    }

    #[test]
    fn test_navigate_resets_form() {
        let mut app = app_with(None, MockPushConnector::new());
        app.navigate_to(Screen::Register);
        assert_eq!(app.form.fields.len(), 3);
        app.navigate_to(Screen::Menu);
        assert!(app.form.fields.is_empty());
    }

    #[tokio::test]
    async fn test_process_pending_messages() {
        let mut app = app_with(None, MockPushConnector::new());
        app.ui.post(AppMessage::ShowMessage("one".to_string()));
        app.ui.post(AppMessage::ShowMessage("two".to_string()));
        assert_eq!(app.process_pending_messages(), 2);
        assert_eq!(app.overlay.as_deref(), Some("two"));
        assert_eq!(app.process_pending_messages(), 0);
    }
}
