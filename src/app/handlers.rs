//! Message handling for the App.

use tracing::debug;

use super::{App, AppMessage, Screen};

impl App {
    /// Handle an incoming async message.
    /// Every message changes something visible, so all of them mark the app dirty.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::NotificationReceived(notification) => {
                self.last_notification = Some(notification);
            }
            AppMessage::PushConnectionChanged(connected) => {
                debug!("Push connection changed: connected={}", connected);
            }
            AppMessage::LoginSucceeded { user_id, username } => {
                self.busy = None;
                // A logout may have raced the login task.
                if !self.state.is_authenticated() {
                    return;
                }
                self.navigate_to(Screen::Dashboard);
                self.show_message(format!("Login successful! Welcome, {}.", username));
                self.connect_notifications(user_id);
            }
            AppMessage::LoginFailed(message) => {
                self.busy = None;
                self.show_message(message);
            }
            AppMessage::RegisterSucceeded => {
                self.busy = None;
                self.navigate_to(Screen::Login);
                self.show_message("Registration successful! Please login.");
            }
            AppMessage::RegisterFailed(message) => {
                self.busy = None;
                self.show_message(message);
            }
            AppMessage::UploadFinished { title, result } => {
                self.busy = None;
                match result {
                    Ok(()) => self.show_message(format!(
                        "Upload successful! '{}' is now being processed.",
                        title
                    )),
                    Err(message) => self.show_message(format!("Upload failed: {}", message)),
                }
            }
            AppMessage::DataRefreshed(result) => {
                self.busy = None;
                match result {
                    Ok(count) => self.show_message(format!("Data refreshed ({} videos)", count)),
                    Err(message) => self.show_message(format!("Refresh failed: {}", message)),
                }
            }
            AppMessage::RecentVideosLoaded(recent) => {
                self.busy = None;
                self.recent = Some(recent);
                if self.state.is_authenticated() {
                    self.navigate_to(Screen::RecentVideos);
                }
            }
            AppMessage::ShowMessage(message) => self.show_message(message),
            AppMessage::ReturnToDashboard => {
                if self.state.is_authenticated() {
                    self.overlay = None;
                    self.navigate_to(Screen::Dashboard);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::adapters::mock::MockPushConnector;
    use crate::catalog::{RecentSource, RecentVideos};
    use crate::models::{Notification, Session};

    #[test]
    fn test_notification_updates_status() {
        let mut app = app_with(None, MockPushConnector::new());
        app.needs_redraw = false;
        app.handle_message(AppMessage::NotificationReceived(Notification::now("upload", "done")));
        assert!(app.needs_redraw);
        assert_eq!(app.last_notification.as_ref().unwrap().message, "done");
    }

    #[test]
    fn test_login_after_logout_is_ignored() {
        let mut app = app_with(None, MockPushConnector::new());
        app.busy = Some("Logging in...".to_string());
        app.handle_message(AppMessage::LoginSucceeded {
            user_id: "u-1".to_string(),
            username: "alice".to_string(),
        });
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.busy.is_none());
    }

    #[test]
    fn test_upload_failure_message() {
        let mut app = app_with(None, MockPushConnector::new());
        app.handle_message(AppMessage::UploadFinished {
            title: "Trip".to_string(),
            result: Err("The upload was interrupted by the server.".to_string()),
        });
        assert_eq!(
            app.overlay.as_deref(),
            Some("Upload failed: The upload was interrupted by the server.")
        );
    }

    #[test]
    fn test_return_to_dashboard_needs_session() {
        let mut app = app_with(None, MockPushConnector::new());
        app.show_message("Data refreshed (0 videos)");
        app.handle_message(AppMessage::ReturnToDashboard);
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.overlay.is_some());

        app.state.set_session(Session::new("u-1", "alice"));
        app.handle_message(AppMessage::ReturnToDashboard);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn test_recent_videos_loaded() {
        let mut app = app_with(None, MockPushConnector::new());
        app.state.set_session(Session::new("u-1", "alice"));
        app.handle_message(AppMessage::RecentVideosLoaded(RecentVideos {
            videos: Vec::new(),
            source: RecentSource::Cache,
        }));
        assert_eq!(app.screen, Screen::RecentVideos);
        assert!(app.recent.as_ref().unwrap().is_stale());
    }
}
