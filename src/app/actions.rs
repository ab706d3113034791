//! User actions triggered from menus and forms.
//!
//! Anything that talks to the remote runs on a spawned task and reports
//! back through the [`UiQueue`](super::UiQueue).

use tracing::{info, warn};

use crate::catalog;
use crate::error::{AppError, ValidationError};
use crate::models::{Notification, Session, VideoRecord};
use crate::traits::RECENT_VIDEOS_LIMIT;

use super::{App, AppMessage, MenuItem, Screen};

/// Id of the session installed by demo mode.
pub const DEMO_USER_ID: &str = "demo-user-123";
pub const DEMO_USERNAME: &str = "demo_user";

impl App {
    /// Run the action behind a menu entry.
    pub fn activate(&mut self, item: MenuItem) {
        match item {
            MenuItem::Login => self.navigate_to(Screen::Login),
            MenuItem::Register => self.navigate_to(Screen::Register),
            MenuItem::Dashboard => self.open_protected(Screen::Dashboard),
            MenuItem::Upload => self.open_protected(Screen::Upload),
            MenuItem::Videos => self.open_protected(Screen::Videos),
            MenuItem::Notifications => self.open_protected(Screen::Notifications),
            MenuItem::DemoMode => self.enable_demo(),
            MenuItem::Quit => self.quit(),
            MenuItem::RecentVideos => self.show_recent(),
            MenuItem::Refresh => self.refresh(),
            MenuItem::ToggleNotifications => self.toggle_notifications(),
            MenuItem::MainMenu => self.navigate_to(Screen::Menu),
            MenuItem::Logout => self.logout(),
        }
    }

    /// Open a screen that needs a session, or explain why not.
    pub fn open_protected(&mut self, screen: Screen) {
        if self.state.is_authenticated() {
            self.navigate_to(screen);
        } else {
            self.show_message("Please login first!");
        }
    }

    /// Submit the login form.
    ///
    /// On success the session is installed and the video list loaded before
    /// [`AppMessage::LoginSucceeded`] is posted.
    pub fn submit_login(&mut self) {
        if self.form.has_blank_field() {
            self.show_message(ValidationError::MissingFields.to_string());
            return;
        }
        let Some(client) = self.state.remote_client() else {
            self.report_error(ValidationError::NoClient);
            return;
        };

        let username = self.form.value(0).trim().to_string();
        let password = self.form.value(1).to_string();
        let state = self.state.clone();
        let ui = self.ui.clone();
        self.busy = Some("Logging in...".to_string());

        tokio::spawn(async move {
            match client.get_user(&username, &password).await {
                Ok(user) => {
                    info!("Logged in as {}", user.username);
                    state.set_session(Session::from(&user));
                    if let Err(e) = catalog::refresh_videos(&state, client.as_ref(), &user.id).await {
                        warn!("Initial video load failed: {}", e);
                    }
                    ui.post(AppMessage::LoginSucceeded {
                        user_id: user.id,
                        username: user.username,
                    });
                }
                Err(e) => {
                    warn!("Login failed: {}", e);
                    ui.post(AppMessage::LoginFailed(e.user_message()));
                }
            }
        });
    }

    /// Submit the registration form.
    pub fn submit_register(&mut self) {
        if self.form.has_blank_field() {
            self.show_message(ValidationError::MissingFields.to_string());
            return;
        }
        let Some(client) = self.state.remote_client() else {
            self.report_error(ValidationError::NoClient);
            return;
        };

        let username = self.form.value(0).trim().to_string();
        let email = self.form.value(1).trim().to_string();
        let password = self.form.value(2).to_string();
        let ui = self.ui.clone();
        self.busy = Some("Creating account...".to_string());

        tokio::spawn(async move {
            match client.create_user(&username, &email, &password).await {
                Ok(user) => {
                    info!("Registered user {}", user.username);
                    ui.post(AppMessage::RegisterSucceeded);
                }
                Err(e) => {
                    warn!("Registration failed: {}", e);
                    ui.post(AppMessage::RegisterFailed(e.user_message()));
                }
            }
        });
    }

    /// Submit the upload form. Validation failures are shown immediately.
    pub fn submit_upload(&mut self) {
        let path = self.form.value(0).to_string();
        let title = self.form.value(1).to_string();
        let description = self.form.value(2).to_string();

        match self.uploads.start(&path, &title, &description) {
            Ok(task) => {
                self.busy = Some(format!("Uploading '{}'...", task.job.title));
                self.mark_dirty();
            }
            Err(e) => self.report_error(e),
        }
    }

    /// Log a failure and, when its category warrants it, tell the user.
    pub fn report_error(&mut self, err: impl Into<AppError>) {
        let err = err.into();
        warn!("{} [{}]: {}", err.category(), err.error_code(), err);
        if err.category().is_user_facing() {
            self.show_message(err.user_message());
        }
    }

    /// Reload the video list in the background.
    pub fn refresh(&mut self) {
        match catalog::spawn_refresh(&self.state, &self.ui, self.config.refresh_delay) {
            Ok(_) => {
                self.busy = Some("Refreshing...".to_string());
                self.mark_dirty();
            }
            Err(ValidationError::NotLoggedIn) => self.show_message("Please login first!"),
            Err(e) => self.report_error(e),
        }
    }

    /// Look up the most recent videos in the background.
    pub fn show_recent(&mut self) {
        let Some(session) = self.state.session().filter(|s| s.authenticated) else {
            self.show_message("Please login first!");
            return;
        };
        let Some(client) = self.state.remote_client() else {
            self.report_error(ValidationError::NoClient);
            return;
        };

        let state = self.state.clone();
        let ui = self.ui.clone();
        self.busy = Some("Loading recent videos...".to_string());
        tokio::spawn(async move {
            let recent = catalog::recent_videos(
                &state,
                client.as_ref(),
                &session.user_id,
                RECENT_VIDEOS_LIMIT,
            )
            .await;
            ui.post(AppMessage::RecentVideosLoaded(recent));
        });
    }

    /// Connect the notification channel if it is down, disconnect it otherwise.
    pub fn toggle_notifications(&mut self) {
        if self.notifications.is_connected() {
            self.notifications.disconnect();
            self.show_message("Live notifications disconnected");
            return;
        }
        match self.state.session().filter(|s| s.authenticated) {
            Some(session) => {
                self.connect_notifications(session.user_id);
                self.show_message("Connecting to live notifications...");
            }
            None => self.show_message("Please login first!"),
        }
    }

    /// Start connecting the notification channel for `user_id`.
    pub(crate) fn connect_notifications(&self, user_id: String) {
        let channel = self.notifications.clone();
        tokio::spawn(async move {
            channel.connect(&user_id).await;
        });
    }

    /// End the session and return to the main menu.
    pub fn logout(&mut self) {
        self.notifications.disconnect();
        self.state.logout();
        self.recent = None;
        self.busy = None;
        self.navigate_to(Screen::Menu);
        self.show_message("Logged out successfully!");
        info!("Logged out");
    }

    /// Install a demo session with sample videos and notifications.
    ///
    /// Nothing is sent to the remote.
    pub fn enable_demo(&mut self) {
        let session = Session::new(DEMO_USER_ID, DEMO_USERNAME);
        self.state.set_session(session);
        self.state.replace_videos(demo_videos());
        for (kind, message) in [
            ("upload", "Video 'My First Video' uploaded successfully"),
            ("system", "Welcome to CodeK7! Your account is ready."),
            ("upload", "Video 'Advanced Features Demo' processing complete"),
        ] {
            self.state.append_notification(Notification::now(kind, message));
        }

        self.navigate_to(Screen::Dashboard);
        self.show_message(format!(
            "Demo mode enabled! You are logged in as {}.",
            DEMO_USERNAME
        ));
        info!("Demo mode enabled");
    }
}

fn demo_videos() -> Vec<VideoRecord> {
    let now = chrono::Local::now();
    let video = |id: &str, title: &str, description: &str, file: &str, minutes_ago: i64| VideoRecord {
        id: id.to_string(),
        user_id: DEMO_USER_ID.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        created_at: (now - chrono::Duration::minutes(minutes_ago))
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        file_name: file.to_string(),
    };
    vec![
        video(
            "video-1",
            "My First Video",
            "This is a demo video showing the upload functionality",
            "first_video.mp4",
            120,
        ),
        video(
            "video-2",
            "Tutorial: Getting Started",
            "A comprehensive tutorial for new users",
            "tutorial.mp4",
            60,
        ),
        video(
            "video-3",
            "Advanced Features Demo",
            "Showcasing advanced features of the platform",
            "advanced_demo.mp4",
            30,
        ),
    ]
}
