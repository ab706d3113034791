//! AppMessage enum for async communication within the application.

use crate::catalog::RecentVideos;
use crate::models::Notification;

/// Messages posted by background tasks for the render loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A push notification was appended to the shared log
    NotificationReceived(Notification),
    /// The notification channel connected or went away
    PushConnectionChanged(bool),
    /// Credentials accepted; session and video cache are populated
    LoginSucceeded { user_id: String, username: String },
    /// Credentials rejected or the service was unreachable
    LoginFailed(String),
    /// Account created
    RegisterSucceeded,
    /// Account creation failed
    RegisterFailed(String),
    /// An upload job reached its terminal state
    UploadFinished {
        title: String,
        result: Result<(), String>,
    },
    /// A manual data refresh finished
    DataRefreshed(Result<usize, String>),
    /// Recent videos fetched (or taken from the cache)
    RecentVideosLoaded(RecentVideos),
    /// Show a message in the overlay
    ShowMessage(String),
    /// Dismiss the overlay and go back to the dashboard
    ReturnToDashboard,
}
