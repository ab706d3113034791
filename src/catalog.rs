//! Video list refresh and recent-videos lookup.
//!
//! Refreshes replace the cached list wholesale (last writer wins). A refresh
//! for a user who is no longer logged in is discarded so a slow response
//! cannot repopulate the cache after logout.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::{AppMessage, UiQueue};
use crate::error::{RemoteError, ValidationError};
use crate::models::VideoRecord;
use crate::state::SharedState;
use crate::traits::RemoteClient;

/// Where a recent-videos listing came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecentSource {
    /// Fetched from the dedicated remote call.
    Remote,
    /// The remote call failed; these are the first entries of the cached
    /// list and may be stale.
    Cache,
}

/// Result of a recent-videos lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentVideos {
    pub videos: Vec<VideoRecord>,
    pub source: RecentSource,
}

impl RecentVideos {
    pub fn is_stale(&self) -> bool {
        self.source == RecentSource::Cache
    }
}

/// Fetch the full video list for `user_id` and install it if that user is
/// still the one logged in. Returns the number of videos fetched.
pub async fn refresh_videos(
    state: &SharedState,
    client: &dyn RemoteClient,
    user_id: &str,
) -> Result<usize, RemoteError> {
    let videos = client.get_user_videos(user_id).await?;
    let count = videos.len();

    if state.replace_videos_for(user_id, videos) {
        debug!("Video cache replaced with {} entries", count);
    } else {
        debug!("Discarding video list for {}: no longer logged in", user_id);
    }
    Ok(count)
}

/// Fetch the `limit` most recent videos, falling back to the head of the
/// cached list when the remote call fails.
pub async fn recent_videos(
    state: &SharedState,
    client: &dyn RemoteClient,
    user_id: &str,
    limit: usize,
) -> RecentVideos {
    match client.get_recent_videos(user_id, limit).await {
        Ok(videos) => RecentVideos {
            videos,
            source: RecentSource::Remote,
        },
        Err(e) => {
            warn!("Recent videos unavailable ({}), using cached list", e);
            let mut videos = state.videos();
            videos.truncate(limit);
            RecentVideos {
                videos,
                source: RecentSource::Cache,
            }
        }
    }
}

/// Start a manual refresh on a background task.
///
/// Posts [`AppMessage::DataRefreshed`] when done and
/// [`AppMessage::ReturnToDashboard`] after `return_delay`.
pub fn spawn_refresh(
    state: &SharedState,
    ui: &UiQueue,
    return_delay: Duration,
) -> Result<JoinHandle<()>, ValidationError> {
    let session = state
        .session()
        .filter(|s| s.authenticated)
        .ok_or(ValidationError::NotLoggedIn)?;
    let client = state.remote_client().ok_or(ValidationError::NoClient)?;

    let state = state.clone();
    let ui = ui.clone();
    Ok(tokio::spawn(async move {
        let result = refresh_videos(&state, client.as_ref(), &session.user_id).await;
        match &result {
            Ok(count) => info!("Refreshed {} videos", count),
            Err(e) => warn!("Refresh failed: {}", e),
        }
        ui.post(AppMessage::DataRefreshed(result.map_err(|e| e.user_message())));
        ui.post_after(return_delay, AppMessage::ReturnToDashboard);
    }))
}
