//! Thread-safe application state store.
//!
//! [`SharedState`] is the single authority for the session, the video cache,
//! the notification log and the remote client handle. Every operation takes
//! the lock for the duration of a small copy or append and never performs
//! I/O, so it is safe to call from the render loop and from background tasks
//! alike.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::models::{Notification, Session, VideoRecord};
use crate::traits::RemoteClient;

/// Maximum number of entries kept in the notification log.
pub const MAX_NOTIFICATIONS: usize = 50;

#[derive(Default)]
struct StateInner {
    session: Option<Session>,
    videos: Vec<VideoRecord>,
    notifications: VecDeque<Notification>,
    remote: Option<Arc<dyn RemoteClient>>,
    push_connected: bool,
}

/// Cloneable handle to the shared state. All clones see the same data.
///
/// Getters return snapshot copies, never references into the store, so a
/// caller can hold the result across later mutations without racing them.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<StateInner>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    // Critical sections only copy or append, so a panic while holding the
    // lock cannot leave a half-written field behind.
    fn read(&self) -> RwLockReadGuard<'_, StateInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StateInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Install a session and mark it authenticated.
    pub fn set_session(&self, mut session: Session) {
        session.authenticated = true;
        self.write().session = Some(session);
    }

    pub fn session(&self) -> Option<Session> {
        self.read().session.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read()
            .session
            .as_ref()
            .is_some_and(|s| s.authenticated)
    }

    /// Replace the whole video cache. Order is kept as given.
    pub fn replace_videos(&self, videos: Vec<VideoRecord>) {
        self.write().videos = videos;
    }

    /// Replace the video cache only if `user_id` is still the logged-in user.
    ///
    /// Check and replace happen under one write lock. Returns whether the
    /// list was installed.
    pub fn replace_videos_for(&self, user_id: &str, videos: Vec<VideoRecord>) -> bool {
        let mut inner = self.write();
        let owns = inner
            .session
            .as_ref()
            .is_some_and(|s| s.authenticated && s.user_id == user_id);
        if owns {
            inner.videos = videos;
        }
        owns
    }

    pub fn videos(&self) -> Vec<VideoRecord> {
        self.read().videos.clone()
    }

    /// Append to the notification log, evicting the oldest entries beyond
    /// [`MAX_NOTIFICATIONS`].
    pub fn append_notification(&self, notification: Notification) {
        let mut inner = self.write();
        inner.notifications.push_back(notification);
        while inner.notifications.len() > MAX_NOTIFICATIONS {
            inner.notifications.pop_front();
        }
    }

    /// Notifications in arrival order, oldest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.read().notifications.iter().cloned().collect()
    }

    /// Clear the session and the video cache. The notification log survives.
    pub fn logout(&self) {
        let mut inner = self.write();
        inner.session = None;
        inner.videos.clear();
    }

    pub fn set_remote_client(&self, client: Arc<dyn RemoteClient>) {
        self.write().remote = Some(client);
    }

    pub fn remote_client(&self) -> Option<Arc<dyn RemoteClient>> {
        self.read().remote.clone()
    }

    /// Whether the notification channel currently holds a live connection.
    pub fn is_push_connected(&self) -> bool {
        self.read().push_connected
    }

    /// Only the notification channel mirrors its state here.
    pub(crate) fn set_push_connected(&self, connected: bool) {
        self.write().push_connected = connected;
    }
}

impl fmt::Debug for SharedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read();
        f.debug_struct("SharedState")
            .field("session", &inner.session)
            .field("videos", &inner.videos.len())
            .field("notifications", &inner.notifications.len())
            .field("has_remote", &inner.remote.is_some())
            .field("push_connected", &inner.push_connected)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            user_id: "u-1".to_string(),
            title: format!("Video {}", id),
            description: String::new(),
            created_at: String::new(),
            file_name: format!("{}.mp4", id),
        }
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = SharedState::new();
        assert!(state.session().is_none());
        assert!(!state.is_authenticated());
        assert!(state.videos().is_empty());
        assert!(state.notifications().is_empty());
        assert!(state.remote_client().is_none());
        assert!(!state.is_push_connected());
    }

    #[test]
    fn test_set_session_marks_authenticated() {
        let state = SharedState::new();
        state.set_session(Session::new("u-1", "alice"));

        let session = state.session().unwrap();
        assert!(session.authenticated);
        assert_eq!(session.username, "alice");
        assert!(state.is_authenticated());
    }

    #[test]
    fn test_notification_log_is_bounded() {
        let state = SharedState::new();
        for i in 0..120 {
            state.append_notification(Notification::now("test", format!("n{}", i)));
            assert!(state.notifications().len() <= MAX_NOTIFICATIONS);
        }

        let log = state.notifications();
        assert_eq!(log.len(), MAX_NOTIFICATIONS);
        assert_eq!(log.first().unwrap().message, "n70");
        assert_eq!(log.last().unwrap().message, "n119");
        for (offset, n) in log.iter().enumerate() {
            assert_eq!(n.message, format!("n{}", 70 + offset));
        }
    }

    #[test]
    fn test_replace_videos_is_idempotent() {
        let state = SharedState::new();
        let list = vec![video("a"), video("b")];

        state.replace_videos(list.clone());
        let once = state.videos();
        state.replace_videos(list.clone());
        assert_eq!(state.videos(), once);
        assert_eq!(once, list);
    }

    #[test]
    fn test_replace_videos_discards_stale_entries() {
        let state = SharedState::new();
        state.replace_videos(vec![video("a"), video("b"), video("c")]);
        state.replace_videos(vec![video("d")]);
        assert_eq!(state.videos(), vec![video("d")]);
    }

    #[test]
    fn test_replace_videos_for_checks_owner() {
        let state = SharedState::new();
        assert!(!state.replace_videos_for("u-1", vec![video("a")]));
        assert!(state.videos().is_empty());

        state.set_session(Session::new("u-1", "alice"));
        assert!(!state.replace_videos_for("u-2", vec![video("b")]));
        assert!(state.replace_videos_for("u-1", vec![video("a")]));
        assert_eq!(state.videos(), vec![video("a")]);
    }

    #[test]
    fn test_snapshots_are_independent() {
        let state = SharedState::new();
        state.replace_videos(vec![video("a")]);
        let snapshot = state.videos();
        state.replace_videos(vec![video("b"), video("c")]);
        assert_eq!(snapshot, vec![video("a")]);
    }

    #[test]
    fn test_logout_keeps_notifications() {
        let state = SharedState::new();
        state.set_session(Session::new("u-1", "alice"));
        state.replace_videos(vec![video("a")]);
        state.append_notification(Notification::now("system", "welcome"));

        state.logout();

        assert!(state.session().is_none());
        assert!(!state.is_authenticated());
        assert!(state.videos().is_empty());
        assert_eq!(state.notifications().len(), 1);
    }

    #[test]
    fn test_clones_share_data() {
        let state = SharedState::new();
        let other = state.clone();
        other.append_notification(Notification::now("system", "hi"));
        assert_eq!(state.notifications().len(), 1);
    }

    #[test]
    fn test_push_connected_flag() {
        let state = SharedState::new();
        state.set_push_connected(true);
        assert!(state.is_push_connected());
        state.set_push_connected(false);
        assert!(!state.is_push_connected());
    }
}
