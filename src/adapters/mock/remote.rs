//! Mock remote client for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::RemoteError;
use crate::models::{UserRecord, VideoRecord};
use crate::traits::{RemoteClient, UploadStream};
use crate::upload::frames::{UploadAck, UploadFrame, UploadMetadata};

#[derive(Debug, Default)]
struct Inner {
    users: Vec<(UserRecord, String)>,
    videos: Vec<VideoRecord>,
    video_list_error: Option<RemoteError>,
    recent_error: Option<RemoteError>,
    upload_send_failure: Option<usize>,
    /// Frames received, one entry per opened upload stream.
    upload_streams: Vec<Vec<UploadFrame>>,
    video_list_calls: usize,
    next_id: usize,
}

/// Mock remote client backed by in-memory users and videos.
///
/// Clones share the same data, so a test can keep one handle for
/// assertions after handing another to the code under test.
///
/// # Example
///
/// ```
/// use codek7::adapters::MockRemoteClient;
/// use codek7::models::UserRecord;
///
/// let user = UserRecord {
///     id: "u-1".to_string(),
///     username: "alice".to_string(),
///     email: String::new(),
///     created_at: String::new(),
/// };
/// let client = MockRemoteClient::new().with_user(user, "secret");
/// assert_eq!(client.upload_streams_opened(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRemoteClient {
    inner: Arc<Mutex<Inner>>,
}

impl MockRemoteClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a user that `get_user` accepts with `password`.
    pub fn with_user(self, user: UserRecord, password: &str) -> Self {
        self.lock().users.push((user, password.to_string()));
        self
    }

    /// Seed the video catalog.
    pub fn with_videos(self, videos: Vec<VideoRecord>) -> Self {
        self.lock().videos = videos;
        self
    }

    /// Make `get_user_videos` fail with `err`.
    pub fn with_video_list_error(self, err: RemoteError) -> Self {
        self.lock().video_list_error = Some(err);
        self
    }

    /// Make `get_recent_videos` fail with `err`.
    pub fn with_recent_error(self, err: RemoteError) -> Self {
        self.lock().recent_error = Some(err);
        self
    }

    /// Fail the `n`th send (1-based) on every upload stream.
    pub fn with_upload_send_failure(self, n: usize) -> Self {
        self.lock().upload_send_failure = Some(n);
        self
    }

    /// Every frame received, stream by stream in the order streams opened.
    pub fn uploaded_frames(&self) -> Vec<UploadFrame> {
        self.lock().upload_streams.concat()
    }

    /// Frames received on each upload stream, in the order streams opened.
    pub fn frames_by_stream(&self) -> Vec<Vec<UploadFrame>> {
        self.lock().upload_streams.clone()
    }

    pub fn upload_streams_opened(&self) -> usize {
        self.lock().upload_streams.len()
    }

    pub fn video_list_calls(&self) -> usize {
        self.lock().video_list_calls
    }

    /// Videos currently held by the mock service.
    pub fn stored_videos(&self) -> Vec<VideoRecord> {
        self.lock().videos.clone()
    }

    fn videos_of(inner: &Inner, user_id: &str) -> Vec<VideoRecord> {
        inner
            .videos
            .iter()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RemoteClient for MockRemoteClient {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, RemoteError> {
        let mut inner = self.lock();
        if inner.users.iter().any(|(u, _)| u.username == username) {
            return Err(RemoteError::Auth {
                message: format!("username '{}' already exists", username),
            });
        }

        inner.next_id += 1;
        let user = UserRecord {
            id: format!("user-{}", inner.next_id),
            username: username.to_string(),
            email: email.to_string(),
            created_at: String::new(),
        };
        inner.users.push((user.clone(), password.to_string()));
        Ok(user)
    }

    async fn get_user(&self, username: &str, password: &str) -> Result<UserRecord, RemoteError> {
        self.lock()
            .users
            .iter()
            .find(|(u, p)| u.username == username && p == password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| RemoteError::Auth {
                message: "invalid username or password".to_string(),
            })
    }

    async fn get_user_videos(&self, user_id: &str) -> Result<Vec<VideoRecord>, RemoteError> {
        let mut inner = self.lock();
        inner.video_list_calls += 1;
        if let Some(err) = &inner.video_list_error {
            return Err(err.clone());
        }
        Ok(Self::videos_of(&inner, user_id))
    }

    async fn get_recent_videos(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<VideoRecord>, RemoteError> {
        let inner = self.lock();
        if let Some(err) = &inner.recent_error {
            return Err(err.clone());
        }
        let mut videos = Self::videos_of(&inner, user_id);
        videos.truncate(limit);
        Ok(videos)
    }

    async fn upload_video(&self) -> Result<Box<dyn UploadStream>, RemoteError> {
        let (index, fail_at) = {
            let mut inner = self.lock();
            inner.upload_streams.push(Vec::new());
            (inner.upload_streams.len() - 1, inner.upload_send_failure)
        };
        Ok(Box::new(MockUploadStream {
            client: self.clone(),
            index,
            fail_at,
            sent: 0,
            metadata: None,
        }))
    }
}

struct MockUploadStream {
    client: MockRemoteClient,
    index: usize,
    fail_at: Option<usize>,
    sent: usize,
    metadata: Option<UploadMetadata>,
}

#[async_trait]
impl UploadStream for MockUploadStream {
    async fn send(&mut self, frame: UploadFrame) -> Result<(), RemoteError> {
        self.sent += 1;
        if self.fail_at == Some(self.sent) {
            return Err(RemoteError::StreamClosed);
        }
        if let UploadFrame::Metadata(meta) = &frame {
            self.metadata = Some(meta.clone());
        }
        if let Some(frames) = self.client.lock().upload_streams.get_mut(self.index) {
            frames.push(frame);
        }
        Ok(())
    }

    async fn close_and_recv(self: Box<Self>) -> Result<UploadAck, RemoteError> {
        let meta = self.metadata.ok_or_else(|| RemoteError::Status {
            status: 400,
            message: "metadata frame missing".to_string(),
        })?;

        let mut inner = self.client.lock();
        inner.next_id += 1;
        let video_id = format!("video-{}", inner.next_id);
        inner.videos.push(VideoRecord {
            id: video_id.clone(),
            user_id: meta.user_id,
            title: meta.title,
            description: meta.description,
            created_at: String::new(),
            file_name: meta.file_name,
        });

        Ok(UploadAck {
            video_id,
            message: "upload complete".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> UserRecord {
        UserRecord {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            email: "a@example.com".to_string(),
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_get_user_checks_password() {
        let client = MockRemoteClient::new().with_user(alice(), "secret");
        assert_eq!(client.get_user("alice", "secret").await.unwrap().id, "u-1");
        assert!(matches!(
            client.get_user("alice", "wrong").await,
            Err(RemoteError::Auth { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate() {
        let client = MockRemoteClient::new();
        let user = client.create_user("bob", "b@example.com", "pw").await.unwrap();
        assert_eq!(user.username, "bob");
        assert!(client.create_user("bob", "x", "y").await.is_err());
        assert_eq!(client.get_user("bob", "pw").await.unwrap(), user);
    }

    #[tokio::test]
    async fn test_close_without_metadata_fails() {
        let client = MockRemoteClient::new();
        let stream = client.upload_video().await.unwrap();
        assert!(stream.close_and_recv().await.is_err());
        assert!(client.stored_videos().is_empty());
    }
}
