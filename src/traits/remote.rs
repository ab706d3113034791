//! Remote service trait abstraction.
//!
//! The request/response surface of the backend, consumed as an opaque
//! polymorphic dependency so the shared state can hold any implementation
//! and tests can substitute a mock.

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{UserRecord, VideoRecord};
use crate::upload::frames::{UploadAck, UploadFrame};

/// Number of videos fetched by the "recent videos" view.
pub const RECENT_VIDEOS_LIMIT: usize = 3;

/// Trait for the remote service.
///
/// # Example
///
/// ```ignore
/// use codek7::traits::RemoteClient;
///
/// async fn login<C: RemoteClient + ?Sized>(client: &C) -> Result<(), RemoteError> {
///     let user = client.get_user("alice", "secret").await?;
///     let videos = client.get_user_videos(&user.id).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Register a new account.
    ///
    /// Fails with [`RemoteError::Auth`] when the registry rejects the user.
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, RemoteError>;

    /// Look up a user by credentials. Used as login.
    async fn get_user(&self, username: &str, password: &str) -> Result<UserRecord, RemoteError>;

    /// List every video owned by a user, in source order.
    async fn get_user_videos(&self, user_id: &str) -> Result<Vec<VideoRecord>, RemoteError>;

    /// List the `limit` most recent videos of a user.
    async fn get_recent_videos(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<VideoRecord>, RemoteError>;

    /// Open a client-streaming upload.
    ///
    /// The caller sends one metadata frame, then chunk frames, then calls
    /// [`UploadStream::close_and_recv`] for the final acknowledgment.
    async fn upload_video(&self) -> Result<Box<dyn UploadStream>, RemoteError>;
}

/// Send side of one upload. Owned by the task that opened it.
#[async_trait]
pub trait UploadStream: Send {
    /// Send one frame. Applies back-pressure when the remote is slow.
    async fn send(&mut self, frame: UploadFrame) -> Result<(), RemoteError>;

    /// Close the send side and wait for the remote's result.
    async fn close_and_recv(self: Box<Self>) -> Result<UploadAck, RemoteError>;
}
