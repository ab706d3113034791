//! Reqwest-based remote client adapter.
//!
//! Speaks JSON over HTTP to the backend and implements [`RemoteClient`].
//! Uploads are sent as one streamed request whose body is fed frame by frame
//! through a bounded channel, so a slow server slows the sender down.

use async_trait::async_trait;
use bytes::Bytes;
use futures::channel::mpsc;
use futures::SinkExt;
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::RemoteError;
use crate::models::{UserRecord, VideoList, VideoRecord};
use crate::traits::{RemoteClient, UploadStream};
use crate::upload::frames::{UploadAck, UploadFrame};

/// Frames buffered between the uploader and the request body.
const UPLOAD_BUFFER_FRAMES: usize = 4;

/// Remote client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use codek7::adapters::HttpRemoteClient;
/// use codek7::traits::RemoteClient;
///
/// let client = HttpRemoteClient::new("http://localhost:50051");
/// let user = client.get_user("alice", "secret").await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpRemoteClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRemoteClient {
    /// Create a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client with a custom `reqwest::Client` (timeouts, TLS, ...).
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Decode a JSON response, mapping non-2xx statuses to errors.
///
/// With `auth` set, 401/403/404/409 mean the credentials or the user were
/// rejected.
async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
    auth: bool,
) -> Result<T, RemoteError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_string()
        } else {
            body.trim().to_string()
        };
        return Err(if auth && matches!(status.as_u16(), 401 | 403 | 404 | 409) {
            RemoteError::Auth { message }
        } else {
            RemoteError::Status {
                status: status.as_u16(),
                message,
            }
        });
    }

    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, RemoteError> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(&json!({ "username": username, "email": email, "password": password }))
            .send()
            .await?;
        decode(response, true).await
    }

    async fn get_user(&self, username: &str, password: &str) -> Result<UserRecord, RemoteError> {
        let response = self
            .client
            .post(self.url("/users/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;
        decode(response, true).await
    }

    async fn get_user_videos(&self, user_id: &str) -> Result<Vec<VideoRecord>, RemoteError> {
        let path = format!("/users/{}/videos", urlencoding::encode(user_id));
        let response = self.client.get(self.url(&path)).send().await?;
        let list: VideoList = decode(response, false).await?;
        Ok(list.videos)
    }

    async fn get_recent_videos(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<VideoRecord>, RemoteError> {
        let path = format!("/users/{}/videos/recent", urlencoding::encode(user_id));
        let response = self
            .client
            .get(self.url(&path))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        let list: VideoList = decode(response, false).await?;
        Ok(list.videos)
    }

    async fn upload_video(&self) -> Result<Box<dyn UploadStream>, RemoteError> {
        let (tx, rx) = mpsc::channel::<Result<Bytes, std::io::Error>>(UPLOAD_BUFFER_FRAMES);
        let request = self
            .client
            .post(self.url("/videos/upload"))
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(reqwest::Body::wrap_stream(rx));

        debug!("Opening upload stream to {}", self.base_url);
        let response = tokio::spawn(async move { request.send().await });

        Ok(Box::new(HttpUploadStream {
            tx,
            response: Some(response),
        }))
    }
}

/// Send side of a streamed upload request.
struct HttpUploadStream {
    tx: mpsc::Sender<Result<Bytes, std::io::Error>>,
    response: Option<JoinHandle<Result<reqwest::Response, reqwest::Error>>>,
}

impl HttpUploadStream {
    async fn finish(
        handle: JoinHandle<Result<reqwest::Response, reqwest::Error>>,
    ) -> Result<UploadAck, RemoteError> {
        let response = handle.await.map_err(|e| RemoteError::Transport {
            message: format!("upload request aborted: {}", e),
        })??;
        decode(response, false).await
    }
}

#[async_trait]
impl UploadStream for HttpUploadStream {
    async fn send(&mut self, frame: UploadFrame) -> Result<(), RemoteError> {
        let line = frame.encode_line()?;
        if self.tx.send(Ok(line)).await.is_ok() {
            return Ok(());
        }

        // The request ended early; report why instead of a bare closed stream.
        match self.response.take() {
            Some(handle) => match Self::finish(handle).await {
                Err(e) => Err(e),
                Ok(_) => Err(RemoteError::StreamClosed),
            },
            None => Err(RemoteError::StreamClosed),
        }
    }

    async fn close_and_recv(mut self: Box<Self>) -> Result<UploadAck, RemoteError> {
        self.tx.close_channel();
        match self.response.take() {
            Some(handle) => Self::finish(handle).await,
            None => Err(RemoteError::StreamClosed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpRemoteClient::new("http://localhost:50051/");
        assert_eq!(client.base_url(), "http://localhost:50051");
        assert_eq!(client.url("/users"), "http://localhost:50051/users");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = HttpRemoteClient::new("http://127.0.0.1:59999");
        let err = client.get_user("alice", "pw").await.unwrap_err();
        assert!(matches!(err, RemoteError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_upload_to_unreachable_server_fails() {
        let client = HttpRemoteClient::new("http://127.0.0.1:59999");
        let stream = client.upload_video().await.unwrap();
        let err = stream.close_and_recv().await.unwrap_err();
        assert!(matches!(err, RemoteError::Transport { .. }));
    }
}
