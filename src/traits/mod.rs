//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`RemoteClient`] - request/response RPC surface of the backend
//! - [`UploadStream`] - send side of a streaming upload
//! - [`PushConnector`] / [`PushStream`] - push notification socket

pub mod push;
pub mod remote;

pub use push::{PushConnector, PushStream};
pub use remote::{RemoteClient, UploadStream, RECENT_VIDEOS_LIMIT};
