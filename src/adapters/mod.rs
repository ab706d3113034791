//! Concrete implementations of the remote and push traits.
//!
//! - [`HttpRemoteClient`] - JSON over HTTP using reqwest
//! - [`TungsteniteConnector`] - push socket using tokio-tungstenite
//!
//! The [`mock`] submodule provides in-memory doubles for both.

pub mod http_remote;
pub mod mock;
pub mod tungstenite_push;

pub use http_remote::HttpRemoteClient;
pub use mock::{MockPushConnector, MockRemoteClient};
pub use tungstenite_push::{TungsteniteConnector, TungstenitePushStream};
