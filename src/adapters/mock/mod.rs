//! Mock implementations for testing.
//!
//! In-memory doubles for the remote service and the push endpoint, so the
//! runtime core can be exercised without a network.
//!
//! - [`MockRemoteClient`] - users, videos and uploads held in memory
//! - [`MockPushConnector`] - push connections with frame injection

pub mod push;
pub mod remote;

pub use push::MockPushConnector;
pub use remote::MockRemoteClient;
