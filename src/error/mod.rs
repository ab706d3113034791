//! Error taxonomy.
//!
//! | Class | Type | Reaction |
//! |-------|------|----------|
//! | Validation | [`ValidationError`] | message to the user, nothing started |
//! | Remote | [`RemoteError`] | message to the user, state left at last-known-good |
//! | Connection | [`ConnectionError`] | logged, channel returns to disconnected |
//!
//! Background tasks resolve every error locally into a state change or a
//! queued UI message; nothing unwinds past a task boundary.

mod app_error;
mod category;
mod connection;
mod remote;
mod validation;

pub use app_error::{AppError, AppResult};
pub use category::ErrorCategory;
pub use connection::ConnectionError;
pub use remote::RemoteError;
pub use validation::ValidationError;
