//! Application state management.
//!
//! - [`SharedState`]: lock-guarded store shared between the render loop and
//!   background tasks

pub mod shared;

pub use shared::{SharedState, MAX_NOTIFICATIONS};
