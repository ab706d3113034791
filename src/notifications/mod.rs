//! Real-time notification channel.
//!
//! - [`NotificationChannel`] - connection lifecycle and read loop
//! - [`decode_frame`] - tolerant decoding of inbound frames

pub mod channel;
pub mod frame;

pub use channel::{endpoint_for, ConnectionState, NotificationChannel};
pub use frame::decode_frame;
