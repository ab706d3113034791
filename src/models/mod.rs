//! Data model shared by the state store, the remote client and the UI.

pub mod notification;
pub mod user;
pub mod video;

pub use notification::{Notification, DEFAULT_NOTIFICATION_MESSAGE, DEFAULT_NOTIFICATION_TYPE};
pub use user::{Session, UserRecord};
pub use video::{VideoList, VideoRecord};
