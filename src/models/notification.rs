//! Notification log entries.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Notification type used when an inbound frame carries none.
pub const DEFAULT_NOTIFICATION_TYPE: &str = "notification";

/// Message used when an inbound frame carries none.
pub const DEFAULT_NOTIFICATION_MESSAGE: &str = "New notification received";

/// One entry in the notification log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Local wall-clock time of arrival, `HH:MM:SS`.
    pub time: String,
}

impl Notification {
    /// Create a notification stamped with a fresh id and the current time.
    pub fn now(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: kind.into(),
            message: message.into(),
            time: Local::now().format("%H:%M:%S").to_string(),
        }
    }

    /// The entry appended after a successful upload.
    pub fn upload_succeeded(title: &str) -> Self {
        Self::now("upload", format!("Video '{}' uploaded successfully", title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_assigns_unique_ids() {
        let a = Notification::now("system", "hello");
        let b = Notification::now("system", "hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.time.len(), 8);
    }

    #[test]
    fn test_upload_succeeded() {
        let n = Notification::upload_succeeded("Holiday");
        assert_eq!(n.kind, "upload");
        assert_eq!(n.message, "Video 'Holiday' uploaded successfully");
    }

    #[test]
    fn test_type_field_renamed() {
        let n = Notification::now("upload", "done");
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["type"], "upload");
        assert!(json.get("kind").is_none());
    }
}
