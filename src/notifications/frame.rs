//! Decoding of inbound push frames.
//!
//! Frames are JSON objects carrying at least `type` and `message`. Anything
//! else is tolerated: missing or non-string fields fall back to defaults and
//! a payload that is not JSON at all still yields a notification.

use serde_json::Value;
use tracing::debug;

use crate::models::{Notification, DEFAULT_NOTIFICATION_MESSAGE, DEFAULT_NOTIFICATION_TYPE};

/// Build a notification from one text frame, stamped with a fresh id and the
/// current time.
pub fn decode_frame(text: &str) -> Notification {
    let value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            debug!("Push frame is not JSON ({}), using defaults", e);
            Value::Null
        }
    };

    let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);

    Notification::now(
        field("type").unwrap_or_else(|| DEFAULT_NOTIFICATION_TYPE.to_string()),
        field("message").unwrap_or_else(|| DEFAULT_NOTIFICATION_MESSAGE.to_string()),
    )
}
