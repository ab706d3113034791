//! Common test utilities for integration tests.
//!
//! - record builders for users and videos
//! - [`PushServer`]: an in-process WebSocket push endpoint
//! - [`wait_for`]: poll a condition with a deadline

#![allow(dead_code)]

pub mod push_server;

pub use push_server::PushServer;

use codek7::models::{UserRecord, VideoRecord};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

pub fn user(id: &str, username: &str) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{}@example.com", username),
        created_at: "2025-01-01 10:00:00".to_string(),
    }
}

pub fn video(id: &str, user_id: &str) -> VideoRecord {
    VideoRecord {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: format!("Video {}", id),
        description: String::new(),
        created_at: String::new(),
        file_name: format!("{}.mp4", id),
    }
}

/// A temp file holding `len` bytes of a repeating pattern.
pub fn file_with(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    file.write_all(&data).unwrap();
    file.flush().unwrap();
    file
}

pub fn path_of(file: &NamedTempFile) -> String {
    file.path().to_string_lossy().to_string()
}

/// Poll `condition` every few milliseconds for up to five seconds.
pub async fn wait_for<F: Fn() -> bool>(condition: F) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}
