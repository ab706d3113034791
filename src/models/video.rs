//! Video metadata as listed by the remote service.

use serde::{Deserialize, Serialize};

/// Metadata for one uploaded video. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub file_name: String,
}

/// Wire envelope for video listings (`{"videos": [...]}`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_list_preserves_order() {
        let json = r#"{"videos":[
            {"id":"v2","user_id":"u","title":"second"},
            {"id":"v1","user_id":"u","title":"first","description":"d","created_at":"2024-01-01 10:00:00","file_name":"a.mp4"}
        ]}"#;
        let list: VideoList = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = list.videos.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v2", "v1"]);
        assert_eq!(list.videos[1].file_name, "a.mp4");
    }

    #[test]
    fn test_video_list_missing_field() {
        let list: VideoList = serde_json::from_str("{}").unwrap();
        assert!(list.videos.is_empty());
    }
}
