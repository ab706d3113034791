//! Upload stream frames.
//!
//! One [`UploadFrame::Metadata`] goes first, then any number of
//! [`UploadFrame::Chunk`]s. On the wire each frame is one line of JSON with
//! chunk bytes base64 encoded.

use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Describes the video being uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub file_name: String,
    /// Total size in bytes; 0 when not announced up front.
    #[serde(default)]
    pub file_size: u64,
}

/// A bounded slice of file bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoChunk {
    #[serde(serialize_with = "to_base64", deserialize_with = "from_base64")]
    pub data: Bytes,
    /// 1-based position of this chunk in the stream.
    pub chunk_number: u32,
}

/// One message on the upload stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadFrame {
    Metadata(UploadMetadata),
    Chunk(VideoChunk),
}

impl UploadFrame {
    /// Encode as one newline-terminated JSON line.
    pub fn encode_line(&self) -> Result<Bytes, serde_json::Error> {
        let mut line = serde_json::to_vec(self)?;
        line.push(b'\n');
        Ok(Bytes::from(line))
    }
}

/// The remote's final answer to an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub message: String,
}

fn to_base64<S: Serializer>(data: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

fn from_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(encoded.as_bytes())
        .map(Bytes::from)
        .map_err(serde::de::Error::custom)
}
