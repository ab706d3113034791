//! Streaming video upload.
//!
//! - [`UploadPipeline`] - validation and background execution
//! - [`frames`] - metadata/chunk frames sent on the upload stream

pub mod frames;
pub mod pipeline;

pub use frames::{UploadAck, UploadFrame, UploadMetadata, VideoChunk};
pub use pipeline::{
    upload_file, validate, UploadJob, UploadPipeline, UploadTask, CHUNK_SIZE, MAX_UPLOAD_BYTES,
};
