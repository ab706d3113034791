//! Chunked upload pipeline.
//!
//! [`UploadPipeline::start`] validates every precondition synchronously and
//! only then spawns a background task that streams the file. The task owns
//! its stream and file handle, touches [`SharedState`] only through its
//! atomic operations, and reports its terminal outcome through the
//! [`UiQueue`]. There is no mid-flight cancellation.

use std::io::ErrorKind;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::{AppMessage, UiQueue};
use crate::catalog;
use crate::error::{RemoteError, ValidationError};
use crate::models::Notification;
use crate::state::SharedState;
use crate::traits::RemoteClient;

use super::frames::{UploadAck, UploadFrame, UploadMetadata, VideoChunk};

/// Largest accepted source file: 500 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 500 * 1024 * 1024;

/// Size of every chunk frame except possibly the last.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// How long the success message stays up before returning to the dashboard.
pub const DEFAULT_SUMMARY_DELAY: Duration = Duration::from_secs(2);

/// One validated unit of work. Lives only for the duration of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    pub file_path: String,
    pub title: String,
    pub description: String,
    pub owner_user_id: String,
    /// Size observed at validation time, for display only.
    pub file_size: u64,
}

/// Check every precondition of an upload without starting anything.
///
/// Checked in order: file path and title present, file exists and is a
/// regular file within [`MAX_UPLOAD_BYTES`], a user is logged in, a remote
/// client is installed.
pub fn validate(
    state: &SharedState,
    file_path: &str,
    title: &str,
    description: &str,
) -> Result<(UploadJob, Arc<dyn RemoteClient>), ValidationError> {
    let file_path = file_path.trim();
    if file_path.is_empty() {
        return Err(ValidationError::EmptyFilePath);
    }
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let metadata = std::fs::metadata(file_path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ValidationError::FileNotFound {
            path: file_path.to_string(),
        },
        _ => ValidationError::FileUnreadable {
            path: file_path.to_string(),
            message: e.to_string(),
        },
    })?;
    if !metadata.is_file() {
        return Err(ValidationError::FileUnreadable {
            path: file_path.to_string(),
            message: "not a regular file".to_string(),
        });
    }
    if metadata.len() > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size: metadata.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let session = state
        .session()
        .filter(|s| s.authenticated)
        .ok_or(ValidationError::NotLoggedIn)?;
    let client = state.remote_client().ok_or(ValidationError::NoClient)?;

    let job = UploadJob {
        file_path: file_path.to_string(),
        title: title.trim().to_string(),
        description: description.to_string(),
        owner_user_id: session.user_id,
        file_size: metadata.len(),
    };
    Ok((job, client))
}

/// Stream one file to the remote: metadata frame, fixed-size chunk frames,
/// then close and wait for the acknowledgment. Any send, read or close
/// error is the job's terminal failure.
pub async fn upload_file(
    client: &dyn RemoteClient,
    job: &UploadJob,
) -> Result<UploadAck, RemoteError> {
    let mut stream = client.upload_video().await?;

    stream
        .send(UploadFrame::Metadata(UploadMetadata {
            user_id: job.owner_user_id.clone(),
            title: job.title.clone(),
            description: job.description.clone(),
            file_name: job.file_path.clone(),
            file_size: 0,
        }))
        .await?;

    let mut file = File::open(&job.file_path).await?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut chunk_number: u32 = 0;
    loop {
        let n = read_chunk(&mut file, &mut buf).await?;
        if n == 0 {
            break;
        }
        chunk_number += 1;
        stream
            .send(UploadFrame::Chunk(VideoChunk {
                data: Bytes::copy_from_slice(&buf[..n]),
                chunk_number,
            }))
            .await?;
    }
    debug!("Sent {} chunks for '{}'", chunk_number, job.title);

    stream.close_and_recv().await
}

/// Fill `buf` as far as the file allows. Returns 0 only at end of input.
async fn read_chunk(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// A started upload. Dropping it detaches the task; it still runs to
/// completion.
#[derive(Debug)]
pub struct UploadTask {
    pub job: UploadJob,
    handle: JoinHandle<Result<UploadAck, RemoteError>>,
}

impl UploadTask {
    /// Wait for the job's terminal outcome.
    pub async fn outcome(self) -> Result<UploadAck, RemoteError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(RemoteError::Transport {
                message: format!("upload task aborted: {}", e),
            }),
        }
    }
}

/// Starts uploads on background tasks.
#[derive(Debug, Clone)]
pub struct UploadPipeline {
    state: SharedState,
    ui: UiQueue,
    summary_delay: Duration,
}

impl UploadPipeline {
    pub fn new(state: SharedState, ui: UiQueue) -> Self {
        Self {
            state,
            ui,
            summary_delay: DEFAULT_SUMMARY_DELAY,
        }
    }

    /// Set how long the success message stays before the dashboard returns.
    pub fn with_summary_delay(mut self, delay: Duration) -> Self {
        self.summary_delay = delay;
        self
    }

    /// Validate and, if everything holds, start the upload in the background.
    ///
    /// Validation failures are returned here and nothing is started.
    pub fn start(
        &self,
        file_path: &str,
        title: &str,
        description: &str,
    ) -> Result<UploadTask, ValidationError> {
        let (job, client) = validate(&self.state, file_path, title, description)?;
        info!(
            "Starting upload of {} ({} bytes) as '{}'",
            job.file_path, job.file_size, job.title
        );

        let handle = tokio::spawn(run_job(
            self.state.clone(),
            self.ui.clone(),
            self.summary_delay,
            client,
            job.clone(),
        ));
        Ok(UploadTask { job, handle })
    }
}

async fn run_job(
    state: SharedState,
    ui: UiQueue,
    summary_delay: Duration,
    client: Arc<dyn RemoteClient>,
    job: UploadJob,
) -> Result<UploadAck, RemoteError> {
    match upload_file(client.as_ref(), &job).await {
        Ok(ack) => {
            info!("Upload of '{}' complete (video id {:?})", job.title, ack.video_id);
            state.append_notification(Notification::upload_succeeded(&job.title));

            if let Err(e) = catalog::refresh_videos(&state, client.as_ref(), &job.owner_user_id).await {
                warn!("Video refresh after upload failed: {}", e);
            }

            ui.post(AppMessage::UploadFinished {
                title: job.title.clone(),
                result: Ok(()),
            });
            ui.post_after(summary_delay, AppMessage::ReturnToDashboard);
            Ok(ack)
        }
        Err(e) => {
            warn!("Upload of '{}' failed: {}", job.title, e);
            ui.post(AppMessage::UploadFinished {
                title: job.title.clone(),
                result: Err(e.user_message()),
            });
            Err(e)
        }
    }
}
