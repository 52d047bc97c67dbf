//! Ingestion orchestrator: stage upload → fast-start remux → probe →
//! derive key → upload to object storage → persist the stored reference.

use std::path::Path;
use std::sync::Arc;

use clipdock_core::constants::VIDEO_CONTENT_TYPE;
use clipdock_core::models::{StoredReference, Video};
use clipdock_core::AppError;
use clipdock_db::VideoStore;
use clipdock_storage::{Storage, StorageError};
use tempfile::TempPath;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWriteExt};
use uuid::Uuid;

use crate::keys::{derive_storage_key, Orientation};
use crate::probe::ProbeError;
use crate::remux::RemuxError;
use crate::tools::MediaTools;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("video {0} not found")]
    NotFound(Uuid),

    #[error("caller does not own video {0}")]
    NotOwner(Uuid),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error(transparent)]
    Remux(#[from] RemuxError),

    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("upload to object storage failed: {0}")]
    Upload(#[source] StorageError),

    #[error("failed to load video record: {0}")]
    Load(#[source] AppError),

    #[error("failed to persist video record: {0}")]
    Persist(#[source] AppError),
}

/// Drives one upload through the full pipeline. One HTTP request maps to one
/// `ingest` call; the orchestrator owns every scratch file it creates and
/// removes them on all exit paths, including cancellation, via drop guards.
#[derive(Clone)]
pub struct IngestOrchestrator {
    store: Arc<dyn VideoStore>,
    storage: Arc<dyn Storage>,
    tools: Arc<dyn MediaTools>,
}

impl IngestOrchestrator {
    pub fn new(
        store: Arc<dyn VideoStore>,
        storage: Arc<dyn Storage>,
        tools: Arc<dyn MediaTools>,
    ) -> Self {
        Self {
            store,
            storage,
            tools,
        }
    }

    /// Ingest an uploaded video stream for an existing record.
    ///
    /// Validation runs before any file is staged. A persist failure after a
    /// successful upload leaves an orphaned object behind; that window is
    /// accepted and logged rather than compensated (see DESIGN.md).
    pub async fn ingest<R>(
        &self,
        video_id: Uuid,
        owner_id: Uuid,
        media_type: &str,
        body: R,
    ) -> Result<Video, IngestError>
    where
        R: AsyncRead + Send,
    {
        if !media_type_essence(media_type).eq_ignore_ascii_case(VIDEO_CONTENT_TYPE) {
            return Err(IngestError::UnsupportedMediaType(media_type.to_string()));
        }

        let mut video = self
            .store
            .get_video(video_id)
            .await
            .map_err(IngestError::Load)?
            .ok_or(IngestError::NotFound(video_id))?;

        if video.owner_id != owner_id {
            return Err(IngestError::NotOwner(video_id));
        }

        tracing::info!(video_id = %video_id, owner_id = %owner_id, "Staging video upload");
        // Deleted on drop, whichever way this function exits.
        let staged = tempfile::Builder::new()
            .prefix("clipdock-upload-")
            .suffix(".mp4")
            .tempfile()?;
        stage_body(body, staged.path()).await?;

        tracing::debug!(video_id = %video_id, "Remuxing for fast start");
        let processed = self.tools.remux(staged.path()).await?;
        // Adopt the remux output so it is deleted on drop as well.
        let processed = TempPath::from_path(processed);

        tracing::debug!(video_id = %video_id, "Probing stream geometry");
        let geometry = self.tools.inspect(&processed).await?;
        let orientation = Orientation::classify(geometry);

        let key = derive_storage_key(orientation);

        self.storage
            .put_file(&key, &processed, VIDEO_CONTENT_TYPE)
            .await
            .map_err(IngestError::Upload)?;

        let reference = StoredReference::new(self.storage.bucket(), &key).encode();
        video.video_url = Some(reference);

        let video = match self.store.update_video(&video).await {
            Ok(updated) => updated,
            Err(e) => {
                // The object is uploaded but the record no longer points at
                // it. Log enough context for an offline sweep.
                tracing::error!(
                    video_id = %video_id,
                    bucket = %self.storage.bucket(),
                    key = %key,
                    error = %e,
                    "Record update failed after upload; stored object is orphaned"
                );
                return Err(IngestError::Persist(e));
            }
        };

        tracing::info!(
            video_id = %video_id,
            width = geometry.width,
            height = geometry.height,
            orientation = orientation.prefix(),
            key = %key,
            "Video ingested"
        );

        Ok(video)
    }
}

/// Copy the inbound byte stream into the staged file.
async fn stage_body<R>(body: R, path: &Path) -> Result<(), std::io::Error>
where
    R: AsyncRead + Send,
{
    let mut file = tokio::fs::File::create(path).await?;
    tokio::pin!(body);
    tokio::io::copy(&mut body, &mut file).await?;
    file.flush().await?;
    Ok(())
}

/// Strip media type parameters: `video/mp4; codecs=avc1` -> `video/mp4`.
fn media_type_essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or("").trim()
}
