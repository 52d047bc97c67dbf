use async_trait::async_trait;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use uuid::Uuid;

/// Metadata store collaborator as seen by the ingestion pipeline: fetch a
/// record, replace it wholesale. Per-record concurrency is last-write-wins,
/// delegated to the backing store.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist the record, returning the stored row. Fails with `NotFound`
    /// if the record has disappeared.
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;
}
