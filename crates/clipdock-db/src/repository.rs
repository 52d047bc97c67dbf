use async_trait::async_trait;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use crate::traits::VideoStore;

/// Video record repository over Postgres.
#[derive(Clone)]
pub struct VideoRepository {
    pool: PgPool,
}

impl VideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_video(&self, owner_id: Uuid, title: &str) -> Result<Video, AppError> {
        let video = sqlx::query_as::<_, Video>(
            "INSERT INTO videos (owner_id, title) VALUES ($1, $2)
             RETURNING id, owner_id, title, video_url, created_at, updated_at",
        )
        .bind(owner_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(video_id = %video.id, owner_id = %owner_id, "Video record created");

        Ok(video)
    }

    pub async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        let video = sqlx::query_as::<_, Video>(
            "SELECT id, owner_id, title, video_url, created_at, updated_at
             FROM videos WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Video>, AppError> {
        let videos = sqlx::query_as::<_, Video>(
            "SELECT id, owner_id, title, video_url, created_at, updated_at
             FROM videos WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    pub async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let updated = sqlx::query_as::<_, Video>(
            "UPDATE videos SET title = $2, video_url = $3, updated_at = now()
             WHERE id = $1
             RETURNING id, owner_id, title, video_url, created_at, updated_at",
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.video_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("video {} not found", video.id)))?;

        Ok(updated)
    }
}

#[async_trait]
impl VideoStore for VideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        VideoRepository::get_video(self, id).await
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        VideoRepository::update_video(self, video).await
    }
}
