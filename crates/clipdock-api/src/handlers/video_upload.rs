//! Video file upload handler.
//!
//! Accepts a multipart form with a `video` part, streams it straight into the
//! ingestion pipeline, and returns the updated record. The request body is
//! never buffered in memory; staging to disk happens inside the orchestrator.

use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use futures::TryStreamExt;
use std::sync::Arc;
use tokio_util::io::StreamReader;
use uuid::Uuid;

const VIDEO_FIELD: &str = "video";

pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    AuthUser(owner_id): AuthUser,
    Path(video_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<Video>, HttpAppError> {
    while let Some(field) = multipart.next_field().await.map_err(HttpAppError::from)? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let media_type = field
            .content_type()
            .ok_or_else(|| {
                AppError::InvalidInput("video part is missing a content type".to_string())
            })?
            .to_string();

        let body = StreamReader::new(field.map_err(std::io::Error::other));

        let video = state
            .ingest
            .ingest(video_id, owner_id, &media_type, body)
            .await?;

        return Ok(Json(video));
    }

    Err(AppError::InvalidInput(format!("multipart form has no {VIDEO_FIELD:?} part")).into())
}
