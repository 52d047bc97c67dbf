//! Video record CRUD handlers.
//!
//! Read handlers never return a raw stored reference; `signing::with_signed_url`
//! rewrites it into a presigned URL on the way out.

use crate::auth::AuthUser;
use crate::error::HttpAppError;
use crate::signing::with_signed_url;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: String,
}

pub async fn create_video(
    State(state): State<Arc<AppState>>,
    AuthUser(owner_id): AuthUser,
    Json(req): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), HttpAppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::InvalidInput("title must not be empty".to_string()).into());
    }

    let video = state.videos.create_video(owner_id, &req.title).await?;

    tracing::info!(video_id = %video.id, owner_id = %owner_id, "created video record");

    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn get_video(
    State(state): State<Arc<AppState>>,
    AuthUser(_owner_id): AuthUser,
    Path(video_id): Path<Uuid>,
) -> Result<Json<Video>, HttpAppError> {
    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("video {video_id} not found")))?;

    let video = with_signed_url(state.storage.as_ref(), state.signed_url_ttl(), video).await?;

    Ok(Json(video))
}

pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    AuthUser(owner_id): AuthUser,
) -> Result<Json<Vec<Video>>, HttpAppError> {
    let videos = state.videos.list_by_owner(owner_id).await?;

    let mut signed = Vec::with_capacity(videos.len());
    for video in videos {
        signed.push(with_signed_url(state.storage.as_ref(), state.signed_url_ttl(), video).await?);
    }

    Ok(Json(signed))
}
