//! Route configuration

use crate::handlers::{video_upload, videos};
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use clipdock_core::Config;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(config: &Config, state: Arc<AppState>) -> Router {
    // Uploads stream multipart bodies, so the body limit must cover the video
    // size cap rather than axum's 2 MB default.
    let upload_routes = Router::new()
        .route("/api/videos/{id}/video", post(video_upload::upload_video))
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes));

    Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/videos",
            post(videos::create_video).get(videos::list_videos),
        )
        .route("/api/videos/{id}", get(videos::get_video))
        .merge(upload_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
