//! Application setup and initialization
//!
//! Initialization logic lives here rather than in main.rs so it stays
//! testable and the startup order reads top to bottom.

pub mod database;
pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use clipdock_core::Config;
use clipdock_db::VideoRepository;
use clipdock_processing::{FfmpegTools, IngestOrchestrator};
use clipdock_storage::{S3Storage, Storage};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("clipdock=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("configuration validation failed")?;

    let pool = database::setup_database(&config).await?;

    let storage: Arc<dyn Storage> = Arc::new(
        S3Storage::new(
            config.s3_bucket.clone(),
            config.s3_region.clone(),
            config.s3_endpoint.clone(),
        )
        .await
        .context("failed to initialize object storage")?,
    );

    let videos = VideoRepository::new(pool);
    let tools = Arc::new(FfmpegTools::new(
        config.ffmpeg_path.clone(),
        config.ffprobe_path.clone(),
    ));
    let ingest = IngestOrchestrator::new(Arc::new(videos.clone()), storage.clone(), tools);

    let state = Arc::new(AppState {
        config: config.clone(),
        videos,
        storage,
        ingest,
    });

    let router = routes::build_router(&config, state.clone());

    tracing::info!("Application initialized");

    Ok((state, router))
}
