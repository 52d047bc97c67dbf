//! Application state shared across handlers.

use clipdock_core::Config;
use clipdock_db::VideoRepository;
use clipdock_processing::IngestOrchestrator;
use clipdock_storage::Storage;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub config: Config,
    pub videos: VideoRepository,
    pub storage: Arc<dyn Storage>,
    pub ingest: IngestOrchestrator,
}

impl AppState {
    /// Validity window for signed read URLs.
    pub fn signed_url_ttl(&self) -> Duration {
        Duration::from_secs(self.config.signed_url_ttl_secs)
    }
}
