//! Ingestion pipeline tests against in-memory fakes of the metadata store,
//! the object store gateway, and the external media tools.

use async_trait::async_trait;
use chrono::Utc;
use clipdock_core::models::Video;
use clipdock_core::AppError;
use clipdock_db::VideoStore;
use clipdock_processing::{Geometry, IngestError, IngestOrchestrator, MediaTools, ProbeError, RemuxError};
use clipdock_storage::{Storage, StorageError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

struct FakeStore {
    videos: Mutex<HashMap<Uuid, Video>>,
    fail_update: bool,
}

impl FakeStore {
    fn with_video(video: Video) -> Arc<Self> {
        let mut videos = HashMap::new();
        videos.insert(video.id, video);
        Arc::new(Self {
            videos: Mutex::new(videos),
            fail_update: false,
        })
    }

    fn failing_update(video: Video) -> Arc<Self> {
        let mut videos = HashMap::new();
        videos.insert(video.id, video);
        Arc::new(Self {
            videos: Mutex::new(videos),
            fail_update: true,
        })
    }

    fn stored(&self, id: Uuid) -> Video {
        self.videos.lock().unwrap().get(&id).cloned().unwrap()
    }
}

#[async_trait]
impl VideoStore for FakeStore {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.lock().unwrap().get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        if self.fail_update {
            return Err(AppError::Internal("record store unavailable".to_string()));
        }
        let mut guard = self.videos.lock().unwrap();
        guard.insert(video.id, video.clone());
        Ok(video.clone())
    }
}

struct FakeStorage {
    bucket: String,
    puts: Mutex<Vec<String>>,
    fail_put: bool,
}

impl FakeStorage {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            bucket: "test-bucket".to_string(),
            puts: Mutex::new(Vec::new()),
            fail_put: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            bucket: "test-bucket".to_string(),
            puts: Mutex::new(Vec::new()),
            fail_put: true,
        })
    }

    fn uploaded_keys(&self) -> Vec<String> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for FakeStorage {
    async fn put_file(&self, key: &str, path: &Path, _content_type: &str) -> Result<(), StorageError> {
        if self.fail_put {
            return Err(StorageError::UploadFailed("connection reset".to_string()));
        }
        // The processed file must still be on disk while it is uploaded.
        assert!(path.exists(), "uploaded file missing at put time");
        self.puts.lock().unwrap().push(key.to_string());
        Ok(())
    }

    async fn presigned_get(
        &self,
        bucket: &str,
        key: &str,
        _expires_in: Duration,
    ) -> Result<String, StorageError> {
        Ok(format!("https://signed.example/{bucket}/{key}"))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[derive(Default)]
struct FakeTools {
    geometry: Option<Geometry>,
    probe_no_streams: bool,
    remux_fails: bool,
    remux_inputs: Mutex<Vec<PathBuf>>,
    inspected: Mutex<Vec<PathBuf>>,
}

impl FakeTools {
    fn with_geometry(width: u32, height: u32) -> Arc<Self> {
        Arc::new(Self {
            geometry: Some(Geometry { width, height }),
            ..Default::default()
        })
    }

    fn no_streams() -> Arc<Self> {
        Arc::new(Self {
            probe_no_streams: true,
            ..Default::default()
        })
    }

    fn failing_remux() -> Arc<Self> {
        Arc::new(Self {
            remux_fails: true,
            ..Default::default()
        })
    }

    fn remux_inputs(&self) -> Vec<PathBuf> {
        self.remux_inputs.lock().unwrap().clone()
    }

    fn inspected_paths(&self) -> Vec<PathBuf> {
        self.inspected.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaTools for FakeTools {
    async fn inspect(&self, path: &Path) -> Result<Geometry, ProbeError> {
        self.inspected.lock().unwrap().push(path.to_path_buf());
        if self.probe_no_streams {
            return Err(ProbeError::NoStreams);
        }
        Ok(self.geometry.expect("fake geometry not configured"))
    }

    async fn remux(&self, input: &Path) -> Result<PathBuf, RemuxError> {
        self.remux_inputs.lock().unwrap().push(input.to_path_buf());
        if self.remux_fails {
            return Err(RemuxError::Failed {
                stderr: "moov atom not found".to_string(),
            });
        }
        let mut raw = input.as_os_str().to_os_string();
        raw.push(".processing");
        let output = PathBuf::from(raw);
        std::fs::copy(input, &output).expect("fake remux copy");
        Ok(output)
    }
}

fn draft_video(owner_id: Uuid) -> Video {
    let now = Utc::now();
    Video {
        id: Uuid::new_v4(),
        owner_id,
        title: "boots playing fetch".to_string(),
        video_url: None,
        created_at: now,
        updated_at: now,
    }
}

fn orchestrator(
    store: Arc<FakeStore>,
    storage: Arc<FakeStorage>,
    tools: Arc<FakeTools>,
) -> IngestOrchestrator {
    IngestOrchestrator::new(store, storage, tools)
}

const BODY: &[u8] = b"not really mp4 bytes, the fake tools do not care";

#[tokio::test]
async fn test_successful_ingest_persists_packed_reference() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let storage = FakeStorage::new();
    let tools = FakeTools::with_geometry(1920, 1080);

    let updated = orchestrator(store.clone(), storage.clone(), tools.clone())
        .ingest(video_id, owner, "video/mp4", BODY)
        .await
        .unwrap();

    let reference = updated.video_url.expect("reference not set");
    let (bucket, key) = reference.split_once(',').unwrap();
    assert_eq!(bucket, "test-bucket");
    assert!(key.starts_with("landscape/"));
    assert_eq!(key.len(), "landscape/".len() + 64);

    assert_eq!(storage.uploaded_keys(), vec![key.to_string()]);
    assert_eq!(store.stored(video_id).video_url, Some(reference));
}

#[tokio::test]
async fn test_portrait_and_other_partitions() {
    for (width, height, prefix) in [(1080u32, 1920u32, "portrait/"), (1000, 1000, "other/")] {
        let owner = Uuid::new_v4();
        let video = draft_video(owner);
        let video_id = video.id;
        let store = FakeStore::with_video(video);
        let storage = FakeStorage::new();
        let tools = FakeTools::with_geometry(width, height);

        let updated = orchestrator(store, storage, tools)
            .ingest(video_id, owner, "video/mp4", BODY)
            .await
            .unwrap();

        let reference = updated.video_url.unwrap();
        let (_, key) = reference.split_once(',').unwrap();
        assert!(key.starts_with(prefix), "{key} should start with {prefix}");
    }
}

#[tokio::test]
async fn test_media_type_parameters_are_ignored() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);

    let result = orchestrator(store, FakeStorage::new(), FakeTools::with_geometry(1920, 1080))
        .ingest(video_id, owner, "video/mp4; codecs=\"avc1\"", BODY)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_rejects_wrong_media_type_before_staging() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let storage = FakeStorage::new();
    let tools = FakeTools::with_geometry(1920, 1080);

    let result = orchestrator(store.clone(), storage.clone(), tools.clone())
        .ingest(video_id, owner, "video/webm", BODY)
        .await;

    assert!(matches!(result, Err(IngestError::UnsupportedMediaType(_))));
    // Validation failed up front: nothing was staged, remuxed, or uploaded.
    assert!(tools.remux_inputs().is_empty());
    assert!(storage.uploaded_keys().is_empty());
    assert_eq!(store.stored(video_id).video_url, None);
}

#[tokio::test]
async fn test_rejects_non_owner() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let tools = FakeTools::with_geometry(1920, 1080);

    let result = orchestrator(store, FakeStorage::new(), tools.clone())
        .ingest(video_id, Uuid::new_v4(), "video/mp4", BODY)
        .await;

    assert!(matches!(result, Err(IngestError::NotOwner(_))));
    assert!(tools.remux_inputs().is_empty());
}

#[tokio::test]
async fn test_unknown_video_id() {
    let store = FakeStore::with_video(draft_video(Uuid::new_v4()));

    let result = orchestrator(store, FakeStorage::new(), FakeTools::with_geometry(1920, 1080))
        .ingest(Uuid::new_v4(), Uuid::new_v4(), "video/mp4", BODY)
        .await;

    assert!(matches!(result, Err(IngestError::NotFound(_))));
}

#[tokio::test]
async fn test_no_streams_aborts_before_upload() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let storage = FakeStorage::new();
    let tools = FakeTools::no_streams();

    let result = orchestrator(store.clone(), storage.clone(), tools.clone())
        .ingest(video_id, owner, "video/mp4", BODY)
        .await;

    assert!(matches!(
        result,
        Err(IngestError::Probe(ProbeError::NoStreams))
    ));
    assert!(storage.uploaded_keys().is_empty());
    assert_eq!(store.stored(video_id).video_url, None);

    // Both scratch files are gone.
    for path in tools.remux_inputs() {
        assert!(!path.exists(), "staged file left behind: {}", path.display());
    }
    for path in tools.inspected_paths() {
        assert!(!path.exists(), "processed file left behind: {}", path.display());
    }
}

#[tokio::test]
async fn test_remux_failure_cleans_staged_file() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let tools = FakeTools::failing_remux();

    let result = orchestrator(store, FakeStorage::new(), tools.clone())
        .ingest(video_id, owner, "video/mp4", BODY)
        .await;

    assert!(matches!(result, Err(IngestError::Remux(_))));
    for path in tools.remux_inputs() {
        assert!(!path.exists(), "staged file left behind: {}", path.display());
    }
}

#[tokio::test]
async fn test_upload_failure_leaves_record_unchanged() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let storage = FakeStorage::failing();
    let tools = FakeTools::with_geometry(1920, 1080);

    let result = orchestrator(store.clone(), storage, tools.clone())
        .ingest(video_id, owner, "video/mp4", BODY)
        .await;

    assert!(matches!(result, Err(IngestError::Upload(_))));
    assert_eq!(store.stored(video_id).video_url, None);
    for path in tools.inspected_paths() {
        assert!(!path.exists(), "processed file left behind: {}", path.display());
    }
}

#[tokio::test]
async fn test_persist_failure_is_the_orphan_window() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::failing_update(video);
    let storage = FakeStorage::new();
    let tools = FakeTools::with_geometry(1920, 1080);

    let result = orchestrator(store.clone(), storage.clone(), tools)
        .ingest(video_id, owner, "video/mp4", BODY)
        .await;

    assert!(matches!(result, Err(IngestError::Persist(_))));
    // The object made it to storage but the record still has no reference.
    assert_eq!(storage.uploaded_keys().len(), 1);
    assert_eq!(store.stored(video_id).video_url, None);
}

#[tokio::test]
async fn test_identical_uploads_get_distinct_keys() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let storage = FakeStorage::new();
    let tools = FakeTools::with_geometry(1920, 1080);
    let orchestrator = orchestrator(store, storage.clone(), tools);

    orchestrator
        .ingest(video_id, owner, "video/mp4", BODY)
        .await
        .unwrap();
    orchestrator
        .ingest(video_id, owner, "video/mp4", BODY)
        .await
        .unwrap();

    let keys = storage.uploaded_keys();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}

#[tokio::test]
async fn test_success_leaves_no_temp_files() {
    let owner = Uuid::new_v4();
    let video = draft_video(owner);
    let video_id = video.id;
    let store = FakeStore::with_video(video);
    let tools = FakeTools::with_geometry(1920, 1080);

    orchestrator(store, FakeStorage::new(), tools.clone())
        .ingest(video_id, owner, "video/mp4", BODY)
        .await
        .unwrap();

    for path in tools.remux_inputs() {
        assert!(!path.exists(), "staged file left behind: {}", path.display());
    }
    for path in tools.inspected_paths() {
        assert!(!path.exists(), "processed file left behind: {}", path.display());
    }
}
