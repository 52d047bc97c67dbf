//! External tool capability trait
//!
//! The orchestrator depends on this narrow interface rather than on specific
//! binaries, so an in-process decoder could replace ffmpeg/ffprobe without
//! touching the pipeline.

use crate::probe::{self, Geometry, ProbeError};
use crate::remux::{self, RemuxError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

#[async_trait]
pub trait MediaTools: Send + Sync {
    /// Read stream geometry from a media file.
    async fn inspect(&self, path: &Path) -> Result<Geometry, ProbeError>;

    /// Rewrite a container for fast-start playback, producing a new file.
    /// The returned path is always distinct from `input`.
    async fn remux(&self, input: &Path) -> Result<PathBuf, RemuxError>;
}

/// Production implementation backed by the ffmpeg and ffprobe binaries.
pub struct FfmpegTools {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl FfmpegTools {
    pub fn new(ffmpeg_path: String, ffprobe_path: String) -> Self {
        Self {
            ffmpeg_path,
            ffprobe_path,
        }
    }
}

#[async_trait]
impl MediaTools for FfmpegTools {
    async fn inspect(&self, path: &Path) -> Result<Geometry, ProbeError> {
        probe::probe_geometry(&self.ffprobe_path, path).await
    }

    async fn remux(&self, input: &Path) -> Result<PathBuf, RemuxError> {
        remux::remux_fast_start(&self.ffmpeg_path, input).await
    }
}
