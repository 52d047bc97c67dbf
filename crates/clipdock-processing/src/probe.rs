//! Media prober - container metadata extraction via ffprobe

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tokio::process::Command;

/// Pixel dimensions of the first reported media stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run ffprobe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffprobe exited with failure: {stderr}")]
    Failed { stderr: String },

    #[error("failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no media streams found in file")]
    NoStreams,

    #[error("invalid video dimensions: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

/// Run ffprobe against a file and extract its stream geometry.
///
/// Geometry is required for storage key derivation, so any failure here
/// aborts the pipeline; there are no retries.
pub async fn probe_geometry(ffprobe_path: &str, path: &Path) -> Result<Geometry, ProbeError> {
    let output = Command::new(ffprobe_path)
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(path)
        .output()
        .await
        .map_err(ProbeError::Spawn)?;

    if !output.status.success() {
        return Err(ProbeError::Failed {
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    parse_probe_output(&output.stdout)
}

/// Parse ffprobe's JSON output into a [`Geometry`].
pub fn parse_probe_output(raw: &[u8]) -> Result<Geometry, ProbeError> {
    let parsed: ProbeOutput = serde_json::from_slice(raw)?;

    let stream = parsed.streams.first().ok_or(ProbeError::NoStreams)?;

    if stream.width == 0 || stream.height == 0 {
        return Err(ProbeError::InvalidGeometry {
            width: stream.width,
            height: stream.height,
        });
    }

    Ok(Geometry {
        width: stream.width,
        height: stream.height,
    })
}
