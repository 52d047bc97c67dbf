//! Fast-start remuxer - rewrites a container so index metadata precedes
//! sample data, allowing playback before the full file has downloaded.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

/// Suffix appended to the input path to form the output path.
const FAST_START_SUFFIX: &str = ".processing";

#[derive(Debug, Error)]
pub enum RemuxError {
    #[error("failed to run ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg exited with failure: {stderr}")]
    Failed { stderr: String },
}

/// Remux `input` into a new fast-start file, copying all streams unmodified.
///
/// Returns the output path (`input` + a fixed suffix) on success. On failure
/// any partial output is removed before the error is returned.
pub async fn remux_fast_start(ffmpeg_path: &str, input: &Path) -> Result<PathBuf, RemuxError> {
    let output_path = fast_start_output_path(input);

    let result = Command::new(ffmpeg_path)
        .arg("-i")
        .arg(input)
        .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
        .arg(&output_path)
        .output()
        .await;

    match result {
        Err(e) => {
            remove_partial_output(&output_path);
            Err(RemuxError::Spawn(e))
        }
        Ok(output) if !output.status.success() => {
            remove_partial_output(&output_path);
            Err(RemuxError::Failed {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
        Ok(_) => Ok(output_path),
    }
}

fn fast_start_output_path(input: &Path) -> PathBuf {
    let mut raw = input.as_os_str().to_os_string();
    raw.push(FAST_START_SUFFIX);
    PathBuf::from(raw)
}

/// Best-effort only; a cleanup failure must never replace the remux error.
fn remove_partial_output(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!(path = %path.display(), error = %e, "Failed to remove partial remux output");
        }
    }
}
