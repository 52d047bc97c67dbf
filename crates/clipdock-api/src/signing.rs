//! Signed URL substitution for read responses
//!
//! Stored video records hold a packed `bucket,key` reference, never a usable
//! URL. Every read path rewrites that reference into a short-lived presigned
//! GET URL before the record leaves the service.

use clipdock_core::models::{StoredReference, Video};
use clipdock_core::AppError;
use clipdock_storage::Storage;
use std::time::Duration;

/// Replace `video.video_url` with a presigned URL for its stored object.
///
/// Records with no reference, and records whose `video_url` does not parse as
/// a packed reference (pre-migration rows holding a plain URL), pass through
/// unchanged.
pub async fn with_signed_url(
    storage: &dyn Storage,
    ttl: Duration,
    mut video: Video,
) -> Result<Video, AppError> {
    let Some(raw) = video.video_url.as_deref() else {
        return Ok(video);
    };
    let Some(reference) = StoredReference::parse(raw) else {
        return Ok(video);
    };

    let url = storage
        .presigned_get(&reference.bucket, &reference.key, ttl)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    video.video_url = Some(url);
    Ok(video)
}
