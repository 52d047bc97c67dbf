//! Storage abstraction trait

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Object store gateway.
///
/// Implementations are bound to one target bucket for writes; signed reads
/// take the bucket explicitly so references decoded from older records keep
/// resolving even after a bucket migration.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a local file under `key` in the gateway's bucket, streaming its
    /// contents rather than buffering the whole file in memory. Failure is
    /// terminal for the request; retries belong to an outer policy.
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<()>;

    /// Issue a signed GET URL for one object, valid for exactly `expires_in`
    /// from issuance. Has no side effect on the object; safe to call
    /// repeatedly (each call may yield a different URL).
    async fn presigned_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// The bucket uploads are written to.
    fn bucket(&self) -> &str;
}
