//! Clipdock storage library
//!
//! Object store gateway: uploads processed video files under derived keys and
//! issues short-lived signed read URLs. The `Storage` trait keeps the rest of
//! the system independent of the S3 SDK.

pub mod s3;
pub mod traits;

pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
