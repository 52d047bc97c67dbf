//! Application-wide constants

/// The single media type accepted for video ingestion.
pub const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Default validity window for signed read URLs, in seconds.
pub const DEFAULT_SIGNED_URL_TTL_SECS: u64 = 180;

/// Default upper bound on an upload request body (1 GiB).
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 1 << 30;
