//! Clipdock processing library
//!
//! The video ingestion pipeline: probe container metadata, rewrite uploads
//! for fast-start playback, derive partitioned storage keys, and drive the
//! whole stage → remux → probe → upload → persist sequence.

pub mod ingest;
pub mod keys;
pub mod probe;
pub mod remux;
pub mod tools;

pub use ingest::{IngestError, IngestOrchestrator};
pub use keys::Orientation;
pub use probe::{Geometry, ProbeError};
pub use remux::RemuxError;
pub use tools::{FfmpegTools, MediaTools};
