//! Clipdock database library
//!
//! Postgres-backed metadata store for video records. The `VideoStore` trait
//! is the narrow seam the ingestion pipeline depends on; `VideoRepository`
//! is the sqlx implementation behind it.

pub mod repository;
pub mod traits;

pub use repository::VideoRepository;
pub use traits::VideoStore;
