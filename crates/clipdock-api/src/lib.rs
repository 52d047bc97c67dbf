//! Clipdock API library
//!
//! HTTP surface for the video ingestion and retrieval service: handlers,
//! auth extraction, error rendering, and application setup.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod signing;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
