//! Clipdock core library
//!
//! This crate provides the domain models, error types, configuration, and
//! constants shared by the other clipdock crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, LogLevel};
