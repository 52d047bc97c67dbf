//! Configuration module
//!
//! Configuration is read from the environment once at process start and is
//! immutable afterwards. `DATABASE_URL`, `JWT_SECRET`, and `S3_BUCKET` are
//! required; everything else has a default.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::constants::{DEFAULT_MAX_UPLOAD_SIZE_BYTES, DEFAULT_SIGNED_URL_TTL_SECS};

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
const DEFAULT_S3_REGION: &str = "us-east-1";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, Spaces, ...).
    pub s3_endpoint: Option<String>,
    pub signed_url_ttl_secs: u64,
    pub max_upload_size_bytes: usize,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Config {
            server_port: parsed("PORT", DEFAULT_SERVER_PORT)?,
            database_url: required("DATABASE_URL")?,
            db_max_connections: parsed("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: parsed("DB_TIMEOUT_SECONDS", DEFAULT_DB_TIMEOUT_SECS)?,
            jwt_secret: required("JWT_SECRET")?,
            s3_bucket: required("S3_BUCKET")?,
            s3_region: optional("S3_REGION").unwrap_or_else(|| DEFAULT_S3_REGION.to_string()),
            s3_endpoint: optional("S3_ENDPOINT"),
            signed_url_ttl_secs: parsed("SIGNED_URL_TTL_SECS", DEFAULT_SIGNED_URL_TTL_SECS)?,
            max_upload_size_bytes: parsed("MAX_UPLOAD_SIZE_BYTES", DEFAULT_MAX_UPLOAD_SIZE_BYTES)?,
            ffmpeg_path: optional("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe_path: optional("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
        })
    }

    /// Fail fast on settings that would only surface as runtime errors later.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            anyhow::bail!("JWT_SECRET must be at least 32 bytes");
        }
        if self.s3_bucket.is_empty() {
            anyhow::bail!("S3_BUCKET must not be empty");
        }
        if self.signed_url_ttl_secs == 0 {
            anyhow::bail!("SIGNED_URL_TTL_SECS must be greater than zero");
        }
        if self.max_upload_size_bytes == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE_BYTES must be greater than zero");
        }
        Ok(())
    }
}

fn required(key: &str) -> Result<String, anyhow::Error> {
    env::var(key).map_err(|_| anyhow::anyhow!("{} environment variable is required", key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}

fn parsed<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
