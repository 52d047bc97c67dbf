use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A video record as persisted in the metadata store.
///
/// `video_url` is the stored reference to the uploaded object
/// (`"<bucket>,<key>"`, see [`super::reference::StoredReference`]), or `None`
/// while no video has been uploaded for the record. Read paths substitute it
/// with a freshly signed URL before returning the record; the substitution is
/// never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
