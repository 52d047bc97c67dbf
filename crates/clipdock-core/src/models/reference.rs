//! Stored reference codec
//!
//! A persisted video reference packs the target bucket and object key into a
//! single `"<bucket>,<key>"` string. Decoding is tolerant: anything that is
//! not exactly two non-empty comma-separated parts is treated as a legacy
//! value and left alone by read paths, never raised as an error.

/// Location of an uploaded object, as packed into a video record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReference {
    pub bucket: String,
    pub key: String,
}

impl StoredReference {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        StoredReference {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Pack into the persisted `"<bucket>,<key>"` form.
    pub fn encode(&self) -> String {
        format!("{},{}", self.bucket, self.key)
    }

    /// Unpack a persisted reference. Returns `None` for legacy or malformed
    /// values (wrong number of parts, empty bucket or key).
    pub fn parse(raw: &str) -> Option<StoredReference> {
        let mut parts = raw.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(bucket), Some(key), None) if !bucket.is_empty() && !key.is_empty() => {
                Some(StoredReference::new(bucket, key))
            }
            _ => None,
        }
    }
}
