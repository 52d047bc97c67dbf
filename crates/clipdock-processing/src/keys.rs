//! Storage key derivation
//!
//! Keys are `<orientation>/<64 hex chars>`: a coarse aspect-ratio partition
//! prefix plus 32 bytes of cryptographic randomness. Collisions are treated
//! as negligible; no detection is performed. Two uploads with identical
//! content always receive different keys.

use crate::probe::Geometry;
use rand::RngCore;

/// How far a ratio may sit from 16:9 or 9:16 and still count as that class.
const RATIO_TOLERANCE: f64 = 0.01;

const LANDSCAPE_RATIO: f64 = 16.0 / 9.0;
const PORTRAIT_RATIO: f64 = 9.0 / 16.0;

/// Coarse aspect-ratio bucket for a video's pixel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Classify a geometry against the two canonical ratios. Anything that
    /// matches neither (near-square, ultrawide, ...) collapses to `Other`.
    pub fn classify(geometry: Geometry) -> Orientation {
        let ratio = f64::from(geometry.width) / f64::from(geometry.height);
        if (ratio - LANDSCAPE_RATIO).abs() <= RATIO_TOLERANCE {
            Orientation::Landscape
        } else if (ratio - PORTRAIT_RATIO).abs() <= RATIO_TOLERANCE {
            Orientation::Portrait
        } else {
            Orientation::Other
        }
    }

    /// Storage key partition prefix for this class.
    pub fn prefix(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape",
            Orientation::Portrait => "portrait",
            Orientation::Other => "other",
        }
    }
}

/// Derive a fresh storage key for the given orientation class.
pub fn derive_storage_key(orientation: Orientation) -> String {
    let mut raw = [0u8; 32];
    rand::rng().fill_bytes(&mut raw);
    format!("{}/{}", orientation.prefix(), hex::encode(raw))
}
