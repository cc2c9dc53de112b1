//! Normalization of open-data track records into the canonical shape
//!
//! All source-specific field mapping is isolated here: the rest of the
//! library only ever sees [`Trail`].

use serde::Deserialize;

use trail_core::geometry;
use trail_core::model::{Difficulty, Trail, TrailAlert};

/// Raw track record as returned by the open-data API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDataTrack {
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: Vec<String>,
    /// Line segments; each segment is a list of [lon, lat, elev?] points.
    #[serde(default)]
    pub line: Vec<Vec<Vec<f64>>>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub length: Option<f64>,
    #[serde(default)]
    pub elevation_gain: Option<f64>,
}

/// Raw alert record from the open-data API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDataAlert {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub heading: String,
    #[serde(default)]
    pub detail: String,
}

/// Normalize a raw record into a canonical [`Trail`].
///
/// Only the first line segment is kept; trails with genuinely gapped
/// geometry lose subsequent segments. Missing text fields become empty
/// strings, missing numerics are derived from the coordinates, and an
/// unrecognized difficulty maps to `Moderate`. This never fails on
/// missing optional fields.
pub fn normalize(raw: &OpenDataTrack) -> Trail {
    let coordinates = first_segment(&raw.line);
    if raw.line.len() > 1 {
        tracing::debug!(
            asset_id = %raw.asset_id,
            segments = raw.line.len(),
            "keeping only the first line segment"
        );
    }

    let length = match raw.length {
        Some(length) if length.is_finite() && length >= 0.0 => (length * 100.0).round() / 100.0,
        _ => geometry::path_length(&coordinates),
    };
    let elevation_gain = match raw.elevation_gain {
        Some(gain) if gain.is_finite() && gain >= 0.0 => gain.round() as u32,
        _ => geometry::elevation_gain(&coordinates),
    };

    Trail {
        id: raw.asset_id.clone(),
        name: raw.name.clone(),
        description: raw.description.clone().unwrap_or_default(),
        length,
        elevation_gain,
        difficulty: Difficulty::parse_loose(raw.difficulty.as_deref()),
        coordinates,
        region: raw.region.clone(),
        ..Default::default()
    }
}

/// Normalize a batch, skipping records that cannot identify themselves.
/// A malformed record is never fatal to the batch.
pub fn normalize_batch(raws: &[OpenDataTrack]) -> Vec<Trail> {
    raws.iter()
        .filter_map(|raw| {
            if raw.asset_id.is_empty() {
                tracing::warn!(name = %raw.name, "skipping track without an asset id");
                return None;
            }
            Some(normalize(raw))
        })
        .collect()
}

pub fn normalize_alert(raw: &OpenDataAlert) -> TrailAlert {
    let id = match &raw.id {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    TrailAlert {
        id,
        heading: raw.heading.clone(),
        detail: raw.detail.clone(),
    }
}

fn first_segment(line: &[Vec<Vec<f64>>]) -> Vec<[f64; 3]> {
    let Some(segment) = line.first() else {
        return Vec::new();
    };
    segment
        .iter()
        .filter_map(|point| {
            let lon = *point.first()?;
            let lat = *point.get(1)?;
            if !lon.is_finite() || !lat.is_finite() {
                return None;
            }
            let elev = point.get(2).copied().filter(|e| e.is_finite()).unwrap_or(0.0);
            Some([lon, lat, elev])
        })
        .collect()
}
