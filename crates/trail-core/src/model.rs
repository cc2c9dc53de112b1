//! Canonical record types shared by every data source

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Difficulty grade of a trail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Moderate,
    Difficult,
    Extreme,
}

impl Difficulty {
    /// All grades in display order.
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Moderate,
        Difficulty::Difficult,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Difficult => "difficult",
            Difficulty::Extreme => "extreme",
        }
    }

    /// Map a free-form source difficulty string onto the canonical grades.
    ///
    /// Upstream sources use wording like "easiest" or "intermediate"; this
    /// matches by substring and falls back to `Moderate` for anything it
    /// does not recognize, including `None`.
    pub fn parse_loose(raw: Option<&str>) -> Difficulty {
        let Some(raw) = raw else {
            return Difficulty::Moderate;
        };
        let lower = raw.to_lowercase();
        if lower.contains("easiest") || lower.contains("easy") {
            Difficulty::Easy
        } else if lower.contains("moderate") || lower.contains("intermediate") {
            Difficulty::Moderate
        } else if lower.contains("difficult") || lower.contains("hard") {
            Difficulty::Difficult
        } else if lower.contains("expert") || lower.contains("extreme") {
            Difficulty::Extreme
        } else {
            Difficulty::Moderate
        }
    }
}

/// A user-submitted trail review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    pub id: String,
    pub author: String,
    pub date: Option<DateTime<Utc>>,
    pub rating: u8,
    pub text: String,
    pub trail_id: String,
    pub tips: String,
    pub photos: Vec<String>,
}

/// Canonical trail record. Every source is adapted into this shape
/// before filtering or display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trail {
    /// Stable unique identifier, immutable once assigned.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Trail length in kilometers; derived from `coordinates` when the
    /// source does not supply it.
    pub length: f64,
    /// Cumulative elevation gain in meters.
    pub elevation_gain: u32,
    pub difficulty: Difficulty,
    /// Ordered path as (longitude, latitude, elevation) triples.
    pub coordinates: Vec<[f64; 3]>,
    /// Region names this trail belongs to.
    pub region: Vec<String>,
    /// Reviews, newest first; lazily attached.
    pub reviews: Vec<Review>,
    pub estimated_time: String,
    pub image_url: String,
    pub status: String,
}

/// Reference data used for filtering and labeling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub description: String,
    pub trail_count: usize,
}

impl Region {
    /// Build a region with a stable slug id derived from its name.
    pub fn from_name(name: &str, trail_count: usize) -> Region {
        Region {
            id: format!("region-{}", slug(name)),
            name: name.to_string(),
            description: String::new(),
            trail_count,
        }
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Condition alert attached to a trail by the open-data provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailAlert {
    pub id: String,
    pub heading: String,
    pub detail: String,
}

/// Client-side filter criteria. Fields are independently optional and
/// combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailFilters {
    /// Exact difficulty match; the sentinel "all" disables the criterion.
    pub difficulty: Option<String>,
    /// Length range as a "min-max" string in kilometers.
    pub length: Option<String>,
    /// Elevation-gain range as a "min-max" string in meters.
    pub elevation: Option<String>,
    /// Case-insensitive substring match against region names.
    pub region: Option<String>,
    /// Free-text search over name and description; words OR together.
    pub search_term: Option<String>,
}

impl TrailFilters {
    pub fn is_empty(&self) -> bool {
        self.difficulty.is_none()
            && self.length.is_none()
            && self.elevation.is_none()
            && self.region.is_none()
            && self.search_term.is_none()
    }

    /// Canonical string form used for cache keys. Equivalent filter sets
    /// must produce identical fragments.
    pub fn cache_fragment(&self) -> String {
        let part = |v: &Option<String>| v.as_deref().unwrap_or("").to_lowercase();
        format!(
            "d={};l={};e={};r={};q={}",
            part(&self.difficulty),
            part(&self.length),
            part(&self.elevation),
            part(&self.region),
            part(&self.search_term),
        )
    }
}

/// A page of a collection request. Pages are zero-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    pub fn new(page: usize, page_size: usize) -> PageRequest {
        PageRequest { page, page_size }
    }

    /// Index of the first record on this page.
    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest {
            page: 0,
            page_size: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_loose() {
        assert_eq!(Difficulty::parse_loose(Some("Easiest walking")), Difficulty::Easy);
        assert_eq!(Difficulty::parse_loose(Some("Intermediate")), Difficulty::Moderate);
        assert_eq!(Difficulty::parse_loose(Some("Hard tramping")), Difficulty::Difficult);
        assert_eq!(Difficulty::parse_loose(Some("Expert route")), Difficulty::Extreme);
        assert_eq!(Difficulty::parse_loose(Some("unknown")), Difficulty::Moderate);
        assert_eq!(Difficulty::parse_loose(None), Difficulty::Moderate);
    }

    #[test]
    fn test_trail_wire_shape() {
        let json = r#"{
            "id": "t-1",
            "name": "Riverside Loop",
            "length": 4.2,
            "elevationGain": 120,
            "difficulty": "easy",
            "region": ["Otago"]
        }"#;
        let trail: Trail = serde_json::from_str(json).unwrap();
        assert_eq!(trail.id, "t-1");
        assert_eq!(trail.elevation_gain, 120);
        assert_eq!(trail.difficulty, Difficulty::Easy);
        assert!(trail.coordinates.is_empty());
    }

    #[test]
    fn test_cache_fragment_is_canonical() {
        let a = TrailFilters {
            difficulty: Some("Easy".to_string()),
            ..Default::default()
        };
        let b = TrailFilters {
            difficulty: Some("easy".to_string()),
            ..Default::default()
        };
        assert_eq!(a.cache_fragment(), b.cache_fragment());
    }

    #[test]
    fn test_region_slug() {
        let region = Region::from_name("Hawke's Bay", 3);
        assert_eq!(region.id, "region-hawke's-bay");
        assert_eq!(region.trail_count, 3);
    }
}
