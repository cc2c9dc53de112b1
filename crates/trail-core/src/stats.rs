//! Aggregate statistics over a trail collection

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Trail};

/// Fixed length buckets used for statistics: (id, label, min km, max km).
pub const LENGTH_RANGES: [(&str, &str, f64, Option<f64>); 4] = [
    ("0-5", "Short (< 5km)", 0.0, Some(5.0)),
    ("5-15", "Medium (5-15km)", 5.0, Some(15.0)),
    ("15-30", "Long (15-30km)", 15.0, Some(30.0)),
    ("30-100", "Very Long (> 30km)", 30.0, None),
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LengthBucket {
    pub range: String,
    pub label: String,
    pub count: usize,
    pub min: f64,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DifficultyCount {
    pub difficulty: Difficulty,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionCount {
    pub id: String,
    pub name: String,
    pub count: usize,
}

/// Aggregate statistics for a trail collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailStatistics {
    pub total_count: usize,
    /// Sum of all trail lengths in kilometers.
    pub total_distance: f64,
    /// Counts per fixed length bucket; every bucket is present.
    pub by_length: Vec<LengthBucket>,
    /// Counts per difficulty grade; every grade is present.
    pub by_difficulty: Vec<DifficultyCount>,
    /// Counts per region, descending by count; only regions with at
    /// least one trail appear.
    pub by_region: Vec<RegionCount>,
}

/// Compute statistics in a single pass per dimension.
pub fn compute(trails: &[Trail]) -> TrailStatistics {
    let mut total_distance = 0.0;
    let mut length_counts = [0usize; LENGTH_RANGES.len()];
    let mut difficulty_counts: AHashMap<Difficulty, usize> = AHashMap::new();
    let mut region_counts: AHashMap<String, usize> = AHashMap::new();

    for trail in trails {
        total_distance += trail.length;

        for (idx, (_, _, min, max)) in LENGTH_RANGES.iter().enumerate() {
            let in_bucket = match max {
                Some(max) => trail.length >= *min && trail.length < *max,
                None => trail.length >= *min,
            };
            if in_bucket {
                length_counts[idx] += 1;
                break;
            }
        }

        *difficulty_counts.entry(trail.difficulty).or_default() += 1;

        for name in &trail.region {
            if !name.is_empty() {
                *region_counts.entry(name.clone()).or_default() += 1;
            }
        }
    }

    let by_length = LENGTH_RANGES
        .iter()
        .zip(length_counts)
        .map(|((id, label, min, max), count)| LengthBucket {
            range: id.to_string(),
            label: label.to_string(),
            count,
            min: *min,
            max: *max,
        })
        .collect();

    let by_difficulty = Difficulty::ALL
        .iter()
        .map(|difficulty| DifficultyCount {
            difficulty: *difficulty,
            count: difficulty_counts.get(difficulty).copied().unwrap_or(0),
        })
        .collect();

    let mut by_region: Vec<RegionCount> = region_counts
        .into_iter()
        .map(|(name, count)| RegionCount {
            id: format!("region-{}", name.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")),
            name,
            count,
        })
        .collect();
    // Descending by count, ties by name so the output is deterministic.
    by_region.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    TrailStatistics {
        total_count: trails.len(),
        total_distance,
        by_length,
        by_difficulty,
        by_region,
    }
}
