//! Client-side predicate filtering over canonical trails

use crate::model::{Trail, TrailFilters};

/// Return the trails matching all present criteria.
pub fn apply(trails: &[Trail], filters: &TrailFilters) -> Vec<Trail> {
    if filters.is_empty() {
        return trails.to_vec();
    }
    trails
        .iter()
        .filter(|trail| matches(trail, filters))
        .cloned()
        .collect()
}

/// Whether a single trail passes every present criterion.
pub fn matches(trail: &Trail, filters: &TrailFilters) -> bool {
    if let Some(difficulty) = filters.difficulty.as_deref() {
        if !difficulty.eq_ignore_ascii_case("all")
            && !difficulty.eq_ignore_ascii_case(trail.difficulty.as_str())
        {
            return false;
        }
    }

    if let Some(range) = filters.length.as_deref() {
        if !in_range(trail.length, range) {
            return false;
        }
    }

    if let Some(range) = filters.elevation.as_deref() {
        if !in_range(f64::from(trail.elevation_gain), range) {
            return false;
        }
    }

    if let Some(region) = filters.region.as_deref() {
        let needle = region.trim().to_lowercase();
        if !needle.is_empty()
            && !trail
                .region
                .iter()
                .any(|name| name.to_lowercase().contains(&needle))
        {
            return false;
        }
    }

    if let Some(term) = filters.search_term.as_deref() {
        if !matches_search(trail, term) {
            return false;
        }
    }

    true
}

/// Case-insensitive OR-word match against name and description: a trail
/// passes if any whitespace-separated word of the query appears.
pub fn matches_search(trail: &Trail, query: &str) -> bool {
    let haystack = format!("{} {}", trail.name, trail.description).to_lowercase();
    query
        .split_whitespace()
        .any(|word| haystack.contains(&word.to_lowercase()))
}

/// Test a value against a lenient "min-max" range string. A missing or
/// unparsable bound is unbounded on that side; the lower bound is
/// inclusive.
fn in_range(value: f64, range: &str) -> bool {
    let (min, max) = parse_range(range);
    if let Some(min) = min {
        if value < min {
            return false;
        }
    }
    if let Some(max) = max {
        if value > max {
            return false;
        }
    }
    true
}

fn parse_range(range: &str) -> (Option<f64>, Option<f64>) {
    let mut parts = range.splitn(2, '-');
    let min = parts.next().and_then(|s| s.trim().parse::<f64>().ok());
    let max = parts.next().and_then(|s| s.trim().parse::<f64>().ok());
    (min, max)
}
