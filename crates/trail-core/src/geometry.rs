//! Pure geometry helpers for derived trail attributes
//!
//! Both functions are total: malformed points are skipped rather than
//! reported, and identical input always produces identical output so the
//! derived values are safe to cache.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Total path length in kilometers over consecutive coordinate pairs,
/// using the Haversine great-circle distance. Returns 0.0 for fewer than
/// two points. The result is rounded to two decimal places.
pub fn path_length(coordinates: &[[f64; 3]]) -> f64 {
    if coordinates.len() < 2 {
        return 0.0;
    }

    let mut total = 0.0;
    for pair in coordinates.windows(2) {
        let [lon1, lat1, _] = pair[0];
        let [lon2, lat2, _] = pair[1];

        if !lon1.is_finite() || !lat1.is_finite() || !lon2.is_finite() || !lat2.is_finite() {
            continue;
        }
        // A run of (0, 0) points is a placeholder, not a real fix.
        if lon1 == 0.0 && lat1 == 0.0 && lon2 == 0.0 && lat2 == 0.0 {
            continue;
        }

        total += haversine_km(lon1, lat1, lon2, lat2);
    }

    (total * 100.0).round() / 100.0
}

/// Cumulative elevation gain in meters: the sum of positive deltas
/// between consecutive elevations. Descents contribute nothing. Returns
/// 0 for fewer than two points.
pub fn elevation_gain(coordinates: &[[f64; 3]]) -> u32 {
    if coordinates.len() < 2 {
        return 0;
    }

    let mut gain = 0.0;
    for pair in coordinates.windows(2) {
        let prev = pair[0][2];
        let curr = pair[1][2];
        if !prev.is_finite() || !curr.is_finite() {
            continue;
        }
        let delta = curr - prev;
        if delta > 0.0 {
            gain += delta;
        }
    }

    gain.round().max(0.0) as u32
}

fn haversine_km(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
