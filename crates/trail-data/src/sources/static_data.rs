//! Built-in fallback dataset
//!
//! A small in-process trail collection conforming exactly to the
//! canonical shape. It sits last in the chain so the UI still has data
//! to show when both remote sources are unavailable or unconfigured.

use once_cell::sync::Lazy;

use trail_core::filter;
use trail_core::model::{Difficulty, PageRequest, Region, Trail, TrailFilters};
use trail_core::source::{FetchResult, TrailSource};

use super::paginate;
use crate::DataError;

pub struct StaticSource;

static FALLBACK_TRAILS: Lazy<Vec<Trail>> = Lazy::new(build_trails);

static FALLBACK_REGIONS: Lazy<Vec<Region>> = Lazy::new(|| {
    let mut names: Vec<String> = FALLBACK_TRAILS
        .iter()
        .flat_map(|t| t.region.iter().cloned())
        .collect();
    names.sort();
    names.dedup();
    names
        .into_iter()
        .map(|name| {
            let count = FALLBACK_TRAILS.iter().filter(|t| t.region.contains(&name)).count();
            Region::from_name(&name, count)
        })
        .collect()
});

pub fn fallback_trails() -> &'static [Trail] {
    &FALLBACK_TRAILS
}

fn trail(
    id: &str,
    name: &str,
    description: &str,
    length: f64,
    elevation_gain: u32,
    difficulty: Difficulty,
    regions: &[&str],
    estimated_time: &str,
) -> Trail {
    Trail {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        length,
        elevation_gain,
        difficulty,
        region: regions.iter().map(|r| r.to_string()).collect(),
        estimated_time: estimated_time.to_string(),
        status: "open".to_string(),
        ..Default::default()
    }
}

fn build_trails() -> Vec<Trail> {
    vec![
        trail(
            "static-riverside-loop",
            "Riverside Loop",
            "Gentle riverside circuit through beech forest, suitable for families.",
            4.2,
            120,
            Difficulty::Easy,
            &["Otago"],
            "1 h 30 min",
        ),
        trail(
            "static-harbour-lookout",
            "Harbour Lookout Walk",
            "Short climb to a lookout over the harbour and surrounding hills.",
            3.1,
            210,
            Difficulty::Easy,
            &["Wellington"],
            "1 h",
        ),
        Trail {
            coordinates: vec![
                [169.96, -44.01, 780.0],
                [169.98, -44.02, 925.0],
                [170.01, -44.03, 1110.0],
            ],
            ..trail(
                "static-alpine-tarns",
                "Alpine Tarns Track",
                "Crosses an exposed saddle past a chain of alpine tarns.",
                12.6,
                640,
                Difficulty::Moderate,
                &["Canterbury"],
                "5 h",
            )
        },
        trail(
            "static-coastal-traverse",
            "Coastal Traverse",
            "Undulating coastal route with several stream crossings.",
            9.5,
            250,
            Difficulty::Moderate,
            &["Otago", "Southland"],
            "3 h 30 min",
        ),
        trail(
            "static-granite-ridge",
            "Granite Ridge Route",
            "Steep unmarked ridge line for experienced trampers; route finding required.",
            17.8,
            1350,
            Difficulty::Difficult,
            &["Canterbury"],
            "8 h",
        ),
        trail(
            "static-summit-circuit",
            "Mountain Summit Circuit",
            "Full alpine circuit over the summit; ice axe required outside summer.",
            28.4,
            2100,
            Difficulty::Extreme,
            &["West Coast"],
            "2 days",
        ),
    ]
}

#[async_trait::async_trait]
impl TrailSource for StaticSource {
    async fn fetch_page(
        &self,
        filters: &TrailFilters,
        page: &PageRequest,
    ) -> anyhow::Result<FetchResult> {
        let filtered = filter::apply(&FALLBACK_TRAILS, filters);
        let total_count = filtered.len();
        Ok(FetchResult {
            trails: paginate(&filtered, page),
            total_count,
        })
    }

    async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Trail> {
        FALLBACK_TRAILS
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DataError::NotFound(id.to_string()).into())
    }

    async fn fetch_regions(&self) -> anyhow::Result<Vec<Region>> {
        Ok(FALLBACK_REGIONS.clone())
    }

    fn source_name(&self) -> &str {
        "static"
    }
}
