//! The data-source seam implemented by every upstream provider

use serde::{Deserialize, Serialize};

use crate::model::{PageRequest, Region, Trail, TrailFilters};

/// One page of a collection fetch, together with the total number of
/// records matching the filters on that source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchResult {
    pub trails: Vec<Trail>,
    pub total_count: usize,
}

/// Trait for trail data sources.
///
/// Sources push filters down to their native query capability where they
/// can; otherwise they filter client-side after normalization, so a
/// `FetchResult` always reflects the given criteria either way.
#[async_trait::async_trait]
pub trait TrailSource: Send + Sync {
    /// Fetch one page of trails matching the filters.
    async fn fetch_page(
        &self,
        filters: &TrailFilters,
        page: &PageRequest,
    ) -> anyhow::Result<FetchResult>;

    /// Fetch a single trail by its stable id.
    async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Trail>;

    /// Fetch the known regions.
    async fn fetch_regions(&self) -> anyhow::Result<Vec<Region>>;

    /// Short name used in logs and cache keys.
    fn source_name(&self) -> &str;
}
