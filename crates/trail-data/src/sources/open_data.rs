//! Secondary open-data API source
//!
//! The open-data provider returns its own record shape and supports
//! neither filtering nor pagination, so this source fetches the whole
//! track list, normalizes it through the adapter, and filters and pages
//! client-side. The raw list is held in a short-lived in-process cache
//! to keep per-page requests from hammering the provider.

use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::Instant;

use trail_core::model::{PageRequest, Region, Trail, TrailAlert, TrailFilters};
use trail_core::source::{FetchResult, TrailSource};
use trail_core::{filter, model};

use super::adapter::{self, OpenDataAlert, OpenDataTrack};
use super::paginate;
use crate::DataError;

const API_KEY_HEADER: &str = "x-api-key";

/// Chain name for this source; the fetcher keys its sync-back decision
/// on it.
pub(crate) const SOURCE_NAME: &str = "open-data";

struct CachedTracks {
    trails: Vec<Trail>,
    fetched_at: Instant,
}

pub struct OpenDataSource {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    cache_ttl: Duration,
    cached: Mutex<Option<CachedTracks>>,
}

impl OpenDataSource {
    pub fn new(
        client: reqwest::Client,
        base_url: String,
        api_key: String,
        cache_ttl: Duration,
    ) -> OpenDataSource {
        OpenDataSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            cache_ttl,
            cached: Mutex::new(None),
        }
    }

    fn ensure_configured(&self) -> Result<(), DataError> {
        if self.api_key.is_empty() {
            return Err(DataError::SourceUnavailable(
                "open-data api key not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, DataError> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::NotFound(url));
        }
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(resp)
    }

    /// Fetch and normalize the full track list, reusing a recent result.
    async fn all_trails(&self) -> Result<Vec<Trail>, DataError> {
        self.ensure_configured()?;

        if let Some(cached) = self.cached.lock().as_ref() {
            if cached.fetched_at.elapsed() < self.cache_ttl {
                tracing::debug!("using cached open-data track list");
                return Ok(cached.trails.clone());
            }
        }

        tracing::debug!("fetching track list from open-data api");
        let raws: Vec<OpenDataTrack> = self.get("tracks").await?.json().await?;
        let trails = adapter::normalize_batch(&raws);

        *self.cached.lock() = Some(CachedTracks {
            trails: trails.clone(),
            fetched_at: Instant::now(),
        });
        Ok(trails)
    }

    /// Condition alerts for one track. Only this source has alerts.
    pub async fn fetch_alerts(&self, id: &str) -> Result<Vec<TrailAlert>, DataError> {
        self.ensure_configured()?;
        let raws: Vec<OpenDataAlert> = self
            .get(&format!("tracks/{id}/alerts"))
            .await?
            .json()
            .await?;
        Ok(raws.iter().map(adapter::normalize_alert).collect())
    }
}

#[async_trait::async_trait]
impl TrailSource for OpenDataSource {
    async fn fetch_page(
        &self,
        filters: &TrailFilters,
        page: &PageRequest,
    ) -> anyhow::Result<FetchResult> {
        let all = self.all_trails().await?;
        let filtered = filter::apply(&all, filters);
        let total_count = filtered.len();
        Ok(FetchResult {
            trails: paginate(&filtered, page),
            total_count,
        })
    }

    async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Trail> {
        self.ensure_configured()?;
        let raw: OpenDataTrack = self
            .get(&format!("tracks/{id}/detail"))
            .await?
            .json()
            .await?;
        if raw.asset_id.is_empty() {
            return Err(DataError::Malformed(format!("track {id} has no asset id")).into());
        }
        Ok(adapter::normalize(&raw))
    }

    async fn fetch_regions(&self) -> anyhow::Result<Vec<Region>> {
        let all = self.all_trails().await?;

        let mut names: Vec<String> = all
            .iter()
            .flat_map(|trail| trail.region.iter().cloned())
            .filter(|name| !name.is_empty())
            .collect();
        names.sort();
        names.dedup();

        Ok(names
            .into_iter()
            .map(|name| {
                let count = all.iter().filter(|t| t.region.contains(&name)).count();
                model::Region::from_name(&name, count)
            })
            .collect())
    }

    fn source_name(&self) -> &str {
        SOURCE_NAME
    }
}
