//! Fallback-chained fetcher
//!
//! Tries an ordered list of sources until one yields data, consulting
//! the TTL cache before each network hop. Individual source failures are
//! recovered by advancing the chain; only exhaustion of every source is
//! visible to the caller, and for collections even that degrades to an
//! empty result rather than an error.

use std::sync::Arc;
use std::time::Duration;

use trail_core::model::{PageRequest, Region, Trail, TrailAlert, TrailFilters};
use trail_core::source::{FetchResult, TrailSource};

use crate::cache::TtlCache;
use crate::sources::{open_data, BackendSource, OpenDataSource};
use crate::DataError;

/// Write-back sink for trails obtained from the open-data fallback, so
/// later requests can be served by the primary store.
#[async_trait::async_trait]
pub trait SyncTarget: Send + Sync {
    async fn sync_trails(&self, trails: &[Trail]) -> Result<(), DataError>;
}

#[async_trait::async_trait]
impl SyncTarget for BackendSource {
    async fn sync_trails(&self, trails: &[Trail]) -> Result<(), DataError> {
        BackendSource::sync_trails(self, trails).await
    }
}

/// A collection fetch and where it came from. `served_by` is `None`
/// when every source in the chain was exhausted.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub result: FetchResult,
    pub served_by: Option<String>,
    pub from_cache: bool,
}

impl FetchOutcome {
    pub fn exhausted(&self) -> bool {
        self.served_by.is_none()
    }
}

pub struct FallbackFetcher {
    sources: Vec<Arc<dyn TrailSource>>,
    cache: TtlCache,
    sync_target: Option<Arc<dyn SyncTarget>>,
    sync_timeout: Duration,
    alert_source: Option<Arc<OpenDataSource>>,
}

impl FallbackFetcher {
    pub fn new(sources: Vec<Arc<dyn TrailSource>>, cache: TtlCache) -> FallbackFetcher {
        FallbackFetcher {
            sources,
            cache,
            sync_target: None,
            sync_timeout: Duration::from_secs(3),
            alert_source: None,
        }
    }

    /// Opportunistically write results fetched from the open-data
    /// fallback back to the primary backend.
    pub fn with_sync_target(
        mut self,
        backend: Arc<dyn SyncTarget>,
        timeout: Duration,
    ) -> FallbackFetcher {
        self.sync_target = Some(backend);
        self.sync_timeout = timeout;
        self
    }

    pub fn with_alert_source(mut self, open_data: Arc<OpenDataSource>) -> FallbackFetcher {
        self.alert_source = Some(open_data);
        self
    }

    /// Fetch one page of trails, trying sources in priority order.
    /// Never fails: exhaustion yields an empty result.
    pub async fn fetch_page(&self, filters: &TrailFilters, page: &PageRequest) -> FetchOutcome {
        for source in &self.sources {
            let name = source.source_name().to_string();
            let key = format!(
                "{name}:trails:{}:p{}s{}",
                filters.cache_fragment(),
                page.page,
                page.page_size
            );

            if let Some(result) = self.cache.get::<FetchResult>(&key) {
                tracing::debug!(source = %name, key = %key, "cache hit");
                return FetchOutcome {
                    result,
                    served_by: Some(name),
                    from_cache: true,
                };
            }

            match source.fetch_page(filters, page).await {
                Ok(result) => {
                    tracing::debug!(
                        source = %name,
                        count = result.trails.len(),
                        total = result.total_count,
                        "fetched page"
                    );
                    self.cache.set(&key, &result);
                    // Only open-data results are written back; the
                    // built-in dataset must never reach the primary
                    // store.
                    if name == open_data::SOURCE_NAME && !result.trails.is_empty() {
                        self.spawn_sync_back(result.trails.clone());
                    }
                    return FetchOutcome {
                        result,
                        served_by: Some(name),
                        from_cache: false,
                    };
                }
                Err(err) => {
                    tracing::warn!(source = %name, %err, "source failed, advancing chain");
                }
            }
        }

        tracing::warn!("all trail sources exhausted");
        FetchOutcome {
            result: FetchResult::default(),
            served_by: None,
            from_cache: false,
        }
    }

    /// Fetch a single trail. A `NotFound` from one source does not stop
    /// the chain; if no source succeeds, `NotFound` is surfaced when any
    /// source answered definitively, otherwise the last transient error.
    pub async fn fetch_by_id(&self, id: &str) -> Result<Trail, DataError> {
        let mut not_found = false;
        let mut last_err: Option<DataError> = None;

        for source in &self.sources {
            let name = source.source_name().to_string();
            let key = format!("{name}:trail:{id}");

            if let Some(trail) = self.cache.get::<Trail>(&key) {
                tracing::debug!(source = %name, id, "cache hit for trail detail");
                return Ok(trail);
            }

            match source.fetch_by_id(id).await {
                Ok(trail) => {
                    self.cache.set(&key, &trail);
                    return Ok(trail);
                }
                Err(err) => {
                    let err = DataError::from_source_error(err);
                    if err.is_not_found() {
                        tracing::debug!(source = %name, id, "trail not found");
                        not_found = true;
                    } else {
                        tracing::warn!(source = %name, id, %err, "detail fetch failed");
                    }
                    last_err = Some(err);
                }
            }
        }

        if not_found {
            Err(DataError::NotFound(id.to_string()))
        } else {
            Err(last_err.unwrap_or_else(|| {
                DataError::SourceUnavailable("no sources configured".to_string())
            }))
        }
    }

    /// Fetch regions through the chain; exhaustion yields an empty list.
    pub async fn fetch_regions(&self) -> Vec<Region> {
        for source in &self.sources {
            let name = source.source_name().to_string();
            let key = format!("{name}:regions");

            if let Some(regions) = self.cache.get::<Vec<Region>>(&key) {
                return regions;
            }

            match source.fetch_regions().await {
                Ok(regions) if !regions.is_empty() => {
                    self.cache.set(&key, &regions);
                    return regions;
                }
                Ok(_) => {
                    tracing::debug!(source = %name, "source has no regions, advancing");
                }
                Err(err) => {
                    tracing::warn!(source = %name, %err, "region fetch failed, advancing chain");
                }
            }
        }
        Vec::new()
    }

    /// Condition alerts for a trail; only the open-data source carries
    /// them, and failures degrade to an empty list.
    pub async fn fetch_alerts(&self, id: &str) -> Vec<TrailAlert> {
        let Some(source) = &self.alert_source else {
            return Vec::new();
        };
        match source.fetch_alerts(id).await {
            Ok(alerts) => alerts,
            Err(err) => {
                tracing::warn!(id, %err, "alert fetch failed");
                Vec::new()
            }
        }
    }

    /// Fire-and-forget write-back of fallback results to the primary
    /// store. The read path must never be affected by its outcome.
    fn spawn_sync_back(&self, trails: Vec<Trail>) {
        let Some(backend) = self.sync_target.clone() else {
            return;
        };
        let deadline = self.sync_timeout;
        tokio::spawn(async move {
            match tokio::time::timeout(deadline, backend.sync_trails(&trails)).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::warn!(%err, "sync-back failed"),
                Err(_) => tracing::warn!(?deadline, "sync-back timed out"),
            }
        });
    }
}
