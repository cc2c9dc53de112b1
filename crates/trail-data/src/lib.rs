//! Data sources and orchestration for the trail data access layer
//!
//! The pieces assemble bottom-up: a TTL [`cache`], the concrete
//! [`sources`] (backend API, open-data API, built-in fallback dataset),
//! the fallback-chained [`fetcher`] that tries them in priority order,
//! and the paginated [`browser`] controller consumed by the UI layer.

pub mod browser;
pub mod cache;
pub mod config;
pub mod fetcher;
pub mod reviews;
pub mod sources;

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

pub use browser::{FetchOptions, SubmitOutcome, TrailBrowser};
pub use cache::TtlCache;
pub use config::TrailheadConfig;
pub use fetcher::{FallbackFetcher, SyncTarget};
pub use sources::{BackendSource, OpenDataSource, StaticSource};

/// Errors that can occur in data operations.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("cache write failed: {0}")]
    CacheWrite(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DataError {
    /// Collapse an `anyhow` chain from a source back into a typed error,
    /// preserving a `DataError` if one is at the root.
    pub fn from_source_error(err: anyhow::Error) -> DataError {
        match err.downcast::<DataError>() {
            Ok(data_err) => data_err,
            Err(other) => DataError::SourceUnavailable(other.to_string()),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DataError::NotFound(_))
    }
}

/// Build a browser over the standard source chain described by the
/// config: backend store first when configured, then the open-data API
/// when a key is present, then the built-in dataset. The `reqwest`
/// client is injected so the application owns its lifecycle.
pub fn browser_from_config(config: &TrailheadConfig, client: reqwest::Client) -> TrailBrowser {
    let mut sources: Vec<Arc<dyn trail_core::TrailSource>> = Vec::new();
    let mut sync_target = None;

    if let Some(base_url) = &config.backend_base_url {
        let backend = Arc::new(BackendSource::new(client.clone(), base_url.clone()));
        sync_target = Some(backend.clone());
        sources.push(backend);
    }

    let mut alert_source = None;
    if let Some(api_key) = &config.open_data_api_key {
        let open_data = Arc::new(OpenDataSource::new(
            client,
            config.open_data_base_url.clone(),
            api_key.clone(),
            config.cache_ttl(),
        ));
        alert_source = Some(open_data.clone());
        sources.push(open_data);
    }

    sources.push(Arc::new(StaticSource));

    let cache = match &config.cache_dir {
        Some(dir) => TtlCache::new(
            Arc::new(cache::FileStore::new(dir.clone())),
            config.cache_ttl(),
        ),
        None => TtlCache::in_memory(config.cache_ttl()),
    };

    let mut fetcher = FallbackFetcher::new(sources, cache);
    if let Some(backend) = sync_target {
        fetcher = fetcher.with_sync_target(backend, config.sync_timeout());
    }
    if let Some(open_data) = alert_source {
        fetcher = fetcher.with_alert_source(open_data);
    }

    TrailBrowser::new(Arc::new(fetcher), config)
}
