//! Library configuration
//!
//! Defaults match the observed production values (20-record pages, one
//! hour of cache, a 3-second deadline on write-backs). A config can be
//! loaded from a JSON file and overlaid with environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::DataError;

const DEFAULT_OPEN_DATA_URL: &str = "https://api.doc.govt.nz/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrailheadConfig {
    /// Base URL of the primary backend store; `None` skips the backend
    /// in the source chain.
    pub backend_base_url: Option<String>,
    /// Base URL of the secondary open-data API.
    pub open_data_base_url: String,
    /// API key for the open-data API; `None` skips that source.
    pub open_data_api_key: Option<String>,
    /// Records per page.
    pub page_size: usize,
    /// How many pages beyond the visible one to prefetch.
    pub prefetch_pages: usize,
    /// Cache entry lifetime in seconds.
    pub cache_ttl_secs: u64,
    /// Directory for the persistent cache; `None` keeps the cache in
    /// memory only.
    pub cache_dir: Option<PathBuf>,
    /// Per-request deadline for source HTTP calls.
    pub request_timeout_secs: u64,
    /// Deadline for fire-and-forget writes (sync-back, review submit).
    pub sync_timeout_secs: u64,
}

impl Default for TrailheadConfig {
    fn default() -> Self {
        TrailheadConfig {
            backend_base_url: None,
            open_data_base_url: DEFAULT_OPEN_DATA_URL.to_string(),
            open_data_api_key: None,
            page_size: 20,
            prefetch_pages: 2,
            cache_ttl_secs: 3600,
            cache_dir: None,
            request_timeout_secs: 10,
            sync_timeout_secs: 3,
        }
    }
}

impl TrailheadConfig {
    pub fn from_file(path: &Path) -> Result<TrailheadConfig, DataError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Overlay settings from `TRAILHEAD_*` environment variables.
    pub fn apply_env(mut self) -> TrailheadConfig {
        if let Ok(url) = std::env::var("TRAILHEAD_BACKEND_URL") {
            if !url.is_empty() {
                self.backend_base_url = Some(url);
            }
        }
        if let Ok(url) = std::env::var("TRAILHEAD_OPEN_DATA_URL") {
            if !url.is_empty() {
                self.open_data_base_url = url;
            }
        }
        if let Ok(key) = std::env::var("TRAILHEAD_API_KEY") {
            if !key.is_empty() {
                self.open_data_api_key = Some(key);
            }
        }
        if let Ok(dir) = std::env::var("TRAILHEAD_CACHE_DIR") {
            if !dir.is_empty() {
                self.cache_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }

    /// Build an HTTP client honoring the configured request deadline,
    /// for callers that do not bring their own.
    pub fn http_client(&self) -> Result<reqwest::Client, DataError> {
        Ok(reqwest::Client::builder()
            .timeout(self.request_timeout())
            .build()?)
    }
}
