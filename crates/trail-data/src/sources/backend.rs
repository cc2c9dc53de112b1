//! Primary backend store source
//!
//! The backend speaks the canonical shape directly and supports native
//! filtering and pagination, so filters are pushed down as query
//! parameters instead of being applied client-side.

use serde::Deserialize;

use trail_core::model::{PageRequest, Region, Trail, TrailFilters};
use trail_core::source::{FetchResult, TrailSource};

use crate::DataError;

pub struct BackendSource {
    client: reqwest::Client,
    base_url: String,
}

/// Wire shape of the backend's paged trails response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrailPage {
    #[serde(default)]
    trails: Vec<Trail>,
    #[serde(default)]
    total_count: usize,
}

impl BackendSource {
    pub fn new(client: reqwest::Client, base_url: String) -> BackendSource {
        BackendSource {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn query(filters: &TrailFilters, page: &PageRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", page.page.to_string()),
            ("pageSize", page.page_size.to_string()),
        ];
        if let Some(difficulty) = &filters.difficulty {
            query.push(("difficulty", difficulty.clone()));
        }
        if let Some(length) = &filters.length {
            query.push(("length", length.clone()));
        }
        if let Some(elevation) = &filters.elevation {
            query.push(("elevation", elevation.clone()));
        }
        if let Some(region) = &filters.region {
            query.push(("region", region.clone()));
        }
        if let Some(term) = &filters.search_term {
            query.push(("search", term.clone()));
        }
        query
    }

    fn check_status(resp: &reqwest::Response, url: &str) -> Result<(), DataError> {
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(DataError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }

    /// Write normalized trails back to the backend so later requests can
    /// be served by the primary store. Used by the fetcher's
    /// fire-and-forget sync after a fallback fetch.
    pub async fn sync_trails(&self, trails: &[Trail]) -> Result<(), DataError> {
        let url = self.url("trails/sync");
        let resp = self.client.post(&url).json(trails).send().await?;
        Self::check_status(&resp, &url)?;
        tracing::debug!(count = trails.len(), "synced trails to backend");
        Ok(())
    }
}

#[async_trait::async_trait]
impl TrailSource for BackendSource {
    async fn fetch_page(
        &self,
        filters: &TrailFilters,
        page: &PageRequest,
    ) -> anyhow::Result<FetchResult> {
        let url = self.url("trails");
        let resp = self
            .client
            .get(&url)
            .query(&Self::query(filters, page))
            .send()
            .await
            .map_err(DataError::from)?;
        Self::check_status(&resp, &url)?;

        let page: TrailPage = resp.json().await.map_err(DataError::from)?;
        Ok(FetchResult {
            trails: page.trails,
            total_count: page.total_count,
        })
    }

    async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Trail> {
        let url = self.url(&format!("trails/{id}"));
        let resp = self.client.get(&url).send().await.map_err(DataError::from)?;
        Self::check_status(&resp, &url)?;
        let trail: Trail = resp.json().await.map_err(DataError::from)?;
        Ok(trail)
    }

    async fn fetch_regions(&self) -> anyhow::Result<Vec<Region>> {
        let url = self.url("regions");
        let resp = self.client.get(&url).send().await.map_err(DataError::from)?;
        Self::check_status(&resp, &url)?;
        let regions: Vec<Region> = resp.json().await.map_err(DataError::from)?;
        Ok(regions)
    }

    fn source_name(&self) -> &str {
        "backend"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_become_query_params() {
        let filters = TrailFilters {
            difficulty: Some("easy".to_string()),
            region: Some("Otago".to_string()),
            ..Default::default()
        };
        let query = BackendSource::query(&filters, &PageRequest::new(2, 25));
        assert!(query.contains(&("page", "2".to_string())));
        assert!(query.contains(&("pageSize", "25".to_string())));
        assert!(query.contains(&("difficulty", "easy".to_string())));
        assert!(query.contains(&("region", "Otago".to_string())));
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let source = BackendSource::new(reqwest::Client::new(), "http://api.test/".to_string());
        assert_eq!(source.url("trails"), "http://api.test/trails");
    }
}
