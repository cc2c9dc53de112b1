//! Paginated browsing controller
//!
//! [`TrailBrowser`] is the stateful front door for a UI layer: it owns
//! the active filter set, the merged page sequence for the current query
//! session, and background prefetch of upcoming pages. A new query only
//! replaces the visible data once its first page has actually arrived,
//! so a dead network never blanks a screen that already has trails on it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ahash::AHashMap;
use parking_lot::Mutex;

use trail_core::model::{PageRequest, Region, Review, Trail, TrailAlert, TrailFilters};
use trail_core::source::FetchResult;
use trail_core::stats::{self, TrailStatistics};
use trail_core::{filter, PageTracker};

use crate::config::TrailheadConfig;
use crate::fetcher::FallbackFetcher;
use crate::reviews::{InMemoryReviewStore, NewReview, ReviewStore};
use crate::DataError;

/// Page size used for whole-dataset loads (search, statistics).
const BULK_PAGE_SIZE: usize = 9999;

const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Options for starting a query session.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchOptions {
    /// Load the whole result set in one request instead of paging.
    pub load_all: bool,
}

/// Where a submitted review ended up.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The remote store accepted the review.
    Saved(Review),
    /// The remote store was unreachable or too slow; the review is held
    /// locally and visible to this client only.
    SavedLocally(Review),
}

pub struct TrailBrowser {
    fetcher: Arc<FallbackFetcher>,
    page_size: usize,
    prefetch_pages: usize,
    submit_timeout: Duration,

    filters: TrailFilters,
    tracker: PageTracker,
    loading: bool,
    fetching_more: bool,
    error: Option<String>,

    /// Bumped when a new query session commits; in-flight prefetch tasks
    /// from the previous session check it before publishing.
    generation: Arc<AtomicU64>,
    prefetched: Arc<Mutex<AHashMap<usize, FetchResult>>>,

    /// Lazily loaded unfiltered dataset backing search and statistics.
    bulk: Option<Vec<Trail>>,

    remote_reviews: Option<Arc<dyn ReviewStore>>,
    local_reviews: Arc<InMemoryReviewStore>,
}

impl TrailBrowser {
    pub fn new(fetcher: Arc<FallbackFetcher>, config: &TrailheadConfig) -> TrailBrowser {
        TrailBrowser {
            fetcher,
            page_size: config.page_size.max(1),
            prefetch_pages: config.prefetch_pages,
            submit_timeout: config.sync_timeout(),
            filters: TrailFilters::default(),
            tracker: PageTracker::new(),
            loading: false,
            fetching_more: false,
            error: None,
            generation: Arc::new(AtomicU64::new(0)),
            prefetched: Arc::new(Mutex::new(AHashMap::new())),
            bulk: None,
            remote_reviews: None,
            local_reviews: Arc::new(InMemoryReviewStore::new()),
        }
    }

    /// Route review submissions to a remote store, falling back to local
    /// storage when it fails or times out.
    pub fn with_review_store(mut self, store: Arc<dyn ReviewStore>) -> TrailBrowser {
        self.remote_reviews = Some(store);
        self
    }

    /// Merged trails for the current query session, in page order.
    pub fn trails(&self) -> &[Trail] {
        self.tracker.trails()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_fetching_more(&self) -> bool {
        self.fetching_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_more(&self) -> bool {
        self.tracker.has_more()
    }

    pub fn total_count(&self) -> usize {
        self.tracker.total_count()
    }

    pub fn active_filters(&self) -> &TrailFilters {
        &self.filters
    }

    /// Start a new query session. The previous session's data stays
    /// visible until the first page of the new one arrives; on
    /// exhaustion the old data is kept and [`Self::error`] is set.
    pub async fn fetch_trails(&mut self, filters: TrailFilters, options: FetchOptions) -> &[Trail] {
        self.loading = true;
        let page_size = if options.load_all {
            BULK_PAGE_SIZE
        } else {
            self.page_size
        };
        let outcome = self
            .fetcher
            .fetch_page(&filters, &PageRequest::new(0, page_size))
            .await;
        self.loading = false;

        if outcome.exhausted() {
            tracing::warn!("query returned no data from any source, keeping previous results");
            self.error = Some("trail data is currently unavailable".to_string());
            return self.tracker.trails();
        }

        // Commit the session.
        self.error = None;
        self.filters = filters;
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.prefetched.lock().clear();
        // The snapshot behind search/statistics goes stale with the
        // session; the next bulk consumer reloads through the fetcher's
        // TTL cache.
        self.bulk = None;

        let total_count = outcome.result.total_count;
        let mut tracker = PageTracker::new();
        tracker.record_page(0, outcome.result.trails, total_count);
        if options.load_all {
            tracker.mark_complete();
        }
        self.tracker = tracker;

        if !options.load_all {
            self.spawn_prefetch();
        }
        self.tracker.trails()
    }

    /// Load the next page of the current session, preferring a prefetched
    /// page over a fresh fetch. Returns whether more pages may exist.
    pub async fn load_more(&mut self) -> bool {
        if self.fetching_more || !self.tracker.has_more() {
            return self.tracker.has_more();
        }
        self.fetching_more = true;

        let page = self.tracker.next_page();
        // The buffer guard must drop before the fetch below is awaited,
        // or an in-flight prefetch task blocks on the mutex.
        let buffered = self.prefetched.lock().remove(&page);
        let result = match buffered {
            Some(result) => {
                tracing::debug!(page, "serving prefetched page");
                Some(result)
            }
            None => {
                let outcome = self
                    .fetcher
                    .fetch_page(&self.filters, &PageRequest::new(page, self.page_size))
                    .await;
                if outcome.exhausted() {
                    self.error = Some("trail data is currently unavailable".to_string());
                    None
                } else {
                    Some(outcome.result)
                }
            }
        };

        if let Some(result) = result {
            let total_count = result.total_count;
            self.tracker.record_page(page, result.trails, total_count);
            self.spawn_prefetch();
        }

        self.fetching_more = false;
        self.tracker.has_more()
    }

    /// Kick off background fetches for the pages just beyond the loaded
    /// prefix. Results land in the prefetch buffer; a stale task from a
    /// superseded session discards its response instead.
    fn spawn_prefetch(&self) {
        if self.prefetch_pages == 0 || !self.tracker.has_more() {
            return;
        }
        let last_page = self.tracker.total_count().div_ceil(self.page_size);
        let next = self.tracker.next_page();
        let my_gen = self.generation.load(Ordering::SeqCst);

        for page in next..(next + self.prefetch_pages).min(last_page) {
            if self.prefetched.lock().contains_key(&page) {
                continue;
            }
            let fetcher = self.fetcher.clone();
            let filters = self.filters.clone();
            let request = PageRequest::new(page, self.page_size);
            let generation = self.generation.clone();
            let prefetched = self.prefetched.clone();
            tokio::spawn(async move {
                let outcome = fetcher.fetch_page(&filters, &request).await;
                if outcome.exhausted() {
                    return;
                }
                if generation.load(Ordering::SeqCst) != my_gen {
                    tracing::debug!(page, "discarding prefetch for superseded query");
                    return;
                }
                prefetched.lock().insert(page, outcome.result);
            });
        }
    }

    /// Case-insensitive word search across the whole dataset; a record
    /// matches when any query word appears in its name or description.
    pub async fn search_trails(&mut self, query: &str, limit: Option<usize>) -> Vec<Trail> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        let Some(all) = self.ensure_bulk().await else {
            return Vec::new();
        };
        all.iter()
            .filter(|t| filter::matches_search(t, query))
            .take(limit)
            .cloned()
            .collect()
    }

    /// One trail with its reviews attached, newest local review first.
    /// Falls back to already-loaded session data when no source has the
    /// record, which covers locally known ids during an outage.
    pub async fn trail_details(&mut self, id: &str) -> Result<Trail, DataError> {
        let mut trail = match self.fetcher.fetch_by_id(id).await {
            Ok(trail) => trail,
            Err(err) => match self.find_loaded(id) {
                Some(trail) => {
                    tracing::debug!(id, %err, "serving trail detail from loaded session data");
                    trail
                }
                None => return Err(err),
            },
        };

        let mut reviews = Vec::new();
        if let Ok(mut grouped) = self
            .local_reviews
            .reviews_for_trails(std::slice::from_ref(&trail.id))
            .await
        {
            if let Some(local) = grouped.remove(&trail.id) {
                reviews = local;
            }
        }
        if let Some(remote) = &self.remote_reviews {
            match remote
                .reviews_for_trails(std::slice::from_ref(&trail.id))
                .await
            {
                Ok(mut grouped) => {
                    if let Some(stored) = grouped.remove(&trail.id) {
                        reviews.extend(stored);
                    }
                }
                Err(err) => {
                    tracing::warn!(id = %trail.id, %err, "remote review lookup failed");
                }
            }
        }
        if !reviews.is_empty() {
            reviews.extend(trail.reviews);
            trail.reviews = reviews;
        }
        Ok(trail)
    }

    fn find_loaded(&self, id: &str) -> Option<Trail> {
        self.tracker
            .find(id)
            .cloned()
            .or_else(|| self.bulk.as_ref()?.iter().find(|t| t.id == id).cloned())
    }

    pub async fn regions(&self) -> Vec<Region> {
        self.fetcher.fetch_regions().await
    }

    /// Dataset-wide statistics (counts by length bucket, difficulty and
    /// region), computed over the unfiltered dataset.
    pub async fn statistics(&mut self) -> Option<TrailStatistics> {
        let all = self.ensure_bulk().await?;
        Some(stats::compute(all))
    }

    pub async fn trail_alerts(&self, id: &str) -> Vec<TrailAlert> {
        self.fetcher.fetch_alerts(id).await
    }

    /// Submit a review. The remote store gets one bounded attempt; on
    /// failure or timeout the review is kept locally so the author still
    /// sees it on the trail page.
    pub async fn submit_review(&self, review: NewReview) -> Result<SubmitOutcome, DataError> {
        if let Some(remote) = &self.remote_reviews {
            match tokio::time::timeout(self.submit_timeout, remote.submit(review.clone())).await {
                Ok(Ok(saved)) => return Ok(SubmitOutcome::Saved(saved)),
                Ok(Err(err)) => {
                    tracing::warn!(%err, "remote review submit failed, keeping locally");
                }
                Err(_) => {
                    tracing::warn!(timeout = ?self.submit_timeout, "remote review submit timed out");
                }
            }
        }
        let saved = self
            .local_reviews
            .submit(review)
            .await
            .map_err(DataError::from_source_error)?;
        Ok(SubmitOutcome::SavedLocally(saved))
    }

    async fn ensure_bulk(&mut self) -> Option<&Vec<Trail>> {
        if self.bulk.is_none() {
            let outcome = self
                .fetcher
                .fetch_page(
                    &TrailFilters::default(),
                    &PageRequest::new(0, BULK_PAGE_SIZE),
                )
                .await;
            if outcome.exhausted() {
                return None;
            }
            self.bulk = Some(outcome.result.trails);
        }
        self.bulk.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use trail_core::model::Difficulty;
    use trail_core::source::TrailSource;

    use crate::cache::TtlCache;

    struct ListSource {
        trails: Vec<Trail>,
        page_calls: AtomicUsize,
        fail_by_id: bool,
    }

    impl ListSource {
        fn new(trails: Vec<Trail>) -> ListSource {
            ListSource {
                trails,
                page_calls: AtomicUsize::new(0),
                fail_by_id: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl TrailSource for ListSource {
        async fn fetch_page(
            &self,
            filters: &TrailFilters,
            page: &PageRequest,
        ) -> anyhow::Result<FetchResult> {
            self.page_calls.fetch_add(1, Ordering::SeqCst);
            let filtered = filter::apply(&self.trails, filters);
            let total_count = filtered.len();
            Ok(FetchResult {
                trails: crate::sources::paginate(&filtered, page),
                total_count,
            })
        }

        async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Trail> {
            if self.fail_by_id {
                return Err(DataError::SourceUnavailable("down".to_string()).into());
            }
            self.trails
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| DataError::NotFound(id.to_string()).into())
        }

        async fn fetch_regions(&self) -> anyhow::Result<Vec<Region>> {
            Ok(Vec::new())
        }

        fn source_name(&self) -> &str {
            "list"
        }
    }

    fn trail(id: &str, name: &str) -> Trail {
        Trail {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} through native bush"),
            length: 7.5,
            difficulty: Difficulty::Moderate,
            ..Default::default()
        }
    }

    fn five_trails() -> Vec<Trail> {
        vec![
            trail("t-1", "Riverside Loop"),
            trail("t-2", "Harbour Lookout"),
            trail("t-3", "Alpine Tarns Track"),
            trail("t-4", "Coastal Traverse"),
            trail("t-5", "Summit Circuit"),
        ]
    }

    fn browser_over(source: Arc<ListSource>, config: TrailheadConfig) -> TrailBrowser {
        let fetcher = FallbackFetcher::new(
            vec![source],
            TtlCache::in_memory(Duration::from_secs(3600)),
        );
        TrailBrowser::new(Arc::new(fetcher), &config)
    }

    fn small_pages_config() -> TrailheadConfig {
        TrailheadConfig {
            page_size: 2,
            prefetch_pages: 0,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_pagination_walks_all_pages() {
        let source = Arc::new(ListSource::new(five_trails()));
        let mut browser = browser_over(source, small_pages_config());

        browser
            .fetch_trails(TrailFilters::default(), FetchOptions::default())
            .await;
        assert_eq!(browser.trails().len(), 2);
        assert_eq!(browser.total_count(), 5);
        assert!(browser.has_more());

        assert!(browser.load_more().await);
        assert_eq!(browser.trails().len(), 4);

        // Last page is short and ends the sequence.
        assert!(!browser.load_more().await);
        assert_eq!(browser.trails().len(), 5);
        assert!(!browser.has_more());
        assert_eq!(browser.trails()[4].id, "t-5");
    }

    #[tokio::test]
    async fn test_load_all_fetches_everything_at_once() {
        let source = Arc::new(ListSource::new(five_trails()));
        let mut browser = browser_over(source.clone(), small_pages_config());

        browser
            .fetch_trails(TrailFilters::default(), FetchOptions { load_all: true })
            .await;
        assert_eq!(browser.trails().len(), 5);
        assert!(!browser.has_more());
        assert_eq!(source.page_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_previous_results() {
        let good = Arc::new(ListSource::new(five_trails()));
        let mut browser = browser_over(good.clone(), small_pages_config());
        browser
            .fetch_trails(TrailFilters::default(), FetchOptions::default())
            .await;
        assert_eq!(browser.trails().len(), 2);
        assert!(browser.error().is_none());

        // A query no source can satisfy must not blank loaded data. The
        // chain degrades to empty only on exhaustion, so simulate it with
        // an empty chain.
        let empty_fetcher = Arc::new(FallbackFetcher::new(
            Vec::new(),
            TtlCache::in_memory(Duration::from_secs(3600)),
        ));
        browser.fetcher = empty_fetcher;
        browser
            .fetch_trails(
                TrailFilters {
                    search_term: Some("tarns".to_string()),
                    ..Default::default()
                },
                FetchOptions::default(),
            )
            .await;
        assert_eq!(browser.trails().len(), 2, "previous session data kept");
        assert!(browser.error().is_some());
        // The committed filters are still the old session's.
        assert!(browser.active_filters().search_term.is_none());
    }

    #[tokio::test]
    async fn test_prefetch_fills_buffer_in_background() {
        let source = Arc::new(ListSource::new(five_trails()));
        let config = TrailheadConfig {
            page_size: 2,
            prefetch_pages: 2,
            ..Default::default()
        };
        let mut browser = browser_over(source.clone(), config);
        browser
            .fetch_trails(TrailFilters::default(), FetchOptions::default())
            .await;

        // Pages 1 and 2 are being prefetched; wait for both to land.
        for _ in 0..100 {
            if browser.prefetched.lock().len() == 2 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(browser.prefetched.lock().len(), 2);
        let calls_before = source.page_calls.load(Ordering::SeqCst);

        // Next page is served from the buffer, no new source call.
        browser.load_more().await;
        assert_eq!(browser.trails().len(), 4);
        assert_eq!(source.page_calls.load(Ordering::SeqCst), calls_before);
    }

    #[tokio::test]
    async fn test_search_matches_any_word() {
        let source = Arc::new(ListSource::new(five_trails()));
        let mut browser = browser_over(source, small_pages_config());

        let hits = browser.search_trails("loop harbour", None).await;
        let names: Vec<&str> = hits.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Riverside Loop", "Harbour Lookout"]);

        assert!(browser.search_trails("   ", None).await.is_empty());
        assert_eq!(browser.search_trails("track", Some(1)).await.len(), 1);
    }

    #[tokio::test]
    async fn test_details_fall_back_to_loaded_data() {
        let mut source = ListSource::new(five_trails());
        source.fail_by_id = true;
        let source = Arc::new(source);
        let mut browser = browser_over(source, small_pages_config());

        browser
            .fetch_trails(TrailFilters::default(), FetchOptions::default())
            .await;
        let trail = browser.trail_details("t-1").await.unwrap();
        assert_eq!(trail.name, "Riverside Loop");

        // Never loaded and no source can serve it.
        assert!(browser.trail_details("t-99").await.is_err());
    }

    #[tokio::test]
    async fn test_statistics_over_whole_dataset() {
        let source = Arc::new(ListSource::new(five_trails()));
        let mut browser = browser_over(source, small_pages_config());
        let statistics = browser.statistics().await.unwrap();
        assert_eq!(statistics.total_count, 5);
        assert!((statistics.total_distance - 37.5).abs() < 1e-9);
    }

    /// Pages past the first respond slowly, so a prefetch can still be
    /// in flight while the next page is requested directly.
    struct SlowLaterPages {
        trails: Vec<Trail>,
    }

    #[async_trait::async_trait]
    impl TrailSource for SlowLaterPages {
        async fn fetch_page(
            &self,
            filters: &TrailFilters,
            page: &PageRequest,
        ) -> anyhow::Result<FetchResult> {
            if page.page > 0 {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            let filtered = filter::apply(&self.trails, filters);
            let total_count = filtered.len();
            Ok(FetchResult {
                trails: crate::sources::paginate(&filtered, page),
                total_count,
            })
        }

        async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Trail> {
            Err(DataError::NotFound(id.to_string()).into())
        }

        async fn fetch_regions(&self) -> anyhow::Result<Vec<Region>> {
            Ok(Vec::new())
        }

        fn source_name(&self) -> &str {
            "slow"
        }
    }

    fn assert_send<T: Send>(value: T) -> T {
        value
    }

    #[tokio::test]
    async fn test_load_more_completes_while_prefetch_is_in_flight() {
        let source = Arc::new(SlowLaterPages {
            trails: five_trails(),
        });
        let config = TrailheadConfig {
            page_size: 2,
            prefetch_pages: 1,
            ..Default::default()
        };
        let fetcher = FallbackFetcher::new(
            vec![source],
            TtlCache::in_memory(Duration::from_secs(3600)),
        );
        let mut browser = TrailBrowser::new(Arc::new(fetcher), &config);
        browser
            .fetch_trails(TrailFilters::default(), FetchOptions::default())
            .await;

        // Page 1 is being prefetched on this same runtime thread. The
        // direct load of page 1 must not hold the prefetch buffer lock
        // while it awaits, or the prefetch task can wedge the runtime.
        let loaded =
            tokio::time::timeout(Duration::from_secs(5), assert_send(browser.load_more())).await;
        assert!(loaded.is_ok(), "load_more did not finish with a prefetch pending");
        assert_eq!(browser.trails().len(), 4);
    }

    /// Remote store that serves a stored review for t-1 and rejects
    /// submissions.
    struct ReadOnlyReviewStore;

    #[async_trait::async_trait]
    impl ReviewStore for ReadOnlyReviewStore {
        async fn reviews_for_trails(
            &self,
            trail_ids: &[String],
        ) -> anyhow::Result<AHashMap<String, Vec<Review>>> {
            let mut grouped = AHashMap::new();
            for id in trail_ids {
                if id == "t-1" {
                    grouped.insert(
                        id.clone(),
                        vec![Review {
                            id: "r-10".to_string(),
                            author: "Pat".to_string(),
                            rating: 4,
                            text: "Well marked".to_string(),
                            trail_id: id.clone(),
                            ..Default::default()
                        }],
                    );
                }
            }
            Ok(grouped)
        }

        async fn submit(&self, _review: NewReview) -> anyhow::Result<Review> {
            Err(DataError::SourceUnavailable("read-only".to_string()).into())
        }
    }

    #[tokio::test]
    async fn test_details_attach_remote_reviews() {
        let source = Arc::new(ListSource::new(five_trails()));
        let mut browser = browser_over(source, small_pages_config())
            .with_review_store(Arc::new(ReadOnlyReviewStore));

        let trail = browser.trail_details("t-1").await.unwrap();
        assert_eq!(trail.reviews.len(), 1);
        assert_eq!(trail.reviews[0].author, "Pat");

        // A review the remote store rejected is kept locally and sorts
        // in front of the remotely stored ones.
        let outcome = browser
            .submit_review(NewReview {
                trail_id: "t-1".to_string(),
                author: "Ana".to_string(),
                rating: 5,
                text: "Stunning".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(matches!(outcome, SubmitOutcome::SavedLocally(_)));

        let trail = browser.trail_details("t-1").await.unwrap();
        let authors: Vec<&str> = trail.reviews.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(authors, vec!["Ana", "Pat"]);
    }

    #[tokio::test]
    async fn test_session_reset_drops_bulk_snapshot() {
        let source = Arc::new(ListSource::new(five_trails()));
        let mut browser = browser_over(source, small_pages_config());

        browser.statistics().await.unwrap();
        assert!(browser.bulk.is_some());

        browser
            .fetch_trails(TrailFilters::default(), FetchOptions::default())
            .await;
        assert!(browser.bulk.is_none(), "committed session kept a stale snapshot");
        assert_eq!(browser.statistics().await.unwrap().total_count, 5);
    }

    struct StallingReviewStore;

    #[async_trait::async_trait]
    impl ReviewStore for StallingReviewStore {
        async fn reviews_for_trails(
            &self,
            _trail_ids: &[String],
        ) -> anyhow::Result<AHashMap<String, Vec<Review>>> {
            Ok(AHashMap::new())
        }

        async fn submit(&self, _review: NewReview) -> anyhow::Result<Review> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Review::default())
        }
    }

    #[tokio::test]
    async fn test_slow_remote_submit_saves_locally() {
        let source = Arc::new(ListSource::new(five_trails()));
        let config = TrailheadConfig {
            page_size: 2,
            prefetch_pages: 0,
            sync_timeout_secs: 0,
            ..Default::default()
        };
        let mut browser =
            browser_over(source, config).with_review_store(Arc::new(StallingReviewStore));

        let outcome = browser
            .submit_review(NewReview {
                trail_id: "t-1".to_string(),
                author: "Ana".to_string(),
                rating: 5,
                text: "Stunning".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let SubmitOutcome::SavedLocally(saved) = outcome else {
            panic!("expected local save");
        };
        assert_eq!(saved.rating, 5);

        // The locally stored review shows up on the trail page.
        browser
            .fetch_trails(TrailFilters::default(), FetchOptions::default())
            .await;
        let trail = browser.trail_details("t-1").await.unwrap();
        assert_eq!(trail.reviews.len(), 1);
        assert_eq!(trail.reviews[0].author, "Ana");
    }
}
