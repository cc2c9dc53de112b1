//! Page-state bookkeeping for the paginated controller
//!
//! The tracker owns the merged record sequence and guarantees that
//! loaded pages always form a contiguous, gap-free prefix: a page is
//! spliced only when it is the immediate successor of the loaded prefix,
//! and out-of-order arrivals are buffered until their predecessor lands.

use ahash::{AHashMap, AHashSet};

use crate::model::Trail;

/// Outcome of offering a page of records to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page was the next in sequence; records were merged.
    Merged { added: usize },
    /// The page arrived ahead of its predecessor and is held back.
    Buffered,
    /// The page was already part of the loaded prefix.
    AlreadyLoaded,
}

/// Tracks loaded pages, buffered out-of-order pages, and the merged
/// record sequence for one query session.
#[derive(Debug, Default)]
pub struct PageTracker {
    trails: Vec<Trail>,
    seen_ids: AHashSet<String>,
    /// Number of contiguously loaded pages; pages `0..pages_loaded` are
    /// merged into `trails`.
    pages_loaded: usize,
    buffered: AHashMap<usize, Vec<Trail>>,
    total_count: usize,
    /// Set once a source explicitly returns an empty page; overrides
    /// count arithmetic from then on.
    end_reached: bool,
}

impl PageTracker {
    pub fn new() -> PageTracker {
        PageTracker::default()
    }

    /// Merged records for all loaded pages, in page order.
    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    /// Index of the next page to request.
    pub fn next_page(&self) -> usize {
        self.pages_loaded
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn len(&self) -> usize {
        self.trails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    /// Whether further pages may exist. An explicitly empty page is a
    /// terminal signal and wins over total-count arithmetic, which can be
    /// stale when an upstream count is approximate.
    pub fn has_more(&self) -> bool {
        !self.end_reached && self.trails.len() < self.total_count
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    pub fn find(&self, id: &str) -> Option<&Trail> {
        self.trails.iter().find(|t| t.id == id)
    }

    /// Force the completion signal, e.g. after a bulk load.
    pub fn mark_complete(&mut self) {
        self.end_reached = true;
    }

    /// Offer a fetched page. Records are merged only in page order;
    /// duplicate ids are dropped so re-offering a page is idempotent.
    pub fn record_page(
        &mut self,
        page: usize,
        trails: Vec<Trail>,
        total_count: usize,
    ) -> PageOutcome {
        self.total_count = total_count;

        if page < self.pages_loaded {
            return PageOutcome::AlreadyLoaded;
        }
        if page > self.pages_loaded {
            tracing::debug!(page, expected = self.pages_loaded, "buffering out-of-order page");
            self.buffered.insert(page, trails);
            return PageOutcome::Buffered;
        }

        let added = self.splice(page, trails);

        // Drain any buffered successors that are now in order.
        while let Some(next) = self.buffered.remove(&self.pages_loaded) {
            let page = self.pages_loaded;
            self.splice(page, next);
        }

        PageOutcome::Merged { added }
    }

    fn splice(&mut self, page: usize, trails: Vec<Trail>) -> usize {
        if trails.is_empty() {
            tracing::debug!(page, "empty page marks end of data");
            self.end_reached = true;
            self.pages_loaded += 1;
            return 0;
        }

        let mut added = 0;
        for trail in trails {
            if self.seen_ids.insert(trail.id.clone()) {
                self.trails.push(trail);
                added += 1;
            }
        }
        self.pages_loaded += 1;
        added
    }
}
