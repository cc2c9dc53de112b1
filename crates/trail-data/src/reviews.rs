//! Review store seam for the persistent user-data service
//!
//! The core only needs two operations from the user-data store: attach
//! reviews to trails by trail id, and submit a review. The store itself
//! is a black box behind this trait.

use std::sync::atomic::{AtomicU64, Ordering};

use ahash::AHashMap;
use chrono::Utc;
use parking_lot::RwLock;

use trail_core::model::Review;

/// A review as submitted by a user, before the store assigns identity.
#[derive(Debug, Clone, Default)]
pub struct NewReview {
    pub trail_id: String,
    pub author: String,
    pub rating: u8,
    pub text: String,
    pub tips: String,
    pub photos: Vec<String>,
}

#[async_trait::async_trait]
pub trait ReviewStore: Send + Sync {
    /// Reviews grouped by trail id, newest first within each trail.
    async fn reviews_for_trails(
        &self,
        trail_ids: &[String],
    ) -> anyhow::Result<AHashMap<String, Vec<Review>>>;

    /// Persist a review and return it with assigned id and date.
    async fn submit(&self, review: NewReview) -> anyhow::Result<Review>;
}

/// In-memory review store used by tests and offline operation.
#[derive(Default)]
pub struct InMemoryReviewStore {
    by_trail: RwLock<AHashMap<String, Vec<Review>>>,
    counter: AtomicU64,
}

impl InMemoryReviewStore {
    pub fn new() -> InMemoryReviewStore {
        InMemoryReviewStore::default()
    }
}

#[async_trait::async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn reviews_for_trails(
        &self,
        trail_ids: &[String],
    ) -> anyhow::Result<AHashMap<String, Vec<Review>>> {
        let by_trail = self.by_trail.read();
        Ok(trail_ids
            .iter()
            .filter_map(|id| by_trail.get(id).map(|reviews| (id.clone(), reviews.clone())))
            .collect())
    }

    async fn submit(&self, review: NewReview) -> anyhow::Result<Review> {
        let id = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = Review {
            id: format!("review-{id}"),
            author: review.author,
            date: Some(Utc::now()),
            rating: review.rating.clamp(1, 5),
            text: review.text,
            trail_id: review.trail_id.clone(),
            tips: review.tips,
            photos: review.photos,
        };
        // Newest first.
        self.by_trail
            .write()
            .entry(review.trail_id)
            .or_default()
            .insert(0, stored.clone());
        Ok(stored)
    }
}
