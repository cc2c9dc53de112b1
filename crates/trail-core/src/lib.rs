//! Core abstractions for the trail data access layer
//!
//! This crate provides the canonical data model, pure geometry and
//! filtering logic, and page-state tracking. It performs no I/O; the
//! concrete data sources and orchestration live in `trail-data`.

pub mod filter;
pub mod geometry;
pub mod model;
pub mod paging;
pub mod source;
pub mod stats;

// Re-export commonly used types
pub use model::{
    Difficulty, PageRequest, Region, Review, Trail, TrailAlert, TrailFilters,
};
pub use paging::PageTracker;
pub use source::{FetchResult, TrailSource};
pub use stats::TrailStatistics;
