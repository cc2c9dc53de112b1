//! Concrete trail data sources, in the chain's priority order:
//! backend store, open-data API, built-in fallback dataset.

pub mod adapter;
pub mod backend;
pub mod open_data;
pub mod static_data;

pub use backend::BackendSource;
pub use open_data::OpenDataSource;
pub use static_data::StaticSource;

use trail_core::model::{PageRequest, Trail};

/// Slice one page out of an already-filtered collection.
pub(crate) fn paginate(trails: &[Trail], page: &PageRequest) -> Vec<Trail> {
    let start = page.offset();
    if start >= trails.len() {
        return Vec::new();
    }
    let end = (start + page.page_size).min(trails.len());
    trails[start..end].to_vec()
}
