//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, namespaced key building,
//! and aggregate statistics.

mod entry;
pub mod keys;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{AppCache, TtlCache};

// == Shared Handle ==
/// The cache handle shared across accessors and background tasks.
///
/// One instance per process, constructed explicitly and passed by reference
/// rather than living in module-level global state.
pub type SharedCache = Arc<RwLock<AppCache>>;

/// Creates a fresh shared cache handle.
pub fn shared_cache() -> SharedCache {
    Arc::new(RwLock::new(AppCache::new()))
}
