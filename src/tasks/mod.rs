//! Background Tasks Module
//!
//! Contains background work that runs around the cache:
//! - TTL sweep: removes expired cache entries at configured intervals
//! - Cache warmer: prefetches hot entries at startup under a time budget

mod sweep;
mod warmer;

pub use sweep::spawn_sweep_task;
pub use warmer::CacheWarmer;
