//! Domain Cache Accessors
//!
//! Each accessor wraps exactly one backend operation with read-through /
//! write-invalidate caching: compute the key via the registry, try the
//! cache, fall through to the backend on a miss, store with the entity's
//! TTL tier. Mutations invalidate every key they could make stale before
//! the next read is allowed to trust the cache.
//!
//! Two deliberate properties, carried from the system this replaces:
//!
//! - Concurrent misses on one key are not coalesced; both fall through to
//!   the backend and both write the cache (last write wins). Cache writes
//!   are idempotent-by-value, so this is an accepted inefficiency.
//! - Read accessors collapse "not found" and "backend error" into the same
//!   `None`/default result. Callers must treat that as "unknown", never as
//!   an authoritative "does not exist".

mod auth;
mod profile;
mod waitlist;

pub use auth::AuthAccessor;
pub use profile::ProfileAccessor;
pub use waitlist::WaitlistAccessor;
