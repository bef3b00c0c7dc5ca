//! FlowDesk Core - application-layer caching and session lifecycle
//!
//! Read-through caching for backend data, submission deduplication for the
//! public waitlist, and an activity-driven session timeout state machine.

pub mod accessors;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;
pub mod state;
pub mod tasks;

pub use accessors::{AuthAccessor, ProfileAccessor, WaitlistAccessor};
pub use backend::{DataService, FileStore, MemoryStore, SessionStore, StoreSelector};
pub use cache::{AppCache, CacheStats, SharedCache, TtlCache};
pub use config::{Config, TtlTiers};
pub use error::{BackendError, BackendResult};
pub use guard::{SubmissionGuard, SubmissionOutcome};
pub use session::{Scheduler, SessionActivityMonitor, SessionPhase, TimerHandle, TokioScheduler};
pub use state::FlowdeskCore;
pub use tasks::{spawn_sweep_task, CacheWarmer};
