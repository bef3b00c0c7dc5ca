//! Session Lifecycle Module
//!
//! An activity-driven timeout state machine and the scheduler abstraction
//! its timers run on.

mod monitor;
mod scheduler;

pub use monitor::{SessionActivityMonitor, SessionPhase};
pub use scheduler::{Scheduler, TimerHandle, TokioScheduler};
