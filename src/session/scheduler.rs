//! Scheduler Abstraction
//!
//! One-shot timers behind a trait, so components that arm and cancel
//! deadlines (session monitor, submission cooldowns) never touch ambient
//! scheduling primitives directly and tests can drive them on tokio's
//! paused clock.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

// == Timer Handle ==
/// Cancellation token for a scheduled task.
///
/// Cancelling a timer that already fired is a no-op. Dropping the handle
/// does not cancel the timer; holders cancel explicitly.
#[derive(Debug)]
pub struct TimerHandle {
    handle: JoinHandle<()>,
}

impl TimerHandle {
    /// Clears the pending timer before it fires.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the timer has fired or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

// == Scheduler Trait ==
/// Schedules a task to run once after a delay.
pub trait Scheduler: Send + Sync {
    /// Runs `task` after `delay`, returning a handle that can cancel it.
    fn after(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TimerHandle;
}

// == Tokio Scheduler ==
/// Production scheduler backed by spawned sleep tasks.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn after(&self, delay: Duration, task: Box<dyn FnOnce() + Send>) -> TimerHandle {
        // The deadline is fixed here, not when the spawned task first
        // polls, so a timer armed and only later scheduled still fires at
        // the intended instant.
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            task();
        });
        TimerHandle { handle }
    }
}
