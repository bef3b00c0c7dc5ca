//! Session Activity Monitor
//!
//! Three-state machine driving session-expiry notifications and forced
//! sign-out: Active -> Warning -> Expired, with any qualifying activity
//! collapsing the state back to Active and re-arming both timers.
//!
//! Notifications go to explicitly registered observers rather than an
//! ambient event bus, so delivery is deterministic and testable.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info};

use crate::session::{Scheduler, TimerHandle};

// == Session Phase ==
/// Where the session currently sits in its activity lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Recent activity; no timers have fired
    Active,
    /// The warning timer fired; expiry is imminent unless activity resumes
    Warning,
    /// The session timed out and tracking stopped
    Expired,
}

type WarningObserver = Arc<dyn Fn(Duration) + Send + Sync>;
type TimeoutObserver = Arc<dyn Fn() + Send + Sync>;

struct MonitorInner {
    tracking: bool,
    phase: SessionPhase,
    last_activity_at: Instant,
    warning_fired: bool,
    warning_timer: Option<TimerHandle>,
    expiry_timer: Option<TimerHandle>,
    on_warning: Vec<WarningObserver>,
    on_timeout: Vec<TimeoutObserver>,
}

impl MonitorInner {
    fn cancel_timers(&mut self) {
        if let Some(timer) = self.warning_timer.take() {
            timer.cancel();
        }
        if let Some(timer) = self.expiry_timer.take() {
            timer.cancel();
        }
    }
}

// == Session Activity Monitor ==
/// Tracks user activity and enforces the inactivity timeout.
///
/// Constructed once and passed by reference to whoever feeds it activity
/// signals; it owns no global state.
pub struct SessionActivityMonitor {
    inner: Arc<Mutex<MonitorInner>>,
    scheduler: Arc<dyn Scheduler>,
    session_timeout: Duration,
    warning_lead: Duration,
}

impl SessionActivityMonitor {
    // == Constructor ==
    /// Creates a monitor; tracking starts only when [`start_tracking`] is
    /// called (driven by auth-state transitions).
    ///
    /// [`start_tracking`]: Self::start_tracking
    pub fn new(
        scheduler: Arc<dyn Scheduler>,
        session_timeout: Duration,
        warning_lead: Duration,
    ) -> Self {
        assert!(
            warning_lead < session_timeout,
            "warning lead must fall inside the timeout window"
        );
        Self {
            inner: Arc::new(Mutex::new(MonitorInner {
                tracking: false,
                phase: SessionPhase::Active,
                last_activity_at: Instant::now(),
                warning_fired: false,
                warning_timer: None,
                expiry_timer: None,
                on_warning: Vec::new(),
                on_timeout: Vec::new(),
            })),
            scheduler,
            session_timeout,
            warning_lead,
        }
    }

    // == Observers ==
    /// Registers an observer for the session warning.
    ///
    /// The callback receives the time remaining until expiry.
    pub fn on_warning(&self, observer: impl Fn(Duration) + Send + Sync + 'static) {
        self.lock().on_warning.push(Arc::new(observer));
    }

    /// Registers an observer for the session timeout.
    pub fn on_timeout(&self, observer: impl Fn() + Send + Sync + 'static) {
        self.lock().on_timeout.push(Arc::new(observer));
    }

    // == Tracking Lifecycle ==
    /// Begins tracking: resets the activity clock and arms both timers.
    ///
    /// Called when a session comes into existence.
    pub fn start_tracking(&self) {
        {
            let mut inner = self.lock();
            inner.tracking = true;
        }
        info!("session activity tracking started");
        self.reset_activity_timer();
    }

    /// Stops tracking and cancels any pending timers.
    ///
    /// Called when the session goes away.
    pub fn stop_tracking(&self) {
        let mut inner = self.lock();
        inner.tracking = false;
        inner.cancel_timers();
        debug!("session activity tracking stopped");
    }

    /// Whether the monitor is currently tracking a session.
    pub fn is_tracking(&self) -> bool {
        self.lock().tracking
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.lock().phase
    }

    // == Activity ==
    /// Feeds one activity signal (pointer, key, scroll, touch).
    ///
    /// Any signal collapses the state back to Active unconditionally and
    /// re-arms both timers. Ignored while not tracking.
    pub fn record_activity(&self) {
        if !self.is_tracking() {
            return;
        }
        self.reset_activity_timer();
    }

    /// Re-arms both timers from now.
    ///
    /// Also callable explicitly, e.g. when the user proactively extends
    /// the session from the warning prompt.
    pub fn reset_activity_timer(&self) {
        let mut inner = self.lock();
        if !inner.tracking {
            return;
        }
        inner.last_activity_at = Instant::now();
        inner.warning_fired = false;
        inner.phase = SessionPhase::Active;
        inner.cancel_timers();

        let warning_in = self.session_timeout - self.warning_lead;
        inner.warning_timer = Some(self.scheduler.after(warning_in, {
            let inner = self.inner.clone();
            let lead = self.warning_lead;
            Box::new(move || fire_warning(&inner, lead))
        }));
        inner.expiry_timer = Some(self.scheduler.after(self.session_timeout, {
            let inner = self.inner.clone();
            Box::new(move || fire_timeout(&inner))
        }));
    }

    // == Queries ==
    /// Time left before forced sign-out, saturating at zero.
    pub fn time_until_timeout(&self) -> Duration {
        let elapsed = self.lock().last_activity_at.elapsed();
        self.session_timeout.saturating_sub(elapsed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MonitorInner> {
        self.inner.lock().expect("session monitor poisoned")
    }
}

/// Warning timer body: mark Warning and notify observers with the
/// remaining time. `last_activity_at` is deliberately untouched.
fn fire_warning(inner: &Arc<Mutex<MonitorInner>>, remaining: Duration) {
    let observers = {
        let mut inner = inner.lock().expect("session monitor poisoned");
        if !inner.tracking || inner.warning_fired {
            return;
        }
        inner.warning_fired = true;
        inner.phase = SessionPhase::Warning;
        inner.on_warning.clone()
    };
    info!(remaining_secs = remaining.as_secs(), "session expiry warning");
    for observer in observers {
        observer(remaining);
    }
}

/// Expiry timer body: mark Expired, stop tracking, and notify observers.
/// Observers are invoked outside the lock; the forced sign-out they
/// trigger clears the cache through the auth accessor.
fn fire_timeout(inner: &Arc<Mutex<MonitorInner>>) {
    let observers = {
        let mut inner = inner.lock().expect("session monitor poisoned");
        if !inner.tracking {
            return;
        }
        inner.tracking = false;
        inner.phase = SessionPhase::Expired;
        inner.cancel_timers();
        inner.on_timeout.clone()
    };
    info!("session timed out after inactivity");
    for observer in observers {
        observer();
    }
}
