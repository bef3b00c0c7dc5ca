//! Cache Warmer
//!
//! Startup orchestrator that prefetches the entries most likely to be
//! needed immediately, racing the batch against a fixed time budget so a
//! slow or failing prefetch never blocks application readiness.

use std::time::Duration;

use futures::future::join_all;
use tracing::{info, warn};

use crate::accessors::{AuthAccessor, WaitlistAccessor};

/// How many recent entries the warmer primes (the first page the
/// dashboard renders).
const WARM_RECENT_LIMIT: usize = 10;

// == Cache Warmer ==
pub struct CacheWarmer {
    auth: AuthAccessor,
    waitlist: WaitlistAccessor,
    budget: Duration,
}

impl CacheWarmer {
    pub fn new(auth: AuthAccessor, waitlist: WaitlistAccessor, budget: Duration) -> Self {
        Self {
            auth,
            waitlist,
            budget,
        }
    }

    // == Warm ==
    /// Runs the hot prefetches concurrently and waits at most the budget.
    ///
    /// The race is a cooperative cancellation: when the budget wins, the
    /// in-flight prefetches keep running as spawned tasks and populate the
    /// cache whenever they finish. The warmer just stops waiting.
    pub async fn warm(&self) {
        let session_and_permissions = {
            let auth = self.auth.clone();
            tokio::spawn(async move {
                if let Some(session) = auth.get_current_session().await {
                    auth.check_user_permissions(&session.user_id).await;
                }
            })
        };
        let stats = {
            let waitlist = self.waitlist.clone();
            tokio::spawn(async move {
                waitlist.get_waitlist_stats().await;
            })
        };
        let recent = {
            let waitlist = self.waitlist.clone();
            tokio::spawn(async move {
                waitlist.get_recent_entries(WARM_RECENT_LIMIT, 0).await;
            })
        };

        let batch = join_all([session_and_permissions, stats, recent]);
        match tokio::time::timeout(self.budget, batch).await {
            Ok(_) => info!("cache warm-up complete"),
            Err(_) => warn!(
                budget_secs = self.budget.as_secs(),
                "cache warm-up budget elapsed, proceeding without waiting"
            ),
        }
    }
}
