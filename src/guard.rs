//! Submission Guard
//!
//! Protects the public waitlist write path from rapid duplicate
//! submissions and from round-tripping to the backend just to rediscover
//! a known duplicate. Three layers, cheapest first: shape validation, a
//! local cooldown set, and the cached "already exists" flag.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::backend::DataService;
use crate::cache::{keys, SharedCache};
use crate::error::BackendError;
use crate::models::LeadEntry;
use crate::session::Scheduler;

/// Pragmatic email shape check; the backend stays the authority on
/// deliverability.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// == Submission Outcome ==
/// Result of a guarded submission. Never an error: every failure mode is
/// a normal, user-presentable outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The lead was recorded
    Accepted(LeadEntry),
    /// The identity is already on the list
    AlreadyRegistered,
    /// The same identity was submitted within the cooldown window
    CoolingDown,
    /// The input failed shape validation before any cache or backend work
    Invalid(String),
    /// The backend could not be reached; the caller may retry
    Unavailable,
}

// == Submission Guard ==
pub struct SubmissionGuard {
    cache: SharedCache,
    backend: Arc<dyn DataService>,
    scheduler: Arc<dyn Scheduler>,
    cooldown: Duration,
    exists_ttl: Duration,
    /// Normalized identity -> cooldown expiry. Entries are removed by a
    /// scheduled timer, with a lazy expiry check as backstop.
    cooldowns: Arc<Mutex<HashMap<String, Instant>>>,
}

impl SubmissionGuard {
    /// # Arguments
    /// * `cooldown` - window during which a repeat submission is rejected locally
    /// * `exists_ttl` - TTL for the positive duplicate flag (LONG tier)
    pub fn new(
        cache: SharedCache,
        backend: Arc<dyn DataService>,
        scheduler: Arc<dyn Scheduler>,
        cooldown: Duration,
        exists_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            backend,
            scheduler,
            cooldown,
            exists_ttl,
            cooldowns: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    // == Submit ==
    /// Runs the full guarded write path for one submitted identity.
    pub async fn submit(&self, email: &str) -> SubmissionOutcome {
        let normalized = keys::normalize_identity(email);

        if !EMAIL_RE.is_match(&normalized) {
            return SubmissionOutcome::Invalid("invalid email address format".to_string());
        }

        if self.is_cooling_down(&normalized) {
            debug!(identity = %normalized, "submission rejected by cooldown");
            return SubmissionOutcome::CoolingDown;
        }

        // Known duplicate: answer from cache, zero backend calls
        let exists_key = keys::lead_exists(&normalized);
        if self.cache.write().await.get_json::<bool>(&exists_key) == Some(true) {
            debug!(identity = %normalized, "submission rejected by cached duplicate flag");
            return SubmissionOutcome::AlreadyRegistered;
        }

        // Check-and-insert must not straddle a suspension point, or two
        // interleaved submissions could both pass the cooldown check.
        if !self.begin_cooldown(&normalized) {
            return SubmissionOutcome::CoolingDown;
        }

        match self.backend.insert_lead(&normalized).await {
            Ok(lead) => {
                // Totals and paginated views are stale now
                let mut cache = self.cache.write().await;
                cache.delete(&keys::waitlist_stats());
                cache.delete_prefix(keys::RECENT_ENTRIES_PREFIX);
                cache.delete_prefix(keys::ADMIN_STATS_PREFIX);
                drop(cache);

                info!(identity = %normalized, "waitlist submission accepted");
                SubmissionOutcome::Accepted(lead)
            }
            Err(BackendError::Duplicate(_)) => {
                self.cache
                    .write()
                    .await
                    .set_json(&exists_key, &true, self.exists_ttl);
                debug!(identity = %normalized, "backend reported duplicate, flag cached");
                SubmissionOutcome::AlreadyRegistered
            }
            Err(err) => {
                // The write never happened; lift the cooldown so the
                // caller's retry policy is not blocked for the full window
                self.end_cooldown(&normalized);
                warn!(%err, "waitlist submission failed");
                SubmissionOutcome::Unavailable
            }
        }
    }

    // == Cooldown Set ==
    /// Whether a non-expired cooldown entry exists for the identity.
    fn is_cooling_down(&self, normalized: &str) -> bool {
        let map = self.cooldowns.lock().expect("cooldown set poisoned");
        map.get(normalized)
            .map(|expires_at| *expires_at > Instant::now())
            .unwrap_or(false)
    }

    /// Atomically re-checks and inserts a cooldown entry, scheduling its
    /// automatic removal. Returns false if a live entry already exists.
    fn begin_cooldown(&self, normalized: &str) -> bool {
        let expires_at = Instant::now() + self.cooldown;
        {
            let mut map = self.cooldowns.lock().expect("cooldown set poisoned");
            if let Some(existing) = map.get(normalized) {
                if *existing > Instant::now() {
                    return false;
                }
            }
            map.insert(normalized.to_string(), expires_at);
        }

        let cooldowns = self.cooldowns.clone();
        let identity = normalized.to_string();
        // Fire-and-forget removal timer; the handle is dropped because a
        // lifted cooldown makes the timer a harmless no-op.
        let _ = self.scheduler.after(
            self.cooldown,
            Box::new(move || {
                let mut map = cooldowns.lock().expect("cooldown set poisoned");
                if map
                    .get(&identity)
                    .map(|expiry| *expiry <= Instant::now())
                    .unwrap_or(false)
                {
                    map.remove(&identity);
                }
            }),
        );
        true
    }

    /// Removes a cooldown entry early (failed backend write).
    fn end_cooldown(&self, normalized: &str) {
        self.cooldowns
            .lock()
            .expect("cooldown set poisoned")
            .remove(normalized);
    }

    /// Number of identities currently in the cooldown set.
    pub fn active_cooldowns(&self) -> usize {
        self.cooldowns.lock().expect("cooldown set poisoned").len()
    }
}
