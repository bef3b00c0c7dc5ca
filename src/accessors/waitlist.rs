//! Waitlist Accessor
//!
//! Aggregate stats at the MEDIUM tier, paginated views at the SHORT tier
//! (admin pages must feel fresh), and the public write path, which goes
//! through the submission guard.

use std::sync::Arc;

use tracing::warn;

use crate::backend::DataService;
use crate::cache::{keys, SharedCache};
use crate::config::TtlTiers;
use crate::guard::{SubmissionGuard, SubmissionOutcome};
use crate::models::{AdminStats, LeadEntry, WaitlistStats};

// == Waitlist Accessor ==
#[derive(Clone)]
pub struct WaitlistAccessor {
    cache: SharedCache,
    backend: Arc<dyn DataService>,
    guard: Arc<SubmissionGuard>,
    tiers: TtlTiers,
}

impl WaitlistAccessor {
    pub fn new(
        cache: SharedCache,
        backend: Arc<dyn DataService>,
        guard: Arc<SubmissionGuard>,
        tiers: TtlTiers,
    ) -> Self {
        Self {
            cache,
            backend,
            guard,
            tiers,
        }
    }

    // == Aggregate Stats ==
    /// Aggregate waitlist counters; zeroed stats when the backend is
    /// unreachable (unknown, not "empty list").
    pub async fn get_waitlist_stats(&self) -> WaitlistStats {
        let key = keys::waitlist_stats();
        if let Some(stats) = self.cache.write().await.get_json::<WaitlistStats>(&key) {
            return stats;
        }

        match self.backend.count_leads().await {
            Ok(stats) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &stats, self.tiers.medium);
                stats
            }
            Err(err) => {
                warn!(%err, "failed to fetch waitlist stats");
                WaitlistStats::default()
            }
        }
    }

    // == Recent Entries ==
    /// One page of recent signups, newest first. Empty on backend failure.
    pub async fn get_recent_entries(&self, limit: usize, offset: usize) -> Vec<LeadEntry> {
        let key = keys::recent_entries(limit, offset);
        if let Some(entries) = self.cache.write().await.get_json::<Vec<LeadEntry>>(&key) {
            return entries;
        }

        match self.backend.list_leads(limit, offset).await {
            Ok(entries) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &entries, self.tiers.short);
                entries
            }
            Err(err) => {
                warn!(limit, offset, %err, "failed to list recent entries");
                Vec::new()
            }
        }
    }

    // == Admin Stats ==
    /// One page of the admin view: totals plus the page's entries.
    pub async fn get_admin_stats(&self, page: usize, per_page: usize) -> AdminStats {
        let key = keys::admin_stats(page, per_page);
        if let Some(stats) = self.cache.write().await.get_json::<AdminStats>(&key) {
            return stats;
        }

        let totals = match self.backend.count_leads().await {
            Ok(totals) => totals,
            Err(err) => {
                warn!(%err, "failed to count leads for admin view");
                return AdminStats {
                    page,
                    per_page,
                    ..AdminStats::default()
                };
            }
        };
        let entries = match self.backend.list_leads(per_page, page * per_page).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(page, per_page, %err, "failed to list leads for admin view");
                return AdminStats {
                    page,
                    per_page,
                    totals,
                    entries: Vec::new(),
                };
            }
        };

        let stats = AdminStats {
            page,
            per_page,
            totals,
            entries,
        };
        self.cache
            .write()
            .await
            .set_json(&key, &stats, self.tiers.short);
        stats
    }

    // == Add To Waitlist ==
    /// The public signup path. All validation, deduplication, and cache
    /// invalidation happen inside the guard.
    pub async fn add_to_waitlist(&self, email: &str) -> SubmissionOutcome {
        self.guard.submit(email).await
    }
}
