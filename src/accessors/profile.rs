//! Profile Accessor
//!
//! Read-through caching for profile objects at the MEDIUM tier, a batched
//! multi-profile fetch that back-fills individual entries, and the two
//! write paths: explicit update (invalidate, then write) and auto-save
//! (optimistic in-place patch of the cached object).

use std::sync::Arc;

use tracing::warn;

use crate::backend::DataService;
use crate::cache::{keys, SharedCache};
use crate::config::TtlTiers;
use crate::models::{ProfilePatch, UserProfile};

// == Profile Accessor ==
#[derive(Clone)]
pub struct ProfileAccessor {
    cache: SharedCache,
    backend: Arc<dyn DataService>,
    tiers: TtlTiers,
}

impl ProfileAccessor {
    pub fn new(cache: SharedCache, backend: Arc<dyn DataService>, tiers: TtlTiers) -> Self {
        Self {
            cache,
            backend,
            tiers,
        }
    }

    // == Complete Profile ==
    /// Fetches one complete profile. `None` means "no profile or backend
    /// unreachable"; callers must treat it as unknown.
    pub async fn get_complete_profile(&self, user_id: &str) -> Option<UserProfile> {
        let key = keys::profile_settings(user_id);
        if let Some(profile) = self.cache.write().await.get_json::<UserProfile>(&key) {
            return Some(profile);
        }

        match self.backend.fetch_profile(user_id).await {
            Ok(Some(profile)) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &profile, self.tiers.medium);
                Some(profile)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(user_id, %err, "failed to fetch profile");
                None
            }
        }
    }

    // == Multiple Profiles ==
    /// Fetches several profiles with at most one backend call.
    ///
    /// Ids already cached are served locally; the uncached remainder goes
    /// to the backend in a single batched call, and each fetched profile
    /// is back-filled into the cache individually so later single-profile
    /// reads hit.
    pub async fn get_multiple_profiles(&self, user_ids: &[String]) -> Vec<UserProfile> {
        let mut found = Vec::with_capacity(user_ids.len());
        let mut uncached = Vec::new();

        {
            let mut cache = self.cache.write().await;
            for user_id in user_ids {
                match cache.get_json::<UserProfile>(&keys::profile_settings(user_id)) {
                    Some(profile) => found.push(profile),
                    None => uncached.push(user_id.clone()),
                }
            }
        }

        if uncached.is_empty() {
            return found;
        }

        match self.backend.fetch_profiles(&uncached).await {
            Ok(profiles) => {
                let mut cache = self.cache.write().await;
                for profile in profiles {
                    cache.set_json(
                        keys::profile_settings(&profile.user_id),
                        &profile,
                        self.tiers.medium,
                    );
                    found.push(profile);
                }
            }
            Err(err) => {
                warn!(count = uncached.len(), %err, "batched profile fetch failed");
            }
        }
        found
    }

    // == Update Profile ==
    /// Applies a patch through the backend.
    ///
    /// The cached profile is invalidated before the write so a concurrent
    /// read can never observe the pre-update object as fresh; the
    /// backend's response then re-primes the cache.
    pub async fn update_profile(&self, user_id: &str, patch: &ProfilePatch) -> Option<UserProfile> {
        let key = keys::profile_settings(user_id);
        self.cache.write().await.delete(&key);

        match self.backend.update_profile(user_id, patch).await {
            Ok(profile) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &profile, self.tiers.medium);
                Some(profile)
            }
            Err(err) => {
                warn!(user_id, %err, "profile update failed");
                None
            }
        }
    }

    // == Auto Save ==
    /// Background save triggered while the user edits.
    ///
    /// The cached object is patched in place first so the UI reflects the
    /// change instantly, then the write goes to the backend. If the write
    /// fails, the optimistic entry is invalidated; the next read refetches
    /// the truth.
    pub async fn auto_save(&self, user_id: &str, patch: &ProfilePatch) -> Option<UserProfile> {
        if patch.is_empty() {
            return self.get_complete_profile(user_id).await;
        }

        let key = keys::profile_settings(user_id);
        {
            let mut cache = self.cache.write().await;
            if let Some(mut cached) = cache.get_json::<UserProfile>(&key) {
                patch.apply_to(&mut cached);
                cache.set_json(&key, &cached, self.tiers.medium);
            }
        }

        match self.backend.update_profile(user_id, patch).await {
            Ok(profile) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &profile, self.tiers.medium);
                Some(profile)
            }
            Err(err) => {
                warn!(user_id, %err, "auto-save failed, dropping optimistic entry");
                self.cache.write().await.delete(&key);
                None
            }
        }
    }
}
