//! Core Service Hub
//!
//! One explicitly constructed object owning the shared cache, the domain
//! accessors, the submission guard, and the session monitor, wired
//! together and passed by reference to consumers. There is no module-level
//! global state anywhere in the crate.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;

use crate::accessors::{AuthAccessor, ProfileAccessor, WaitlistAccessor};
use crate::backend::{DataService, FileStore, MemoryStore, StoreSelector};
use crate::cache::{shared_cache, CacheStats, SharedCache};
use crate::config::Config;
use crate::error::BackendResult;
use crate::guard::SubmissionGuard;
use crate::models::AuthSession;
use crate::session::{Scheduler, SessionActivityMonitor, TokioScheduler};
use crate::tasks::{spawn_sweep_task, CacheWarmer};

// == Flowdesk Core ==
/// The assembled caching and session-lifecycle core.
pub struct FlowdeskCore {
    cache: SharedCache,
    pub auth: AuthAccessor,
    pub profile: ProfileAccessor,
    pub waitlist: WaitlistAccessor,
    pub monitor: Arc<SessionActivityMonitor>,
    config: Config,
}

impl FlowdeskCore {
    // == Constructor ==
    /// Builds the core with the production scheduler and the default
    /// store pair (in-memory plus the configured session file).
    pub fn new(config: Config, backend: Arc<dyn DataService>) -> Self {
        let stores = Arc::new(StoreSelector::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FileStore::new(config.session_store_path.clone())),
        ));
        Self::with_parts(config, backend, stores, Arc::new(TokioScheduler))
    }

    /// Builds the core from explicit collaborators. Tests inject mock
    /// backends, stores, and schedulers here.
    pub fn with_parts(
        config: Config,
        backend: Arc<dyn DataService>,
        stores: Arc<StoreSelector>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        let cache = shared_cache();

        let auth = AuthAccessor::new(cache.clone(), backend.clone(), stores, config.tiers);
        let profile = ProfileAccessor::new(cache.clone(), backend.clone(), config.tiers);
        let guard = Arc::new(SubmissionGuard::new(
            cache.clone(),
            backend.clone(),
            scheduler.clone(),
            config.submission_cooldown,
            config.tiers.long,
        ));
        let waitlist = WaitlistAccessor::new(cache.clone(), backend, guard, config.tiers);

        let monitor = Arc::new(SessionActivityMonitor::new(
            scheduler,
            config.session_timeout,
            config.warning_lead,
        ));

        // Expiry forces a sign-out through the auth accessor, which also
        // clears the cache; the monitor has already stopped itself.
        {
            let auth = auth.clone();
            monitor.on_timeout(move || {
                let auth = auth.clone();
                tokio::spawn(async move {
                    auth.sign_out().await;
                });
            });
        }

        Self {
            cache,
            auth,
            profile,
            waitlist,
            monitor,
            config,
        }
    }

    // == Startup ==
    /// Warms the hot cache entries within the configured budget and
    /// installs the periodic TTL sweep.
    ///
    /// Returns the sweep handle; the owner aborts it on shutdown.
    pub async fn start(&self) -> JoinHandle<()> {
        CacheWarmer::new(
            self.auth.clone(),
            self.waitlist.clone(),
            self.config.warm_budget,
        )
        .warm()
        .await;

        // Tracking resumes when a persisted session survives the restart
        if self.auth.get_current_session().await.is_some() {
            self.monitor.start_tracking();
        }

        info!("core started");
        spawn_sweep_task(self.cache.clone(), self.config.cleanup_interval)
    }

    // == Auth Lifecycle ==
    /// Signs in and begins activity tracking on success.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> BackendResult<AuthSession> {
        let session = self.auth.sign_in(email, password, remember).await?;
        self.monitor.start_tracking();
        Ok(session)
    }

    /// Registers an account and begins activity tracking on success.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
        remember: bool,
    ) -> BackendResult<AuthSession> {
        let session = self.auth.sign_up(email, password, username, remember).await?;
        self.monitor.start_tracking();
        Ok(session)
    }

    /// Stops tracking and signs out, clearing all cached state.
    pub async fn sign_out(&self) {
        self.monitor.stop_tracking();
        self.auth.sign_out().await;
    }

    // == Introspection ==
    /// Snapshot of the cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// The shared cache handle, for background tasks and tests.
    pub fn cache(&self) -> SharedCache {
        self.cache.clone()
    }
}
