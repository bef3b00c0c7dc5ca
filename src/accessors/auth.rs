//! Auth Accessor
//!
//! Caches the session object, permissions, and the signup-time facts
//! (username taken, email registered), and owns the sign-in/out write
//! paths. Sign-out clears the entire cache so nothing from the previous
//! user survives in memory.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::{DataService, StoreSelector};
use crate::cache::{keys, SharedCache};
use crate::config::TtlTiers;
use crate::error::BackendResult;
use crate::models::{AuthSession, Permissions};

// == Auth Accessor ==
#[derive(Clone)]
pub struct AuthAccessor {
    cache: SharedCache,
    backend: Arc<dyn DataService>,
    stores: Arc<StoreSelector>,
    tiers: TtlTiers,
}

impl AuthAccessor {
    pub fn new(
        cache: SharedCache,
        backend: Arc<dyn DataService>,
        stores: Arc<StoreSelector>,
        tiers: TtlTiers,
    ) -> Self {
        Self {
            cache,
            backend,
            stores,
            tiers,
        }
    }

    // == Current Session ==
    /// Returns the active session, preferring the cache, then the chosen
    /// session store, then the backend.
    ///
    /// `None` means "no usable session or the backend is unreachable".
    pub async fn get_current_session(&self) -> Option<AuthSession> {
        let key = keys::auth_session();
        if let Some(session) = self.cache.write().await.get_json::<AuthSession>(&key) {
            return Some(session);
        }

        if let Some(session) = self.stores.active().load().await {
            self.cache
                .write()
                .await
                .set_json(&key, &session, self.tiers.session);
            return Some(session);
        }

        match self.backend.current_session().await {
            Ok(Some(session)) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &session, self.tiers.session);
                Some(session)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(%err, "failed to fetch current session");
                None
            }
        }
    }

    // == Sign In ==
    /// Exchanges credentials for a session, selecting the session store by
    /// the remember flag and caching the new session.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &str,
        remember: bool,
    ) -> BackendResult<AuthSession> {
        // A stale session must not outlive the credential exchange
        self.cache.write().await.delete(&keys::auth_session());

        let mut session = self.backend.sign_in(email, password).await?;
        session.remember = remember;

        self.stores.select(remember).save(&session).await;
        self.cache
            .write()
            .await
            .set_json(keys::auth_session(), &session, self.tiers.session);
        info!(user_id = %session.user_id, "signed in");
        Ok(session)
    }

    // == Sign Up ==
    /// Registers an account and establishes its session.
    ///
    /// The username/email facts cached during the signup form are stale
    /// the moment registration succeeds, so they are invalidated up front.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
        remember: bool,
    ) -> BackendResult<AuthSession> {
        {
            let mut cache = self.cache.write().await;
            cache.delete(&keys::auth_session());
            cache.delete(&keys::username_availability(username));
            cache.delete(&keys::email_exists(email));
        }

        let mut session = self.backend.sign_up(email, password, username).await?;
        session.remember = remember;

        self.stores.select(remember).save(&session).await;
        self.cache
            .write()
            .await
            .set_json(keys::auth_session(), &session, self.tiers.session);
        info!(user_id = %session.user_id, "account created");
        Ok(session)
    }

    // == Sign Out ==
    /// Signs out and wipes all cached state.
    ///
    /// The cache is cleared before the backend call so no other-user data
    /// lingers even if the revocation fails; a failed revocation is logged
    /// and swallowed.
    pub async fn sign_out(&self) {
        self.cache.write().await.clear();
        self.stores.clear_all().await;

        if let Err(err) = self.backend.sign_out().await {
            warn!(%err, "backend sign-out failed, local state cleared anyway");
        }
        info!("signed out");
    }

    // == Permissions ==
    /// Module permissions for one user. The locked-down default stands in
    /// when the backend is unreachable.
    pub async fn check_user_permissions(&self, user_id: &str) -> Permissions {
        let key = keys::user_permissions(user_id);
        if let Some(perms) = self.cache.write().await.get_json::<Permissions>(&key) {
            return perms;
        }

        match self.backend.check_permissions(user_id).await {
            Ok(perms) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &perms, self.tiers.medium);
                perms
            }
            Err(err) => {
                warn!(user_id, %err, "failed to fetch permissions, denying by default");
                Permissions {
                    user_id: user_id.to_string(),
                    ..Permissions::default()
                }
            }
        }
    }

    // == Username Availability ==
    /// Whether a username is free. `None` means "could not determine".
    pub async fn check_username_availability(&self, username: &str) -> Option<bool> {
        // The backend sees the same canonical form the key is built from,
        // so case variants cannot prime the entry with a wrong answer
        let normalized = keys::normalize_identity(username);
        let key = keys::username_availability(&normalized);
        if let Some(taken) = self.cache.write().await.get_json::<bool>(&key) {
            return Some(!taken);
        }

        match self.backend.username_taken(&normalized).await {
            Ok(taken) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &taken, self.tiers.long);
                Some(!taken)
            }
            Err(err) => {
                warn!(username, %err, "username availability check failed");
                None
            }
        }
    }

    // == Email Exists ==
    /// Whether an email is already registered. `None` means "could not
    /// determine", which callers must not read as "not registered".
    pub async fn check_email_exists(&self, email: &str) -> Option<bool> {
        let normalized = keys::normalize_identity(email);
        let key = keys::email_exists(&normalized);
        if let Some(exists) = self.cache.write().await.get_json::<bool>(&key) {
            return Some(exists);
        }

        match self.backend.email_registered(&normalized).await {
            Ok(exists) => {
                self.cache
                    .write()
                    .await
                    .set_json(&key, &exists, self.tiers.long);
                Some(exists)
            }
            Err(err) => {
                warn!(%err, "email registration check failed");
                None
            }
        }
    }
}
