//! Backend Collaborator Boundary
//!
//! The external data service is the system of record for accounts, profiles,
//! and leads. The core consumes it through one async trait and treats every
//! operation as "may fail, may be slow, must not be called more than
//! necessary". Reducing calls through this boundary is the whole point of
//! the cache layer above it.

mod storage;

pub use storage::{FileStore, MemoryStore, SessionStore, StoreSelector};

use async_trait::async_trait;

use crate::error::BackendResult;
use crate::models::{AuthSession, LeadEntry, Permissions, ProfilePatch, UserProfile, WaitlistStats};

// == Data Service Trait ==
/// The backend data service, consumed as opaque fallible async operations.
///
/// Implementations live outside this crate (the production client talks to
/// the hosted service); tests substitute call-counting mocks.
#[async_trait]
pub trait DataService: Send + Sync {
    // == Auth ==
    /// Exchanges credentials for a session.
    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<AuthSession>;

    /// Registers a new account and returns its initial session.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> BackendResult<AuthSession>;

    /// Revokes the current session server-side.
    async fn sign_out(&self) -> BackendResult<()>;

    /// Returns the session the backend currently considers active, if any.
    async fn current_session(&self) -> BackendResult<Option<AuthSession>>;

    /// Fetches the module permissions for one account.
    async fn check_permissions(&self, user_id: &str) -> BackendResult<Permissions>;

    /// Whether a username is already taken.
    async fn username_taken(&self, username: &str) -> BackendResult<bool>;

    /// Whether an email already belongs to a registered account.
    async fn email_registered(&self, email: &str) -> BackendResult<bool>;

    // == Profiles ==
    /// Fetches one complete profile; `None` when no profile exists.
    async fn fetch_profile(&self, user_id: &str) -> BackendResult<Option<UserProfile>>;

    /// Fetches several profiles in a single batched call.
    ///
    /// Ids without a profile are simply absent from the result.
    async fn fetch_profiles(&self, user_ids: &[String]) -> BackendResult<Vec<UserProfile>>;

    /// Applies a partial update and returns the resulting profile.
    async fn update_profile(
        &self,
        user_id: &str,
        patch: &ProfilePatch,
    ) -> BackendResult<UserProfile>;

    // == Waitlist ==
    /// Records a new lead.
    ///
    /// Fails with [`crate::error::BackendError::Duplicate`] when the email
    /// is already on the list.
    async fn insert_lead(&self, email: &str) -> BackendResult<LeadEntry>;

    /// Returns aggregate waitlist counters.
    async fn count_leads(&self) -> BackendResult<WaitlistStats>;

    /// Lists leads newest-first, paginated.
    async fn list_leads(&self, limit: usize, offset: usize) -> BackendResult<Vec<LeadEntry>>;
}
