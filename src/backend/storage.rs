//! Session Storage Strategy
//!
//! Two interchangeable stores hold the session object between page loads:
//! an in-memory store for the default "this tab only" behavior, and a
//! file-backed store when the user asked to be remembered. The choice is
//! made once at sign-in and held by the selector, not re-checked per access.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::models::AuthSession;

// == Session Store Trait ==
/// A key-value slot for the session object.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the stored session, if one exists and parses.
    async fn load(&self) -> Option<AuthSession>;

    /// Persists the session, replacing any previous one.
    async fn save(&self, session: &AuthSession);

    /// Discards the stored session. Idempotent.
    async fn clear(&self);
}

// == Memory Store ==
/// Process-lifetime store; the session is gone when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<AuthSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Option<AuthSession> {
        self.slot.lock().await.clone()
    }

    async fn save(&self, session: &AuthSession) {
        *self.slot.lock().await = Some(session.clone());
    }

    async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}

// == File Store ==
/// JSON-file-backed store used for "remember me" sessions.
///
/// Storage failures are logged and swallowed: losing persistence degrades
/// to a fresh sign-in, never to a crash.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> Option<AuthSession> {
        let raw = tokio::fs::read(&self.path).await.ok()?;
        match serde_json::from_slice(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "stored session unreadable, discarding");
                let _ = tokio::fs::remove_file(&self.path).await;
                None
            }
        }
    }

    async fn save(&self, session: &AuthSession) {
        match serde_json::to_vec(session) {
            Ok(raw) => {
                if let Err(err) = tokio::fs::write(&self.path, raw).await {
                    warn!(path = %self.path.display(), %err, "failed to persist session");
                }
            }
            Err(err) => warn!(%err, "failed to serialize session"),
        }
    }

    async fn clear(&self) {
        let _ = tokio::fs::remove_file(&self.path).await;
    }
}

// == Store Selector ==
/// Holds both store implementations and the one currently in effect.
///
/// `select` is called once per sign-in with the remember flag; every later
/// access goes through the already-chosen store.
pub struct StoreSelector {
    transient: Arc<dyn SessionStore>,
    persistent: Arc<dyn SessionStore>,
    active: std::sync::Mutex<Arc<dyn SessionStore>>,
}

impl StoreSelector {
    /// Builds a selector; the transient store is active until sign-in
    /// picks otherwise.
    pub fn new(transient: Arc<dyn SessionStore>, persistent: Arc<dyn SessionStore>) -> Self {
        let active = std::sync::Mutex::new(transient.clone());
        Self {
            transient,
            persistent,
            active,
        }
    }

    /// Chooses the store for this session and returns it.
    pub fn select(&self, remember: bool) -> Arc<dyn SessionStore> {
        let chosen = if remember {
            self.persistent.clone()
        } else {
            self.transient.clone()
        };
        *self.active.lock().expect("store selector poisoned") = chosen.clone();
        chosen
    }

    /// The store chosen at the last sign-in.
    pub fn active(&self) -> Arc<dyn SessionStore> {
        self.active.lock().expect("store selector poisoned").clone()
    }

    /// Clears both stores, regardless of which one is active.
    pub async fn clear_all(&self) {
        self.transient.clear().await;
        self.persistent.clear().await;
    }
}
