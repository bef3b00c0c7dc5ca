//! Authentication models
//!
//! The session object and the per-user module permissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Auth Session ==
/// The authenticated session as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Backend identifier of the signed-in account
    pub user_id: String,
    /// Email the account was registered with
    pub email: String,
    /// Opaque access token presented on backend calls
    pub access_token: String,
    /// When the session was issued
    pub issued_at: DateTime<Utc>,
    /// Whether the user asked to be remembered across restarts
    pub remember: bool,
}

// == Permissions ==
/// Which automation modules a user may access.
///
/// The default is fully locked down, which doubles as the safe shape
/// returned when the backend cannot be reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Permissions {
    /// Account the permissions belong to
    pub user_id: String,
    /// Whether the admin views are accessible
    pub is_admin: bool,
    /// Whether data export is allowed
    pub can_export: bool,
    /// Automation modules enabled for this account
    pub modules: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_serialization_round_trip() {
        let session = AuthSession {
            user_id: "u-1".to_string(),
            email: "a@b.com".to_string(),
            access_token: "tok".to_string(),
            issued_at: Utc::now(),
            remember: true,
        };

        let json = serde_json::to_string(&session).unwrap();
        let back: AuthSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }

    #[test]
    fn test_default_permissions_deny_everything() {
        let perms = Permissions::default();
        assert!(!perms.is_admin);
        assert!(!perms.can_export);
        assert!(perms.modules.is_empty());
    }
}
