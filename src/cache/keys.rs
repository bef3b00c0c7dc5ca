//! Cache Key Registry
//!
//! Deterministic, namespaced key builders, one per cached entity type.
//! Routing every cache access through these functions keeps domains from
//! colliding and guarantees that logically identical lookups always agree
//! on a key while logically distinct lookups never do.
//!
//! Identity parameters (usernames, email addresses) are normalized here so
//! that differently-cased inputs land on the same entry.

// == Key Namespaces ==
/// Prefix covering every waitlist-derived key, for bulk invalidation.
pub const WAITLIST_PREFIX: &str = "waitlist:";
/// Prefix covering the paginated recent-entries views.
pub const RECENT_ENTRIES_PREFIX: &str = "waitlist:recent:";
/// Prefix covering the paginated admin views.
pub const ADMIN_STATS_PREFIX: &str = "waitlist:admin:";

// == Auth Keys ==
/// The current authentication session object.
pub fn auth_session() -> String {
    "auth:session".to_string()
}

/// Module permissions for one user.
pub fn user_permissions(user_id: &str) -> String {
    format!("auth:permissions:{user_id}")
}

/// The "is this username taken?" fact.
pub fn username_availability(username: &str) -> String {
    format!("auth:username:{}", normalize_identity(username))
}

/// The "is this email already registered?" fact.
pub fn email_exists(email: &str) -> String {
    format!("auth:email:{}", normalize_identity(email))
}

// == Profile Keys ==
/// The complete profile settings object for one user.
pub fn profile_settings(user_id: &str) -> String {
    format!("profile:settings:{user_id}")
}

// == Waitlist Keys ==
/// Aggregate waitlist statistics.
pub fn waitlist_stats() -> String {
    "waitlist:stats".to_string()
}

/// One page of recent waitlist entries.
pub fn recent_entries(limit: usize, offset: usize) -> String {
    format!("{RECENT_ENTRIES_PREFIX}{limit}:{offset}")
}

/// One page of the admin statistics view.
pub fn admin_stats(page: usize, per_page: usize) -> String {
    format!("{ADMIN_STATS_PREFIX}{page}:{per_page}")
}

/// The positive "this lead already exists" flag for one submitted identity.
pub fn lead_exists(email: &str) -> String {
    format!("waitlist:exists:{}", normalize_identity(email))
}

// == Normalization ==
/// Canonical form for user-supplied identities: trimmed and lowercased.
pub fn normalize_identity(raw: &str) -> String {
    raw.trim().to_lowercase()
}
