//! Waitlist models
//!
//! Lead entries and the aggregate/paginated views built over them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Lead Entry ==
/// One signup on the public waitlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadEntry {
    /// Backend identifier of the lead
    pub id: String,
    /// Normalized email the lead signed up with
    pub email: String,
    /// When the signup was recorded
    pub created_at: DateTime<Utc>,
}

// == Waitlist Stats ==
/// Aggregate waitlist counters.
///
/// The all-zero default doubles as the safe shape returned when the
/// backend cannot be reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaitlistStats {
    /// Total signups recorded
    pub total: u64,
    /// Signups that confirmed their address
    pub confirmed: u64,
    /// Signups still awaiting confirmation
    pub pending: u64,
}

// == Admin Stats ==
/// One page of the admin statistics view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStats {
    /// Page number, zero-based
    pub page: usize,
    /// Requested page size
    pub per_page: usize,
    /// Aggregate counters across the whole waitlist
    pub totals: WaitlistStats,
    /// The entries on this page
    pub entries: Vec<LeadEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stats_are_zero() {
        let stats = WaitlistStats::default();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.confirmed, 0);
        assert_eq!(stats.pending, 0);
    }

    #[test]
    fn test_lead_serialization_round_trip() {
        let lead = LeadEntry {
            id: "lead-1".to_string(),
            email: "a@b.com".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&lead).unwrap();
        let back: LeadEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lead);
    }
}
