//! Profile models
//!
//! The complete profile object and the partial patch used by the
//! update and auto-save paths.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == User Profile ==
/// The complete profile settings object for one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Owning account id
    pub user_id: String,
    /// Unique public handle
    pub username: String,
    /// Name shown across the dashboard
    pub display_name: String,
    /// Company the account belongs to
    pub company: Option<String>,
    /// IANA timezone name, if the user picked one
    pub timezone: Option<String>,
    /// Last backend-acknowledged modification time
    pub updated_at: DateTime<Utc>,
}

// == Profile Patch ==
/// A partial profile update.
///
/// `None` fields are left untouched; only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub company: Option<String>,
    pub timezone: Option<String>,
}

impl ProfilePatch {
    /// Returns true when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.company.is_none() && self.timezone.is_none()
    }

    /// Applies the patch to a profile in place.
    ///
    /// Used by the auto-save path to update the cached object without
    /// waiting for the next read to refetch it.
    pub fn apply_to(&self, profile: &mut UserProfile) {
        if let Some(display_name) = &self.display_name {
            profile.display_name = display_name.clone();
        }
        if let Some(company) = &self.company {
            profile.company = Some(company.clone());
        }
        if let Some(timezone) = &self.timezone {
            profile.timezone = Some(timezone.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> UserProfile {
        UserProfile {
            user_id: "u-1".to_string(),
            username: "casey".to_string(),
            display_name: "Casey".to_string(),
            company: None,
            timezone: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut profile = sample_profile();
        let before = profile.clone();

        let patch = ProfilePatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut profile);

        assert_eq!(profile, before);
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut profile = sample_profile();

        let patch = ProfilePatch {
            display_name: Some("Casey M.".to_string()),
            company: Some("Acme".to_string()),
            timezone: None,
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut profile);

        assert_eq!(profile.display_name, "Casey M.");
        assert_eq!(profile.company.as_deref(), Some("Acme"));
        assert_eq!(profile.timezone, None);
        assert_eq!(profile.username, "casey");
    }
}
