//! Configuration Module
//!
//! TTL policy tiers and lifecycle timings, loadable from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

// == TTL Tiers ==
/// Named expiration durations chosen by data volatility.
///
/// Tiers are a static policy, not ad hoc numbers: every cache write picks
/// the tier matching how quickly its entity goes stale.
#[derive(Debug, Clone, Copy)]
pub struct TtlTiers {
    /// Paginated and admin views that must feel fresh (~1 min)
    pub short: Duration,
    /// Aggregate statistics and full profile objects (~5 min)
    pub medium: Duration,
    /// Rarely-changing facts such as "username taken?" (~15 min)
    pub long: Duration,
    /// The authentication session object itself (~30 min),
    /// matching the session-timeout window
    pub session: Duration,
}

impl Default for TtlTiers {
    fn default() -> Self {
        Self {
            short: Duration::from_secs(60),
            medium: Duration::from_secs(5 * 60),
            long: Duration::from_secs(15 * 60),
            session: Duration::from_secs(30 * 60),
        }
    }
}

/// Core configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// TTL policy tiers for cache writes
    pub tiers: TtlTiers,
    /// Inactivity window after which the session is forcibly signed out
    pub session_timeout: Duration,
    /// How long before expiry the session warning fires
    pub warning_lead: Duration,
    /// Window during which a repeated waitlist submission is rejected locally
    pub submission_cooldown: Duration,
    /// Interval between background sweeps of expired cache entries
    pub cleanup_interval: Duration,
    /// Time budget the startup cache warmer waits for prefetches
    pub warm_budget: Duration,
    /// File path used by the persistent session store ("remember me")
    pub session_store_path: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `FLOWDESK_TTL_SHORT_SECS` - SHORT tier (default: 60)
    /// - `FLOWDESK_TTL_MEDIUM_SECS` - MEDIUM tier (default: 300)
    /// - `FLOWDESK_TTL_LONG_SECS` - LONG tier (default: 900)
    /// - `FLOWDESK_TTL_SESSION_SECS` - SESSION tier (default: 1800)
    /// - `FLOWDESK_SESSION_TIMEOUT_SECS` - inactivity timeout (default: 1800)
    /// - `FLOWDESK_WARNING_LEAD_SECS` - warning lead time (default: 300)
    /// - `FLOWDESK_COOLDOWN_SECS` - submission cooldown (default: 60)
    /// - `FLOWDESK_CLEANUP_INTERVAL_SECS` - sweep frequency (default: 60)
    /// - `FLOWDESK_WARM_BUDGET_SECS` - warmer time budget (default: 3)
    /// - `FLOWDESK_SESSION_STORE` - persistent session file path
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tiers: TtlTiers {
                short: env_secs("FLOWDESK_TTL_SHORT_SECS", defaults.tiers.short),
                medium: env_secs("FLOWDESK_TTL_MEDIUM_SECS", defaults.tiers.medium),
                long: env_secs("FLOWDESK_TTL_LONG_SECS", defaults.tiers.long),
                session: env_secs("FLOWDESK_TTL_SESSION_SECS", defaults.tiers.session),
            },
            session_timeout: env_secs("FLOWDESK_SESSION_TIMEOUT_SECS", defaults.session_timeout),
            warning_lead: env_secs("FLOWDESK_WARNING_LEAD_SECS", defaults.warning_lead),
            submission_cooldown: env_secs("FLOWDESK_COOLDOWN_SECS", defaults.submission_cooldown),
            cleanup_interval: env_secs("FLOWDESK_CLEANUP_INTERVAL_SECS", defaults.cleanup_interval),
            warm_budget: env_secs("FLOWDESK_WARM_BUDGET_SECS", defaults.warm_budget),
            session_store_path: env::var("FLOWDESK_SESSION_STORE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_store_path),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let tiers = TtlTiers::default();
        Self {
            // Session TTL tier and the activity timeout share one window
            session_timeout: tiers.session,
            warning_lead: Duration::from_secs(5 * 60),
            submission_cooldown: Duration::from_secs(60),
            cleanup_interval: Duration::from_secs(60),
            warm_budget: Duration::from_secs(3),
            session_store_path: env::temp_dir().join("flowdesk-session.json"),
            tiers,
        }
    }
}

/// Reads a duration in whole seconds from an environment variable.
fn env_secs(name: &str, default: Duration) -> Duration {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.tiers.short, Duration::from_secs(60));
        assert_eq!(config.tiers.medium, Duration::from_secs(300));
        assert_eq!(config.tiers.long, Duration::from_secs(900));
        assert_eq!(config.tiers.session, Duration::from_secs(1800));
        assert_eq!(config.session_timeout, config.tiers.session);
        assert_eq!(config.warning_lead, Duration::from_secs(300));
        assert_eq!(config.submission_cooldown, Duration::from_secs(60));
        assert_eq!(config.cleanup_interval, Duration::from_secs(60));
        assert_eq!(config.warm_budget, Duration::from_secs(3));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("FLOWDESK_TTL_SHORT_SECS");
        env::remove_var("FLOWDESK_SESSION_TIMEOUT_SECS");
        env::remove_var("FLOWDESK_COOLDOWN_SECS");

        let config = Config::from_env();
        assert_eq!(config.tiers.short, Duration::from_secs(60));
        assert_eq!(config.session_timeout, Duration::from_secs(1800));
        assert_eq!(config.submission_cooldown, Duration::from_secs(60));
    }

    #[test]
    fn test_warning_fires_before_timeout() {
        let config = Config::default();
        assert!(config.warning_lead < config.session_timeout);
    }
}
