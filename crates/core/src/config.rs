use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Governance policy knobs, read from the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Remediation window granted on owner notification, in days.
    pub remediation_days: i64,
    /// Domain appended to bare owner names when addressing notices.
    pub email_domain: String,
    /// Records within this many days of their deadline count as expiring.
    pub expiring_window_days: i64,
}

impl GovernanceConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            remediation_days: env_i64("GOV_REMEDIATION_DAYS", 7),
            email_domain: env_or("GOV_EMAIL_DOMAIN", "company.com"),
            expiring_window_days: env_i64("GOV_EXPIRING_WINDOW_DAYS", 3),
        }
    }

    pub fn log_summary(&self) {
        tracing::info!("Governance config loaded:");
        tracing::info!("  remediation_days:     {}", self.remediation_days);
        tracing::info!("  email_domain:         {}", self.email_domain);
        tracing::info!("  expiring_window_days: {}", self.expiring_window_days);
    }

    /// Notification address for a search owner. Owners that already look
    /// like an address are used as-is; empty owners yield an empty address
    /// so callers can skip delivery.
    pub fn email_address_for(&self, owner: &str) -> String {
        if owner.is_empty() {
            return String::new();
        }
        if owner.contains('@') {
            owner.to_string()
        } else {
            format!("{}@{}", owner, self.email_domain)
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            remediation_days: 7,
            email_domain: "company.com".to_string(),
            expiring_window_days: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_policy() {
        let config = GovernanceConfig::default();
        assert_eq!(config.remediation_days, 7);
        assert_eq!(config.email_domain, "company.com");
        assert_eq!(config.expiring_window_days, 3);
    }

    #[test]
    fn bare_owner_gets_the_configured_domain() {
        let config = GovernanceConfig::default();
        assert_eq!(config.email_address_for("jsmith"), "jsmith@company.com");
    }

    #[test]
    fn owner_with_domain_is_used_verbatim() {
        let config = GovernanceConfig::default();
        assert_eq!(
            config.email_address_for("jane.doe@example.org"),
            "jane.doe@example.org"
        );
    }

    #[test]
    fn empty_owner_yields_empty_address() {
        let config = GovernanceConfig::default();
        assert_eq!(config.email_address_for(""), "");
    }
}
