use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a tracked scheduled search.
///
/// `Suspicious` and `Ok` are computed views over the candidate scan and the
/// whitelist; they never appear as stored rows in the flagged-searches
/// lookup. The remaining five are the stored lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Suspicious,
    /// Tracked, owner not yet notified. Remediation timer not started.
    #[serde(alias = "pending")]
    Flagged,
    /// Owner notified, remediation timer running.
    #[serde(alias = "pending remediation", alias = "enabled", alias = "active")]
    Notified,
    /// Owner claims remediation; waiting on the governance team.
    #[serde(alias = "pending review")]
    Review,
    #[serde(alias = "disabled by governance")]
    Disabled,
    Resolved,
    Ok,
}

/// Raised when a raw status string matches no known status or alias.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search status: '{0}'")]
pub struct ParseStatusError(pub String);

impl SearchStatus {
    /// Canonical lowercase value as stored in lookup rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchStatus::Suspicious => "suspicious",
            SearchStatus::Flagged => "flagged",
            SearchStatus::Notified => "notified",
            SearchStatus::Review => "review",
            SearchStatus::Disabled => "disabled",
            SearchStatus::Resolved => "resolved",
            SearchStatus::Ok => "ok",
        }
    }

    /// Display label for dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            SearchStatus::Suspicious => "Suspicious",
            SearchStatus::Flagged => "Flagged",
            SearchStatus::Notified => "Notified",
            SearchStatus::Review => "Pending Review",
            SearchStatus::Disabled => "Disabled",
            SearchStatus::Resolved => "Resolved",
            SearchStatus::Ok => "OK",
        }
    }

    /// Counts toward the "Currently Flagged" panel: tracked and still
    /// awaiting an outcome.
    pub fn is_active_flagged(&self) -> bool {
        matches!(
            self,
            SearchStatus::Flagged | SearchStatus::Notified | SearchStatus::Review
        )
    }

    /// Occupies a row in the active lifecycle. These statuses reject a second
    /// flag request and are the ones eligible for extend and resolve.
    pub fn in_flagged_lifecycle(&self) -> bool {
        matches!(
            self,
            SearchStatus::Flagged
                | SearchStatus::Notified
                | SearchStatus::Review
                | SearchStatus::Disabled
        )
    }
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchStatus {
    type Err = ParseStatusError;

    /// Case-insensitive; accepts the legacy raw values older lookup rows
    /// carry ("pending", "pending remediation", "disabled by governance",
    /// "enabled", "active").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "suspicious" => Ok(SearchStatus::Suspicious),
            "flagged" | "pending" => Ok(SearchStatus::Flagged),
            "notified" | "pending remediation" | "enabled" | "active" => {
                Ok(SearchStatus::Notified)
            }
            "review" | "pending review" => Ok(SearchStatus::Review),
            "disabled" | "disabled by governance" => Ok(SearchStatus::Disabled),
            "resolved" => Ok(SearchStatus::Resolved),
            "ok" => Ok(SearchStatus::Ok),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}
