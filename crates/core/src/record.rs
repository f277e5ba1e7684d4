use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::SearchStatus;

/// Convert an epoch-seconds lookup field to a timestamp. `0` means unset.
pub fn epoch_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

/// One tracked scheduled search, as stored in the flagged-searches lookup.
///
/// Timestamps are epoch seconds because that is what the lookup stores;
/// `0` means unset throughout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernanceRecord {
    pub search_name: String,
    pub owner: String,
    pub app: String,
    pub status: SearchStatus,
    /// Why the search was flagged.
    #[serde(default)]
    pub reason: Option<String>,
    /// When the search entered the lifecycle.
    #[serde(default)]
    pub flagged_time: i64,
    /// First owner notification. Reminders do not move it.
    #[serde(default)]
    pub notification_time: i64,
    /// When the remediation window closes. Stays `0` until notification.
    #[serde(default)]
    pub remediation_deadline: i64,
    /// Append-only note trail, ` | `-separated entries.
    #[serde(default)]
    pub notes: String,
}

impl GovernanceRecord {
    /// A candidate row for a search that is not yet tracked. Suspicious rows
    /// are computed views; flagging is what persists them.
    pub fn candidate(
        search_name: impl Into<String>,
        owner: impl Into<String>,
        app: impl Into<String>,
    ) -> Self {
        Self {
            search_name: search_name.into(),
            owner: owner.into(),
            app: app.into(),
            status: SearchStatus::Suspicious,
            reason: None,
            flagged_time: 0,
            notification_time: 0,
            remediation_deadline: 0,
            notes: String::new(),
        }
    }

    pub fn flagged_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_datetime(self.flagged_time)
    }

    pub fn notified_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_datetime(self.notification_time)
    }

    pub fn deadline_at(&self) -> Option<DateTime<Utc>> {
        epoch_to_datetime(self.remediation_deadline)
    }

    /// Append one entry to the note trail.
    pub fn append_note(&mut self, note: &str) {
        if self.notes.is_empty() {
            self.notes = note.to_string();
        } else {
            self.notes.push_str(" | ");
            self.notes.push_str(note);
        }
    }
}
