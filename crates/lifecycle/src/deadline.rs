use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use searchgov_core::{GovernanceConfig, GovernanceRecord, SearchStatus};

use crate::engine::{RecordPatch, Transition, DAY_SECS, NOTE_TIMESTAMP_FORMAT};

/// Display urgency band for a record's remediation countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// No countdown applies (disabled, resolved, or outside the lifecycle).
    NotApplicable,
    /// Timer paused while the governance team reviews.
    UnderReview,
    /// Flagged but not yet notified; the timer has not started.
    AwaitingNotification,
    /// Deadline already passed.
    Overdue { days: i64 },
    /// Less than 24 hours left.
    Critical,
    /// Two days or less.
    Urgent,
    /// Five days or less.
    Warning,
    Normal,
}

/// Whole days until `deadline_epoch`, floored, so partial days round down
/// and overdue deadlines come back negative.
pub fn days_remaining(deadline_epoch: i64, now: DateTime<Utc>) -> i64 {
    (deadline_epoch - now.timestamp()).div_euclid(DAY_SECS)
}

/// Band a record for countdown display. Only notified records with a
/// running timer get a time-based band.
pub fn urgency(record: &GovernanceRecord, now: DateTime<Utc>) -> Urgency {
    match record.status {
        SearchStatus::Review => return Urgency::UnderReview,
        SearchStatus::Flagged => return Urgency::AwaitingNotification,
        SearchStatus::Notified => {}
        _ => return Urgency::NotApplicable,
    }

    if record.remediation_deadline == 0 {
        return Urgency::NotApplicable;
    }

    let remaining = record.remediation_deadline - now.timestamp();
    if remaining <= 0 {
        return Urgency::Overdue {
            days: -remaining.div_euclid(DAY_SECS),
        };
    }

    let days = remaining / DAY_SECS;
    if days == 0 {
        Urgency::Critical
    } else if days <= 2 {
        Urgency::Urgent
    } else if days <= 5 {
        Urgency::Warning
    } else {
        Urgency::Normal
    }
}

/// Textual countdown for the deadline column.
pub fn countdown_label(record: &GovernanceRecord, now: DateTime<Utc>) -> String {
    match urgency(record, now) {
        Urgency::NotApplicable => "N/A".to_string(),
        Urgency::UnderReview => "Under Review".to_string(),
        Urgency::AwaitingNotification => "Awaiting Notification".to_string(),
        Urgency::Overdue { days } => format!("OVERDUE {}d", days),
        _ => {
            let remaining = record.remediation_deadline - now.timestamp();
            let days = remaining / DAY_SECS;
            let hours = (remaining % DAY_SECS) / 3600;
            let minutes = (remaining % 3600) / 60;
            let seconds = remaining % 60;
            if days > 0 {
                format!("{}d {}h {}m", days, hours, minutes)
            } else if hours > 0 {
                format!("{}h {}m {}s", hours, minutes, seconds)
            } else {
                format!("{}m {}s", minutes, seconds)
            }
        }
    }
}

/// Whether a record belongs in the "expiring soon" view: flagged or
/// notified, with a running timer inside the configured window. Computed,
/// never stored.
pub fn is_expiring(record: &GovernanceRecord, config: &GovernanceConfig, now: DateTime<Utc>) -> bool {
    if !matches!(record.status, SearchStatus::Flagged | SearchStatus::Notified) {
        return false;
    }
    if record.remediation_deadline == 0 {
        return false;
    }
    let days = days_remaining(record.remediation_deadline, now);
    days >= 0 && days <= config.expiring_window_days
}

/// Records inside the expiring window, in input order.
pub fn expiring_records<'a>(
    records: &'a [GovernanceRecord],
    config: &GovernanceConfig,
    now: DateTime<Utc>,
) -> Vec<&'a GovernanceRecord> {
    records
        .iter()
        .filter(|r| is_expiring(r, config, now))
        .collect()
}

/// A record whose deadline passed without remediation.
#[derive(Debug, Clone, Serialize)]
pub struct OverdueRecord {
    pub search_name: String,
    pub owner: String,
    pub app: String,
    pub days_overdue: i64,
}

/// Scan for flagged/notified records with a started timer whose deadline
/// lies in the past.
pub fn overdue_records(records: &[GovernanceRecord], now: DateTime<Utc>) -> Vec<OverdueRecord> {
    let overdue: Vec<OverdueRecord> = records
        .iter()
        .filter(|r| matches!(r.status, SearchStatus::Flagged | SearchStatus::Notified))
        .filter(|r| r.remediation_deadline > 0 && r.remediation_deadline < now.timestamp())
        .map(|r| OverdueRecord {
            search_name: r.search_name.clone(),
            owner: r.owner.clone(),
            app: r.app.clone(),
            days_overdue: -days_remaining(r.remediation_deadline, now),
        })
        .collect();

    if !overdue.is_empty() {
        warn!(count = overdue.len(), "searches past their remediation deadline");
    }
    overdue
}

/// Produce disable transitions for every overdue record. Returns patches
/// only; the caller performs the store writes and the actual disabling.
pub fn auto_disable_sweep(records: &[GovernanceRecord], now: DateTime<Utc>) -> Vec<Transition> {
    let note = format!(
        "AUTO-DISABLED: Deadline exceeded on {}",
        now.format(NOTE_TIMESTAMP_FORMAT)
    );

    let transitions: Vec<Transition> = records
        .iter()
        .filter(|r| matches!(r.status, SearchStatus::Flagged | SearchStatus::Notified))
        .filter(|r| r.remediation_deadline > 0 && r.remediation_deadline < now.timestamp())
        .map(|r| Transition {
            search_name: r.search_name.clone(),
            previous_status: r.status,
            new_status: SearchStatus::Disabled,
            patch: RecordPatch {
                status: Some(SearchStatus::Disabled),
                append_note: Some(note.clone()),
                ..RecordPatch::default()
            },
        })
        .collect();

    debug!(
        scanned = records.len(),
        disabled = transitions.len(),
        "auto-disable sweep"
    );
    transitions
}
