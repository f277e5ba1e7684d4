use serde::{Deserialize, Serialize};

/// A requested state change for one governance record.
///
/// Dashboard buttons map one-to-one onto these variants; routing happens on
/// the variant, never on button ids or label text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Start tracking a suspicious search. Sets the flag timestamp and
    /// reason; the remediation timer stays unset until notification.
    Flag { reason: String },
    /// Notify the owner and start the remediation timer.
    Notify,
    /// Shift the remediation deadline by a signed number of days.
    /// `acknowledge_expiry` confirms a reduction that lands in the past.
    Extend {
        delta_days: i64,
        acknowledge_expiry: bool,
    },
    /// Owner claims remediation; hand the record to the governance team.
    SubmitReview,
    /// Accept the remediation claim and close out the record.
    ApproveReview,
    /// Send the record back to the owner with a fresh fixed window.
    RejectReview { reason: String },
    /// Stop the search from running.
    Disable,
    /// Put a disabled search back on its schedule.
    Enable,
    /// Mark remediated without the review round-trip.
    Resolve,
    /// Whitelist a suspicious search; requires a justification note.
    MarkOk { justification: String },
}

impl Action {
    /// Stable name used in audit entries and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Flag { .. } => "flag",
            Action::Notify => "notify",
            Action::Extend { .. } => "extend",
            Action::SubmitReview => "submit-review",
            Action::ApproveReview => "approve-review",
            Action::RejectReview { .. } => "reject-review",
            Action::Disable => "disable",
            Action::Enable => "enable",
            Action::Resolve => "resolve",
            Action::MarkOk { .. } => "mark-ok",
        }
    }
}
