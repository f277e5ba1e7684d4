use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use searchgov_core::{GovernanceConfig, GovernanceRecord, SearchStatus};

use crate::action::Action;

/// Seconds in a day, the unit of deadline arithmetic.
pub(crate) const DAY_SECS: i64 = 86_400;

/// Timestamp format used in note-trail entries.
pub(crate) const NOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Window granted when a review is rejected. Fixed at 7 days independent of
/// the configured remediation window.
const REJECT_REVIEW_DAYS: i64 = 7;

/// Reason recorded when a flag request carries no reason text.
const DEFAULT_FLAG_REASON: &str = "Manually flagged by administrator";

// ── Errors ────────────────────────────────────────────────────

/// Rejections returned by [`TransitionEngine::apply`]. All are structured
/// results, never panics, so batch callers can collect them per record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Required input missing or unusable.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Flag requested for a record already in the flagged lifecycle.
    #[error("search '{0}' is already flagged")]
    AlreadyFlagged(String),

    /// The record's status does not allow this action. Non-fatal: batch
    /// callers skip the record and continue.
    #[error("cannot {action} while status is '{status}'")]
    IneligibleState {
        action: &'static str,
        status: SearchStatus,
    },

    /// A negative extension would move the deadline to or before now.
    /// Retry with `acknowledge_expiry` after the caller confirms, or offer
    /// disabling the search instead.
    #[error("reducing the deadline by {} days would expire '{}' immediately", .delta_days.abs(), .search_name)]
    WouldExpire {
        search_name: String,
        delta_days: i64,
    },
}

impl TransitionError {
    /// True for rejections the caller may retry after an explicit
    /// confirmation, as opposed to hard refusals.
    pub fn requires_confirmation(&self) -> bool {
        matches!(self, TransitionError::WouldExpire { .. })
    }
}

// ── Context and patch ─────────────────────────────────────────

/// Caller-supplied context for one action.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// Injected clock; the engine never reads system time.
    pub now: DateTime<Utc>,
    /// User recorded in note trails.
    pub performed_by: String,
}

impl ActionContext {
    pub fn new(now: DateTime<Utc>, performed_by: impl Into<String>) -> Self {
        Self {
            now,
            performed_by: performed_by.into(),
        }
    }
}

/// Field updates to merge into external storage. `None` means unchanged;
/// the engine never writes anywhere itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SearchStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flagged_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation_deadline: Option<i64>,
    /// Appended to the record's note trail with a ` | ` separator.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append_note: Option<String>,
}

impl RecordPatch {
    /// Merge into a copy of `record`. The input is untouched.
    pub fn apply_to(&self, record: &GovernanceRecord) -> GovernanceRecord {
        let mut next = record.clone();
        if let Some(status) = self.status {
            next.status = status;
        }
        if let Some(reason) = &self.reason {
            next.reason = Some(reason.clone());
        }
        if let Some(t) = self.flagged_time {
            next.flagged_time = t;
        }
        if let Some(t) = self.notification_time {
            next.notification_time = t;
        }
        if let Some(t) = self.remediation_deadline {
            next.remediation_deadline = t;
        }
        if let Some(note) = &self.append_note {
            next.append_note(note);
        }
        next
    }
}

/// Outcome of a successful apply: where the record came from, where it
/// goes, and the patch that takes it there.
#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub search_name: String,
    pub previous_status: SearchStatus,
    pub new_status: SearchStatus,
    pub patch: RecordPatch,
}

// ── Engine ────────────────────────────────────────────────────

/// Validates governance actions against a record's current status and
/// computes the patch that carries it to the next one.
///
/// The engine works on snapshots: it never mutates its input and performs
/// no I/O. It assumes single-writer-at-a-time semantics per record set;
/// optimistic-concurrency handling against the store belongs to the caller.
#[derive(Debug, Clone, Default)]
pub struct TransitionEngine {
    config: GovernanceConfig,
}

impl TransitionEngine {
    pub fn new(config: GovernanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Apply one action to one record snapshot.
    pub fn apply(
        &self,
        record: &GovernanceRecord,
        action: &Action,
        ctx: &ActionContext,
    ) -> Result<Transition, TransitionError> {
        let result = match action {
            Action::Flag { reason } => self.flag(record, reason, ctx),
            Action::Notify => self.notify(record, ctx),
            Action::Extend {
                delta_days,
                acknowledge_expiry,
            } => self.extend(record, *delta_days, *acknowledge_expiry, ctx),
            Action::SubmitReview => self.submit_review(record, ctx),
            Action::ApproveReview => self.approve_review(record, ctx),
            Action::RejectReview { reason } => self.reject_review(record, reason, ctx),
            Action::Disable => self.disable(record),
            Action::Enable => self.enable(record),
            Action::Resolve => self.resolve(record),
            Action::MarkOk { justification } => self.mark_ok(record, justification),
        };

        match &result {
            Ok(t) => debug!(
                search = %t.search_name,
                action = action.name(),
                from = %t.previous_status,
                to = %t.new_status,
                "transition applied"
            ),
            Err(e) => warn!(
                search = %record.search_name,
                action = action.name(),
                status = %record.status,
                error = %e,
                "transition rejected"
            ),
        }

        result
    }

    fn flag(
        &self,
        record: &GovernanceRecord,
        reason: &str,
        ctx: &ActionContext,
    ) -> Result<Transition, TransitionError> {
        if record.status.in_flagged_lifecycle() {
            return Err(TransitionError::AlreadyFlagged(record.search_name.clone()));
        }
        let reason = if reason.trim().is_empty() {
            DEFAULT_FLAG_REASON
        } else {
            reason
        };
        // The timer stays at zero until the owner is notified.
        Ok(transition(
            record,
            SearchStatus::Flagged,
            RecordPatch {
                status: Some(SearchStatus::Flagged),
                reason: Some(reason.to_string()),
                flagged_time: Some(ctx.now.timestamp()),
                remediation_deadline: Some(0),
                ..RecordPatch::default()
            },
        ))
    }

    fn notify(
        &self,
        record: &GovernanceRecord,
        ctx: &ActionContext,
    ) -> Result<Transition, TransitionError> {
        if record.status != SearchStatus::Flagged {
            return Err(ineligible("notify", record));
        }
        let now = ctx.now.timestamp();
        let mut patch = RecordPatch {
            status: Some(SearchStatus::Notified),
            remediation_deadline: Some(now + self.config.remediation_days * DAY_SECS),
            ..RecordPatch::default()
        };
        // First notification only; later cycles keep the original timestamp.
        if record.notification_time == 0 {
            patch.notification_time = Some(now);
        }
        Ok(transition(record, SearchStatus::Notified, patch))
    }

    fn extend(
        &self,
        record: &GovernanceRecord,
        delta_days: i64,
        acknowledge_expiry: bool,
        ctx: &ActionContext,
    ) -> Result<Transition, TransitionError> {
        if !record.status.in_flagged_lifecycle() {
            return Err(ineligible("extend", record));
        }
        if delta_days == 0 {
            return Err(TransitionError::Validation(
                "extension must be a non-zero number of days".to_string(),
            ));
        }
        let new_deadline = record.remediation_deadline + delta_days * DAY_SECS;
        if delta_days < 0 && new_deadline <= ctx.now.timestamp() && !acknowledge_expiry {
            return Err(TransitionError::WouldExpire {
                search_name: record.search_name.clone(),
                delta_days,
            });
        }
        if new_deadline <= ctx.now.timestamp() {
            warn!(
                search = %record.search_name,
                deadline = new_deadline,
                "extension leaves the deadline in the past"
            );
        }
        Ok(transition(
            record,
            record.status,
            RecordPatch {
                remediation_deadline: Some(new_deadline),
                ..RecordPatch::default()
            },
        ))
    }

    fn submit_review(
        &self,
        record: &GovernanceRecord,
        ctx: &ActionContext,
    ) -> Result<Transition, TransitionError> {
        if !matches!(record.status, SearchStatus::Flagged | SearchStatus::Notified) {
            return Err(ineligible("submit review", record));
        }
        let note = format!(
            "SUBMITTED FOR REVIEW on {} by {}",
            ctx.now.format(NOTE_TIMESTAMP_FORMAT),
            ctx.performed_by
        );
        Ok(transition(
            record,
            SearchStatus::Review,
            RecordPatch {
                status: Some(SearchStatus::Review),
                append_note: Some(note),
                ..RecordPatch::default()
            },
        ))
    }

    fn approve_review(
        &self,
        record: &GovernanceRecord,
        ctx: &ActionContext,
    ) -> Result<Transition, TransitionError> {
        if record.status != SearchStatus::Review {
            return Err(ineligible("approve review", record));
        }
        let note = format!(
            "APPROVED on {} by {}",
            ctx.now.format(NOTE_TIMESTAMP_FORMAT),
            ctx.performed_by
        );
        Ok(transition(
            record,
            SearchStatus::Resolved,
            RecordPatch {
                status: Some(SearchStatus::Resolved),
                append_note: Some(note),
                ..RecordPatch::default()
            },
        ))
    }

    fn reject_review(
        &self,
        record: &GovernanceRecord,
        reason: &str,
        ctx: &ActionContext,
    ) -> Result<Transition, TransitionError> {
        if record.status != SearchStatus::Review {
            return Err(ineligible("reject review", record));
        }
        let note = format!(
            "REVIEW REJECTED on {} by {}: {} - Deadline extended {} days",
            ctx.now.format(NOTE_TIMESTAMP_FORMAT),
            ctx.performed_by,
            reason,
            REJECT_REVIEW_DAYS
        );
        // Rejection always grants the fixed window, whatever the deadline
        // was before the review started.
        Ok(transition(
            record,
            SearchStatus::Notified,
            RecordPatch {
                status: Some(SearchStatus::Notified),
                remediation_deadline: Some(ctx.now.timestamp() + REJECT_REVIEW_DAYS * DAY_SECS),
                append_note: Some(note),
                ..RecordPatch::default()
            },
        ))
    }

    fn disable(&self, record: &GovernanceRecord) -> Result<Transition, TransitionError> {
        // Idempotent and unconditional; disabling an already-disabled
        // record is a no-op success.
        Ok(transition(
            record,
            SearchStatus::Disabled,
            RecordPatch {
                status: Some(SearchStatus::Disabled),
                ..RecordPatch::default()
            },
        ))
    }

    fn enable(&self, record: &GovernanceRecord) -> Result<Transition, TransitionError> {
        if record.status != SearchStatus::Disabled {
            return Err(ineligible("enable", record));
        }
        // Re-enabling does not touch the deadline; the record re-enters the
        // lifecycle as notified with whatever window it had.
        Ok(transition(
            record,
            SearchStatus::Notified,
            RecordPatch {
                status: Some(SearchStatus::Notified),
                ..RecordPatch::default()
            },
        ))
    }

    fn resolve(&self, record: &GovernanceRecord) -> Result<Transition, TransitionError> {
        if !record.status.in_flagged_lifecycle() {
            return Err(ineligible("resolve", record));
        }
        Ok(transition(
            record,
            SearchStatus::Resolved,
            RecordPatch {
                status: Some(SearchStatus::Resolved),
                ..RecordPatch::default()
            },
        ))
    }

    fn mark_ok(
        &self,
        record: &GovernanceRecord,
        justification: &str,
    ) -> Result<Transition, TransitionError> {
        if record.status != SearchStatus::Suspicious {
            return Err(ineligible("mark ok", record));
        }
        if justification.trim().is_empty() {
            return Err(TransitionError::Validation(
                "marking a search OK requires a justification note".to_string(),
            ));
        }
        Ok(transition(
            record,
            SearchStatus::Ok,
            RecordPatch {
                status: Some(SearchStatus::Ok),
                append_note: Some(justification.trim().to_string()),
                ..RecordPatch::default()
            },
        ))
    }
}

fn transition(
    record: &GovernanceRecord,
    new_status: SearchStatus,
    patch: RecordPatch,
) -> Transition {
    Transition {
        search_name: record.search_name.clone(),
        previous_status: record.status,
        new_status,
        patch,
    }
}

fn ineligible(action: &'static str, record: &GovernanceRecord) -> TransitionError {
    TransitionError::IneligibleState {
        action,
        status: record.status,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn ctx() -> ActionContext {
        ActionContext::new(fixed_now(), "admin")
    }

    fn record_with_status(status: SearchStatus) -> GovernanceRecord {
        let mut record = GovernanceRecord::candidate("Heavy Search", "jsmith", "search");
        record.status = status;
        record
    }

    fn engine() -> TransitionEngine {
        TransitionEngine::new(GovernanceConfig::default())
    }

    #[test]
    fn flag_sets_reason_and_timestamp_but_no_deadline() {
        let record = record_with_status(SearchStatus::Suspicious);
        let t = engine()
            .apply(&record, &Action::Flag { reason: "High runtime ratio".into() }, &ctx())
            .unwrap();

        assert_eq!(t.previous_status, SearchStatus::Suspicious);
        assert_eq!(t.new_status, SearchStatus::Flagged);
        assert_eq!(t.patch.reason.as_deref(), Some("High runtime ratio"));
        assert_eq!(t.patch.flagged_time, Some(fixed_now().timestamp()));
        assert_eq!(t.patch.remediation_deadline, Some(0));
        assert_eq!(t.patch.notification_time, None);
    }

    #[test]
    fn flag_without_reason_records_the_default() {
        let record = record_with_status(SearchStatus::Suspicious);
        let t = engine()
            .apply(&record, &Action::Flag { reason: "  ".into() }, &ctx())
            .unwrap();
        assert_eq!(t.patch.reason.as_deref(), Some("Manually flagged by administrator"));
    }

    #[test]
    fn flag_rejects_every_lifecycle_status() {
        for status in [
            SearchStatus::Flagged,
            SearchStatus::Notified,
            SearchStatus::Review,
            SearchStatus::Disabled,
        ] {
            let record = record_with_status(status);
            let err = engine()
                .apply(&record, &Action::Flag { reason: "again".into() }, &ctx())
                .unwrap_err();
            assert_eq!(
                err,
                TransitionError::AlreadyFlagged("Heavy Search".to_string()),
                "status {status} should reject a second flag"
            );
        }
    }

    #[test]
    fn resolved_records_can_be_flagged_again() {
        let record = record_with_status(SearchStatus::Resolved);
        let t = engine()
            .apply(&record, &Action::Flag { reason: "regressed".into() }, &ctx())
            .unwrap();
        assert_eq!(t.new_status, SearchStatus::Flagged);
    }

    #[test]
    fn notify_starts_the_remediation_timer() {
        let record = record_with_status(SearchStatus::Flagged);
        let t = engine().apply(&record, &Action::Notify, &ctx()).unwrap();

        let now = fixed_now().timestamp();
        assert_eq!(t.new_status, SearchStatus::Notified);
        assert_eq!(t.patch.notification_time, Some(now));
        assert_eq!(t.patch.remediation_deadline, Some(now + 7 * DAY_SECS));
    }

    #[test]
    fn notify_keeps_an_existing_notification_timestamp() {
        let mut record = record_with_status(SearchStatus::Flagged);
        record.notification_time = 1_700_000_000;
        let t = engine().apply(&record, &Action::Notify, &ctx()).unwrap();
        assert_eq!(t.patch.notification_time, None);
        let next = t.patch.apply_to(&record);
        assert_eq!(next.notification_time, 1_700_000_000);
    }

    #[test]
    fn notify_respects_the_configured_window() {
        let config = GovernanceConfig {
            remediation_days: 14,
            ..GovernanceConfig::default()
        };
        let record = record_with_status(SearchStatus::Flagged);
        let t = TransitionEngine::new(config)
            .apply(&record, &Action::Notify, &ctx())
            .unwrap();
        assert_eq!(
            t.patch.remediation_deadline,
            Some(fixed_now().timestamp() + 14 * DAY_SECS)
        );
    }

    #[test]
    fn notify_requires_a_flagged_record() {
        for status in [SearchStatus::Notified, SearchStatus::Review, SearchStatus::Suspicious] {
            let record = record_with_status(status);
            let err = engine().apply(&record, &Action::Notify, &ctx()).unwrap_err();
            assert!(matches!(err, TransitionError::IneligibleState { .. }));
        }
    }

    #[test]
    fn extend_shifts_the_deadline_by_days() {
        let mut record = record_with_status(SearchStatus::Notified);
        record.remediation_deadline = fixed_now().timestamp() + 2 * DAY_SECS;
        let t = engine()
            .apply(
                &record,
                &Action::Extend { delta_days: 3, acknowledge_expiry: false },
                &ctx(),
            )
            .unwrap();
        assert_eq!(
            t.patch.remediation_deadline,
            Some(fixed_now().timestamp() + 5 * DAY_SECS)
        );
        // Extending never changes the status.
        assert_eq!(t.new_status, SearchStatus::Notified);
        assert_eq!(t.patch.status, None);
    }

    #[test]
    fn extend_rejects_zero_days() {
        let record = record_with_status(SearchStatus::Notified);
        let err = engine()
            .apply(
                &record,
                &Action::Extend { delta_days: 0, acknowledge_expiry: false },
                &ctx(),
            )
            .unwrap_err();
        assert!(matches!(err, TransitionError::Validation(_)));
    }

    #[test]
    fn reduction_crossing_now_needs_confirmation() {
        let mut record = record_with_status(SearchStatus::Notified);
        record.remediation_deadline = fixed_now().timestamp() + DAY_SECS;

        let unconfirmed = engine()
            .apply(
                &record,
                &Action::Extend { delta_days: -5, acknowledge_expiry: false },
                &ctx(),
            )
            .unwrap_err();
        assert_eq!(
            unconfirmed,
            TransitionError::WouldExpire {
                search_name: "Heavy Search".to_string(),
                delta_days: -5,
            }
        );
        assert!(unconfirmed.requires_confirmation());

        let confirmed = engine()
            .apply(
                &record,
                &Action::Extend { delta_days: -5, acknowledge_expiry: true },
                &ctx(),
            )
            .unwrap();
        assert_eq!(
            confirmed.patch.remediation_deadline,
            Some(fixed_now().timestamp() - 4 * DAY_SECS)
        );
    }

    #[test]
    fn reduction_that_keeps_a_future_deadline_needs_no_confirmation() {
        let mut record = record_with_status(SearchStatus::Notified);
        record.remediation_deadline = fixed_now().timestamp() + 10 * DAY_SECS;
        let t = engine()
            .apply(
                &record,
                &Action::Extend { delta_days: -5, acknowledge_expiry: false },
                &ctx(),
            )
            .unwrap();
        assert_eq!(
            t.patch.remediation_deadline,
            Some(fixed_now().timestamp() + 5 * DAY_SECS)
        );
    }

    #[test]
    fn extend_applies_to_disabled_records_too() {
        let mut record = record_with_status(SearchStatus::Disabled);
        record.remediation_deadline = fixed_now().timestamp() + DAY_SECS;
        let t = engine()
            .apply(
                &record,
                &Action::Extend { delta_days: 7, acknowledge_expiry: false },
                &ctx(),
            )
            .unwrap();
        assert_eq!(
            t.patch.remediation_deadline,
            Some(fixed_now().timestamp() + 8 * DAY_SECS)
        );
    }

    #[test]
    fn extend_rejects_records_outside_the_lifecycle() {
        for status in [SearchStatus::Suspicious, SearchStatus::Resolved, SearchStatus::Ok] {
            let record = record_with_status(status);
            let err = engine()
                .apply(
                    &record,
                    &Action::Extend { delta_days: 3, acknowledge_expiry: false },
                    &ctx(),
                )
                .unwrap_err();
            assert!(matches!(err, TransitionError::IneligibleState { .. }));
        }
    }

    #[test]
    fn submit_review_appends_a_dated_note() {
        let record = record_with_status(SearchStatus::Notified);
        let t = engine().apply(&record, &Action::SubmitReview, &ctx()).unwrap();
        assert_eq!(t.new_status, SearchStatus::Review);
        assert_eq!(
            t.patch.append_note.as_deref(),
            Some("SUBMITTED FOR REVIEW on 2025-06-01 12:00 by admin")
        );
    }

    #[test]
    fn approve_review_resolves_the_record() {
        let record = record_with_status(SearchStatus::Review);
        let t = engine().apply(&record, &Action::ApproveReview, &ctx()).unwrap();
        assert_eq!(t.new_status, SearchStatus::Resolved);
        assert_eq!(
            t.patch.append_note.as_deref(),
            Some("APPROVED on 2025-06-01 12:00 by admin")
        );
    }

    #[test]
    fn reject_review_grants_a_fresh_fixed_window() {
        let mut record = record_with_status(SearchStatus::Review);
        record.remediation_deadline = fixed_now().timestamp() + 90 * DAY_SECS;
        let t = engine()
            .apply(&record, &Action::RejectReview { reason: "still slow".into() }, &ctx())
            .unwrap();

        assert_eq!(t.new_status, SearchStatus::Notified);
        assert_eq!(
            t.patch.remediation_deadline,
            Some(fixed_now().timestamp() + 7 * DAY_SECS)
        );
        assert_eq!(
            t.patch.append_note.as_deref(),
            Some("REVIEW REJECTED on 2025-06-01 12:00 by admin: still slow - Deadline extended 7 days")
        );
    }

    #[test]
    fn review_actions_require_review_status() {
        let record = record_with_status(SearchStatus::Notified);
        assert!(matches!(
            engine().apply(&record, &Action::ApproveReview, &ctx()),
            Err(TransitionError::IneligibleState { .. })
        ));
        assert!(matches!(
            engine().apply(&record, &Action::RejectReview { reason: "r".into() }, &ctx()),
            Err(TransitionError::IneligibleState { .. })
        ));
    }

    #[test]
    fn disable_is_idempotent() {
        let record = record_with_status(SearchStatus::Notified);
        let first = engine().apply(&record, &Action::Disable, &ctx()).unwrap();
        let disabled = first.patch.apply_to(&record);
        assert_eq!(disabled.status, SearchStatus::Disabled);

        let second = engine().apply(&disabled, &Action::Disable, &ctx()).unwrap();
        assert_eq!(second.previous_status, SearchStatus::Disabled);
        assert_eq!(second.new_status, SearchStatus::Disabled);
        assert_eq!(second.patch.apply_to(&disabled).status, SearchStatus::Disabled);
    }

    #[test]
    fn enable_returns_a_disabled_record_to_notified() {
        let mut record = record_with_status(SearchStatus::Disabled);
        record.remediation_deadline = 1_750_000_000;
        let t = engine().apply(&record, &Action::Enable, &ctx()).unwrap();
        assert_eq!(t.new_status, SearchStatus::Notified);
        // The window survives the disable round-trip.
        assert_eq!(t.patch.remediation_deadline, None);
    }

    #[test]
    fn enable_requires_a_disabled_record() {
        let record = record_with_status(SearchStatus::Notified);
        let err = engine().apply(&record, &Action::Enable, &ctx()).unwrap_err();
        assert!(matches!(err, TransitionError::IneligibleState { .. }));
    }

    #[test]
    fn resolve_closes_any_lifecycle_status() {
        for status in [
            SearchStatus::Flagged,
            SearchStatus::Notified,
            SearchStatus::Review,
            SearchStatus::Disabled,
        ] {
            let record = record_with_status(status);
            let t = engine().apply(&record, &Action::Resolve, &ctx()).unwrap();
            assert_eq!(t.new_status, SearchStatus::Resolved);
        }
    }

    #[test]
    fn mark_ok_requires_a_justification() {
        let record = record_with_status(SearchStatus::Suspicious);
        let err = engine()
            .apply(&record, &Action::MarkOk { justification: "   ".into() }, &ctx())
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::Validation(
                "marking a search OK requires a justification note".to_string()
            )
        );
        assert!(!err.requires_confirmation());
    }

    #[test]
    fn mark_ok_whitelists_a_suspicious_record() {
        let record = record_with_status(SearchStatus::Suspicious);
        let t = engine()
            .apply(
                &record,
                &Action::MarkOk { justification: "Capacity-planned ingest monitor".into() },
                &ctx(),
            )
            .unwrap();
        assert_eq!(t.new_status, SearchStatus::Ok);
        assert_eq!(
            t.patch.append_note.as_deref(),
            Some("Capacity-planned ingest monitor")
        );
    }

    #[test]
    fn mark_ok_rejects_lifecycle_records() {
        let record = record_with_status(SearchStatus::Flagged);
        let err = engine()
            .apply(&record, &Action::MarkOk { justification: "fine".into() }, &ctx())
            .unwrap_err();
        assert!(matches!(err, TransitionError::IneligibleState { .. }));
    }

    #[test]
    fn apply_never_mutates_the_input_record() {
        let mut record = record_with_status(SearchStatus::Flagged);
        record.notes = "original".to_string();
        let snapshot = record.clone();
        let _ = engine().apply(&record, &Action::Notify, &ctx()).unwrap();
        let _ = engine().apply(&record, &Action::SubmitReview, &ctx()).unwrap();
        assert_eq!(record, snapshot);
    }

    #[test]
    fn patch_serializes_only_changed_fields() {
        let record = record_with_status(SearchStatus::Flagged);
        let t = engine().apply(&record, &Action::SubmitReview, &ctx()).unwrap();
        let json = serde_json::to_value(&t.patch).unwrap();
        assert_eq!(json["status"], "review");
        assert!(json.get("remediation_deadline").is_none());
        assert!(json.get("flagged_time").is_none());
    }
}
