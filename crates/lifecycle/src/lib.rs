//! Scheduled-search governance lifecycle.
//!
//! This crate provides:
//! - [`TransitionEngine`]: validates governance actions against a record's
//!   status and computes the patch that moves it forward
//! - [`apply_batch`]: sequential driver with skip-and-continue rejection
//!   handling
//! - deadline accounting: urgency bands, the expiring view, overdue scans,
//!   and the auto-disable sweep
//! - [`AuditTrail`]: in-memory per-search audit entries with FIFO eviction
//! - [`advice_for_reason`]: remediation suggestions keyed off flag reasons
//!
//! Everything here is computation over snapshots. The engine returns
//! patches and never writes to storage or talks to the search platform.

pub mod action;
pub mod advice;
pub mod audit;
pub mod batch;
pub mod deadline;
pub mod engine;

pub use action::Action;
pub use advice::advice_for_reason;
pub use audit::{AuditEntry, AuditQuery, AuditTrail};
pub use batch::{apply_batch, BatchOutcome, RecordOutcome};
pub use deadline::{
    auto_disable_sweep, countdown_label, days_remaining, expiring_records, is_expiring,
    overdue_records, urgency, OverdueRecord, Urgency,
};
pub use engine::{ActionContext, RecordPatch, Transition, TransitionEngine, TransitionError};
