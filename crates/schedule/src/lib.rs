//! Cron schedule classification for scheduled-search governance.
//!
//! This crate provides:
//! - [`classify`]: display frequency labels for 5-field cron expressions
//! - [`runs_per_day`]: approximate executions-per-day estimation
//! - [`ScheduleImpact`]: before/after comparison for schedule edits
//! - [`describe_cron`]: short English sentences for recognized shapes
//! - [`normalize_cron`] / [`validate`]: bridging to the 6-field `cron` crate
//!
//! Classification and estimation are lenient by design: they always produce
//! a label or a number, never an error. [`validate`] is the strict gate for
//! operator-entered expressions.

pub mod describe;
pub mod estimate;
pub mod expr;
pub mod frequency;
pub mod impact;

pub use describe::{describe_cron, describe_fields};
pub use estimate::{format_multiplier, runs_per_day};
pub use expr::{normalize_cron, validate, CronFields, ScheduleError};
pub use frequency::{classify, classify_fields, FrequencyLabel};
pub use impact::{ImpactDirection, ScheduleImpact};
