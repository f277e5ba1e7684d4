use std::str::FromStr;

use cron::Schedule;
use thiserror::Error;
use tracing::warn;

/// Raised by [`validate`] for expressions that cannot be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("expected 5 cron fields, got {0}")]
    FieldCount(usize),
    #[error("invalid cron expression: {0}")]
    Invalid(String),
}

/// The five whitespace-separated fields of a standard cron expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronFields {
    pub minute: String,
    pub hour: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
}

impl CronFields {
    /// Split a cron string into its five fields. Any other field count
    /// returns `None`; classification treats those as `Custom`.
    pub fn parse(cron: &str) -> Option<Self> {
        let parts: Vec<&str> = cron.split_whitespace().collect();
        if parts.len() != 5 {
            return None;
        }
        Some(Self {
            minute: parts[0].to_string(),
            hour: parts[1].to_string(),
            day_of_month: parts[2].to_string(),
            month: parts[3].to_string(),
            day_of_week: parts[4].to_string(),
        })
    }
}

/// Normalize a 5-field cron expression to 6-field by prepending "0" for
/// seconds. The `cron` crate wants 6 fields; lookup rows store standard
/// 5-field cron. Other field counts pass through unchanged.
pub fn normalize_cron(cron_5field: &str) -> String {
    let trimmed = cron_5field.trim();
    if trimmed.split_whitespace().count() == 5 {
        format!("0 {}", trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Strict syntax check for operator-entered expressions. Classification and
/// estimation stay lenient; this is the gate for schedule edits.
pub fn validate(cron: &str) -> Result<(), ScheduleError> {
    let fields = cron.split_whitespace().count();
    if fields != 5 {
        return Err(ScheduleError::FieldCount(fields));
    }
    match Schedule::from_str(&normalize_cron(cron)) {
        Ok(_) => Ok(()),
        Err(e) => {
            warn!(cron = %cron, error = %e, "rejected cron expression");
            Err(ScheduleError::Invalid(e.to_string()))
        }
    }
}
