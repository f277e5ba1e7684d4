use serde::Serialize;

use crate::estimate::{format_multiplier, runs_per_day};

/// Direction of a schedule frequency change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactDirection {
    Reduced,
    Increased,
    Unchanged,
}

/// Computed impact of changing a search from one cron expression to another,
/// shown in the confirmation dialog before a schedule edit is saved.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleImpact {
    pub before: String,
    pub after: String,
    pub runs_per_day_before: f64,
    pub runs_per_day_after: f64,
    pub delta_per_day: f64,
    /// `None` when either side estimates to zero runs.
    pub percent_change: Option<f64>,
    pub direction: ImpactDirection,
}

impl ScheduleImpact {
    pub fn compare(before: &str, after: &str) -> Self {
        let runs_before = runs_per_day(before);
        let runs_after = runs_per_day(after);
        let delta = runs_after - runs_before;

        let percent_change = if runs_before > 0.0 && runs_after > 0.0 {
            Some(delta / runs_before * 100.0)
        } else {
            None
        };

        let direction = if delta > 0.0 {
            ImpactDirection::Increased
        } else if delta < 0.0 {
            ImpactDirection::Reduced
        } else {
            ImpactDirection::Unchanged
        };

        Self {
            before: before.to_string(),
            after: after.to_string(),
            runs_per_day_before: runs_before,
            runs_per_day_after: runs_after,
            delta_per_day: delta,
            percent_change,
            direction,
        }
    }

    /// One-line summary for the confirmation dialog.
    pub fn summary(&self) -> String {
        let change = match self.percent_change {
            Some(p) if p > 0.0 => format!("+{:.0}%", p),
            Some(p) => format!("{:.0}%", p),
            None => "n/a".to_string(),
        };
        let description = match self.direction {
            ImpactDirection::Increased => "More frequent - higher resource usage",
            ImpactDirection::Reduced => "Less frequent - lower resource usage",
            ImpactDirection::Unchanged => "No change in frequency",
        };
        format!(
            "{}/day to {}/day ({}): {}",
            format_multiplier(self.runs_per_day_before),
            format_multiplier(self.runs_per_day_after),
            change,
            description
        )
    }
}
