use std::fmt;

use tracing::warn;

use crate::expr::CronFields;

/// Display frequency bucket for a cron schedule. `Custom` is the fallback
/// for anything the rules below do not recognize; classification never
/// fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrequencyLabel {
    EveryNMin(u32),
    Hourly,
    EveryFewHours,
    Daily,
    Monthly,
    Custom,
}

impl fmt::Display for FrequencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyLabel::EveryNMin(n) => write!(f, "Every {} min", n),
            FrequencyLabel::Hourly => f.write_str("Hourly"),
            FrequencyLabel::EveryFewHours => f.write_str("Every Few Hours"),
            FrequencyLabel::Daily => f.write_str("Daily"),
            FrequencyLabel::Monthly => f.write_str("Monthly"),
            FrequencyLabel::Custom => f.write_str("Custom"),
        }
    }
}

/// Classify a 5-field cron expression into a display frequency label.
pub fn classify(cron: &str) -> FrequencyLabel {
    match CronFields::parse(cron) {
        Some(fields) => classify_fields(&fields),
        None => {
            warn!(cron = %cron, "not a 5-field cron expression, labeling Custom");
            FrequencyLabel::Custom
        }
    }
}

/// Rule order matters: minute-field forms are checked before the fixed
/// minute-zero patterns, and the first match wins.
pub fn classify_fields(fields: &CronFields) -> FrequencyLabel {
    let minute = fields.minute.as_str();
    let hour = fields.hour.as_str();
    let day_of_month = fields.day_of_month.as_str();
    let month = fields.month.as_str();
    let day_of_week = fields.day_of_week.as_str();

    // */N minutes.
    if let Some(step) = minute.strip_prefix("*/") {
        return match step.parse::<u32>() {
            Ok(n) if n > 0 => FrequencyLabel::EveryNMin(n),
            _ => FrequencyLabel::Custom,
        };
    }

    // Stepped range (e.g. 0-59/5): bucket by runs per hour.
    if minute.contains('/') {
        return match minute
            .rsplit_once('/')
            .and_then(|(_, step)| step.parse::<u32>().ok())
            .filter(|&step| step > 0)
        {
            Some(step) => bucket_runs_per_hour(60u32.div_ceil(step)),
            None => FrequencyLabel::Custom,
        };
    }

    // Minute list: bucket by entry count.
    if minute.contains(',') {
        return bucket_runs_per_hour(minute.split(',').count() as u32);
    }

    if minute == "0" {
        if hour == "*" && day_of_month == "*" && month == "*" && day_of_week == "*" {
            return FrequencyLabel::Hourly;
        }
        if let Some(step) = hour.strip_prefix("*/") {
            return match step.parse::<u32>() {
                Ok(n) if (1..=6).contains(&n) => FrequencyLabel::EveryFewHours,
                _ => FrequencyLabel::Custom,
            };
        }
        if is_number(hour) {
            // Single-day weekly schedules display as Daily: they still run
            // once per qualifying day.
            if day_of_month == "*" && month == "*" && (day_of_week == "*" || is_single_dow(day_of_week)) {
                return FrequencyLabel::Daily;
            }
            if is_number(day_of_month) && month == "*" && day_of_week == "*" {
                return FrequencyLabel::Monthly;
            }
        }
    }

    FrequencyLabel::Custom
}

/// Shared bucketing for stepped ranges and minute lists.
///
/// 12+ runs per hour has always displayed as Hourly in the dashboards, and
/// stored frequency labels depend on it.
/// TODO: confirm with the dashboard owners whether that bucket should read
/// "Every 5 min" before relabeling.
fn bucket_runs_per_hour(runs_per_hour: u32) -> FrequencyLabel {
    if runs_per_hour >= 12 {
        FrequencyLabel::Hourly
    } else if runs_per_hour >= 6 {
        FrequencyLabel::EveryNMin(10)
    } else if runs_per_hour >= 4 {
        FrequencyLabel::EveryNMin(15)
    } else if runs_per_hour >= 2 {
        FrequencyLabel::EveryNMin(30)
    } else {
        FrequencyLabel::Hourly
    }
}

fn is_number(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

fn is_single_dow(field: &str) -> bool {
    field.len() == 1 && matches!(field.as_bytes()[0], b'0'..=b'6')
}
