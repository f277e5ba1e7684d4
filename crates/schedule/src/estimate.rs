use tracing::debug;

use crate::expr::CronFields;

/// Leading decimal digits of a field part, so `59/5` reads as 59. Stepped
/// ranges like `0-59/5` have always been counted as the bare range in the
/// impact panel and the stored estimates reflect that.
fn leading_u32(part: &str) -> Option<u32> {
    let end = part.bytes().take_while(|b| b.is_ascii_digit()).count();
    part[..end].parse().ok()
}

/// Count how many slots a single cron field selects out of `max` (60 for
/// minute, 24 for hour, 31/12/7 for the date fields). Unparseable fields
/// count as one slot.
fn field_runs(field: &str, max: u32) -> u32 {
    if field == "*" {
        return max;
    }
    if let Some(step) = field.strip_prefix("*/") {
        return match step.parse::<u32>() {
            Ok(s) if s > 0 => max.div_ceil(s),
            _ => 1,
        };
    }
    if field.contains(',') {
        return field.split(',').count() as u32;
    }
    if let Some((start, end)) = field.split_once('-') {
        if let (Some(start), Some(end)) = (leading_u32(start), leading_u32(end)) {
            if end >= start {
                return end - start + 1;
            }
        }
        return 1;
    }
    1
}

/// Estimate approximate executions per day for a 5-field cron expression.
///
/// This is a display approximation, not cron simulation: day-of-month and
/// month restrictions do not reduce the figure, and only a restricted
/// day-of-week scales it (by `dayOfWeekRuns / 7`, with the full ranges
/// `0-6` and `1-7` counting as unrestricted). Malformed expressions
/// estimate to zero.
pub fn runs_per_day(cron: &str) -> f64 {
    let Some(fields) = CronFields::parse(cron) else {
        debug!(cron = %cron, "cannot estimate runs for non-5-field expression");
        return 0.0;
    };
    runs_per_day_fields(&fields)
}

pub fn runs_per_day_fields(fields: &CronFields) -> f64 {
    let minute_runs = field_runs(&fields.minute, 60) as f64;
    let hour_runs = field_runs(&fields.hour, 24) as f64;

    let mut per_day = minute_runs * hour_runs;

    if fields.day_of_month != "*" || fields.day_of_week != "*" {
        let day_of_week = fields.day_of_week.as_str();
        if day_of_week != "*" && day_of_week != "0-6" && day_of_week != "1-7" {
            let day_week_runs = field_runs(day_of_week, 7) as f64;
            per_day *= day_week_runs / 7.0;
        }
    }

    per_day
}

/// Format a runs-per-day figure for the impact panel: whole multiples round,
/// fractions keep one decimal, anything under 0.1 reads `<1x`.
pub fn format_multiplier(freq: f64) -> String {
    if freq >= 1.0 {
        format!("{}x", freq.round() as i64)
    } else if freq >= 0.1 {
        format!("{:.1}x", freq)
    } else {
        "<1x".to_string()
    }
}
