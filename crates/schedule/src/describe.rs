use crate::expr::CronFields;

/// Short English sentence for recognized schedule shapes, falling back to
/// "Custom schedule". Field values are echoed verbatim, so callers should
/// validate first if the text reaches an operator.
pub fn describe_cron(
    minute: &str,
    hour: &str,
    day_of_month: &str,
    month: &str,
    day_of_week: &str,
) -> String {
    if minute == "*" && hour == "*" && day_of_month == "*" && month == "*" && day_of_week == "*" {
        return "Runs every minute".to_string();
    }
    if let Some(step) = minute.strip_prefix("*/") {
        return format!("Runs every {} minutes", step);
    }
    if minute == "0" && hour == "*" {
        return "Runs every hour at minute 0".to_string();
    }
    if minute == "0" {
        if let Some(step) = hour.strip_prefix("*/") {
            return format!("Runs every {} hours", step);
        }
    }
    if minute == "0" && hour == "0" && day_of_month == "*" && month == "*" && day_of_week == "*" {
        return "Runs daily at midnight".to_string();
    }
    if minute == "0" && hour == "0" && day_of_month == "*" && month == "*" && day_of_week == "0" {
        return "Runs weekly on Sunday at midnight".to_string();
    }
    if minute == "0" && hour == "0" && day_of_month == "1" && month == "*" && day_of_week == "*" {
        return "Runs monthly on the 1st at midnight".to_string();
    }
    if day_of_week == "1-5" {
        let minute_text = if minute == "0" { "00" } else { minute };
        return format!("Runs on weekdays at {}:{}", hour, minute_text);
    }
    "Custom schedule".to_string()
}

/// Convenience wrapper over [`describe_cron`] for an already-split
/// expression.
pub fn describe_fields(fields: &CronFields) -> String {
    describe_cron(
        &fields.minute,
        &fields.hour,
        &fields.day_of_month,
        &fields.month,
        &fields.day_of_week,
    )
}
