//! Human-readable date and time labels.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// `Today`, `Tomorrow`, `Jan 5`, or `Jan 5, 2025` when the year differs
/// from `today`'s.
pub fn format_due_label(due: NaiveDate, today: NaiveDate) -> String {
    if due == today {
        return "Today".to_string();
    }
    if today.succ_opt() == Some(due) {
        return "Tomorrow".to_string();
    }
    if due.year() == today.year() {
        due.format("%b %-d").to_string()
    } else {
        due.format("%b %-d, %Y").to_string()
    }
}

/// Coarse "time ago" label for feed entries.
pub fn format_relative_time(at: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now - at;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes} {} ago", unit(minutes, "minute"))
    } else if hours < 24 {
        format!("{hours} {} ago", unit(hours, "hour"))
    } else if days < 7 {
        format!("{days} {} ago", unit(days, "day"))
    } else {
        at.format("%b %-d").to_string()
    }
}

fn unit(count: i64, singular: &str) -> String {
    if count > 1 {
        format!("{singular}s")
    } else {
        singular.to_string()
    }
}
