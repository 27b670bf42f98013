use chrono::{Datelike, Duration as ChronoDuration, NaiveDate};

/// League weeks start on Monday.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = i64::from(date.weekday().num_days_from_monday());
    date - ChronoDuration::days(back)
}

#[must_use]
pub fn current_week_start() -> NaiveDate {
    week_start(chrono::Utc::now().date_naive())
}

#[must_use]
pub fn format_time_ago(td: ChronoDuration) -> String {
    let secs = td.num_seconds();

    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    if secs >= DAY {
        let days = secs / DAY;
        if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{days} days ago")
        }
    } else if secs >= HOUR {
        let hours = secs / HOUR;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{hours} hours ago")
        }
    } else if secs >= MINUTE {
        let minutes = secs / MINUTE;
        if minutes == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{minutes} minutes ago")
        }
    } else if secs == 1 {
        "1 second ago".to_string()
    } else {
        format!("{secs} seconds ago")
    }
}
