use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

const MINUTES_IN_HOUR: u64 = 60;
const MINUTES_IN_DAY: u64 = 1440;
const MINUTES_IN_MONTH: u64 = 43200;
const MINUTES_IN_TWO_MONTHS: u64 = 86400;

/// Renders a `YYYY-MM-DD` date as e.g. "Jan 1, 2024"; anything else is shown
/// as it came.
pub fn format_date(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.format(DISPLAY_DATE_FORMAT).to_string(),
        Err(_) => date.to_string(),
    }
}

/// Parses the timestamps the scheduler writes. Zoned timestamps are moved to
/// local time, since the scheduler records naive local times.
pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc3339(timestamp)
        .or_else(|_| DateTime::parse_from_rfc2822(timestamp))
        .ok()
        .map(|parsed| parsed.with_timezone(&Local).naive_local())
}

/// "5 minutes ago", "in about 2 hours" and so on, bucketed like date-fns'
/// `formatDistanceToNow`.
pub fn relative_time(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let seconds = (now - then).num_seconds();
    let distance = distance_in_words(seconds.unsigned_abs());

    if seconds >= 0 {
        format!("{} ago", distance)
    } else {
        format!("in {}", distance)
    }
}

fn distance_in_words(seconds: u64) -> String {
    let minutes = (seconds + 30) / 60;

    if minutes == 0 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        let hours = (minutes + MINUTES_IN_HOUR / 2) / MINUTES_IN_HOUR;
        format!("about {}", plural(hours, "hour"))
    } else if minutes < 2520 {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        let days = (minutes + MINUTES_IN_DAY / 2) / MINUTES_IN_DAY;
        plural(days, "day")
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        let months = (minutes + MINUTES_IN_MONTH / 2) / MINUTES_IN_MONTH;
        format!("about {}", plural(months, "month"))
    } else {
        let months = minutes / MINUTES_IN_MONTH;

        if months < 12 {
            return plural(months, "month");
        }

        let years = months / 12;
        match months % 12 {
            0..=2 => format!("about {}", plural(years, "year")),
            3..=8 => format!("over {}", plural(years, "year")),
            _ => format!("almost {}", plural(years + 1, "year")),
        }
    }
}

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", count, unit)
    }
}
