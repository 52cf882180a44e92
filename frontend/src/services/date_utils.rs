use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, Utc};

/// Weekday column headers, Sunday first to match the grid layout
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Human-readable name for a 1-indexed month number
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "Invalid Month",
    }
}

/// Format a date as an ISO `YYYY-MM-DD` date-key
pub fn to_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date-key. Anything else, including impossible
/// dates like `2023-02-29`, yields `None`.
pub fn parse_date_string(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Today's date on the local clock
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Get current date in YYYY-MM-DD format
pub fn get_current_date() -> String {
    to_date_key(today())
}

/// Current local time as zero-padded `HH:MM`
pub fn get_current_time_string() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Parse `HH:MM` or `HH:MM:SS`
pub fn parse_time(time_str: &str) -> Option<NaiveTime> {
    let trimmed = time_str.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .ok()
}

/// Trim a backend time (`09:00:00`) down to `HH:MM`
pub fn format_time(time_str: &str) -> String {
    let mut parts = time_str.split(':');
    match (parts.next(), parts.next()) {
        (Some(hours), Some(minutes)) => format!("{}:{}", hours, minutes),
        _ => time_str.to_string(),
    }
}

/// Format YYYY-MM-DD date string for display
pub fn format_date_for_display(date_str: &str) -> String {
    match parse_date_string(date_str) {
        Some(date) => format!("{} {}, {}", month_name(date.month()), date.day(), date.year()),
        None => date_str.to_string(),
    }
}

/// Short header used by the monthly summary, e.g. "March 5 (Tue)"
pub fn format_day_header(date: NaiveDate) -> String {
    let weekday = WEEKDAY_LABELS[date.weekday().num_days_from_sunday() as usize];
    format!("{} {} ({})", month_name(date.month()), date.day(), weekday)
}

/// Relative age of an RFC 3339 timestamp for the activity feed.
///
/// Anything older than a week falls back to the calendar date.
pub fn time_ago(timestamp: &str, now: DateTime<Utc>) -> String {
    let parsed = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(_) => return timestamp.to_string(),
    };

    let seconds = (now - parsed).num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3_600 {
        plural(seconds / 60, "minute")
    } else if seconds < 86_400 {
        plural(seconds / 3_600, "hour")
    } else if seconds < 604_800 {
        plural(seconds / 86_400, "day")
    } else {
        let date = parsed.date_naive();
        format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_string() {
        assert_eq!(parse_date_string("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date_string(" 2024-03-05 "), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_date_string("2023-02-29"), None);
        assert_eq!(parse_date_string("03/05/2024"), None);
        assert_eq!(parse_date_string(""), None);
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(to_date_key(date), "2025-01-07");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("09:30:00"), "09:30");
        assert_eq!(format_time("14:05"), "14:05");
        assert_eq!(format_time("noon"), "noon");
    }

    #[test]
    fn test_parse_time_accepts_seconds() {
        assert_eq!(parse_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_time("09:30:15"), NaiveTime::from_hms_opt(9, 30, 15));
        assert_eq!(parse_time("25:00"), None);
    }

    #[test]
    fn test_format_date_for_display() {
        assert_eq!(format_date_for_display("2025-06-13"), "June 13, 2025");
        assert_eq!(format_date_for_display("invalid-date"), "invalid-date");
    }

    #[test]
    fn test_format_day_header() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_day_header(date), "March 5 (Tue)");
    }

    #[test]
    fn test_time_ago_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

        assert_eq!(time_ago("2024-03-10T11:59:30Z", now), "just now");
        assert_eq!(time_ago("2024-03-10T11:59:00Z", now), "1 minute ago");
        assert_eq!(time_ago("2024-03-10T11:15:00Z", now), "45 minutes ago");
        assert_eq!(time_ago("2024-03-10T09:00:00Z", now), "3 hours ago");
        assert_eq!(time_ago("2024-03-08T12:00:00Z", now), "2 days ago");
        assert_eq!(time_ago("2024-02-01T12:00:00Z", now), "February 1, 2024");
        assert_eq!(time_ago("yesterday", now), "yesterday");
    }
}
