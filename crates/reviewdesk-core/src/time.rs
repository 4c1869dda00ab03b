use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Render an ISO 8601 timestamp relative to `now` ("3 days ago").
///
/// Empty input renders as an empty string. Input that is not RFC 3339 falls
/// back to its first ten characters, which for GitHub timestamps is the date.
pub fn format_relative(timestamp: &str, now: DateTime<Utc>) -> String {
    if timestamp.is_empty() {
        return String::new();
    }

    let parsed = match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => return timestamp.chars().take(10).collect(),
    };

    let total_seconds = (now - parsed).num_seconds();
    if total_seconds < 0 {
        return "just now".to_string();
    }

    let days = total_seconds / SECONDS_PER_DAY;
    let seconds = total_seconds % SECONDS_PER_DAY;

    if days > 365 {
        ago(days / 365, "year")
    } else if days > 30 {
        ago(days / 30, "month")
    } else if days > 0 {
        ago(days, "day")
    } else if seconds > 3600 {
        ago(seconds / 3600, "hour")
    } else if seconds > 60 {
        ago(seconds / 60, "minute")
    } else {
        "just now".to_string()
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn before(delta: Duration) -> String {
        (now() - delta).to_rfc3339()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(format_relative("", now()), "");
    }

    #[test]
    fn test_unparseable_input_falls_back_to_date() {
        assert_eq!(format_relative("2024-05-01 garbage", now()), "2024-05-01");
        assert_eq!(format_relative("soon", now()), "soon");
    }

    #[test]
    fn test_github_zulu_format() {
        assert_eq!(format_relative("2024-05-29T12:00:00Z", now()), "3 days ago");
    }

    #[test]
    fn test_just_now() {
        assert_eq!(format_relative(&before(Duration::seconds(30)), now()), "just now");
        assert_eq!(format_relative(&before(Duration::seconds(60)), now()), "just now");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(format_relative(&before(Duration::seconds(61)), now()), "1 minute ago");
        assert_eq!(format_relative(&before(Duration::minutes(45)), now()), "45 minutes ago");
        // Exactly one hour is still reported in minutes
        assert_eq!(format_relative(&before(Duration::hours(1)), now()), "60 minutes ago");
        assert_eq!(format_relative(&before(Duration::hours(5)), now()), "5 hours ago");
    }

    #[test]
    fn test_days_months_years() {
        assert_eq!(format_relative(&before(Duration::days(1)), now()), "1 day ago");
        assert_eq!(format_relative(&before(Duration::days(30)), now()), "30 days ago");
        assert_eq!(format_relative(&before(Duration::days(31)), now()), "1 month ago");
        assert_eq!(format_relative(&before(Duration::days(365)), now()), "12 months ago");
        assert_eq!(format_relative(&before(Duration::days(366)), now()), "1 year ago");
        assert_eq!(format_relative(&before(Duration::days(800)), now()), "2 years ago");
    }

    #[test]
    fn test_future_timestamp() {
        assert_eq!(format_relative(&before(Duration::hours(-3)), now()), "just now");
    }
}
