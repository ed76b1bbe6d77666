//! Duration expressions, timestamps and human readable time strings

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::number::is_numeric;

/// Latest accepted point in time, 9999-12-31T23:59:59.999Z in epoch milliseconds.
pub const MAX_TIMESTAMP_MILLIS: i64 = 253_402_300_799_999;

const SECOND: u64 = 1;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

/// Units from largest to smallest, used when rendering durations.
const UNITS: [(u64, &str); 7] = [
    (YEAR, "year"),
    (MONTH, "month"),
    (WEEK, "week"),
    (DAY, "day"),
    (HOUR, "hour"),
    (MINUTE, "minute"),
    (SECOND, "second"),
];

/// Formats accepted for textual timestamps, besides RFC 3339.
const TIMESTAMP_PATTERNS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

fn unit_seconds(unit: &str) -> Option<u64> {
    match unit.to_ascii_lowercase().as_str() {
        "y" => Some(YEAR),
        "mo" => Some(MONTH),
        "w" => Some(WEEK),
        "d" => Some(DAY),
        "h" => Some(HOUR),
        "m" => Some(MINUTE),
        "s" => Some(SECOND),
        _ => None,
    }
}

/// Parse a duration expression such as `2y1w10d40m6s`.
///
/// The expression is one or more digit runs, each followed by a unit:
/// `y` (365 days), `mo` (30 days), `w`, `d`, `h`, `m` or `s`. Units may
/// repeat and appear in any order. A bare number is not a duration.
pub fn parse_duration(expr: &str) -> Option<Duration> {
    if expr.is_empty() {
        return None;
    }

    let bytes = expr.as_bytes();
    let mut total: u64 = 0;
    let mut i = 0;

    while i < bytes.len() {
        let digits_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if digits_start == i {
            return None;
        }
        let amount: u64 = expr[digits_start..i].parse().ok()?;

        let unit_start = i;
        while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
            i += 1;
        }
        let seconds = unit_seconds(&expr[unit_start..i])?;

        total = total.checked_add(amount.checked_mul(seconds)?)?;
    }

    Some(Duration::from_secs(total))
}

/// Render a duration as `"2 days, 3 hours"`.
///
/// Sub-second precision is dropped. An empty duration renders as `"0 seconds"`.
pub fn duration_string(duration: Duration) -> String {
    let mut remaining = duration.as_secs();
    if remaining == 0 {
        return "0 seconds".to_owned();
    }

    let mut parts = Vec::new();
    for (size, name) in UNITS {
        let count = remaining / size;
        if count > 0 {
            remaining %= size;
            let suffix = if count == 1 { "" } else { "s" };
            parts.push(format!("{count} {name}{suffix}"));
        }
    }

    parts.join(", ")
}

/// Describe `then` relative to `now`, e.g. `"5 minutes ago"` or `"1 day from now"`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = then.signed_duration_since(now);
    if delta > chrono::Duration::zero() {
        let magnitude = delta.to_std().unwrap_or_default();
        format!("{} from now", duration_string(magnitude))
    } else {
        let magnitude = (-delta).to_std().unwrap_or_default();
        format!("{} ago", duration_string(magnitude))
    }
}

/// Parse a stored timestamp.
///
/// Accepts epoch milliseconds, RFC 3339, and `YYYY-MM-DD HH:MM:SS` with an
/// optional fractional part (interpreted as UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if is_numeric(value) {
        let millis: i64 = value.parse().ok()?;
        return Utc.timestamp_millis_opt(millis).single();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    TIMESTAMP_PATTERNS.iter().find_map(|pattern| {
        NaiveDateTime::parse_from_str(value, pattern)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

/// Resolve a user supplied time string to an absolute point in time.
///
/// A duration expression is added to `now`; a plain number is taken as epoch
/// milliseconds. Anything past [`MAX_TIMESTAMP_MILLIS`] is rejected.
pub fn parse_time_string(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let resolved = if let Some(duration) = parse_duration(value) {
        let delta = chrono::Duration::from_std(duration).ok()?;
        now.checked_add_signed(delta)?
    } else if is_numeric(value) {
        let millis: i64 = value.parse().ok()?;
        Utc.timestamp_millis_opt(millis).single()?
    } else {
        return None;
    };

    if resolved.timestamp_millis() > MAX_TIMESTAMP_MILLIS {
        tracing::trace!("Rejected time string '{}': beyond far-future bound", value);
        return None;
    }

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_compound() {
        let parsed = parse_duration("2y1w10d40m6s").unwrap();
        let expected = 2 * YEAR + WEEK + 10 * DAY + 40 * MINUTE + 6;
        assert_eq!(parsed, Duration::from_secs(expected));
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("1mo"), Some(Duration::from_secs(MONTH)));
        assert_eq!(parse_duration("1H"), Some(Duration::from_secs(HOUR)));
        assert_eq!(parse_duration("30s30s"), Some(Duration::from_secs(60)));
        assert_eq!(parse_duration("0s"), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_duration_rejects() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration("5x"), None);
        assert_eq!(parse_duration("d5"), None);
        assert_eq!(parse_duration("1d 2h"), None);
        assert_eq!(parse_duration("99999999999999999999y"), None);
    }

    #[test]
    fn test_duration_string() {
        assert_eq!(duration_string(Duration::ZERO), "0 seconds");
        assert_eq!(duration_string(Duration::from_millis(999)), "0 seconds");
        assert_eq!(duration_string(Duration::from_secs(61)), "1 minute, 1 second");
        assert_eq!(
            duration_string(Duration::from_secs(2 * DAY + 3 * HOUR)),
            "2 days, 3 hours"
        );
        assert_eq!(duration_string(Duration::from_secs(YEAR + WEEK)), "1 year, 1 week");
    }

    #[test]
    fn test_relative_time() {
        let now = Utc.timestamp_millis_opt(1_600_000_000_000).single().unwrap();
        let past = now - chrono::Duration::minutes(5);
        let future = now + chrono::Duration::days(1);

        assert_eq!(relative_time(past, now), "5 minutes ago");
        assert_eq!(relative_time(future, now), "1 day from now");
        assert_eq!(relative_time(now, now), "0 seconds ago");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).single().unwrap();

        assert_eq!(parse_timestamp("2020-01-02 03:04:05"), Some(expected));
        assert_eq!(parse_timestamp("2020-01-02 03:04:05.0"), Some(expected));
        assert_eq!(parse_timestamp("2020-01-02T03:04:05Z"), Some(expected));
        assert_eq!(
            parse_timestamp(&expected.timestamp_millis().to_string()),
            Some(expected)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_time_string() {
        let now = Utc.timestamp_millis_opt(1_600_000_000_000).single().unwrap();

        assert_eq!(
            parse_time_string("1d", now),
            Some(now + chrono::Duration::days(1))
        );
        assert_eq!(
            parse_time_string("1500000000000", now).map(|t| t.timestamp_millis()),
            Some(1_500_000_000_000)
        );
        assert_eq!(parse_time_string("tomorrow", now), None);
        assert_eq!(parse_time_string("-5", now), None);
    }

    #[test]
    fn test_parse_time_string_far_future_bound() {
        let now = Utc.timestamp_millis_opt(1_600_000_000_000).single().unwrap();

        assert!(parse_time_string(&MAX_TIMESTAMP_MILLIS.to_string(), now).is_some());
        assert!(parse_time_string(&(MAX_TIMESTAMP_MILLIS + 1).to_string(), now).is_none());
        assert!(parse_time_string("9999y", now).is_none());
    }
}
