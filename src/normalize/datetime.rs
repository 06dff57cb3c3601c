//! Day-first timestamp parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Canonical output format for timestamp cells
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Two-digit year forms go first: `%Y` would read "24" as year 24.
const DAY_FIRST_DATETIME: [&str; 23] = [
    "%d/%m/%y %H:%M:%S",
    "%d/%m/%y %H:%M",
    "%d-%m-%y %H:%M:%S",
    "%d-%m-%y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y, %H:%M:%S",
    "%d-%b-%Y %H:%M:%S",
    "%d/%m/%Y %I:%M:%S %p",
    "%d/%m/%Y %I:%M %p",
    "%d-%m-%Y %I:%M:%S %p",
    "%d-%m-%Y %I:%M %p",
    "%Y-%m-%d %I:%M:%S %p",
];

const DAY_FIRST_DATE: [&str; 8] = [
    "%d/%m/%y",
    "%d-%m-%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d-%b-%Y",
];

const MONTH_FIRST_DATETIME: [&str; 6] = [
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m-%d-%Y %H:%M:%S",
    "%m-%d-%Y %H:%M",
];

const MONTH_FIRST_DATE: [&str; 2] = ["%m/%d/%Y", "%m-%d-%Y"];

// `Z` suffixes are handled by the RFC 3339 parser.
const WITH_OFFSET: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Parse a date or date-time, reading ambiguous day/month pairs day-first
///
/// `03/04/2024` is 3 April. A value only valid month-first (`03/25/2024`)
/// is still accepted. Dates without a time are read as midnight. Values
/// carrying a UTC offset keep their wall-clock time.
pub fn parse_day_first(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    try_formats(value, &DAY_FIRST_DATETIME, &DAY_FIRST_DATE)
        .or_else(|| try_offset(value))
        .or_else(|| try_formats(value, &MONTH_FIRST_DATETIME, &MONTH_FIRST_DATE))
}

fn try_offset(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .or_else(|| {
            WITH_OFFSET
                .iter()
                .find_map(|fmt| DateTime::parse_from_str(value, fmt).ok())
        })
        .map(|dt| dt.naive_local())
}

fn try_formats(value: &str, datetimes: &[&str], dates: &[&str]) -> Option<NaiveDateTime> {
    datetimes
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            dates
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Reformat a timestamp as `YYYY-MM-DD HH:MM:SS`, or `None` if unparsable
pub fn canonicalize_timestamp(value: &str) -> Option<String> {
    parse_day_first(value).map(|dt| dt.format(CANONICAL_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(value: &str) -> Option<String> {
        canonicalize_timestamp(value)
    }

    #[test]
    fn test_day_first_precedence() {
        assert_eq!(canon("05/03/2024 10:00").as_deref(), Some("2024-03-05 10:00:00"));
        assert_eq!(canon("03/04/2024").as_deref(), Some("2024-04-03 00:00:00"));
        assert_eq!(canon("5/3/2024 9:07:30").as_deref(), Some("2024-03-05 09:07:30"));
        assert_eq!(canon("05/03/24").as_deref(), Some("2024-03-05 00:00:00"));
        assert_eq!(canon("05-03-24").as_deref(), Some("2024-03-05 00:00:00"));
        assert_eq!(canon("05.03.2024 10:00").as_deref(), Some("2024-03-05 10:00:00"));
    }

    #[test]
    fn test_iso_forms() {
        assert_eq!(canon("2024-03-05").as_deref(), Some("2024-03-05 00:00:00"));
        assert_eq!(
            canon("2024-03-05T10:15:00").as_deref(),
            Some("2024-03-05 10:15:00")
        );
        assert_eq!(
            canon("2024-03-05 10:15:00.250").as_deref(),
            Some("2024-03-05 10:15:00")
        );
    }

    #[test]
    fn test_utc_offsets() {
        assert_eq!(
            canon("2024-03-05T10:00:00Z").as_deref(),
            Some("2024-03-05 10:00:00")
        );
        assert_eq!(
            canon("2024-03-05T10:00:00.5+02:00").as_deref(),
            Some("2024-03-05 10:00:00")
        );
        assert_eq!(
            canon("2024-03-05 10:00:00-0300").as_deref(),
            Some("2024-03-05 10:00:00")
        );
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(
            canon("05/03/2024 10:00:00 AM").as_deref(),
            Some("2024-03-05 10:00:00")
        );
        assert_eq!(
            canon("05/03/2024 3:30 PM").as_deref(),
            Some("2024-03-05 15:30:00")
        );
        assert_eq!(
            canon("05-03-2024 12:05 am").as_deref(),
            Some("2024-03-05 00:05:00")
        );
    }

    #[test]
    fn test_month_first_fallback() {
        assert_eq!(canon("03/25/2024").as_deref(), Some("2024-03-25 00:00:00"));
        assert_eq!(
            canon("03/25/2024 04:00 PM").as_deref(),
            Some("2024-03-25 16:00:00")
        );
    }

    #[test]
    fn test_unparsable() {
        assert_eq!(canon("not-a-date"), None);
        assert_eq!(canon(""), None);
        assert_eq!(canon("31/02/2024"), None);
    }
}
