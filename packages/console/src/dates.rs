//! Timestamps as the sync server sends them.
//!
//! The server is inconsistent: RFC 3339 with an offset, a naive
//! `2024-03-01 14:22:05` from the database driver, or a bare date. Naive values
//! are taken as UTC. Anything unparseable sorts as the oldest possible entry
//! and is displayed verbatim.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub fn parse_sync_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Sort key: parsed instant, or the minimum for unparseable values.
pub fn sort_key(raw: &str) -> DateTime<Utc> {
    parse_sync_date(raw).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Local-time rendering for tables.
pub fn display_date(raw: &str) -> String {
    match parse_sync_date(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// `YYYY-MM-DD` only, for the user table's created column.
pub fn display_day(raw: &str) -> String {
    match parse_sync_date(raw) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accepted_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 14, 22, 5).unwrap();
        assert_eq!(parse_sync_date("2024-03-01T14:22:05Z"), Some(expected));
        assert_eq!(parse_sync_date("2024-03-01T16:22:05+02:00"), Some(expected));
        assert_eq!(parse_sync_date("2024-03-01 14:22:05"), Some(expected));
        assert_eq!(parse_sync_date("2024-03-01T14:22:05.000"), Some(expected));
        assert_eq!(
            parse_sync_date("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_garbage_sorts_first_and_displays_raw() {
        assert_eq!(parse_sync_date("yesterday"), None);
        assert!(sort_key("yesterday") < sort_key("1970-01-01"));
        assert_eq!(display_date("yesterday"), "yesterday");
    }
}
