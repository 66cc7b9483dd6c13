//! Date parameter parsing
//!
//! Accepts `YYYY-MM-DD`, RFC 3339 date-times (date part in local time),
//! naive `YYYY-MM-DDTHH:MM:SS`, and relative expressions like `now`,
//! `now-7d`, `now-2w`, `now-3m`.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

use super::error::{QueryError, QueryResult};
use crate::storage::{DateRange, EventStore, TimestampKind};

/// Parse a date parameter relative to today's local date
pub fn parse_date(s: &str) -> QueryResult<NaiveDate> {
    parse_date_at(s, Local::now().date_naive())
}

/// Parse a date parameter with an explicit "today"
pub fn parse_date_at(s: &str, today: NaiveDate) -> QueryResult<NaiveDate> {
    let s = s.trim();

    if s.starts_with("now") {
        return parse_relative(s, today);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Local).date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(QueryError::InvalidDate(s.to_string()))
}

fn parse_relative(s: &str, today: NaiveDate) -> QueryResult<NaiveDate> {
    if s == "now" {
        return Ok(today);
    }

    let caps = relative_pattern()
        .and_then(|re| re.captures(s))
        .ok_or_else(|| QueryError::InvalidRelativeDate(s.to_string()))?;

    let amount: i64 = caps[1]
        .parse()
        .map_err(|_| QueryError::InvalidRelativeDate(s.to_string()))?;

    let days = match &caps[2] {
        "d" => Some(amount),
        "w" => amount.checked_mul(7),
        "m" => amount.checked_mul(30),
        _ => None,
    };

    days.and_then(Duration::try_days)
        .and_then(|d| today.checked_sub_signed(d))
        .ok_or_else(|| QueryError::InvalidRelativeDate(s.to_string()))
}

fn relative_pattern() -> Option<&'static Regex> {
    static RELATIVE: OnceLock<Option<Regex>> = OnceLock::new();
    RELATIVE
        .get_or_init(|| Regex::new(r"^now-(\d+)([dwm])$").ok())
        .as_ref()
}

/// Resolve optional start/end parameters into a range.
///
/// A missing bound defaults to the store's earliest or latest date for
/// `kind`. With an empty store and a missing bound there is nothing to
/// default from.
pub fn resolve_range(
    store: &EventStore,
    start: Option<&str>,
    end: Option<&str>,
    kind: TimestampKind,
) -> QueryResult<Option<DateRange>> {
    let start = start.map(parse_date).transpose()?;
    let end = end.map(parse_date).transpose()?;

    let bounds = store.date_bounds(kind);
    let start = start.or(bounds.map(|b| b.start));
    let end = end.or(bounds.map(|b| b.end));

    Ok(match (start, end) {
        (Some(start), Some(end)) => Some(DateRange::new(start, end)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{day, event};

    #[test]
    fn test_parse_plain_date() {
        let today = day(2024, 6, 15);
        assert_eq!(parse_date_at("2024-01-02", today), Ok(day(2024, 1, 2)));
        assert_eq!(parse_date_at(" 2024-01-02 ", today), Ok(day(2024, 1, 2)));
    }

    #[test]
    fn test_parse_naive_datetime() {
        let today = day(2024, 6, 15);
        assert_eq!(
            parse_date_at("2024-01-02T13:45:00", today),
            Ok(day(2024, 1, 2))
        );
    }

    #[test]
    fn test_parse_relative() {
        let today = day(2024, 6, 15);
        assert_eq!(parse_date_at("now", today), Ok(today));
        assert_eq!(parse_date_at("now-7d", today), Ok(day(2024, 6, 8)));
        assert_eq!(parse_date_at("now-2w", today), Ok(day(2024, 6, 1)));
        assert_eq!(parse_date_at("now-1m", today), Ok(day(2024, 5, 16)));
    }

    #[test]
    fn test_parse_invalid() {
        let today = day(2024, 6, 15);
        assert!(matches!(
            parse_date_at("yesterday-ish", today),
            Err(QueryError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_date_at("now-7y", today),
            Err(QueryError::InvalidRelativeDate(_))
        ));
        assert!(parse_date_at("2024-13-01", today).is_err());
    }

    #[test]
    fn test_parse_relative_out_of_range() {
        let today = day(2024, 6, 15);
        assert!(matches!(
            parse_date_at("now-9223372036854775807m", today),
            Err(QueryError::InvalidRelativeDate(_))
        ));
        assert!(matches!(
            parse_date_at("now-99999999999d", today),
            Err(QueryError::InvalidRelativeDate(_))
        ));
    }

    #[test]
    fn test_relative_pattern_is_compiled_once() {
        let first = relative_pattern().unwrap();
        let second = relative_pattern().unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_resolve_defaults_to_store_bounds() {
        let store = EventStore::from_events(vec![
            event("a", (2024, 1, 1), (2024, 1, 4), (2024, 1, 1)),
            event("b", (2024, 1, 1), (2024, 1, 9), (2024, 1, 1)),
        ]);

        let range = resolve_range(&store, None, None, TimestampKind::Modified)
            .unwrap()
            .unwrap();
        assert_eq!(range, DateRange::new(day(2024, 1, 4), day(2024, 1, 9)));

        let range = resolve_range(&store, Some("2024-01-06"), None, TimestampKind::Modified)
            .unwrap()
            .unwrap();
        assert_eq!(range, DateRange::new(day(2024, 1, 6), day(2024, 1, 9)));
    }

    #[test]
    fn test_resolve_empty_store() {
        let store = EventStore::default();
        assert_eq!(
            resolve_range(&store, None, None, TimestampKind::Created),
            Ok(None)
        );
        assert!(resolve_range(&store, Some("2024-01-01"), Some("2024-01-02"), TimestampKind::Created)
            .unwrap()
            .is_some());
    }
}
