use crate::error::{InsightsError, InsightsResult};
use crate::notes::NoteRow;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> InsightsResult<Self> {
        if start > end {
            return Err(InsightsError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The `days` days before `today` through `today`.
    pub fn trailing_days(today: NaiveDate, days: u64) -> Self {
        let start = today
            .checked_sub_days(chrono::Days::new(days))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.start, self.end)
    }
}

/// Offset forms RFC 3339 rejects: `+0000`, a space before the time, or a
/// space before the offset. `%#z` also takes `Z`.
const ZONED_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f %#z"
];

/// Parses a creation timestamp. Offsets are normalised to UTC before the
/// calendar date is taken.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc).naive_utc());
        }
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn created_at(row: &NoteRow) -> InsightsResult<NaiveDateTime> {
    let raw = row
        .created_at
        .as_deref()
        .ok_or_else(|| InsightsError::malformed(&row.id, "missing created_at"))?;
    parse_timestamp(raw)
        .ok_or_else(|| InsightsError::malformed(&row.id, format!("unparseable created_at '{raw}'")))
}

/// Keeps the rows created within `range`, inclusive on both ends. Rows whose
/// timestamp is missing or unparseable are dropped with a warning.
pub fn filter_by_date(rows: &[NoteRow], range: &DateRange) -> Vec<NoteRow> {
    rows.iter()
        .filter(|row| match created_at(row) {
            Ok(ts) => range.contains(ts.date()),
            Err(e) => {
                warn!(record_id = %row.id, error = %e, "Excluding note from date filter");
                false
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(id: &str, created_at: Option<&str>) -> NoteRow {
        NoteRow {
            id: id.to_string(),
            title: None,
            content: String::new(),
            created_at: created_at.map(str::to_string),
            parent_object: None,
            parent_record_id: None,
            creator: None
        }
    }

    fn ids(rows: &[NoteRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = DateRange::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, InsightsError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_single_day_range_is_valid() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let rows = vec![
            row("start", Some("2024-01-01T00:00:00Z")),
            row("end", Some("2024-01-31T23:59:59.999Z")),
            row("before", Some("2023-12-31T23:59:59Z")),
            row("after", Some("2024-02-01T00:00:00Z")),
        ];
        assert_eq!(ids(&filter_by_date(&rows, &range)), vec!["start", "end"]);
    }

    #[test]
    fn test_offsets_are_normalised_to_utc() {
        // 2024-02-01T01:00+02:00 is still January 31st in UTC.
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let rows = vec![row("late", Some("2024-02-01T01:00:00+02:00"))];
        assert_eq!(ids(&filter_by_date(&rows, &range)), vec!["late"]);
    }

    #[test]
    fn test_malformed_rows_are_excluded_not_fatal() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let rows = vec![
            row("garbage", Some("last tuesday")),
            row("missing", None),
            row("ok", Some("2024-01-05")),
        ];
        assert_eq!(ids(&filter_by_date(&rows, &range)), vec!["ok"]);
    }

    #[test]
    fn test_empty_input() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(filter_by_date(&[], &range).is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert_eq!(
            parse_timestamp("2024-01-05T10:00:00.000000000Z").unwrap().date(),
            date(2024, 1, 5)
        );
        assert_eq!(parse_timestamp("2024-01-05T10:00:00").unwrap().date(), date(2024, 1, 5));
        assert_eq!(parse_timestamp("2024-01-05").unwrap().date(), date(2024, 1, 5));
        assert!(parse_timestamp("05/01/2024").is_none());
    }

    #[test]
    fn test_parse_compact_and_space_separated_offsets() {
        let expected = date(2024, 1, 5).and_hms_opt(10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-05T10:00:00+0000"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-05 10:00:00Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-05 12:00:00.250+02:00"),
            Some(expected + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse_timestamp("2024-01-05 10:00:00 +0000"), Some(expected));
    }

    #[test]
    fn test_compact_offset_crosses_into_range() {
        // 2024-01-31T22:30-0200 is February 1st in UTC.
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let rows = vec![
            row("west", Some("2024-01-31T22:30:00-0200")),
            row("utc", Some("2024-01-31 23:00:00Z")),
        ];
        assert_eq!(ids(&filter_by_date(&rows, &range)), vec!["utc"]);
    }

    #[test]
    fn test_trailing_days() {
        let range = DateRange::trailing_days(date(2024, 3, 1), 30);
        assert_eq!(range.start(), date(2024, 1, 31));
        assert_eq!(range.end(), date(2024, 3, 1));
        assert_eq!(range.to_string(), "2024-01-31 and 2024-03-01");
    }
}
