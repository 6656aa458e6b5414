//! Post date parsing and normalization

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Date-times carrying an explicit offset that RFC 3339 rejects
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M%z",
];

/// Date-times without an offset, read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Calendar dates, read as UTC midnight
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Parse a frontmatter date string into a UTC instant
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(dt) = parse_with_offset(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = expand_short_offset(s).and_then(|full| parse_with_offset(&full)) {
        return Some(dt);
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    parse_reduced(s)
}

fn parse_with_offset(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Rewrites an hour-only offset (`10:30:00.000-05`) to `-05:00`
fn expand_short_offset(s: &str) -> Option<String> {
    let split = s.len().checked_sub(3)?;
    let (head, offset) = (s.get(..split)?, s.get(split..)?);
    let hours = offset.strip_prefix(['+', '-'])?;

    if !hours.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // a time of day must precede the offset, or `2024-06-01` would match
    if !head.contains(':') {
        return None;
    }
    Some(format!("{head}{offset}:00"))
}

/// ISO 8601 reduced precision: `YYYY` or `YYYY-MM`, read as the first day
/// of the period at UTC midnight
fn parse_reduced(s: &str) -> Option<DateTime<Utc>> {
    let (year, month) = s.split_once('-').unwrap_or((s, "01"));
    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return None;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Canonical ISO 8601 form: UTC, millisecond precision, `Z` suffix
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse and normalize in one step
pub fn normalize_date(s: &str) -> Option<String> {
    parse_date(s).map(|dt| to_iso_string(&dt))
}
