use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parses an ISO-8601 instant.
///
/// Accepts RFC 3339 (with `Z` or a numeric offset) as well as naive
/// date-times and bare dates, which are taken to be UTC.
pub fn parse_iso8601(raw: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    let trimmed = raw.trim();
    let normalized = match trimmed.strip_suffix('Z').or_else(|| trimmed.strip_suffix('z')) {
        Some(prefix) => format!("{prefix}+00:00"),
        None => trimmed.to_string(),
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Ok(parsed);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// Hour of day in the timestamp's own offset.
pub fn hour_of_day(raw: &str) -> Result<u32, chrono::ParseError> {
    parse_iso8601(raw).map(|parsed| parsed.hour())
}

pub fn epoch_seconds(raw: &str) -> Result<i64, chrono::ParseError> {
    parse_iso8601(raw).map(|parsed| parsed.timestamp())
}
