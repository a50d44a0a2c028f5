use std::borrow::Cow;

use chrono::{DateTime, Utc};

use crate::error::{ResourceError, Result};

/// Parses the space-separated parts of a git iso8601 timestamp.
///
/// Git prints tag creation dates as three tokens: a calendar date, a
/// time-of-day, and a UTC offset (`2023-01-01 00:00:00 +0000`). The tokens
/// are recombined into a single ISO-8601 instant and resolved to UTC.
///
/// # Arguments
/// * `date` - Calendar date (`YYYY-MM-DD`)
/// * `time` - Time of day (`HH:MM:SS`)
/// * `offset` - UTC offset (`Z`, `+0000`, or `+00:00`)
///
/// # Returns
/// * `Ok(DateTime<Utc>)` - The absolute instant
/// * `Err` - If the combined string is not a valid instant
pub fn parse_timestamp(date: &str, time: &str, offset: &str) -> Result<DateTime<Utc>> {
    let offset = normalize_offset(offset);
    let combined = format!("{}T{}{}", date, time, offset);

    DateTime::parse_from_rfc3339(&combined)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| ResourceError::parse(format!("invalid datetime format: {}", combined)))
}

/// Adjusts a git offset token to strict ISO-8601 syntax.
///
/// Git's iso8601 date format prints offsets without a colon (`+0800`);
/// strict ISO-8601 requires one (`+08:00`). Inserts a colon before the last
/// two characters unless the offset is `Z` or already carries a colon.
/// Tokens too short or non-ASCII are returned untouched and left for the
/// instant parse to reject.
fn normalize_offset(offset: &str) -> Cow<'_, str> {
    if offset == "Z" || offset.contains(':') || !offset.is_ascii() || offset.len() < 2 {
        return Cow::Borrowed(offset);
    }

    let minutes_at = offset.len() - 2;
    Cow::Owned(format!(
        "{}:{}",
        &offset[..minutes_at],
        &offset[minutes_at..]
    ))
}
