//! Chronological tag resolution.
//!
//! Consumes the raw tag listing produced by the repository provider
//! (`<date> <time> <offset> <tag-name>`, one tag per line) and computes
//! which versions to report relative to an optional last-seen tag.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{ResourceError, Result};
use crate::protocol::Version;
use crate::timestamp::parse_timestamp;
use crate::ui::LogSink;

/// A tag with its creation instant, local to one resolution run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Tag {
            name: name.into(),
            created_at,
        }
    }
}

impl From<&Tag> for Version {
    fn from(tag: &Tag) -> Self {
        Version::new(
            tag.name.clone(),
            tag.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

/// Parses a raw tag listing into tags sorted ascending by creation instant.
///
/// Each non-empty line is split into date, time, and offset tokens;
/// everything after the third space is the tag name, kept verbatim so names
/// containing spaces survive. The sort is stable: tags sharing an instant
/// keep their relative order from the listing.
///
/// A line whose timestamp does not parse fails the whole listing. The raw
/// line is reported to the log sink before the error is returned.
pub fn parse_listing(listing: &str, log: &dyn LogSink) -> Result<Vec<Tag>> {
    let mut tags = Vec::new();

    for line in listing.lines().filter(|line| !line.is_empty()) {
        let mut parts = line.splitn(4, ' ');

        let instant = match (parts.next(), parts.next(), parts.next()) {
            (Some(date), Some(time), Some(offset)) => parse_timestamp(date, time, offset),
            _ => Err(ResourceError::parse(line)),
        };

        match instant {
            Ok(created_at) => {
                // A three-token line yields an empty name; the provider
                // format is trusted to include one.
                let name = parts.next().unwrap_or("");
                tags.push(Tag::new(name, created_at));
            }
            Err(_) => {
                log.line(&format!("Failed to parse line: {}", line));
                return Err(ResourceError::parse(line));
            }
        }
    }

    tags.sort_by_key(|tag| tag.created_at);
    Ok(tags)
}

/// Resolves the versions to report from a raw tag listing.
///
/// With no last-seen tag, reports only the newest tag (first check ever
/// does not replay history). With a last-seen tag, reports every tag
/// strictly newer than it, oldest first; an empty result means no new
/// versions.
///
/// # Arguments
/// * `listing` - Raw newline-delimited tag listing, any order
/// * `last_seen` - Name of the most recent tag already processed
/// * `log` - Sink for operator-visible diagnostics
///
/// # Returns
/// * `Ok(versions)` - Version references in ascending creation order
/// * `Err(ResourceError::NoVersions)` - Empty listing and no last-seen tag
/// * `Err(ResourceError::TagNotFound)` - Last-seen tag absent from listing
/// * `Err(ResourceError::Parse)` - Malformed line in the listing
pub fn resolve(listing: &str, last_seen: Option<&str>, log: &dyn LogSink) -> Result<Vec<Version>> {
    let tags = parse_listing(listing, log)?;

    let name = match last_seen {
        None => {
            let newest = tags.last().ok_or(ResourceError::NoVersions)?;
            return Ok(vec![newest.into()]);
        }
        Some(name) => name,
    };

    let found = tags
        .iter()
        .position(|tag| tag.name == name)
        .ok_or_else(|| ResourceError::tag_not_found(name))?;

    log.line(&format!("Found tag {} at index {}", name, found));

    Ok(tags[found + 1..].iter().map(Version::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MemorySink;

    const LISTING: &str = "2023-03-01 00:00:00 +0000 v3\n\
                           2023-02-01 00:00:00 +0000 v2\n\
                           2023-01-01 00:00:00 +0000 v1\n";

    #[test]
    fn test_parse_listing_sorts_ascending() {
        let tags = parse_listing(LISTING, &MemorySink::new()).unwrap();
        let names: Vec<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(names, vec!["v1", "v2", "v3"]);
    }

    #[test]
    fn test_parse_listing_tolerates_ascending_input() {
        let ascending = "2023-01-01 00:00:00 +0000 v1\n2023-02-01 00:00:00 +0000 v2\n";
        let tags = parse_listing(ascending, &MemorySink::new()).unwrap();
        assert_eq!(tags[0].name, "v1");
        assert_eq!(tags[1].name, "v2");
    }

    #[test]
    fn test_parse_listing_stable_for_equal_instants() {
        let listing = "2023-01-01 00:00:00 +0000 first\n\
                       2023-01-01 00:00:00 +0000 second\n\
                       2023-01-01 00:00:00 +0000 third\n";
        let tags = parse_listing(listing, &MemorySink::new()).unwrap();
        let names: Vec<&str> = tags.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_parse_listing_keeps_spaces_in_names() {
        let listing = "2023-01-01 00:00:00 +0000 release candidate 1\n";
        let tags = parse_listing(listing, &MemorySink::new()).unwrap();
        assert_eq!(tags[0].name, "release candidate 1");
    }

    #[test]
    fn test_parse_listing_skips_blank_lines() {
        let listing = "\n2023-01-01 00:00:00 +0000 v1\n\n";
        let tags = parse_listing(listing, &MemorySink::new()).unwrap();
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_parse_listing_rejects_bad_timestamp_and_logs_line() {
        let sink = MemorySink::new();
        let listing = "2023-13-99 00:00:00 Z badtag\n";

        let err = parse_listing(listing, &sink).unwrap_err();
        assert!(matches!(err, ResourceError::Parse(_)));
        assert_eq!(
            sink.lines(),
            vec!["Failed to parse line: 2023-13-99 00:00:00 Z badtag"]
        );
    }

    #[test]
    fn test_parse_listing_rejects_short_line() {
        let sink = MemorySink::new();
        let err = parse_listing("2023-01-01\n", &sink).unwrap_err();
        assert!(matches!(err, ResourceError::Parse(_)));
        assert_eq!(sink.lines(), vec!["Failed to parse line: 2023-01-01"]);
    }

    #[test]
    fn test_resolve_without_last_seen_reports_newest() {
        let versions = resolve(LISTING, None, &MemorySink::new()).unwrap();
        assert_eq!(
            versions,
            vec![Version::new("v3", "2023-03-01T00:00:00.000Z")]
        );
    }

    #[test]
    fn test_resolve_reports_tags_after_last_seen() {
        let sink = MemorySink::new();
        let versions = resolve(LISTING, Some("v1"), &sink).unwrap();
        assert_eq!(
            versions,
            vec![
                Version::new("v2", "2023-02-01T00:00:00.000Z"),
                Version::new("v3", "2023-03-01T00:00:00.000Z"),
            ]
        );
        assert_eq!(sink.lines(), vec!["Found tag v1 at index 0"]);
    }

    #[test]
    fn test_resolve_with_newest_last_seen_is_empty() {
        let versions = resolve(LISTING, Some("v3"), &MemorySink::new()).unwrap();
        assert!(versions.is_empty());
    }

    #[test]
    fn test_resolve_with_unknown_last_seen_fails() {
        let err = resolve(LISTING, Some("v9"), &MemorySink::new()).unwrap_err();
        assert!(matches!(err, ResourceError::TagNotFound(_)));
        assert_eq!(err.to_string(), "Tag v9 not found");
    }

    #[test]
    fn test_resolve_empty_listing_without_last_seen_fails() {
        let err = resolve("", None, &MemorySink::new()).unwrap_err();
        assert!(matches!(err, ResourceError::NoVersions));
    }

    #[test]
    fn test_resolve_renders_utc_instants() {
        let listing = "2023-06-15 08:00:00 +0800 v1\n";
        let versions = resolve(listing, None, &MemorySink::new()).unwrap();
        assert_eq!(
            versions[0].timestamp.as_deref(),
            Some("2023-06-15T00:00:00.000Z")
        );
    }
}
