//! Directory listing entries.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Timestamp layout of the first three listing fields. The fourth field is
/// the zone abbreviation, which carries no information beyond the offset.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One remote directory as reported by the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Listed name with any trailing `/` or `@` removed. May be a path.
    pub name: String,
    pub created: DateTime<FixedOffset>,
    pub is_symlink: bool,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, created: DateTime<FixedOffset>) -> Self {
        Self {
            name: name.into(),
            created,
            is_symlink: false,
        }
    }

    /// Final path component of the entry name.
    pub fn base_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Time elapsed since the entry was created. Entries dated in the
    /// future have zero age.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.created)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Full remote path of the entry below `dir`. Names that are already
    /// absolute are returned unchanged.
    pub fn remote_path(&self, dir: &str) -> String {
        if self.name.starts_with('/') || dir.is_empty() {
            return self.name.clone();
        }
        format!("{}/{}", dir.trim_end_matches('/'), self.name)
    }
}

impl FromStr for DirectoryEntry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_line(s)
    }
}

/// Parse a single listing line.
///
/// The line holds five fields: date, time, numeric offset, zone abbreviation
/// and name. The first four are separated by whitespace; everything after
/// them is the name, which may itself contain spaces.
///
/// ```
/// use scenefetch_lftp::parse_line;
///
/// let entry = parse_line("2024-03-01 12:00:00 +0000 UTC foo@").unwrap();
/// assert_eq!(entry.name, "foo");
/// assert!(entry.is_symlink);
/// ```
pub fn parse_line(line: &str) -> Result<DirectoryEntry> {
    let mut fields = Vec::with_capacity(5);
    let mut rest = line.trim();
    while fields.len() < 4 {
        match rest.split_once(char::is_whitespace) {
            Some((field, tail)) => {
                fields.push(field);
                rest = tail.trim_start();
            }
            None => break,
        }
    }
    if !rest.is_empty() {
        fields.push(rest);
    }
    if fields.len() != 5 {
        return Err(Error::listing_parse(
            line,
            format!("expected 5 fields, found {}", fields.len()),
        ));
    }

    let zone = fields[3];
    if !zone
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-')
    {
        return Err(Error::listing_parse(
            line,
            format!("invalid zone abbreviation: {}", zone),
        ));
    }

    let timestamp = fields[..3].join(" ");
    let created = DateTime::parse_from_str(&timestamp, TIME_FORMAT)
        .map_err(|e| Error::listing_parse(line, format!("invalid timestamp: {}", e)))?;

    let raw = fields[4];
    let is_symlink = raw.ends_with('@');
    let name = raw.trim_end_matches(&['@', '/'][..]);

    Ok(DirectoryEntry {
        name: name.to_string(),
        created,
        is_symlink,
    })
}

/// Parse a whole listing, skipping blank lines. The first malformed line
/// aborts parsing.
pub fn parse_listing(output: &str) -> Result<Vec<DirectoryEntry>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_line() {
        let entry = parse_line("2015-04-26 20:40:19 -0700 PDT The.Wire.S01E01/").unwrap();
        assert_eq!(entry.name, "The.Wire.S01E01");
        assert!(!entry.is_symlink);

        let expected = FixedOffset::west_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2015, 4, 26, 20, 40, 19)
            .unwrap();
        assert_eq!(entry.created, expected);
    }

    #[test]
    fn test_parse_line_symlink() {
        let entry = parse_line("2015-04-26 20:40:19 +0000 UTC /tv/foo@").unwrap();
        assert_eq!(entry.name, "/tv/foo");
        assert!(entry.is_symlink);
        assert_eq!(entry.base_name(), "foo");
    }

    #[test]
    fn test_parse_line_wrong_field_count() {
        let err = parse_line("2015-04-26 20:40:19 +0000 foo").unwrap_err();
        assert!(matches!(err, Error::ListingParse { .. }));
        assert!(err.to_string().contains("expected 5 fields, found 4"));

        let err = parse_line("2015-04-26").unwrap_err();
        assert!(err.to_string().contains("expected 5 fields, found 1"));
        assert!(parse_line("").is_err());
    }

    #[test]
    fn test_parse_line_name_with_spaces() {
        let entry = parse_line("2015-04-26 20:40:19 +0000 UTC Some Show.S01E01/").unwrap();
        assert_eq!(entry.name, "Some Show.S01E01");
        assert!(!entry.is_symlink);

        let entry = parse_line("2015-04-26  20:40:19 +0000 UTC  a  b@ ").unwrap();
        assert_eq!(entry.name, "a  b");
        assert!(entry.is_symlink);

        let output = "2015-04-26 20:40:19 +0000 UTC good/\n2015-04-26 20:40:19 +0000 UTC Some Show.S01E01/\n";
        let entries = parse_listing(output).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "Some Show.S01E01");
    }

    #[test]
    fn test_entry_json() {
        let entry = parse_line("2015-04-26 20:40:19 -0700 PDT /tv/foo@").unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["name"], "/tv/foo");
        assert_eq!(json["created"], "2015-04-26T20:40:19-07:00");
        assert_eq!(json["is_symlink"], true);

        let back: DirectoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_parse_line_bad_timestamp() {
        let err = parse_line("2015-13-26 20:40:19 +0000 UTC foo").unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));

        assert!(parse_line("yesterday 20:40:19 +0000 UTC foo").is_err());
        assert!(parse_line("2015-04-26 20:40:19 UTC +0000 foo").is_err());
    }

    #[test]
    fn test_parse_listing() {
        let output = "2015-04-26 20:40:19 +0000 UTC dir1/\n\n2015-04-27 20:40:19 +0000 UTC dir2@\n";
        let entries = parse_listing(output).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "dir2");
        assert!(entries[1].is_symlink);

        assert!(parse_listing("2015-04-26 20:40:19 +0000 UTC dir1/\ngarbage\n").is_err());
    }

    #[test]
    fn test_age() {
        let now = Utc.with_ymd_and_hms(2015, 4, 27, 0, 0, 0).unwrap();
        let entry = parse_line("2015-04-26 00:00:00 +0000 UTC foo").unwrap();
        assert_eq!(entry.age(now), Duration::from_secs(24 * 3600));

        let future = parse_line("2015-04-28 00:00:00 +0000 UTC foo").unwrap();
        assert_eq!(future.age(now), Duration::ZERO);
    }

    #[test]
    fn test_remote_path() {
        let now: DateTime<FixedOffset> = Utc::now().into();
        assert_eq!(DirectoryEntry::new("foo", now).remote_path("/tv"), "/tv/foo");
        assert_eq!(DirectoryEntry::new("foo", now).remote_path("/tv/"), "/tv/foo");
        assert_eq!(
            DirectoryEntry::new("/misc/foo", now).remote_path("/tv"),
            "/misc/foo"
        );
    }
}
