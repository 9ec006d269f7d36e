//! Naming-convention parsers.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{ParseError, Result};
use crate::model::MediaInfo;

/// `Name.S01E02`
static SXXEXX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.+?)\.[Ss](?P<season>\d{1,2})[Ee](?P<episode>\d{1,3})(?:\.|$|[Ee-])")
        .unwrap()
});

/// `Name.1x02` / `Name.01x02`
static NXNN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.+?)\.(?P<season>\d{1,2})x(?P<episode>\d{2,3})(?:\.|$)").unwrap()
});

/// `Name.1999`
static MOVIE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>.+?)\.(?P<year>(?:19|20)\d{2})(?:\.|$)").unwrap()
});

/// Naming convention used to interpret a site's release names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum MediaParser {
    Show,
    Movie,
    #[default]
    Default,
}

impl MediaParser {
    /// Parse a release name according to this convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use scenefetch_parser::MediaParser;
    ///
    /// assert!(MediaParser::Show.parse("The.Wire.S01E01").is_ok());
    /// assert!(MediaParser::Show.parse("bar").is_err());
    /// assert!(MediaParser::Default.parse("bar").is_ok());
    /// ```
    pub fn parse(self, release: &str) -> Result<MediaInfo> {
        match self {
            MediaParser::Show => parse_show(release),
            MediaParser::Movie => parse_movie(release),
            MediaParser::Default => Ok(MediaInfo::Default {
                release: release.to_string(),
            }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MediaParser::Show => "show",
            MediaParser::Movie => "movie",
            MediaParser::Default => "default",
        }
    }
}

impl fmt::Display for MediaParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaParser {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "show" => Ok(MediaParser::Show),
            "movie" => Ok(MediaParser::Movie),
            "default" | "" => Ok(MediaParser::Default),
            _ => Err(ParseError::UnknownParser(s.to_string())),
        }
    }
}

fn parse_show(release: &str) -> Result<MediaInfo> {
    let caps = SXXEXX_RE
        .captures(release)
        .or_else(|| NXNN_RE.captures(release))
        .ok_or_else(|| ParseError::no_match("show", release))?;

    Ok(MediaInfo::Show {
        name: caps["name"].to_string(),
        season: number(&caps, "season", release)?,
        episode: number(&caps, "episode", release)?,
        release: release.to_string(),
    })
}

fn parse_movie(release: &str) -> Result<MediaInfo> {
    let caps = MOVIE_RE
        .captures(release)
        .ok_or_else(|| ParseError::no_match("movie", release))?;

    Ok(MediaInfo::Movie {
        name: caps["name"].to_string(),
        year: number(&caps, "year", release)?,
        release: release.to_string(),
    })
}

fn number(caps: &Captures<'_>, field: &'static str, release: &str) -> Result<u32> {
    let value = &caps[field];
    value.parse().map_err(|_| ParseError::InvalidNumber {
        field,
        name: release.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_sxxexx() {
        let info = MediaParser::Show.parse("The.Wire.S03E01").unwrap();
        assert_eq!(
            info,
            MediaInfo::Show {
                name: "The.Wire".to_string(),
                season: 3,
                episode: 1,
                release: "The.Wire.S03E01".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_show_with_tags() {
        let info = MediaParser::Show
            .parse("The.Wire.S01E01.PROPER.720p.HDTV.x264-GRP")
            .unwrap();
        assert_eq!(info.name(), Some("The.Wire"));
        assert!(matches!(info, MediaInfo::Show { season: 1, episode: 1, .. }));
    }

    #[test]
    fn test_parse_show_lowercase_marker() {
        let info = MediaParser::Show.parse("the.wire.s02e10.hdtv").unwrap();
        assert!(matches!(info, MediaInfo::Show { season: 2, episode: 10, .. }));
    }

    #[test]
    fn test_parse_show_nxnn() {
        let info = MediaParser::Show.parse("Top_Gear.01x01").unwrap();
        assert_eq!(info.name(), Some("Top_Gear"));
        assert!(matches!(info, MediaInfo::Show { season: 1, episode: 1, .. }));

        let info = MediaParser::Show.parse("Top_Gear.3x12.720p").unwrap();
        assert!(matches!(info, MediaInfo::Show { season: 3, episode: 12, .. }));
    }

    #[test]
    fn test_parse_show_fails_without_episode() {
        let err = MediaParser::Show.parse("bar").unwrap_err();
        assert_eq!(err, ParseError::no_match("show", "bar"));

        assert!(MediaParser::Show.parse("The.Wire.Complete").is_err());
    }

    #[test]
    fn test_parse_movie() {
        let info = MediaParser::Movie.parse("Apocalypse.Now.1979").unwrap();
        assert_eq!(
            info,
            MediaInfo::Movie {
                name: "Apocalypse.Now".to_string(),
                year: 1979,
                release: "Apocalypse.Now.1979".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_movie_with_year_in_title() {
        let info = MediaParser::Movie
            .parse("2001.A.Space.Odyssey.1968.1080p.BluRay")
            .unwrap();
        assert_eq!(info.name(), Some("2001.A.Space.Odyssey"));
        assert!(matches!(info, MediaInfo::Movie { year: 1968, .. }));
    }

    #[test]
    fn test_parse_movie_fails_without_year() {
        assert!(MediaParser::Movie.parse("Apocalypse.Now").is_err());
    }

    #[test]
    fn test_parse_default_keeps_release() {
        let info = MediaParser::Default.parse("The.Wire.S03E01").unwrap();
        assert_eq!(
            info,
            MediaInfo::Default {
                release: "The.Wire.S03E01".to_string()
            }
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("show".parse::<MediaParser>().unwrap(), MediaParser::Show);
        assert_eq!("Movie".parse::<MediaParser>().unwrap(), MediaParser::Movie);
        assert_eq!("".parse::<MediaParser>().unwrap(), MediaParser::Default);
        assert!("music".parse::<MediaParser>().is_err());
    }
}
