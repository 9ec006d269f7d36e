//! Parsed media metadata.

use std::fmt;

/// Metadata extracted from a release name.
///
/// The variant is decided by the parser that produced it, never by
/// inspecting the name afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum MediaInfo {
    /// An episode of a series.
    Show {
        name: String,
        season: u32,
        episode: u32,
        release: String,
    },
    /// A feature film.
    Movie {
        name: String,
        year: u32,
        release: String,
    },
    /// Anything else. Only the raw release name is known.
    Default { release: String },
}

/// Natural key used to group releases of the same media.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaKey {
    Episode {
        name: String,
        season: u32,
        episode: u32,
    },
    Movie {
        name: String,
        year: u32,
    },
}

/// A single value exposed to path templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(u32),
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl MediaInfo {
    /// The raw release name this metadata was parsed from.
    pub fn release(&self) -> &str {
        match self {
            MediaInfo::Show { release, .. }
            | MediaInfo::Movie { release, .. }
            | MediaInfo::Default { release } => release,
        }
    }

    /// The series or movie name, if the variant carries one.
    pub fn name(&self) -> Option<&str> {
        match self {
            MediaInfo::Show { name, .. } | MediaInfo::Movie { name, .. } => Some(name),
            MediaInfo::Default { .. } => None,
        }
    }

    /// Mutable access to the name, used when applying name replacements.
    pub fn name_mut(&mut self) -> Option<&mut String> {
        match self {
            MediaInfo::Show { name, .. } | MediaInfo::Movie { name, .. } => Some(name),
            MediaInfo::Default { .. } => None,
        }
    }

    /// True when no field carries any information.
    pub fn is_empty(&self) -> bool {
        match self {
            MediaInfo::Show {
                name,
                season,
                episode,
                release,
            } => name.is_empty() && *season == 0 && *episode == 0 && release.is_empty(),
            MediaInfo::Movie {
                name,
                year,
                release,
            } => name.is_empty() && *year == 0 && release.is_empty(),
            MediaInfo::Default { release } => release.is_empty(),
        }
    }

    /// Identity used for duplicate detection. `Default` media has no
    /// natural key and is never grouped.
    pub fn key(&self) -> Option<MediaKey> {
        match self {
            MediaInfo::Show {
                name,
                season,
                episode,
                ..
            } => Some(MediaKey::Episode {
                name: name.clone(),
                season: *season,
                episode: *episode,
            }),
            MediaInfo::Movie { name, year, .. } => Some(MediaKey::Movie {
                name: name.clone(),
                year: *year,
            }),
            MediaInfo::Default { .. } => None,
        }
    }

    /// Look up a field by its template name (`Name`, `Season`, `Episode`,
    /// `Year`, `Release`). Fields the variant does not carry return `None`.
    pub fn field(&self, field: &str) -> Option<FieldValue<'_>> {
        match (self, field) {
            (_, "Release") => Some(FieldValue::Text(self.release())),
            (MediaInfo::Show { name, .. } | MediaInfo::Movie { name, .. }, "Name") => {
                Some(FieldValue::Text(name))
            }
            (MediaInfo::Show { season, .. }, "Season") => Some(FieldValue::Number(*season)),
            (MediaInfo::Show { episode, .. }, "Episode") => Some(FieldValue::Number(*episode)),
            (MediaInfo::Movie { year, .. }, "Year") => Some(FieldValue::Number(*year)),
            _ => None,
        }
    }
}
