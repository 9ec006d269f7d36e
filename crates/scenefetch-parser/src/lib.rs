//! # scenefetch-parser
//!
//! Extracts structured metadata from scene release directory names.
//!
//! Three naming conventions are supported, selected once per site:
//!
//! - [`MediaParser::Show`] - `Name.S01E02...` or `Name.1x02...`
//! - [`MediaParser::Movie`] - `Name.1999...`
//! - [`MediaParser::Default`] - no structure, only the raw release name
//!
//! ## Quick Start
//!
//! ```
//! use scenefetch_parser::{MediaInfo, MediaParser};
//!
//! let info = MediaParser::Show.parse("The.Wire.S03E01.720p.HDTV").unwrap();
//! assert_eq!(info.name(), Some("The.Wire"));
//! assert_eq!(info.field("Season").map(|v| v.to_string()), Some("3".to_string()));
//!
//! let info = MediaParser::Movie.parse("Apocalypse.Now.1979.1080p").unwrap();
//! assert!(matches!(info, MediaInfo::Movie { year: 1979, .. }));
//! ```

mod error;
mod model;
mod parser;

pub use error::{ParseError, Result};
pub use model::{FieldValue, MediaInfo, MediaKey};
pub use parser::MediaParser;
