//! Error types for scenefetch-parser.

/// Result type alias using [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors produced when a release name does not fit a naming convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The name does not follow the convention of the selected parser.
    #[error("failed to parse {kind} name: {name}")]
    NoMatch { kind: &'static str, name: String },

    /// A numeric component could not be represented.
    #[error("invalid {field} in {name}: {value}")]
    InvalidNumber {
        field: &'static str,
        name: String,
        value: String,
    },

    /// An unknown parser variant was requested.
    #[error("unknown parser: {0}")]
    UnknownParser(String),
}

impl ParseError {
    pub(crate) fn no_match(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NoMatch {
            kind,
            name: name.into(),
        }
    }
}
