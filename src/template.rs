//! Destination path templates.
//!
//! Templates reference media fields with `{Field}` and may zero-pad numeric
//! fields with `{Field:0N}`. Literal braces are written as `{{` and `}}`.
//!
//! ```
//! use scenefetch::template::PathTemplate;
//! use scenefetch_parser::MediaParser;
//!
//! let template: PathTemplate = "/tmp/{Name}/S{Season:02}/".parse().unwrap();
//! let media = MediaParser::Show.parse("The.Wire.S03E01").unwrap();
//! assert_eq!(template.render(&media).unwrap(), "/tmp/The.Wire/S03/");
//! ```

use std::fmt::{self, Write};
use std::str::FromStr;

use scenefetch_parser::{FieldValue, MediaInfo};

/// Widest zero padding a field may request.
pub const MAX_PAD_WIDTH: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template: unclosed '{{' at offset {0}")]
    Unclosed(usize),

    #[error("template: unexpected '}}' at offset {0}")]
    UnexpectedClose(usize),

    #[error("template: invalid field name {0:?}")]
    InvalidField(String),

    #[error("template: invalid format {spec:?} for field {field}")]
    InvalidFormat { field: String, spec: String },

    #[error("template: undefined field {0}")]
    UndefinedField(String),

    #[error("template: field {0} is not numeric and cannot be padded")]
    NotNumeric(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { name: String, width: Option<usize> },
}

/// A compiled path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            match c {
                '{' if matches!(chars.peek(), Some((_, '{'))) => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let rest = &source[i + 1..];
                    let end = rest.find('}').ok_or(TemplateError::Unclosed(i))?;
                    let inner = &rest[..end];
                    // Skip past the field body and its closing brace
                    for (j, _) in chars.by_ref() {
                        if j == i + 1 + end {
                            break;
                        }
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_field(inner)?);
                }
                '}' if matches!(chars.peek(), Some((_, '}'))) => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnexpectedClose(i)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// Render the template with `media` as the substitution context.
    pub fn render(&self, media: &MediaInfo) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Field { name, width } => {
                    let value = media
                        .field(name)
                        .ok_or_else(|| TemplateError::UndefinedField(name.clone()))?;
                    match (value, width) {
                        (FieldValue::Number(n), Some(w)) => {
                            let _ = write!(out, "{:0width$}", n, width = *w);
                        }
                        (FieldValue::Text(_), Some(_)) => {
                            return Err(TemplateError::NotNumeric(name.clone()));
                        }
                        (value, None) => {
                            let _ = write!(out, "{}", value);
                        }
                    }
                }
            }
        }
        Ok(out)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn parse_field(inner: &str) -> Result<Segment, TemplateError> {
    let (name, spec) = match inner.split_once(':') {
        Some((name, spec)) => (name.trim(), Some(spec.trim())),
        None => (inner.trim(), None),
    };

    let valid_name = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_name {
        return Err(TemplateError::InvalidField(inner.to_string()));
    }

    let width = match spec {
        None => None,
        Some(spec) => {
            let digits = spec.strip_prefix('0').unwrap_or("");
            match digits.parse::<usize>() {
                Ok(w) if !digits.is_empty() && w <= MAX_PAD_WIDTH => Some(w),
                _ => {
                    return Err(TemplateError::InvalidFormat {
                        field: name.to_string(),
                        spec: spec.to_string(),
                    })
                }
            }
        }
    };

    Ok(Segment::Field {
        name: name.to_string(),
        width,
    })
}

impl FromStr for PathTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenefetch_parser::MediaParser;

    fn render(template: &str, parser: MediaParser, name: &str) -> Result<String, TemplateError> {
        let media = parser.parse(name).unwrap();
        PathTemplate::parse(template)?.render(&media)
    }

    #[test]
    fn test_render_show() {
        assert_eq!(
            render("/tmp/{Name}/S{Season:02}/", MediaParser::Show, "The.Wire.S03E01").unwrap(),
            "/tmp/The.Wire/S03/"
        );
        assert_eq!(
            render("/tmp/{Name}/{Season}x{Episode:03}", MediaParser::Show, "The.Wire.S03E01")
                .unwrap(),
            "/tmp/The.Wire/3x001"
        );
    }

    #[test]
    fn test_render_movie() {
        assert_eq!(
            render("/tmp/{Year}/{Name}/", MediaParser::Movie, "Apocalypse.Now.1979").unwrap(),
            "/tmp/1979/Apocalypse.Now/"
        );
    }

    #[test]
    fn test_render_literal_only() {
        assert_eq!(
            render("/tmp/", MediaParser::Default, "The.Wire.S03E01").unwrap(),
            "/tmp/"
        );
    }

    #[test]
    fn test_render_escaped_braces() {
        assert_eq!(
            render("/tmp/{{x}}/{Release}", MediaParser::Default, "foo").unwrap(),
            "/tmp/{x}/foo"
        );
    }

    #[test]
    fn test_undefined_field() {
        let err = render("/tmp/{Season}/", MediaParser::Movie, "Apocalypse.Now.1979").unwrap_err();
        assert_eq!(err, TemplateError::UndefinedField("Season".to_string()));

        let err = render("/tmp/{Name}/", MediaParser::Default, "foo").unwrap_err();
        assert_eq!(err, TemplateError::UndefinedField("Name".to_string()));
    }

    #[test]
    fn test_pad_text_field() {
        let err = render("/tmp/{Name:02}/", MediaParser::Show, "The.Wire.S03E01").unwrap_err();
        assert_eq!(err, TemplateError::NotNumeric("Name".to_string()));
    }

    #[test]
    fn test_invalid_syntax() {
        assert_eq!(
            PathTemplate::parse("/tmp/{Name").unwrap_err(),
            TemplateError::Unclosed(5)
        );
        assert_eq!(
            PathTemplate::parse("/tmp/Name}").unwrap_err(),
            TemplateError::UnexpectedClose(9)
        );
        assert!(matches!(
            PathTemplate::parse("/tmp/{}").unwrap_err(),
            TemplateError::InvalidField(_)
        ));
        assert!(matches!(
            PathTemplate::parse("/tmp/{Season:x2}").unwrap_err(),
            TemplateError::InvalidFormat { .. }
        ));
        assert!(matches!(
            PathTemplate::parse("/tmp/{Season:2}").unwrap_err(),
            TemplateError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn test_pad_width_limit() {
        assert_eq!(
            render("/tmp/S{Season:09}/", MediaParser::Show, "The.Wire.S03E01").unwrap(),
            "/tmp/S000000003/"
        );
        assert_eq!(
            PathTemplate::parse("/tmp/{Season:010}/").unwrap_err(),
            TemplateError::InvalidFormat {
                field: "Season".to_string(),
                spec: "010".to_string(),
            }
        );
        assert!(matches!(
            PathTemplate::parse("/tmp/{Season:099999999999999}/").unwrap_err(),
            TemplateError::InvalidFormat { .. }
        ));
        // Too large for usize
        assert!(PathTemplate::parse("/tmp/{Season:0999999999999999999999}/").is_err());
    }

    #[test]
    fn test_display_keeps_source() {
        let template = PathTemplate::parse("/tmp/{Name}/").unwrap();
        assert_eq!(template.to_string(), "/tmp/{Name}/");
        assert_eq!(template.as_str(), "/tmp/{Name}/");
    }
}
