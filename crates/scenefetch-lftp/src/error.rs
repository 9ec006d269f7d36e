//! Error types for scenefetch-lftp.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the transfer tool.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A listing line could not be parsed.
    #[error("invalid listing line {line:?}: {message}")]
    ListingParse { line: String, message: String },

    /// The transfer tool is not available.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// The transfer tool could not be started or exited unsuccessfully.
    #[error("tool execution failed: {tool}: {message}")]
    ToolFailed { tool: String, message: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a listing parse error.
    pub fn listing_parse(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ListingParse {
            line: line.into(),
            message: message.into(),
        }
    }

    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a tool execution failed error.
    pub fn tool_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::listing_parse("foo", "expected 5 fields, found 1");
        assert_eq!(
            err.to_string(),
            "invalid listing line \"foo\": expected 5 fields, found 1"
        );

        let err = Error::tool_failed("lftp", "exit status 1");
        assert_eq!(err.to_string(), "tool execution failed: lftp: exit status 1");
    }
}
