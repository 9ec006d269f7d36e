//! Error types for scenefetch.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort processing of a site.
///
/// Per-item failures (media name parsing, template rendering) never surface
/// here; they become the rejection reason of the item.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A site configuration could not be compiled.
    #[error("site {site:?}: invalid {field}: {message}")]
    Config {
        site: String,
        field: &'static str,
        message: String,
    },

    /// The listing could not be retrieved or parsed, or the transfer tool failed.
    #[error(transparent)]
    Lftp(#[from] scenefetch_lftp::Error),

    /// The post command failed to start or exited unsuccessfully.
    #[error("post command {program}: {message}")]
    Process { program: String, message: String },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Queue serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(site: impl Into<String>, field: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            site: site.into(),
            field,
            message: message.into(),
        }
    }

    /// Create a process error.
    pub fn process(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Process {
            program: program.into(),
            message: message.into(),
        }
    }
}
