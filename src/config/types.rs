use scenefetch_parser::MediaParser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Transfer client used by sites that do not configure their own
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientConfig {
    /// Path to the lftp executable
    #[serde(default = "default_client_path")]
    pub path: String,

    /// lftp command used to fetch a directory
    #[serde(default = "default_get_cmd")]
    pub get_cmd: String,
}

fn default_client_path() -> String {
    "lftp".to_string()
}

fn default_get_cmd() -> String {
    "mirror".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            path: default_client_path(),
            get_cmd: default_get_cmd(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Bookmark or URL passed to `open`
    pub name: String,

    /// Remote directory to list
    pub dir: String,

    /// Maximum age of a remote directory, e.g. "24h" (unset = no limit)
    #[serde(default)]
    pub max_age: Option<String>,

    /// Patterns a directory name must start with to be transferred
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Patterns that reject a directory even when it matched `patterns`
    #[serde(default)]
    pub filters: Vec<String>,

    #[serde(default)]
    pub skip_symlinks: bool,

    /// Reject directories whose destination already has content
    #[serde(default)]
    pub skip_existing: bool,

    #[serde(default)]
    pub parser: MediaParser,

    /// Destination template, e.g. "/media/tv/{Name}/S{Season:02}/"
    pub local_dir: String,

    /// Patterns ranking duplicate releases, most significant first
    #[serde(default)]
    pub priorities: Vec<String>,

    #[serde(default)]
    pub deduplicate: bool,

    /// Command receiving the queue as JSON on stdin after a transfer
    #[serde(default)]
    pub post_command: Option<String>,

    /// Rewrites applied to the parsed media name, in order
    #[serde(default)]
    pub replacements: Vec<ReplacementConfig>,

    /// Overrides the top-level client for this site
    #[serde(default)]
    pub client: Option<ClientConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReplacementConfig {
    pub pattern: String,
    pub replacement: String,
}
