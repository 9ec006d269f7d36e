mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::site::Site;

/// Default config locations, in lookup order
pub const DEFAULT_PATHS: [&str; 3] = [
    "./scenefetch.toml",
    "~/.config/scenefetch/config.toml",
    "/etc/scenefetch/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from the given path, or the first default location that
/// exists, or return an empty config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        let path = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        return load_config(Path::new(&path));
    }

    for path_str in DEFAULT_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    tracing::warn!("No config file found, no sites configured");
    Ok(Config::default())
}

impl Config {
    /// Compile every site into its immutable rule set, in config order
    pub fn compile(&self) -> crate::Result<Vec<Site>> {
        self.sites
            .iter()
            .map(|site| Site::compile(site, &self.client))
            .collect()
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.client.get_cmd.trim().is_empty() {
        anyhow::bail!("Client get_cmd cannot be empty");
    }

    let mut names = HashSet::new();
    for site in &config.sites {
        if site.name.trim().is_empty() {
            anyhow::bail!("Site with dir {:?} has no name", site.dir);
        }
        if !names.insert(site.name.as_str()) {
            anyhow::bail!("Site '{}' is configured more than once", site.name);
        }
        if site.local_dir.is_empty() {
            tracing::warn!("Site '{}' has an empty local_dir", site.name);
        }
    }

    // Surface compile errors (bad regexes, templates, durations) at load time
    config.compile()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenefetch_parser::MediaParser;
    use std::time::Duration;

    const CONFIG: &str = r#"
[client]
path = "/usr/bin/lftp"

[[sites]]
name = "foo"
dir = "/site"
max_age = "24h"
patterns = ["^match"]
filters = ["^skip"]
skip_symlinks = true
parser = "show"
local_dir = "/tmp/{Name}/S{Season:02}/"
priorities = ["important"]
deduplicate = true
post_command = "xargs echo"

[[sites.replacements]]
pattern = "_"
replacement = "."

[[sites]]
name = "bar"
dir = "/movies"
local_dir = "/media/movies/"
parser = "movie"

[sites.client]
path = "lftp"
get_cmd = "pget"
"#;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config() {
        let file = write_config(CONFIG);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.client.path, "/usr/bin/lftp");
        assert_eq!(config.client.get_cmd, "mirror");
        assert_eq!(config.sites.len(), 2);
        assert_eq!(config.sites[0].replacements.len(), 1);
        assert_eq!(config.sites[1].parser, MediaParser::Movie);

        let sites = config.compile().unwrap();
        let foo = &sites[0];
        assert_eq!(foo.max_age, Some(Duration::from_secs(24 * 3600)));
        assert!(!foo.patterns.is_empty());
        assert!(!foo.filters.is_empty());
        assert!(!foo.priorities.is_empty());
        assert_eq!(foo.parser, MediaParser::Show);
        assert_eq!(foo.client.path, "/usr/bin/lftp");
        assert_eq!(foo.post_command.as_deref(), Some("xargs echo"));

        let bar = &sites[1];
        assert_eq!(bar.max_age, None);
        assert!(!bar.deduplicate);
        assert_eq!(bar.client.get_cmd, "pget");
    }

    #[test]
    fn test_duplicate_site_names() {
        let file = write_config(
            r#"
[[sites]]
name = "foo"
dir = "/a"
local_dir = "/tmp/"

[[sites]]
name = "foo"
dir = "/b"
local_dir = "/tmp/"
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_invalid_site_rejected_at_load() {
        let file = write_config(
            r#"
[[sites]]
name = "foo"
dir = "/a"
local_dir = "/tmp/{Name"
"#,
        );
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("local_dir"));
    }

    #[test]
    fn test_unknown_parser_rejected() {
        let file = write_config(
            r#"
[[sites]]
name = "foo"
dir = "/a"
local_dir = "/tmp/"
parser = "music"
"#,
        );
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/scenefetch.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
