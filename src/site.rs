//! Compiled per-site rule sets.
//!
//! A [`Site`] is built once from its [`SiteConfig`] at startup and shared
//! read-only with every queue and item evaluation for that site.

use std::time::Duration;

use regex::Regex;
use scenefetch_lftp::Client;
use scenefetch_parser::MediaParser;

use crate::config::{ClientConfig, SiteConfig};
use crate::error::{Error, Result};
use crate::template::PathTemplate;

/// A pattern matched against the start of a directory name.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    anchored: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            anchored: Regex::new(&format!("^(?:{})", source))?,
        })
    }

    pub fn is_prefix_of(&self, name: &str) -> bool {
        self.anchored.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// A rewrite applied to parsed media names.
#[derive(Debug, Clone)]
pub struct Replacement {
    pub pattern: Regex,
    pub replacement: String,
}

impl Replacement {
    pub fn apply(&self, name: &str) -> String {
        self.pattern
            .replace_all(name, self.replacement.as_str())
            .into_owned()
    }
}

/// Rules and settings for one remote source.
#[derive(Debug, Clone)]
pub struct Site {
    pub name: String,
    pub dir: String,
    pub max_age: Option<Duration>,
    pub patterns: Vec<Pattern>,
    pub filters: Vec<Pattern>,
    pub skip_symlinks: bool,
    pub skip_existing: bool,
    pub parser: MediaParser,
    pub local_dir: PathTemplate,
    pub priorities: Vec<Regex>,
    pub deduplicate: bool,
    pub post_command: Option<String>,
    pub replacements: Vec<Replacement>,
    pub client: Client,
}

impl Site {
    /// Compile a site configuration. `default_client` is used unless the
    /// site overrides it.
    pub fn compile(config: &SiteConfig, default_client: &ClientConfig) -> Result<Self> {
        let name = config.name.trim();
        if name.is_empty() {
            return Err(Error::config("", "name", "site name cannot be empty"));
        }
        if config.dir.trim().is_empty() {
            return Err(Error::config(name, "dir", "remote directory cannot be empty"));
        }

        let max_age = config
            .max_age
            .as_deref()
            .map(humantime::parse_duration)
            .transpose()
            .map_err(|e| Error::config(name, "max_age", e.to_string()))?;

        let patterns = compile_patterns(name, "patterns", &config.patterns)?;
        let filters = compile_patterns(name, "filters", &config.filters)?;

        let priorities = config
            .priorities
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::config(name, "priorities", e.to_string()))?;

        let local_dir = PathTemplate::parse(&config.local_dir)
            .map_err(|e| Error::config(name, "local_dir", e.to_string()))?;

        let replacements = config
            .replacements
            .iter()
            .map(|r| {
                Ok(Replacement {
                    pattern: Regex::new(&r.pattern)?,
                    replacement: r.replacement.clone(),
                })
            })
            .collect::<std::result::Result<Vec<_>, regex::Error>>()
            .map_err(|e| Error::config(name, "replacements", e.to_string()))?;

        let post_command = match config.post_command.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(cmd) => match shlex::split(cmd) {
                Some(words) if !words.is_empty() => Some(cmd.to_string()),
                _ => {
                    return Err(Error::config(
                        name,
                        "post_command",
                        format!("cannot split command: {}", cmd),
                    ))
                }
            },
        };

        let client = config.client.as_ref().unwrap_or(default_client);
        if client.path.trim().is_empty() || client.get_cmd.trim().is_empty() {
            return Err(Error::config(
                name,
                "client",
                "client path and get_cmd cannot be empty",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            dir: config.dir.clone(),
            max_age,
            patterns,
            filters,
            skip_symlinks: config.skip_symlinks,
            skip_existing: config.skip_existing,
            parser: config.parser,
            local_dir,
            priorities,
            deduplicate: config.deduplicate,
            post_command,
            replacements,
            client: Client::new(&client.path, &client.get_cmd),
        })
    }

    /// Priority of a release name among duplicates. The first priority
    /// pattern occurring anywhere in the name scores
    /// `priorities.len() - index`; no match scores 0.
    pub fn weight(&self, name: &str) -> usize {
        self.priorities
            .iter()
            .position(|p| p.is_match(name))
            .map_or(0, |i| self.priorities.len() - i)
    }

    /// Apply all name replacements in order.
    pub fn replace_name(&self, name: &str) -> String {
        self.replacements
            .iter()
            .fold(name.to_string(), |acc, r| r.apply(&acc))
    }
}

fn compile_patterns(site: &str, field: &'static str, sources: &[String]) -> Result<Vec<Pattern>> {
    sources
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| Error::config(site, field, e.to_string())))
        .collect()
}
