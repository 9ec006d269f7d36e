use chrono::{DateTime, Utc};
use scenefetch_lftp::DirectoryEntry;
use std::time::Duration;

use crate::site::Site;

/// Reason recorded when no include pattern matched.
pub const NO_MATCH: &str = "no match";

/// Outcome of evaluating a directory against a site's rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept(String),
    Reject(String),
}

impl Decision {
    pub fn is_accept(&self) -> bool {
        matches!(self, Decision::Accept(_))
    }

    pub fn reason(&self) -> &str {
        match self {
            Decision::Accept(r) | Decision::Reject(r) => r,
        }
    }
}

/// Decide whether a directory should be transferred.
///
/// Rules are checked in order and the first rejection wins: symlinks, age,
/// include patterns, exclude filters. An exclude filter overrides an
/// earlier include match.
pub fn evaluate(site: &Site, entry: &DirectoryEntry, now: DateTime<Utc>) -> Decision {
    if let Some(reject) = check_symlink(site, entry) {
        return reject;
    }

    if let Some(reject) = check_age(site, entry, now) {
        return reject;
    }

    let matched = match match_patterns(site, entry.base_name()) {
        Some(pattern) => pattern,
        None => return Decision::Reject(NO_MATCH.to_string()),
    };

    if let Some(reject) = check_filters(site, entry.base_name()) {
        return reject;
    }

    Decision::Accept(format!("Match={}", matched))
}

fn check_symlink(site: &Site, entry: &DirectoryEntry) -> Option<Decision> {
    if site.skip_symlinks && entry.is_symlink {
        return Some(Decision::Reject(format!(
            "IsSymlink={} SkipSymlinks={}",
            entry.is_symlink, site.skip_symlinks
        )));
    }
    None
}

fn check_age(site: &Site, entry: &DirectoryEntry, now: DateTime<Utc>) -> Option<Decision> {
    let max_age = site.max_age?;
    let age = entry.age(now);
    // Equal age is still accepted
    if age > max_age {
        return Some(Decision::Reject(format!(
            "Age={} MaxAge={}",
            humantime::format_duration(Duration::from_secs(age.as_secs())),
            humantime::format_duration(max_age)
        )));
    }
    None
}

/// The first include pattern the name starts with. An empty pattern list
/// matches everything.
fn match_patterns<'a>(site: &'a Site, name: &str) -> Option<&'a str> {
    if site.patterns.is_empty() {
        return Some("*");
    }

    site.patterns
        .iter()
        .find(|p| p.is_prefix_of(name))
        .map(|p| p.as_str())
}

fn check_filters(site: &Site, name: &str) -> Option<Decision> {
    site.filters
        .iter()
        .find(|f| f.is_prefix_of(name))
        .map(|f| Decision::Reject(format!("Filter={}", f.as_str())))
}
