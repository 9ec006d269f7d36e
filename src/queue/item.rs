use std::fmt;
use std::path::{PathBuf, MAIN_SEPARATOR};

use chrono::{DateTime, Utc};
use scenefetch_lftp::DirectoryEntry;
use scenefetch_parser::MediaInfo;
use serde::Serialize;

use super::DirProbe;
use crate::rules::{self, Decision, NO_MATCH};
use crate::site::Site;

/// Reason recorded for releases found in a local destination.
pub const LOCAL_COPY: &str = "IsLocal=true";

/// The transfer decision for one remote directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub entry: DirectoryEntry,
    pub remote_path: String,
    pub local_dir: String,
    pub transfer: bool,
    /// Why the item is or is not transferred. Never empty.
    pub reason: String,
    /// `None` when the name did not fit the site's naming convention.
    pub media: Option<MediaInfo>,
    /// Set when the item lost deduplication to another release, and for
    /// releases that already exist locally.
    pub merged: bool,
    /// The release lives in a local destination rather than on the site.
    pub local: bool,
    /// Remote path of a merged item before it took over the kept release's
    /// entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_path: Option<String>,
}

impl Item {
    /// Evaluate `entry` against the site's rules and resolve its metadata
    /// and destination.
    pub fn new(site: &Site, entry: DirectoryEntry, now: DateTime<Utc>) -> Self {
        let mut item = Self::unresolved(site, entry);
        match rules::evaluate(site, &item.entry, now) {
            Decision::Accept(reason) => item.accept(reason),
            Decision::Reject(reason) => item.reject(reason),
        }
        // Metadata is resolved for rejected items too so that duplicates
        // can still be recognised.
        item.resolve_metadata(site);
        item
    }

    fn unresolved(site: &Site, entry: DirectoryEntry) -> Self {
        Self {
            remote_path: entry.remote_path(&site.dir),
            entry,
            local_dir: String::new(),
            transfer: false,
            reason: NO_MATCH.to_string(),
            media: None,
            merged: false,
            local: false,
            original_path: None,
        }
    }

    pub fn accept(&mut self, reason: impl Into<String>) {
        self.transfer = true;
        self.reason = reason.into();
    }

    pub fn reject(&mut self, reason: impl Into<String>) {
        self.transfer = false;
        self.reason = reason.into();
    }

    fn resolve_metadata(&mut self, site: &Site) {
        let media = match parse_media(site, self.entry.base_name()) {
            Ok(media) => media,
            Err(e) => {
                self.reject(e.to_string());
                return;
            }
        };

        let rendered = site.local_dir.render(&media);
        self.media = Some(media);
        match rendered {
            Ok(dir) => self.local_dir = dir,
            Err(e) => self.reject(e.to_string()),
        }
    }

    /// Destination of the transfer. A `local_dir` ending in a separator
    /// receives the directory under its own name; otherwise `local_dir` is
    /// the destination itself.
    pub fn dst_dir(&self) -> PathBuf {
        if self.local_dir.ends_with(MAIN_SEPARATOR) {
            PathBuf::from(&self.local_dir).join(self.entry.base_name())
        } else {
            PathBuf::from(&self.local_dir)
        }
    }

    pub fn weight(&self, site: &Site) -> usize {
        site.weight(&self.entry.name)
    }

    /// Releases in this item's local destination directory with the same
    /// media identity, excluding the item itself.
    ///
    /// They come back transferable and merged, with the local path as both
    /// remote path and `local_dir`, so deduplication can weigh them against
    /// the remote releases.
    pub fn duplicates(&self, site: &Site, dirs: &dyn DirProbe) -> Vec<Item> {
        let Some(key) = self.media.as_ref().and_then(MediaInfo::key) else {
            return Vec::new();
        };
        let dst = self.dst_dir();
        let Some(parent) = dst.parent() else {
            return Vec::new();
        };

        dirs
            .read_dir(parent)
            .into_iter()
            .filter(|name| name.as_str() != self.entry.base_name())
            .filter_map(|name| {
                let media = parse_media(site, &name).ok()?;
                if media.key().as_ref() != Some(&key) {
                    return None;
                }
                let path = parent.join(&name).display().to_string();
                Some(Item {
                    // Local directories carry no listing timestamp
                    entry: DirectoryEntry::new(path.clone(), self.entry.created),
                    remote_path: path.clone(),
                    local_dir: path,
                    transfer: true,
                    reason: LOCAL_COPY.to_string(),
                    media: Some(media),
                    merged: true,
                    local: true,
                    original_path: None,
                })
            })
            .collect()
    }

    /// Mark this item as a duplicate of `kept`, mirroring its entry and
    /// destination. The media and `original_path` still name this release.
    pub(crate) fn merge(&mut self, kept: &Item, weight: usize) {
        self.reject(format!("DuplicateOf={} Weight={}", kept.remote_path, weight));
        self.merged = true;
        self.original_path = Some(std::mem::replace(
            &mut self.remote_path,
            kept.remote_path.clone(),
        ));
        self.entry = kept.entry.clone();
        self.local_dir = kept.local_dir.clone();
    }
}

/// Parse a release name with the site's parser and apply its name
/// replacements.
fn parse_media(site: &Site, release: &str) -> Result<MediaInfo, scenefetch_parser::ParseError> {
    let mut media = site.parser.parse(release)?;
    if let Some(name) = media.name_mut() {
        *name = site.replace_name(name);
    }
    Ok(media)
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Path={:?} LocalDir={:?} Transfer={} Reason={:?}",
            self.remote_path, self.local_dir, self.transfer, self.reason
        )
    }
}
