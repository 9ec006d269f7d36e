//! Per-site transfer queues.

mod dedup;
mod item;
mod post;

pub use item::Item;
pub use post::PostCommand;

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use scenefetch_lftp::{DirectoryEntry, Script};
use serde::Serialize;

use crate::error::Result;
use crate::site::Site;

/// Reason recorded for items whose destination already has content.
pub const DST_NOT_EMPTY: &str = "IsDstDirEmpty=false";

/// Lists local destination directories.
pub trait DirProbe {
    /// Names of the entries in `path`.
    fn read_dir(&self, path: &Path) -> Vec<String>;

    fn is_empty(&self, path: &Path) -> bool {
        self.read_dir(path).is_empty()
    }
}

/// Reads the local filesystem. Missing or unreadable directories count as
/// empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDirProbe;

impl DirProbe for LocalDirProbe {
    fn read_dir(&self, path: &Path) -> Vec<String> {
        std::fs::read_dir(path)
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_empty(&self, path: &Path) -> bool {
        std::fs::read_dir(path)
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(true)
    }
}

impl<F> DirProbe for F
where
    F: Fn(&Path) -> Vec<String>,
{
    fn read_dir(&self, path: &Path) -> Vec<String> {
        self(path)
    }
}

/// The decisions for every directory listed on one site, ordered by name.
#[derive(Debug, Clone)]
pub struct Queue {
    site: Arc<Site>,
    items: Vec<Item>,
}

#[derive(Serialize)]
struct QueueJson<'a> {
    site: &'a str,
    items: &'a [Item],
}

impl Queue {
    /// Build the queue for `entries`, checking destinations on the local
    /// filesystem.
    pub fn new(site: Arc<Site>, entries: Vec<DirectoryEntry>, now: DateTime<Utc>) -> Self {
        Self::with_probe(site, entries, now, &LocalDirProbe)
    }

    /// Build the queue for `entries` using `dirs` for destination checks
    /// and, when deduplicating, to find releases that already exist locally.
    pub fn with_probe(
        site: Arc<Site>,
        entries: Vec<DirectoryEntry>,
        now: DateTime<Utc>,
        dirs: &dyn DirProbe,
    ) -> Self {
        let mut items: Vec<Item> = entries
            .into_iter()
            .map(|entry| Item::new(&site, entry, now))
            .collect();

        if site.skip_existing {
            for item in items.iter_mut().filter(|i| i.transfer) {
                if !dirs.is_empty(&item.dst_dir()) {
                    item.reject(DST_NOT_EMPTY);
                }
            }
        }

        if site.deduplicate {
            let mut seen = HashSet::new();
            let local: Vec<Item> = items
                .iter()
                .filter(|i| i.transfer)
                .flat_map(|i| i.duplicates(&site, dirs))
                .filter(|dup| seen.insert(dup.remote_path.clone()))
                .collect();
            if !local.is_empty() {
                tracing::debug!("Found {} local copies on {}", local.len(), site.name);
            }
            items.extend(local);
        }

        let mut queue = Self::from_items(site, items);
        if queue.site.deduplicate {
            queue.deduplicate();
        }

        for item in &queue.items {
            tracing::debug!("{}", item);
        }
        tracing::info!(
            "Site {}: {} of {} directories queued",
            queue.site.name,
            queue.transferable().count(),
            queue.items.len()
        );

        queue
    }

    /// Wrap already evaluated items, sorting them by entry name.
    pub fn from_items(site: Arc<Site>, mut items: Vec<Item>) -> Self {
        items.sort_by(|a, b| a.entry.name.cmp(&b.entry.name));
        Self { site, items }
    }

    /// Merge duplicate releases, keeping the highest-priority one of each.
    /// Returns the number of merged items.
    ///
    /// Local copies that win stay out of the queue. Local copies that lose
    /// remain as merged items so the post command can see them.
    pub fn deduplicate(&mut self) -> usize {
        let merged = dedup::deduplicate(&self.site, &mut self.items);
        self.items.retain(|i| !(i.local && i.transfer));
        self.items.sort_by(|a, b| a.entry.name.cmp(&b.entry.name));
        merged
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items to transfer, in queue order.
    pub fn transferable(&self) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(|item| item.transfer)
    }

    /// The transfer tool script for all transferable items.
    pub fn script(&self) -> Script {
        let mut script = Script::new(&self.site.name, &self.site.client.get_cmd);
        for item in self.transferable() {
            script.push(&item.remote_path, item.dst_dir().display().to_string());
        }
        script
    }

    /// The queue as JSON, as passed to the post command.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&QueueJson {
            site: &self.site.name,
            items: &self.items,
        })?)
    }

    /// The configured post command with the queue as its input, if any.
    pub fn post_command(&self) -> Result<Option<PostCommand>> {
        match &self.site.post_command {
            None => Ok(None),
            Some(command) => PostCommand::new(command, self.to_json()?).map(Some),
        }
    }

    /// Run the post command. Succeeds trivially when none is configured.
    pub fn run_post_command(&self) -> Result<()> {
        match self.post_command()? {
            Some(cmd) => cmd.run(),
            None => Ok(()),
        }
    }
}
