//! Duplicate release elimination.

use std::collections::HashMap;

use scenefetch_parser::{MediaInfo, MediaKey};

use super::Item;
use crate::site::Site;

/// Keep only the highest-weighted transferable item per media identity.
///
/// Ties keep a local copy if there is one, otherwise the item that comes
/// first. Every other member of a group stops transferring, is marked merged
/// and mirrors the kept item's entry and destination. Returns the number of
/// merged items.
pub(crate) fn deduplicate(site: &Site, items: &mut [Item]) -> usize {
    let mut groups: HashMap<MediaKey, Vec<usize>> = HashMap::new();
    for (i, item) in items.iter().enumerate() {
        if !item.transfer {
            continue;
        }
        if let Some(key) = item.media.as_ref().and_then(MediaInfo::key) {
            groups.entry(key).or_default().push(i);
        }
    }

    let mut merged = 0;
    for indices in groups.values().filter(|g| g.len() > 1) {
        let weights: Vec<usize> = indices.iter().map(|&i| items[i].weight(site)).collect();

        let mut best = 0;
        for (pos, &w) in weights.iter().enumerate() {
            let local_tie =
                w == weights[best] && items[indices[pos]].local && !items[indices[best]].local;
            if w > weights[best] || local_tie {
                best = pos;
            }
        }

        let keep = indices[best];
        let kept = items[keep].clone();

        for (pos, &i) in indices.iter().enumerate() {
            if i == keep {
                continue;
            }
            tracing::debug!(
                "{} duplicates {} (weight {} <= {})",
                items[i].remote_path,
                kept.remote_path,
                weights[pos],
                weights[best]
            );
            items[i].merge(&kept, weights[pos]);
            merged += 1;
        }
    }

    merged
}
