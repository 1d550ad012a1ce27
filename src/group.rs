//! Grouping of scanned files into libraries.
//!
//! Anchors are resolved only once the scan has fully drained, so every
//! decision sees final counts. Libraries are merged by the lowercased group
//! key and come out sorted by their case-preserved key, with members sorted
//! and deduplicated.

use crate::data::{GroupedRecord, Library, ScanRecord};
use crate::tree::DirTree;
use std::collections::BTreeMap;

/// Resolves the group anchor and key of every record.
pub fn resolve_anchors(
    tree: &DirTree,
    records: &[ScanRecord],
    threshold: usize,
) -> Vec<GroupedRecord> {
    records
        .iter()
        .map(|record| {
            let anchor = tree.pick_group(record.dir_node, threshold);
            GroupedRecord {
                rel_path: record.rel_path.clone(),
                group_key: tree.node_key(anchor),
                anchor,
            }
        })
        .collect()
}

/// Partitions grouped records into libraries ordered by key.
///
/// Keys that differ only in case land in the same library; its `key` is the
/// lexicographically smallest of them. The order is byte-wise on that key,
/// so `DZ_plants` sorts before `a_b`.
pub fn partition(grouped: &[GroupedRecord]) -> Vec<Library> {
    let mut buckets: BTreeMap<String, Library> = BTreeMap::new();

    for record in grouped {
        let name = record.group_key.to_lowercase();
        let library = buckets.entry(name.clone()).or_insert_with(|| Library {
            key: record.group_key.clone(),
            name,
            members: Vec::new(),
        });
        if record.group_key < library.key {
            library.key = record.group_key.clone();
        }
        library.members.push(record.rel_path.clone());
    }

    let mut libraries: Vec<Library> = buckets
        .into_values()
        .map(|mut library| {
            library.members.sort();
            library.members.dedup();
            library
        })
        .collect();
    libraries.sort_by(|a, b| a.key.cmp(&b.key));
    libraries
}

/// Convenience wrapper: resolve anchors, then partition.
pub fn group_records(tree: &DirTree, records: &[ScanRecord], threshold: usize) -> Vec<Library> {
    partition(&resolve_anchors(tree, records, threshold))
}
