//! File system scanning module for `tmlgen`.
//!
//! This module handles:
//! - Recursive traversal of every scan root using `WalkDir`, on the calling thread
//! - Pruning of subtrees matched by the skip rules
//! - A bounded `crossbeam-channel` queue feeding a fixed pool of rayon workers
//! - Insertion of every model file into the shared [`DirTree`]
//! - Progress spinner via `indicatif`
//!
//! Each worker takes one lock per file and, while holding it, inserts the
//! file's directory into the tree and appends the matching [`ScanRecord`].
//! Insertion commutes, so the final tree and record set do not depend on
//! how the workers interleave (record order does, and callers sort).

use crate::config::CatalogConfig;
use crate::data::ScanRecord;
use crate::error::CatalogError;
use crate::paths::{relative_to, split_segs};
use crate::skip::SkipMatcher;
use crate::thread_pool::build_pool;
use crate::tree::{DirTree, NodeId};
use crossbeam_channel::{Sender, bounded};
use indicatif::{ProgressBar, ProgressStyle};
use parking_lot::Mutex;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Capacity of the queue between the walking thread and the workers.
pub const QUEUE_CAPACITY: usize = 8192;

/// Extension of the model files that get cataloged, compared case-insensitively.
pub const MODEL_EXTENSION: &str = "p3d";

/// Result of a completed scan: the aggregation tree and one record per file.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub tree: DirTree,
    pub records: Vec<ScanRecord>,
}

impl ScanOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one catalog-relative file path.
    ///
    /// The directory part goes into the tree; the file is recorded against
    /// the resulting node. Paths without any segment are ignored.
    pub fn record(&mut self, rel_path: String) -> Option<NodeId> {
        let segs = split_segs(&rel_path);
        let (_file_name, dir_segs) = segs.split_last()?;
        let dir_node = self.tree.insert(dir_segs);
        self.records.push(ScanRecord { rel_path, dir_node });
        Some(dir_node)
    }

    pub fn file_count(&self) -> usize {
        self.records.len()
    }
}

/// True if `file_name` ends in `.p3d`, any case.
pub fn is_model_file(file_name: &str) -> bool {
    file_name
        .rfind('.')
        .is_some_and(|idx| file_name[idx + 1..].eq_ignore_ascii_case(MODEL_EXTENSION))
}

/// Tests an entry against the skip rules in all three relative forms:
/// to the scan root, to the game root, and to the game root minus its first
/// segment.
fn is_skipped(skip: &SkipMatcher, rel_game: &str, rel_scan: &str) -> bool {
    if skip.is_empty() {
        return false;
    }

    let segs = split_segs(rel_game);
    let rel_game_trimmed = if segs.len() > 1 {
        segs[1..].join("/")
    } else {
        String::new()
    };

    skip.is_match(rel_scan) || skip.is_match(rel_game) || skip.is_match(&rel_game_trimmed)
}

fn spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner} Scanning models... {pos} found [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[derive(Debug, Default)]
struct WalkStats {
    candidates: usize,
    pruned_dirs: usize,
    unreadable: usize,
}

/// Walks one scan root and queues every model file it is allowed to see.
fn walk_scan_root(
    config: &CatalogConfig,
    scan_root: &Path,
    tx: &Sender<String>,
    pb: &ProgressBar,
    stats: &mut WalkStats,
) -> Result<(), CatalogError> {
    let mut it = WalkDir::new(scan_root).follow_links(false).into_iter();

    while let Some(next) = it.next() {
        let entry = match next {
            Ok(entry) => entry,
            // Unreadable directory: walkdir has already stopped descending.
            Err(err) if err.path().is_some_and(|p| p.is_dir()) => {
                warn!(error = %err, "skipping unreadable directory");
                stats.unreadable += 1;
                continue;
            }
            Err(err) => return Err(CatalogError::Walk(err)),
        };

        let is_dir = entry.file_type().is_dir();
        let rel_game = relative_to(&config.game_root, entry.path());
        let rel_scan = relative_to(scan_root, entry.path());
        let (Some(rel_game), Some(rel_scan)) = (rel_game, rel_scan) else {
            if is_dir {
                it.skip_current_dir();
            }
            continue;
        };

        if is_skipped(&config.skip, &rel_game, &rel_scan) {
            if is_dir {
                debug!(path = %rel_game, "pruning skipped directory");
                stats.pruned_dirs += 1;
                it.skip_current_dir();
            }
            continue;
        }

        if is_dir || !is_model_file(&entry.file_name().to_string_lossy()) {
            continue;
        }

        if tx.send(rel_game).is_err() {
            break;
        }
        stats.candidates += 1;
        pb.inc(1);
    }

    Ok(())
}

/// Scans every configured root and builds the aggregation tree.
///
/// The calling thread walks the roots one after another; `config.workers`
/// threads drain the queue into the tree. All workers are joined before this
/// returns, on success and on failure alike.
///
/// # Errors
/// - [`CatalogError::Walk`] for a traversal error that is not an unreadable directory
/// - [`CatalogError::NoInput`] if no model file was found
/// - [`CatalogError::ThreadPool`] if the worker pool cannot be created
pub fn scan_catalog(config: &CatalogConfig) -> Result<ScanOutcome, CatalogError> {
    let pool = build_pool(config.workers)?;
    let shared = Mutex::new(ScanOutcome::new());
    let (tx, rx) = bounded::<String>(QUEUE_CAPACITY);
    let pb = spinner(config.progress);
    let mut stats = WalkStats::default();

    info!(
        game_root = %config.game_root.display(),
        roots = config.scan_roots.len(),
        workers = config.workers,
        "scanning"
    );

    let walked = pool.in_place_scope(|scope| {
        for _ in 0..config.workers {
            let rx = rx.clone();
            let shared = &shared;
            scope.spawn(move |_| {
                for rel_path in rx.iter() {
                    shared.lock().record(rel_path);
                }
            });
        }
        drop(rx);

        let result = config
            .scan_roots
            .iter()
            .try_for_each(|root| walk_scan_root(config, root, &tx, &pb, &mut stats));
        // Closing the queue lets the workers finish what is left and exit.
        drop(tx);
        result
    });

    pb.finish_and_clear();
    debug!(
        candidates = stats.candidates,
        pruned_dirs = stats.pruned_dirs,
        unreadable = stats.unreadable,
        "walk finished"
    );
    walked?;

    let outcome = shared.into_inner();
    if outcome.records.is_empty() {
        return Err(CatalogError::NoInput);
    }

    info!(
        files = outcome.file_count(),
        nodes = outcome.tree.len(),
        "scan complete"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn config_for(root: &TempDir, paths: &[&str], skip: &[&str]) -> CatalogConfig {
        CatalogConfig::new(&root.path().to_string_lossy(), paths, skip, 75)
            .unwrap()
            .with_workers(4)
    }

    fn sorted_paths(outcome: &ScanOutcome) -> Vec<String> {
        let mut paths: Vec<String> = outcome.records.iter().map(|r| r.rel_path.clone()).collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_is_model_file() {
        assert!(is_model_file("house.p3d"));
        assert!(is_model_file("HOUSE.P3D"));
        assert!(is_model_file("a.b.p3d"));
        assert!(!is_model_file("house.p3d.bak"));
        assert!(!is_model_file("p3d"));
        assert!(!is_model_file("house.rvmat"));
    }

    #[test]
    fn test_record_pairs_node_and_path() {
        let mut outcome = ScanOutcome::new();
        let node = outcome.record("DZ/plants/tree.p3d".to_string()).unwrap();
        assert_eq!(outcome.tree.node_key(node), "DZ_plants");
        assert_eq!(outcome.records[0].dir_node, node);
        assert_eq!(outcome.tree.count(outcome.tree.root()), 1);

        let top = outcome.record("loose.p3d".to_string()).unwrap();
        assert_eq!(top, outcome.tree.root());
        assert!(outcome.record(String::new()).is_none());
        assert_eq!(outcome.file_count(), 2);
    }

    #[test]
    fn test_concurrent_records_match_sequential() {
        let paths: Vec<String> = (0..400)
            .map(|i| format!("DZ/area_{}/sub_{}/obj_{i}.p3d", i % 7, i % 3))
            .collect();

        let mut sequential = ScanOutcome::new();
        for p in &paths {
            sequential.record(p.clone());
        }

        let shared = Arc::new(Mutex::new(ScanOutcome::new()));
        std::thread::scope(|s| {
            for chunk in paths.chunks(37) {
                let shared = Arc::clone(&shared);
                s.spawn(move || {
                    for p in chunk.iter().rev() {
                        shared.lock().record(p.clone());
                    }
                });
            }
        });
        let concurrent = Arc::try_unwrap(shared).unwrap().into_inner();

        assert_eq!(concurrent.tree.len(), sequential.tree.len());
        assert_eq!(sorted_paths(&concurrent), sorted_paths(&sequential));
        for record in &sequential.records {
            let segs = split_segs(&record.rel_path);
            let dir = &segs[..segs.len() - 1];
            let a = sequential.tree.find(dir).unwrap();
            let b = concurrent.tree.find(dir).unwrap();
            assert_eq!(sequential.tree.count(a), concurrent.tree.count(b));
        }
    }

    #[test]
    fn test_scan_collects_only_models() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "DZ/plants/tree_a.p3d");
        touch(dir.path(), "DZ/plants/Tree_B.P3D");
        touch(dir.path(), "DZ/plants/tree_a.rvmat");
        touch(dir.path(), "DZ/rocks/stone.p3d");

        let outcome = scan_catalog(&config_for(&dir, &["DZ"], &[])).unwrap();
        assert_eq!(
            sorted_paths(&outcome),
            vec!["DZ/plants/Tree_B.P3D", "DZ/plants/tree_a.p3d", "DZ/rocks/stone.p3d"]
        );
        let plants = outcome.tree.find(&["DZ", "plants"]).unwrap();
        assert_eq!(outcome.tree.count(plants), 2);
    }

    #[test]
    fn test_skip_rules_prune_subtrees() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "DZ/plants/tree.p3d");
        touch(dir.path(), "DZ/plants/gear/hammer.p3d");
        touch(dir.path(), "DZ/data/barrel.p3d");
        touch(dir.path(), "DZ/structures/proxy/door.p3d");
        touch(dir.path(), "DZ/structures/houses/house.p3d");

        // "data" prunes its whole scan root through the game-relative path
        // minus "DZ"; "gear" and "proxy" match relative to their scan roots.
        let config = config_for(
            &dir,
            &["DZ/plants", "DZ/data", "DZ/structures"],
            &["data", "gear", "proxy"],
        );
        let outcome = scan_catalog(&config).unwrap();
        assert_eq!(
            sorted_paths(&outcome),
            vec!["DZ/plants/tree.p3d", "DZ/structures/houses/house.p3d"]
        );
    }

    #[test]
    fn test_overlapping_roots_are_scanned_twice() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "DZ/plants/tree.p3d");

        let outcome = scan_catalog(&config_for(&dir, &["DZ", "DZ/plants"], &[])).unwrap();
        assert_eq!(outcome.file_count(), 2);
    }

    #[test]
    fn test_no_models_is_fatal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "DZ/readme.txt");

        let err = scan_catalog(&config_for(&dir, &["DZ"], &[])).unwrap_err();
        assert!(matches!(err, CatalogError::NoInput));
    }

    #[test]
    fn test_vanished_scan_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "DZ/plants/tree.p3d");
        let config = config_for(&dir, &["DZ/plants"], &[]);
        fs::remove_dir_all(dir.path().join("DZ/plants")).unwrap();

        let err = scan_catalog(&config).unwrap_err();
        assert!(matches!(err, CatalogError::Walk(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        touch(dir.path(), "DZ/open/a.p3d");
        touch(dir.path(), "DZ/locked/b.p3d");
        let locked = dir.path().join("DZ/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = scan_catalog(&config_for(&dir, &["DZ"], &[]));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let outcome = result.unwrap();
        assert!(sorted_paths(&outcome).contains(&"DZ/open/a.p3d".to_string()));
    }
}
