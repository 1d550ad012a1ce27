//! Validated run configuration.
//!
//! [`CatalogConfig`] is what the pipeline consumes. It is normally built from
//! the parsed command line with [`CatalogConfig::from_args`], but can also be
//! assembled directly when `tmlgen` is used as a library.

use crate::cli::Args;
use crate::error::CatalogError;
use crate::paths::{clean_abs, clean_path, starts_with_path_prefix};
use crate::skip::SkipMatcher;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default minimum number of objects per library.
pub const DEFAULT_THRESHOLD: i64 = 75;

/// Skip rules applied when none are given on the command line.
pub const DEFAULT_SKIP: &[&str] = &[
    "animals",
    "characters",
    "data",
    "gear",
    "vehicles",
    "weapons",
];

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog root every relative path is computed against.
    pub game_root: PathBuf,
    /// Absolute, cleaned directories to walk; all inside `game_root`.
    pub scan_roots: Vec<PathBuf>,
    pub skip: SkipMatcher,
    pub threshold: usize,
    /// Number of scan workers.
    pub workers: usize,
    /// Show a progress spinner during the walk.
    pub progress: bool,
}

fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

impl CatalogConfig {
    /// Validates raw settings.
    ///
    /// Scan paths may be relative to `game_root` or absolute inside it; blank
    /// entries are ignored. Defaults to one worker per CPU and no spinner.
    ///
    /// # Errors
    /// Any configuration variant of [`CatalogError`], checked in order:
    /// threshold, game root, skip rules, scan paths.
    pub fn new<P: AsRef<str>, S: AsRef<str>>(
        game_root: &str,
        paths: &[P],
        skip: &[S],
        threshold: i64,
    ) -> Result<Self, CatalogError> {
        if threshold <= 0 {
            return Err(CatalogError::InvalidThreshold(threshold));
        }

        let game_root = clean_abs(game_root);
        if game_root.as_os_str().is_empty() {
            return Err(CatalogError::MissingGameRoot);
        }
        if !is_dir(&game_root) {
            return Err(CatalogError::BadGameRoot(game_root));
        }

        let skip = SkipMatcher::build(&game_root, skip)?;

        let mut scan_roots = Vec::with_capacity(paths.len());
        for raw in paths {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }

            let abs = if Path::new(raw).is_absolute() {
                clean_abs(raw)
            } else {
                clean_path(&game_root.join(raw))
            };
            if !starts_with_path_prefix(&abs, &game_root) {
                return Err(CatalogError::PathOutsideRoot(raw.to_string()));
            }
            if !is_dir(&abs) {
                return Err(CatalogError::BadScanPath(abs));
            }
            scan_roots.push(abs);
        }
        if scan_roots.is_empty() {
            return Err(CatalogError::NoScanPaths);
        }

        Ok(Self {
            game_root,
            scan_roots,
            skip,
            threshold: threshold as usize,
            workers: num_cpus::get().max(1),
            progress: false,
        })
    }

    /// Builds the configuration from parsed command-line arguments.
    pub fn from_args(args: &Args) -> Result<Self, CatalogError> {
        let config = Self::new(&args.game_root, &args.path, &args.skip, args.threshold)?;
        let workers = args.threads_strategy.worker_count(args.threads);
        debug!(
            strategy = args.threads_strategy.as_str(),
            workers,
            "sized scan worker pool"
        );
        Ok(config.with_workers(workers).with_progress(!args.quiet))
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}
