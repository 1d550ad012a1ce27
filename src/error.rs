//! Error taxonomy for `tmlgen`.
//!
//! Configuration problems are reported before any traversal starts and map to
//! exit status 2. Everything that goes wrong once the run is under way
//! (fatal walk errors, an empty catalog, output I/O) maps to exit status 1.
//! Naming collisions never surface here: the display-name fallback always
//! terminates with a fresh name.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("threshold must be > 0 (got {0})")]
    InvalidThreshold(i64),

    #[error("game-root is required")]
    MissingGameRoot,

    #[error("bad game-root: {}", .0.display())]
    BadGameRoot(PathBuf),

    #[error("path not under game-root: {0}")]
    PathOutsideRoot(String),

    #[error("bad scan path: {}", .0.display())]
    BadScanPath(PathBuf),

    #[error("no valid --path provided")]
    NoScanPaths,

    #[error("skip path not under game-root: {0}")]
    SkipOutsideRoot(String),

    #[error("out exists and is not a directory: {}", .0.display())]
    OutNotDirectory(PathBuf),

    #[error("out directory is not empty (use --force): {}", .0.display())]
    OutNotEmpty(PathBuf),

    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("no .p3d found")]
    NoInput,

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build scan worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl CatalogError {
    /// Wraps an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        CatalogError::Io {
            context: context.into(),
            source,
        }
    }

    /// True for errors caused by invalid configuration rather than by the run itself.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidThreshold(_)
                | CatalogError::MissingGameRoot
                | CatalogError::BadGameRoot(_)
                | CatalogError::PathOutsideRoot(_)
                | CatalogError::BadScanPath(_)
                | CatalogError::NoScanPaths
                | CatalogError::SkipOutsideRoot(_)
                | CatalogError::OutNotDirectory(_)
                | CatalogError::OutNotEmpty(_)
        )
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_config() { 2 } else { 1 }
    }
}
