//! Worker pool sizing for the scan pipeline.
//!
//! The pipeline runs a fixed number of consumer workers on a dedicated rayon
//! pool while the calling thread walks the directory tree.
//!
//! # Strategies
//! - `Default`: one worker per logical CPU
//! - `Fixed`: exactly the number of threads requested
//! - `NumCpusMinus1`: leaves one CPU free for the walking thread
//! - `IOHeavy`: twice the CPU count, for slow or networked drives

use crate::error::CatalogError;
use clap::ValueEnum;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Thread pool configuration strategies.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum ThreadPoolStrategy {
    /// One worker per logical CPU
    #[default]
    Default,
    /// Use a fixed number of threads
    Fixed,
    /// Use number of CPUs minus 1 (leaves one CPU free)
    NumCpusMinus1,
    /// Optimized for I/O-heavy workloads (2x CPU count)
    IOHeavy,
}

impl ThreadPoolStrategy {
    /// Returns a string representation of the strategy for display purposes.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadPoolStrategy::Default => "Default",
            ThreadPoolStrategy::Fixed => "Fixed",
            ThreadPoolStrategy::NumCpusMinus1 => "NumCpusMinus1",
            ThreadPoolStrategy::IOHeavy => "IOHeavy",
        }
    }

    /// Number of scan workers this strategy asks for.
    ///
    /// An explicit `threads` value always wins, whatever the strategy; `Fixed`
    /// without one falls back to the CPU count. The result is never zero.
    pub fn worker_count(&self, threads: Option<usize>) -> usize {
        let cpus = num_cpus::get();
        let n = match (self, threads) {
            (_, Some(n)) => n,
            (ThreadPoolStrategy::Default, None) | (ThreadPoolStrategy::Fixed, None) => cpus,
            (ThreadPoolStrategy::NumCpusMinus1, None) => cpus.saturating_sub(1),
            (ThreadPoolStrategy::IOHeavy, None) => cpus * 2,
        };
        n.max(1)
    }
}

/// Builds a dedicated pool of `workers` scan threads.
///
/// # Errors
/// [`CatalogError::ThreadPool`] if the OS refuses to spawn the threads.
pub fn build_pool(workers: usize) -> Result<ThreadPool, CatalogError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|idx| format!("scan-worker-{idx}"))
        .build()?;
    Ok(pool)
}
