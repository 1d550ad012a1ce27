//! Phase timing and the optional `--profile` report.
//!
//! - [`PhaseTimer`] times one pipeline phase (`Walk`, `Group`, `Write`)
//! - [`rss_after_phase`] samples the process RSS through `sysinfo`
//! - [`print_profile_summary`] and [`save_stats_json`] report the result
//!
//! ```rust
//! use tmlgen::metrics::{PhaseTimer, ProfileData, rss_after_phase};
//!
//! let mut profile = ProfileData::new();
//! let timer = PhaseTimer::new("Walk");
//! // ... walk ...
//! profile.add_phase(timer.finish());
//! profile.record_memory(rss_after_phase());
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sysinfo::System;

/// A running timer for one named phase.
#[derive(Debug, Clone)]
pub struct PhaseTimer {
    pub name: String,
    pub start: Instant,
}

impl PhaseTimer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Stops the timer.
    pub fn finish(self) -> PhaseResult {
        PhaseResult {
            name: self.name,
            duration: self.start.elapsed(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseResult {
    pub name: String,
    /// Serialized as whole milliseconds.
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}

/// Timings, peak memory and run counters for one invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileData {
    pub phases: Vec<PhaseResult>,
    /// Highest RSS sampled, in bytes.
    pub memory_peak: Option<u64>,
    pub metadata: BTreeMap<String, String>,
}

impl ProfileData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_phase(&mut self, phase: PhaseResult) {
        self.phases.push(phase);
    }

    /// Keeps the larger of the current peak and `sample`.
    pub fn record_memory(&mut self, sample: Option<u64>) {
        if let Some(bytes) = sample {
            self.memory_peak = Some(self.memory_peak.map_or(bytes, |peak| peak.max(bytes)));
        }
    }

    pub fn add_metadata(&mut self, key: &str, value: impl ToString) {
        self.metadata.insert(key.to_string(), value.to_string());
    }

    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|p| p.duration).sum()
    }
}

/// Current resident set size in bytes, or `None` where `sysinfo` cannot tell.
pub fn rss_after_phase() -> Option<u64> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut system = System::new();
    system.refresh_process(pid);
    system.process(pid).map(|process| process.memory())
}

/// Prints the phase table to stderr.
///
/// ```text
/// Phase timings
///   Walk                412 ms
///   Group                 9 ms
///   Write                31 ms
/// Memory peak:      42.0 MB
/// ```
pub fn print_profile_summary(profile: &ProfileData) {
    eprintln!("\nPhase timings");
    for phase in &profile.phases {
        eprintln!("  {:<15} {:>7} ms", phase.name, phase.duration.as_millis());
    }
    eprintln!("  {:<15} {:>7} ms", "Total", profile.total_duration().as_millis());

    if let Some(memory_peak) = profile.memory_peak {
        eprintln!("Memory peak:      {:.1} MB", memory_peak as f64 / (1024.0 * 1024.0));
    }

    for (key, value) in &profile.metadata {
        eprintln!("  {:<15} {}", key, value);
    }
}

/// Location of `stats.json`: beside the output directory, not inside it.
pub fn stats_path(out_dir: &Path) -> PathBuf {
    out_dir.with_file_name("stats.json")
}

/// Writes `stats.json` and returns its path.
pub fn save_stats_json(out_dir: &Path, profile: &ProfileData) -> Result<PathBuf> {
    let path = stats_path(out_dir);
    let stats = serde_json::json!({
        "phases": profile.phases,
        "total_duration_ms": profile.total_duration().as_millis() as u64,
        "memory_peak_bytes": profile.memory_peak,
        "metadata": profile.metadata,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    std::fs::write(&path, serde_json::to_string_pretty(&stats)?)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Times a block, yielding `(value, PhaseResult)`.
///
/// ```rust
/// use tmlgen::time_phase;
///
/// let (answer, timing) = time_phase!("Group", { 6 * 7 });
/// assert_eq!(answer, 42);
/// assert_eq!(timing.name, "Group");
/// ```
#[macro_export]
macro_rules! time_phase {
    ($name:expr, $code:block) => {{
        let timer = $crate::metrics::PhaseTimer::new($name);
        let result = $code;
        (result, timer.finish())
    }};
}
