//! CLI interface definitions for the `tmlgen` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes
//! [`Args`], the struct parsed from CLI inputs. Validation of the values
//! (paths inside the game root, positive threshold, ...) happens in
//! [`crate::config::CatalogConfig::from_args`], not here.
//!
//! # Example
//!
//! ```bash
//! tmlgen -g P:/ -p DZ/plants -p DZ/structures -s DZ/structures/proxy -n 100 -o libs --force
//! ```

use crate::config::{DEFAULT_SKIP, DEFAULT_THRESHOLD};
use crate::thread_pool::ThreadPoolStrategy;
use clap::Parser;

const LONG_ABOUT: &str = "\
Generates *.tml Template Libraries by scanning P:/ (or any game root).
Designed to automate DayZ/Arma 3 map setup and keep libraries easy to refresh.

Key behavior:
- Groups files by directory nodes with --threshold, but never bubbles up to the top-level group.
- Keeps <File> paths exactly as scanned (relative to game-root, original casing).
- Ensures global-unique <Name> across all libraries; only modifies on duplicates.
- Supports --skip prefix rules (relative to scan-root or game-root) to exclude subtrees.
- Auto colors and shapes libraries based on their type; unknown types use a hash color.";

/// Command-line arguments for the `tmlgen` library generator.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tmlgen",
    version,
    disable_version_flag = true,
    about = "Template Library generator for TerrainBuilder (DayZ/Arma 3).",
    long_about = LONG_ABOUT
)]
pub struct Args {
    /// Game root directory (absolute)
    #[arg(short = 'g', long = "game-root", value_name = "DIR")]
    pub game_root: String,

    /// Output dir
    #[arg(short = 'o', long = "out", default_value = "out", value_name = "DIR")]
    pub out: String,

    /// Path to scan: relative to game-root OR absolute inside game-root (repeatable)
    #[arg(short = 'p', long = "path", required = true, value_name = "PATH")]
    pub path: Vec<String>,

    /// Skip path prefixes (repeatable)
    #[arg(
        short = 's',
        long = "skip",
        value_name = "PREFIX",
        default_values_t = DEFAULT_SKIP.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    pub skip: Vec<String>,

    /// Min objects per library
    #[arg(short = 'n', long = "threshold", default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    pub threshold: i64,

    /// Delete output directory before writing
    #[arg(short = 'f', long = "force", default_value_t = false)]
    pub force: bool,

    /// Limit the number of scan worker threads (default: use all available)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Worker pool sizing strategy
    #[arg(long = "threads-strategy", value_enum, default_value_t = ThreadPoolStrategy::Default, hide = true)]
    pub threads_strategy: ThreadPoolStrategy,

    /// Write a CSV summary of the generated libraries to FILE
    #[arg(long, value_name = "FILE")]
    pub summary: Option<String>,

    /// Print phase timings and write stats.json next to the output directory
    #[arg(long, default_value_t = false)]
    pub profile: bool,

    /// Hide the progress spinner
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,

    /// Print version
    #[arg(short = 'v', visible_short_alias = 'V', long, action = clap::ArgAction::Version)]
    pub version: Option<bool>,
}
