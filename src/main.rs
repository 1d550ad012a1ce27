//! Main entry point for the `tmlgen` CLI.
//!
//! Parses arguments, validates them into a [`CatalogConfig`], prepares the
//! output directory, then runs the Walk, Group and Write phases and prints a
//! one-line summary on stdout. Logs and the optional profile go to stderr.
//!
//! Exit status: 0 on success, 2 for configuration errors, 1 for anything
//! that fails once the run is under way.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tmlgen::catalog::plan_libraries;
use tmlgen::group::group_records;
use tmlgen::metrics::{ProfileData, print_profile_summary, rss_after_phase, save_stats_json};
use tmlgen::output::{prepare_out, render_csv, render_terminal, terminal, write_libraries};
use tmlgen::paths::clean_abs;
use tmlgen::scan::scan_catalog;
use tmlgen::{Args, CatalogConfig, CatalogError, logging, time_phase};
use tracing::{error, info};

fn run(args: &Args) -> Result<()> {
    let config = CatalogConfig::from_args(args)?;
    let out = clean_abs(&args.out);
    prepare_out(&out, args.force)?;

    let mut profile = ProfileData::new();

    let (scanned, walk) = time_phase!("Walk", { scan_catalog(&config) });
    let scanned = scanned?;
    profile.add_phase(walk);
    profile.record_memory(rss_after_phase());

    let (plans, group) = time_phase!("Group", {
        let libraries = group_records(&scanned.tree, &scanned.records, config.threshold);
        plan_libraries(libraries)
    });
    profile.add_phase(group);
    info!(libraries = plans.len(), threshold = config.threshold, "grouped");

    let (written, write) = time_phase!("Write", { write_libraries(&out, &plans) });
    let written = written?;
    profile.add_phase(write);
    profile.record_memory(rss_after_phase());
    info!(files = written.len(), out = %out.display(), "libraries written");

    if let Some(summary) = &args.summary {
        render_csv(Path::new(summary), &plans)
            .with_context(|| format!("failed to write summary {summary}"))?;
    }

    let line = terminal::summary_line(
        &config.game_root,
        scanned.file_count(),
        plans.len(),
        config.threshold,
        &out,
    );
    render_terminal(&plans, &line, args.quiet);

    if args.profile {
        profile.add_metadata("p3d", scanned.file_count());
        profile.add_metadata("groups", plans.len());
        profile.add_metadata("workers", config.workers);
        print_profile_summary(&profile);
        let stats = save_stats_json(&out, &profile)?;
        info!(path = %stats.display(), "profile stats saved");
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_logger();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<CatalogError>()
                .map_or(1, CatalogError::exit_code);
            error!("{err:#}");
            ExitCode::from(code)
        }
    }
}
