//! Terminal output for a finished run.

use crate::data::LibraryPlan;
use std::path::Path;

/// The one-line run summary printed on stdout.
pub fn summary_line(
    game_root: &Path,
    file_count: usize,
    groups: usize,
    threshold: usize,
    out: &Path,
) -> String {
    format!(
        "game_root={} p3d={} groups={} threshold={} out={}",
        game_root.display(),
        file_count,
        groups,
        threshold,
        out.display()
    )
}

/// Per-library listing, one line each: name, template count, shape.
pub fn library_lines(plans: &[LibraryPlan]) -> Vec<String> {
    let width = plans.iter().map(|p| p.name.len()).max().unwrap_or(0);
    plans
        .iter()
        .map(|p| {
            format!(
                "[LIB]  {:<width$}  {:>6}  {}",
                p.name,
                p.templates.len(),
                p.style.shape.as_str()
            )
        })
        .collect()
}

/// Prints the library listing (unless `quiet`) followed by the summary line.
pub fn render(plans: &[LibraryPlan], summary: &str, quiet: bool) {
    if !quiet {
        for line in library_lines(plans) {
            println!("{line}");
        }
    }
    println!("{summary}");
}
