//! End-to-end catalog construction.
//!
//! Runs the scan, resolves groups once the workers are joined, then names
//! every template serially: libraries in key order, members in path order,
//! all sharing one [`UsedNames`] registry. Given the same tree on disk and
//! the same configuration, the output is identical from run to run.

use crate::config::CatalogConfig;
use crate::data::{Library, LibraryPlan, TemplateEntry};
use crate::error::CatalogError;
use crate::group::group_records;
use crate::naming::{UsedNames, stable_hash, unique_display_name};
use crate::paths::{split_segs, strip_extension};
use crate::scan::scan_catalog;
use crate::style::LibraryStyle;
use tracing::info;

/// A fully resolved catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Number of model files found by the scan.
    pub file_count: usize,
    pub libraries: Vec<LibraryPlan>,
}

/// Names one model file, registering its display name in `used`.
///
/// Returns `None` for a path without any segment.
pub fn template_entry(rel_path: String, used: &mut UsedNames) -> Option<TemplateEntry> {
    let segs = split_segs(&rel_path);
    let base = strip_extension(segs.last()?);
    let display_name = unique_display_name(base, &rel_path, used);
    let hash = stable_hash(base);

    Some(TemplateEntry {
        display_name,
        rel_path,
        hash,
    })
}

/// Styles a library and names its members in order.
pub fn plan_library(library: Library, used: &mut UsedNames) -> LibraryPlan {
    let style = LibraryStyle::for_library(&library.key);
    let templates = library
        .members
        .into_iter()
        .filter_map(|rel_path| template_entry(rel_path, used))
        .collect();

    LibraryPlan {
        key: library.key,
        name: library.name,
        style,
        templates,
    }
}

/// Names every library with one catalog-wide registry.
///
/// `libraries` must already be in their final order; see [`crate::group::partition`].
pub fn plan_libraries(libraries: Vec<Library>) -> Vec<LibraryPlan> {
    let total = libraries.iter().map(|l| l.members.len()).sum();
    let mut used = UsedNames::with_capacity(total);

    libraries
        .into_iter()
        .map(|library| plan_library(library, &mut used))
        .collect()
}

/// Scans, groups and names in one go.
pub fn build_catalog(config: &CatalogConfig) -> Result<Catalog, CatalogError> {
    let scanned = scan_catalog(config)?;
    let libraries = group_records(&scanned.tree, &scanned.records, config.threshold);
    info!(libraries = libraries.len(), threshold = config.threshold, "grouped");

    Ok(Catalog {
        file_count: scanned.file_count(),
        libraries: plan_libraries(libraries),
    })
}
