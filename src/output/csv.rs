//! CSV summary of the generated libraries.
//!
//! One row per library, in output order, so the catalog can be inspected or
//! diffed without opening the `.tml` files.

use crate::data::LibraryPlan;
use crate::style::Shape;
use anyhow::{Context, Result};
use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// A single summary row.
#[derive(Debug, Serialize)]
pub struct LibraryRow<'a> {
    pub name: &'a str,
    pub key: &'a str,
    pub templates: usize,
    pub fill: i32,
    pub outline: i32,
    pub shape: Shape,
}

impl<'a> From<&'a LibraryPlan> for LibraryRow<'a> {
    fn from(plan: &'a LibraryPlan) -> Self {
        Self {
            name: &plan.name,
            key: &plan.key,
            templates: plan.templates.len(),
            fill: plan.style.fill,
            outline: plan.style.outline,
            shape: plan.style.shape,
        }
    }
}

/// Serializes the summary into any writer.
pub fn write_summary<W: io::Write>(writer: W, plans: &[LibraryPlan]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    for plan in plans {
        csv_writer.serialize(LibraryRow::from(plan))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the summary to `path`.
pub fn render(path: &Path, plans: &[LibraryPlan]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create summary {}", path.display()))?;
    write_summary(file, plans)
}
