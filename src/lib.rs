//! Library crate for `tmlgen`.
//!
//! `tmlgen` scans a game asset tree for `.p3d` models and writes
//! TerrainBuilder template libraries (`.tml`), one per directory group.
//!
//! # Pipeline
//!
//! 1. [`config`]: validate catalog root, scan roots, skip rules and threshold
//! 2. [`scan`]: walk the scan roots and build the [`tree::DirTree`] with a worker pool
//! 3. [`group`]: pick each file's group anchor and partition into libraries
//! 4. [`naming`] and [`style`]: catalog-wide unique names, colors and shapes
//! 5. [`output`]: write the `.tml` files plus optional summaries
//!
//! [`catalog::build_catalog`] runs steps 2 to 4 in one call.
//!
//! # Example
//!
//! ```no_run
//! use tmlgen::{CatalogConfig, build_catalog};
//!
//! let config = CatalogConfig::new("/srv/p", &["DZ"], &["data"], 75)?;
//! let catalog = build_catalog(&config)?;
//! for library in &catalog.libraries {
//!     println!("{} ({} templates)", library.name, library.templates.len());
//! }
//! # Ok::<(), tmlgen::CatalogError>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod group;
pub mod logging;
pub mod metrics;
pub mod naming;
pub mod output;
pub mod paths;
pub mod scan;
pub mod skip;
pub mod style;
pub mod thread_pool;
pub mod tree;

pub use catalog::{Catalog, build_catalog};
pub use cli::Args;
pub use config::CatalogConfig;
pub use data::{Library, LibraryPlan, ScanRecord, TemplateEntry};
pub use error::CatalogError;
