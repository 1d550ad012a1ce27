//! Everything that leaves the process once the catalog is built.
//!
//! - [`dir`]: output directory lifecycle
//! - [`tml`]: one TerrainBuilder library file per group
//! - [`csv`]: optional machine-readable summary
//! - [`terminal`]: listing and the final summary line

pub mod csv;
pub mod dir;
pub mod terminal;
pub mod tml;

pub use self::csv::render as render_csv;
pub use dir::prepare_out;
pub use terminal::render as render_terminal;
pub use tml::write_libraries;
