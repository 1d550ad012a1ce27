//! Data structures passed between the pipeline stages.
//!
//! The scan produces [`ScanRecord`]s, grouping turns them into
//! [`GroupedRecord`]s and [`Library`] buckets, and naming finally yields a
//! [`LibraryPlan`] per library with one [`TemplateEntry`] per model file.

use crate::style::LibraryStyle;
use crate::tree::NodeId;

/// One discovered model file bound to the node of its containing directory.
///
/// # Fields
/// * `rel_path` - Path relative to the catalog root, `/`-separated, original case
/// * `dir_node` - Tree node of the immediate parent directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRecord {
    pub rel_path: String,
    pub dir_node: NodeId,
}

/// A scan record after its group anchor has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedRecord {
    pub rel_path: String,
    pub group_key: String,
    pub anchor: NodeId,
}

/// A bucket of model files sharing one group anchor.
///
/// # Fields
/// * `key` - Group key as derived from the tree (original case)
/// * `name` - Lowercased key; used for the output file and the library name
/// * `members` - Relative paths, sorted and deduplicated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    pub key: String,
    pub name: String,
    pub members: Vec<String>,
}

/// One model file as it will appear inside a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    /// Catalog-wide unique display name.
    pub display_name: String,
    pub rel_path: String,
    /// Stable hash of the file's base name.
    pub hash: i32,
}

/// A fully named and styled library, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryPlan {
    pub key: String,
    pub name: String,
    pub style: LibraryStyle,
    pub templates: Vec<TemplateEntry>,
}
