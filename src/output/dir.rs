//! Output directory lifecycle.

use crate::error::CatalogError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// Makes sure `out` exists and is an empty directory.
///
/// A missing directory is created. An existing non-empty one is an error
/// unless `force` is set, in which case it is removed and recreated.
pub fn prepare_out(out: &Path, force: bool) -> Result<(), CatalogError> {
    let meta = match fs::metadata(out) {
        Ok(meta) => meta,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(out = %out.display(), "creating output directory");
            return fs::create_dir_all(out)
                .map_err(|e| CatalogError::io(format!("mkdir {}", out.display()), e));
        }
        Err(err) => return Err(CatalogError::io(format!("stat {}", out.display()), err)),
    };

    if !meta.is_dir() {
        return Err(CatalogError::OutNotDirectory(out.to_path_buf()));
    }

    let mut entries =
        fs::read_dir(out).map_err(|e| CatalogError::io(format!("readdir {}", out.display()), e))?;
    if entries.next().is_none() {
        return Ok(());
    }

    if !force {
        return Err(CatalogError::OutNotEmpty(out.to_path_buf()));
    }

    info!(out = %out.display(), "clearing output directory");
    fs::remove_dir_all(out)
        .map_err(|e| CatalogError::io(format!("remove {}", out.display()), e))?;
    fs::create_dir_all(out).map_err(|e| CatalogError::io(format!("mkdir {}", out.display()), e))
}
