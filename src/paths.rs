//! Path normalization helpers.
//!
//! Everything here is lexical: no function touches the filesystem except
//! [`clean_abs`], which consults the current directory to absolutize a
//! relative input. Relative paths handed around the rest of the crate are
//! forward-slash strings with their original case preserved.

use std::path::{Component, Path, PathBuf};

/// Splits a relative path into its non-empty segments, dropping `.` segments.
pub fn split_segs(rel: &str) -> Vec<&str> {
    rel.split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect()
}

/// Joins the normal components of `path` with `/`.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns `path` relative to `base` as a forward-slash string.
///
/// `None` when `path` does not live under `base`. The base itself maps to `""`.
pub fn relative_to(base: &Path, path: &Path) -> Option<String> {
    path.strip_prefix(base).ok().map(to_slash)
}

/// Replaces forward slashes with backslashes, as TerrainBuilder expects.
pub fn to_backslashes(p: &str) -> String {
    p.replace('/', "\\")
}

/// Strips the extension (from the last `.`) off a file name.
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Lexically cleans a path: drops `.`, resolves `..` against preceding
/// normal components, never climbs above a root.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Normalizes a bare Windows drive (`P:`, `P:/`, `P:\`) to `P:\`.
pub fn normalize_drive_root(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let is_drive = (bytes.len() == 2 || bytes.len() == 3)
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'\\' || bytes[2] == b'/');

    is_drive.then(|| format!("{}:\\", (bytes[0] as char).to_ascii_uppercase()))
}

/// Trims, absolutizes and cleans a user-supplied path.
///
/// An empty or blank input yields an empty `PathBuf`.
pub fn clean_abs(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PathBuf::new();
    }

    if cfg!(windows) {
        if let Some(drive) = normalize_drive_root(trimmed) {
            return PathBuf::from(drive);
        }
    }

    let path = Path::new(trimmed);
    let abs = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    clean_path(&abs)
}

/// True when `path` equals `prefix` or lies beneath it (component-wise).
pub fn starts_with_path_prefix(path: &Path, prefix: &Path) -> bool {
    path.starts_with(prefix)
}

/// Lexically cleans a forward-slash path, keeping leading `..` on relative input.
pub fn clean_slash(p: &str) -> String {
    let rooted = p.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();
    for seg in p.split('/') {
        match seg {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !rooted {
                    parts.push("..");
                }
            }
            _ => parts.push(seg),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Normalizes a relative path for skip-rule comparison.
///
/// Returns `""` for anything that is empty, the current directory, or
/// escapes upward; such inputs never match a rule.
pub fn normalize_rel_for_match(rel: &str) -> String {
    let rel = rel.trim();
    if rel.is_empty() {
        return String::new();
    }

    let rel = if cfg!(windows) {
        rel.replace('\\', "/")
    } else {
        rel.to_string()
    };
    let cleaned = clean_slash(&rel);
    let cleaned = cleaned.strip_prefix("./").unwrap_or(&cleaned);
    let cleaned = cleaned.trim_start_matches('/');

    if cleaned == "." || cleaned == ".." || cleaned.starts_with("../") {
        return String::new();
    }
    cleaned.to_string()
}
