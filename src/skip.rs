//! Case-insensitive skip-prefix rules.
//!
//! Rules are compiled once from the `--skip` values and tested against every
//! entry the walk visits. A rule ending in `*` matches any path starting with
//! the text before the `*`. Any other rule matches the path itself, its
//! descendants, and also any path that merely starts with the rule text:
//! `data` matches `data_extra/foo.p3d` as well as `Data/foo.p3d`.

use crate::error::CatalogError;
use crate::paths::{clean_abs, normalize_rel_for_match, relative_to, starts_with_path_prefix};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SkipRule {
    /// Plain rule, lowercased and normalized.
    Prefix(String),
    /// Rule that ended in `*`; holds the text before the `*`.
    Wildcard(String),
}

impl SkipRule {
    fn matches(&self, rel: &str) -> bool {
        match self {
            SkipRule::Wildcard(base) => rel.starts_with(base.as_str()),
            SkipRule::Prefix(prefix) => rel.starts_with(prefix.as_str()),
        }
    }
}

/// Compiled set of skip rules.
#[derive(Debug, Clone, Default)]
pub struct SkipMatcher {
    rules: Vec<SkipRule>,
}

impl SkipMatcher {
    /// Compiles raw rule strings.
    ///
    /// Absolute rules must lie inside `game_root` and are rebased onto it;
    /// relative rules are taken as-is. Blank rules and rules that normalize to
    /// nothing are dropped.
    ///
    /// # Errors
    /// [`CatalogError::SkipOutsideRoot`] for an absolute rule outside `game_root`.
    pub fn build<S: AsRef<str>>(game_root: &Path, raw_rules: &[S]) -> Result<Self, CatalogError> {
        let mut rules = Vec::with_capacity(raw_rules.len());

        for raw in raw_rules {
            let raw = raw.as_ref().trim();
            if raw.is_empty() {
                continue;
            }

            let rel = if Path::new(raw).is_absolute() {
                let abs = clean_abs(raw);
                if !starts_with_path_prefix(&abs, game_root) {
                    return Err(CatalogError::SkipOutsideRoot(raw.to_string()));
                }
                relative_to(game_root, &abs)
                    .ok_or_else(|| CatalogError::SkipOutsideRoot(raw.to_string()))?
            } else {
                raw.to_string()
            };

            let normalized = normalize_rel_for_match(&rel).to_lowercase();
            if normalized.is_empty() {
                continue;
            }

            match normalized.strip_suffix('*') {
                // A lone `*` never matched anything.
                Some("") => {}
                Some(base) => rules.push(SkipRule::Wildcard(base.to_string())),
                None => rules.push(SkipRule::Prefix(normalized)),
            }
        }

        Ok(Self { rules })
    }

    /// True if the relative path `rel` is covered by any rule.
    pub fn is_match(&self, rel: &str) -> bool {
        if self.rules.is_empty() {
            return false;
        }

        let rel = normalize_rel_for_match(rel);
        if rel.is_empty() {
            return false;
        }

        let rel = rel.to_lowercase();
        self.rules.iter().any(|rule| rule.matches(&rel))
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn matcher(rules: &[&str]) -> SkipMatcher {
        SkipMatcher::build(Path::new("/srv/p"), rules).unwrap()
    }

    #[test]
    fn test_case_insensitive_prefix() {
        let m = matcher(&["data"]);
        assert!(m.is_match("Data/foo.p3d"));
        assert!(m.is_match("DATA"));
        assert!(m.is_match("data/sub/dir"));
        assert!(!m.is_match("dz/data/foo.p3d"));
    }

    #[test]
    fn test_prefix_has_no_segment_boundary() {
        let m = matcher(&["data"]);
        assert!(m.is_match("data_extra/foo.p3d"));

        let m = matcher(&["dat"]);
        assert!(m.is_match("database"));
    }

    #[test]
    fn test_wildcard_rule() {
        let m = matcher(&["dz/plants_*"]);
        assert!(m.is_match("DZ/Plants_Bliss/tree.p3d"));
        assert!(!m.is_match("dz/plants/tree.p3d"));

        let lone = matcher(&["*"]);
        assert!(lone.is_empty());
        assert!(!lone.is_match("anything"));
    }

    #[test]
    fn test_blank_and_escaping_rules_are_dropped() {
        let m = matcher(&["", "   ", ".", "../outside"]);
        assert!(m.is_empty());
        assert!(!m.is_match("dz/foo.p3d"));
    }

    #[test]
    fn test_rules_are_normalized() {
        let m = matcher(&["./DZ/Gear/"]);
        assert_eq!(m.len(), 1);
        assert!(m.is_match("dz/gear/tools/hammer.p3d"));
    }

    #[test]
    fn test_empty_candidate_never_matches() {
        let m = matcher(&["dz"]);
        assert!(!m.is_match(""));
        assert!(!m.is_match("."));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_rule_inside_root() {
        let m = matcher(&["/srv/p/DZ/Weapons"]);
        assert!(m.is_match("dz/weapons/ak.p3d"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_rule_outside_root() {
        let err = SkipMatcher::build(&PathBuf::from("/srv/p"), &["/srv/other"]).unwrap_err();
        assert!(matches!(err, CatalogError::SkipOutsideRoot(ref s) if s == "/srv/other"));
    }
}
