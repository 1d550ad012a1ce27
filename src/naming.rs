//! Display names and stable hashes for model files.
//!
//! Every template across every library gets a display name that is unique
//! catalog-wide, compared case-insensitively. The registry of names already
//! handed out is an explicit [`UsedNames`] value owned by the caller; naming
//! must run serially over it so the result only depends on the order of calls.

use crate::paths::split_segs;
use fnv::FnvHashSet;

/// First path segment of files that belong to the base game rather than a mod.
pub const BASE_ROOT_TOKEN: &str = "dz";

/// Path keywords tried in order when a base name collides, with the suffix
/// each one contributes.
pub const CATEGORY_KEYWORDS: &[(&str, &str)] = &[
    ("wrecks", "wreck"),
    ("ruins", "ruin"),
    ("bliss", "bliss"),
    ("sakhal", "sakhal"),
    ("proxy", "proxy"),
    ("military", "military"),
    ("furniture", "furniture"),
    ("residential", "residential"),
    ("industrial", "industrial"),
];

/// Set of display names already registered, stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct UsedNames {
    names: FnvHashSet<String>,
}

impl UsedNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: FnvHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Registers `name` if it is still free. Returns whether it was.
    pub fn claim(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Suffix to try for a colliding name, derived from where the file lives.
fn disambiguation_suffix<'a>(rel_path: &'a str, lower_path: &str) -> Option<&'a str> {
    if let Some(first) = split_segs(rel_path).first() {
        if !first.eq_ignore_ascii_case(BASE_ROOT_TOKEN) {
            return Some(*first);
        }
    }

    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower_path.contains(keyword))
        .map(|(_, suffix)| *suffix)
}

/// Returns a display name for `base` that no earlier call has returned, and
/// registers it.
///
/// The base name is used verbatim when free. On collision, one candidate is
/// derived from `rel_path` (its first segment unless that is the base-game
/// root, otherwise the first matching [`CATEGORY_KEYWORDS`] entry); if that
/// is taken too, `base_1`, `base_2`, ... are tried in turn.
pub fn unique_display_name(base: &str, rel_path: &str, used: &mut UsedNames) -> String {
    if used.claim(base) {
        return base.to_string();
    }

    let lower_path = rel_path.to_lowercase();
    if let Some(suffix) = disambiguation_suffix(rel_path, &lower_path) {
        let candidate = format!("{base}_{suffix}");
        if used.claim(&candidate) {
            return candidate;
        }
    }

    (1u64..)
        .map(|i| format!("{base}_{i}"))
        .find(|name| used.claim(name))
        .unwrap_or_else(|| base.to_string())
}

/// Stable 32-bit hash of a model name.
///
/// `h = c + (h << 6) + (h << 16) - h` over the raw bytes, wrapping at 32 bits,
/// so the value is identical on every platform and run.
pub fn stable_hash(s: &str) -> i32 {
    s.bytes().fold(0i32, |h, byte| {
        (byte as i32)
            .wrapping_add(h.wrapping_shl(6))
            .wrapping_add(h.wrapping_shl(16))
            .wrapping_sub(h)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_hash_known_values() {
        assert_eq!(stable_hash(""), 0);
        assert_eq!(stable_hash("a"), 97);
        assert_eq!(stable_hash("ab"), 6363201);
        assert_eq!(stable_hash("Land_House"), stable_hash("Land_House"));
    }

    #[test]
    fn test_stable_hash_wraps() {
        // Long inputs overflow 32 bits many times over without panicking.
        let long = "wreck_hmmwv_".repeat(64);
        assert_eq!(stable_hash(&long), stable_hash(&long));
        assert_ne!(stable_hash("house"), stable_hash("House"));
    }

    #[test]
    fn test_first_use_keeps_base() {
        let mut used = UsedNames::new();
        assert_eq!(
            unique_display_name("house", "dz/structures/house.p3d", &mut used),
            "house"
        );
        assert!(used.contains("HOUSE"));
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn test_case_is_preserved_but_compared_insensitively() {
        let mut used = UsedNames::new();
        assert_eq!(
            unique_display_name("Land_Shed", "dz/a/Land_Shed.p3d", &mut used),
            "Land_Shed"
        );
        let second = unique_display_name("land_shed", "dz/b/land_shed.p3d", &mut used);
        assert_eq!(second, "land_shed_1");
    }

    #[test]
    fn test_collision_uses_mod_root() {
        let mut used = UsedNames::new();
        unique_display_name("tree", "dz/plants/tree.p3d", &mut used);
        assert_eq!(
            unique_display_name("tree", "MyMod/plants/tree.p3d", &mut used),
            "tree_MyMod"
        );
    }

    #[test]
    fn test_collision_uses_category_keyword_in_order() {
        let mut used = UsedNames::new();
        unique_display_name("house", "dz/structures/house.p3d", &mut used);
        assert_eq!(
            unique_display_name(
                "house",
                "DZ/structures/Military/Wrecks/house.p3d",
                &mut used
            ),
            "house_wreck"
        );
        assert_eq!(
            unique_display_name("house", "dz/structures_sakhal/residential/house.p3d", &mut used),
            "house_sakhal"
        );
    }

    #[test]
    fn test_taken_candidate_falls_back_to_counter() {
        let mut used = UsedNames::new();
        used.claim("house");
        used.claim("house_wreck");
        assert_eq!(
            unique_display_name("house", "dz/structures/wrecks/house.p3d", &mut used),
            "house_1"
        );
    }

    #[test]
    fn test_counter_sequence_without_keyword() {
        let mut used = UsedNames::new();
        let names: Vec<String> = (0..4)
            .map(|i| unique_display_name("crate", &format!("dz/misc/{i}/crate.p3d"), &mut used))
            .collect();
        assert_eq!(names, vec!["crate", "crate_1", "crate_2", "crate_3"]);
    }

    #[test]
    fn test_counter_skips_registered_suffixes() {
        let mut used = UsedNames::new();
        used.claim("barrel");
        used.claim("Barrel_1");
        assert_eq!(
            unique_display_name("barrel", "dz/misc/barrel.p3d", &mut used),
            "barrel_2"
        );
    }
}
