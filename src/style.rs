//! Library colors and shapes.
//!
//! TerrainBuilder draws every template of a library with the library's fill
//! and outline. The category is guessed from the `_`-separated tokens of the
//! group key (`water`, `structures`, `plants`, ...); the tokens following the
//! category pick a grey outline variant so sibling libraries stay apart.
//! Unknown categories get a stable mid-tone fill derived from the name.

use crate::naming::stable_hash;

/// Outline value meaning "no outline".
pub const DEFAULT_OUTLINE: i32 = -1;

/// Grey outline variants for sub-categories.
const OUTLINE_PALETTE: [i32; 6] = [
    rgb(30, 30, 30),
    rgb(60, 60, 60),
    rgb(90, 90, 90),
    rgb(120, 120, 120),
    rgb(150, 150, 150),
    rgb(180, 180, 180),
];

/// Fill colors under `structures`, first matching sub-token wins.
const STRUCTURE_FILLS: &[(&[&str], i32)] = &[
    (&["industrial"], rgb(178, 132, 54)),
    (&["residential"], rgb(196, 178, 146)),
    (&["military"], rgb(163, 41, 41)),
    (&["roads", "road"], rgb(68, 53, 85)),
    (&["rail"], rgb(107, 43, 99)),
    (&["ruins"], rgb(92, 86, 82)),
    (&["walls"], rgb(122, 122, 90)),
    (&["wrecks"], rgb(83, 41, 14)),
    (&["signs"], rgb(212, 40, 175)),
    (&["furniture"], rgb(140, 110, 80)),
    (&["underground"], rgb(90, 96, 110)),
];

/// Single-color categories.
const PLAIN_FILLS: &[(&str, i32)] = &[
    ("plants", rgb(78, 140, 74)),
    ("rocks", rgb(120, 110, 100)),
    ("surfaces", rgb(165, 147, 111)),
    ("worlds", rgb(90, 110, 140)),
];

/// Packs an opaque ARGB color.
pub const fn rgb(r: i32, g: i32, b: i32) -> i32 {
    let alpha = -1i32 << 24;
    alpha | (r & 0xFF) << 16 | (g & 0xFF) << 8 | (b & 0xFF)
}

/// Library outline shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Rectangle,
    Ellipse,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Rectangle => "rectangle",
            Shape::Ellipse => "ellipse",
        }
    }
}

/// Colors and shape applied to a whole library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryStyle {
    pub fill: i32,
    pub outline: i32,
    pub shape: Shape,
}

impl LibraryStyle {
    /// Derives the style from a (possibly mixed-case) group key.
    pub fn for_library(key: &str) -> Self {
        let (fill, outline) = color_for_library(key);
        Self {
            fill,
            outline,
            shape: shape_for_library(key),
        }
    }
}

/// Picks an outline from the palette by hashing the sub-category key.
pub fn outline_for_key(key: &str) -> i32 {
    if key.is_empty() {
        return DEFAULT_OUTLINE;
    }
    let idx = stable_hash(key).rem_euclid(OUTLINE_PALETTE.len() as i32);
    OUTLINE_PALETTE[idx as usize]
}

/// Maps an arbitrary name to a stable mid-tone color, ignoring case.
pub fn hash_color(name: &str) -> i32 {
    let h = stable_hash(&name.to_lowercase());
    let mask = 0x7F;
    rgb(64 + (h & mask), 64 + ((h >> 7) & mask), 64 + ((h >> 14) & mask))
}

/// Returns `(fill, outline)` for a library.
pub fn color_for_library(name: &str) -> (i32, i32) {
    let lower = name.to_lowercase();
    let tokens: Vec<&str> = lower.split('_').collect();

    let index_of = |tok: &str| tokens.iter().position(|t| *t == tok);
    let after_has =
        |idx: usize, wanted: &[&str]| tokens[idx + 1..].iter().any(|t| wanted.contains(t));
    let sub_key = |idx: usize| tokens[idx + 1..].join("_");

    if let Some(idx) = index_of("water") {
        let fill = if after_has(idx, &["pond", "ponds"]) {
            rgb(34, 160, 170)
        } else if after_has(idx, &["river"]) {
            rgb(35, 90, 190)
        } else {
            rgb(45, 112, 197)
        };
        return (fill, outline_for_key(&sub_key(idx)));
    }

    if let Some(idx) = index_of("structures") {
        let fill = STRUCTURE_FILLS
            .iter()
            .find(|(wanted, _)| after_has(idx, *wanted))
            .map(|(_, fill)| *fill)
            .unwrap_or(rgb(150, 150, 150));
        return (fill, outline_for_key(&sub_key(idx)));
    }

    for (category, fill) in PLAIN_FILLS {
        if let Some(idx) = index_of(*category) {
            return (*fill, outline_for_key(&sub_key(idx)));
        }
    }

    (hash_color(name), DEFAULT_OUTLINE)
}

/// Nature libraries are drawn as ellipses, everything else as rectangles.
pub fn shape_for_library(name: &str) -> Shape {
    let lower = name.to_lowercase();
    if lower.split('_').any(|t| t == "plants" || t == "rocks") {
        Shape::Ellipse
    } else {
        Shape::Rectangle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(color: i32) -> String {
        format!("0x{:08X}", color as u32)
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(hex(rgb(30, 30, 30)), "0xFF1E1E1E");
        assert_eq!(hex(rgb(255, 0, 0)), "0xFFFF0000");
        assert_eq!(hex(rgb(0, 128, 255)), "0xFF0080FF");
    }

    #[test]
    fn test_outline_for_key_deterministic() {
        assert_eq!(hex(outline_for_key("a")), "0xFF3C3C3C");
        assert_eq!(outline_for_key(""), DEFAULT_OUTLINE);
    }

    #[test]
    fn test_hash_color_case_insensitive() {
        assert_eq!(hash_color("Test"), hash_color("test"));
    }

    #[test]
    fn test_water_variants() {
        assert_eq!(color_for_library("DZ_water").0, rgb(45, 112, 197));
        assert_eq!(color_for_library("DZ_water_river").0, rgb(35, 90, 190));
        assert_eq!(color_for_library("DZ_Water_Ponds").0, rgb(34, 160, 170));
        assert_eq!(color_for_library("DZ_water").1, DEFAULT_OUTLINE);
        assert_eq!(
            color_for_library("DZ_water_river").1,
            outline_for_key("river")
        );
    }

    #[test]
    fn test_structure_subcategories() {
        assert_eq!(
            color_for_library("DZ_structures_Military").0,
            rgb(163, 41, 41)
        );
        assert_eq!(
            color_for_library("DZ_structures_road_bridges").0,
            rgb(68, 53, 85)
        );
        assert_eq!(
            color_for_library("DZ_structures_misc").0,
            rgb(150, 150, 150)
        );
        assert_eq!(
            color_for_library("DZ_structures_industrial_military").0,
            rgb(178, 132, 54)
        );
    }

    #[test]
    fn test_category_token_must_follow() {
        // "military" before "structures" does not count as a sub-category.
        assert_eq!(
            color_for_library("military_structures").0,
            rgb(150, 150, 150)
        );
    }

    #[test]
    fn test_unknown_category_uses_hash_color() {
        let (fill, outline) = color_for_library("MyMod_props");
        assert_eq!(fill, hash_color("mymod_props"));
        assert_eq!(outline, DEFAULT_OUTLINE);
    }

    #[test]
    fn test_shapes() {
        assert_eq!(shape_for_library("DZ_plants_tree"), Shape::Ellipse);
        assert_eq!(shape_for_library("DZ_Rocks"), Shape::Ellipse);
        assert_eq!(shape_for_library("DZ_structures"), Shape::Rectangle);
        assert_eq!(Shape::Ellipse.as_str(), "ellipse");
        assert_eq!(
            LibraryStyle::for_library("DZ_plants_bush").shape,
            Shape::Ellipse
        );
    }
}
