//! Colour harmonies derived from a base colour by hue rotation.

use serde::{Deserialize, Serialize};

use super::colour::{hex_to_rgb, Colour};

/// The five harmony families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyKind {
    Complementary,
    Analogous,
    Triadic,
    SplitComplementary,
    Tetradic,
}

impl HarmonyKind {
    pub const ALL: [HarmonyKind; 5] = [
        HarmonyKind::Complementary,
        HarmonyKind::Analogous,
        HarmonyKind::Triadic,
        HarmonyKind::SplitComplementary,
        HarmonyKind::Tetradic,
    ];

    /// Hue offsets in degrees, base colour included.
    pub fn offsets(self) -> &'static [f32] {
        match self {
            HarmonyKind::Complementary => &[0.0, 180.0],
            HarmonyKind::Analogous => &[-30.0, 0.0, 30.0],
            HarmonyKind::Triadic => &[0.0, 120.0, 240.0],
            HarmonyKind::SplitComplementary => &[0.0, 150.0, 210.0],
            HarmonyKind::Tetradic => &[0.0, 90.0, 180.0, 270.0],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HarmonyKind::Complementary => "Complementary",
            HarmonyKind::Analogous => "Analogous",
            HarmonyKind::Triadic => "Triadic",
            HarmonyKind::SplitComplementary => "Split Complementary",
            HarmonyKind::Tetradic => "Tetradic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            HarmonyKind::Complementary => {
                "Opposite hues on the colour wheel for maximum contrast"
            }
            HarmonyKind::Analogous => "Neighbouring hues that sit together calmly",
            HarmonyKind::Triadic => "Three evenly spaced hues for balanced vibrancy",
            HarmonyKind::SplitComplementary => {
                "A base hue with the two neighbours of its complement"
            }
            HarmonyKind::Tetradic => "Two complementary pairs forming a rich rectangle",
        }
    }
}

/// One harmony group: its static label plus the generated colours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Harmony {
    pub kind: HarmonyKind,
    pub name: String,
    pub description: String,
    pub colours: Vec<String>,
}

/// All five harmony groups for one base colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Harmonies {
    pub complementary: Harmony,
    pub analogous: Harmony,
    pub triadic: Harmony,
    pub split_complementary: Harmony,
    pub tetradic: Harmony,
}

impl Harmonies {
    /// Iterate the groups in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &Harmony> {
        [
            &self.complementary,
            &self.analogous,
            &self.triadic,
            &self.split_complementary,
            &self.tetradic,
        ]
        .into_iter()
    }
}

/// Build one harmony group from a base colour.
pub fn harmony(base: Colour, kind: HarmonyKind) -> Harmony {
    Harmony {
        kind,
        name: kind.name().to_string(),
        description: kind.description().to_string(),
        colours: kind
            .offsets()
            .iter()
            .map(|offset| {
                if *offset == 0.0 {
                    base.to_string()
                } else {
                    base.rotate_hue(*offset).to_string()
                }
            })
            .collect(),
    }
}

/// Generate every harmony for a hex colour (unparsable hex counts as black).
pub fn generate_harmonies(base_hex: &str) -> Harmonies {
    let base = hex_to_rgb(base_hex);
    Harmonies {
        complementary: harmony(base, HarmonyKind::Complementary),
        analogous: harmony(base, HarmonyKind::Analogous),
        triadic: harmony(base, HarmonyKind::Triadic),
        split_complementary: harmony(base, HarmonyKind::SplitComplementary),
        tetradic: harmony(base, HarmonyKind::Tetradic),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinalities() {
        for hex in ["#FF6B35", "#000000", "#808080", "#1A1A2E"] {
            let h = generate_harmonies(hex);
            let sizes: Vec<usize> = h.iter().map(|g| g.colours.len()).collect();
            assert_eq!(sizes, vec![2, 3, 3, 3, 4]);
        }
    }

    #[test]
    fn test_complement_of_red_is_cyan() {
        let h = generate_harmonies("#FF0000");
        assert_eq!(h.complementary.colours, vec!["#FF0000", "#00FFFF"]);
    }

    #[test]
    fn test_triadic_of_red() {
        let h = generate_harmonies("#FF0000");
        assert_eq!(h.triadic.colours, vec!["#FF0000", "#00FF00", "#0000FF"]);
    }

    #[test]
    fn test_base_is_kept_verbatim() {
        let h = generate_harmonies("#ff6b35");
        assert_eq!(h.analogous.colours[1], "#FF6B35");
        assert_eq!(h.tetradic.colours[0], "#FF6B35");
    }

    #[test]
    fn test_grey_stays_grey() {
        let h = generate_harmonies("#808080");
        for group in h.iter() {
            assert!(group.colours.iter().all(|c| c == "#808080"));
        }
    }

    #[test]
    fn test_static_labels() {
        let h = generate_harmonies("#123456");
        assert_eq!(h.split_complementary.name, "Split Complementary");
        assert_eq!(h.triadic.description, HarmonyKind::Triadic.description());
    }
}
