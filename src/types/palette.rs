//! Extracted palettes: ordered swatches with suggested roles.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwatchError};

use super::colour::{hex_to_rgb, Colour, HslProperty};

/// Smallest swatch count an extraction may ask for.
pub const MIN_SWATCHES: usize = 3;
/// Largest swatch count an extraction may ask for.
pub const MAX_SWATCHES: usize = 8;

/// A single swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteEntry {
    /// `#RRGGBB`
    pub hex: String,
    pub name: String,
    /// Free text, e.g. "Dominant background" or "Accent highlight".
    #[serde(default)]
    pub suggested_role: String,
}

impl PaletteEntry {
    pub fn new(
        hex: impl Into<String>,
        name: impl Into<String>,
        suggested_role: impl Into<String>,
    ) -> Self {
        Self {
            hex: hex.into(),
            name: name.into(),
            suggested_role: suggested_role.into(),
        }
    }

    /// Parsed colour (black if the hex is malformed).
    pub fn colour(&self) -> Colour {
        hex_to_rgb(&self.hex)
    }

    pub fn is_dominant(&self) -> bool {
        self.suggested_role.contains("Dominant")
    }

    pub fn is_accent(&self) -> bool {
        self.suggested_role.contains("Accent") || self.suggested_role.contains("Highlight")
    }

    /// `Name (#RRGGBB)`, the form prompts use.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.hex.to_uppercase())
    }
}

/// An ordered palette. Order is meaningful: the first entry is the dominant
/// fallback and the last is the accent fallback.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    pub fn new(entries: Vec<PaletteEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&PaletteEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&PaletteEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    /// Swatch names in palette order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Keep at most `count` swatches.
    pub fn truncated(mut self, count: usize) -> Self {
        self.entries.truncate(count);
        self
    }

    /// Return a copy with one HSL property of one swatch replaced.
    ///
    /// Hue wraps into `[0, 360)`; saturation and lightness clamp to
    /// `[0, 100]`. Every other swatch is left untouched.
    pub fn adjust(&self, index: usize, property: HslProperty, value: f32) -> Result<Palette> {
        let entry = self.entries.get(index).ok_or_else(|| SwatchError::Validation {
            message: format!(
                "Swatch index {} is out of range for a palette of {}",
                index,
                self.entries.len()
            ),
            help: Some(format!("Use an index between 0 and {}", self.entries.len().saturating_sub(1))),
        })?;

        let hsl = entry.colour().to_hsl().with(property, value);
        let mut adjusted = self.clone();
        adjusted.entries[index].hex = Colour::from_hsl(hsl).to_string();
        Ok(adjusted)
    }
}

impl From<Vec<PaletteEntry>> for Palette {
    fn from(entries: Vec<PaletteEntry>) -> Self {
        Self::new(entries)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Copy-on-write edit of a single swatch. See [`Palette::adjust`].
pub fn adjust_color(
    palette: &Palette,
    index: usize,
    property: HslProperty,
    value: f32,
) -> Result<Palette> {
    palette.adjust(index, property, value)
}

/// Check a requested swatch count against the `[3, 8]` bound.
pub fn check_swatch_count(count: usize) -> Result<usize> {
    if (MIN_SWATCHES..=MAX_SWATCHES).contains(&count) {
        Ok(count)
    } else {
        Err(SwatchError::Validation {
            message: format!("Swatch count {} is outside {}..={}", count, MIN_SWATCHES, MAX_SWATCHES),
            help: Some("Ask for between 3 and 8 colours".to_string()),
        })
    }
}
