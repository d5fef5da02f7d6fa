//! Core domain types for swatch.
//!
//! - `Colour`, `Hsl` - colour values and conversions
//! - `Harmonies` - hue-rotation colour schemes
//! - `Palette` - ordered swatches with suggested roles
//! - `Domain`, `Customizations` - what the palette is applied to
//! - `OutputFormat`, `CreativeResult` - what a run asks for and returns

mod colour;
mod customization;
mod domain;
mod format;
mod harmony;
mod palette;
mod result;

pub use colour::{hex_to_rgb, hsl_to_rgb, mix_colors, rgb_to_hex, rgb_to_hsl, Colour, Hsl, HslProperty};
pub use customization::{CustomValue, CustomizationSchema, Customizations, FieldSpec};
pub use domain::Domain;
pub use format::{expand_formats, AspectRatio, OutputFormat};
pub use harmony::{generate_harmonies, harmony, Harmonies, Harmony, HarmonyKind};
pub use palette::{adjust_color, check_swatch_count, Palette, PaletteEntry, MAX_SWATCHES, MIN_SWATCHES};
pub use result::{CreativeResult, Outcome, SeriesConfig, MAX_SERIES_COUNT, MIN_SERIES_COUNT};
