//! Adjust command implementation.
//!
//! Reads a palette JSON file, changes one HSL property of one swatch and
//! prints the new palette. The input file is left untouched unless it is
//! also the `--output`.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{write_json, Printer};
use crate::types::{adjust_color, HslProperty, Palette};

/// Change one HSL property of one swatch in a palette
#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Palette JSON (an array of {hex, name, suggestedRole})
    pub palette: PathBuf,

    /// Zero-based swatch index
    #[arg(long)]
    pub index: usize,

    /// h, s or l
    #[arg(long)]
    pub property: HslProperty,

    /// Hue in degrees (wraps), or saturation/lightness in percent (clamped)
    #[arg(long, allow_hyphen_values = true)]
    pub value: f32,

    /// Write the palette here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: AdjustArgs, printer: &Printer) -> Result<()> {
    let palette: Palette = super::read_json(&args.palette)?;
    let adjusted = adjust_color(&palette, args.index, args.property, args.value)?;

    if let (Some(before), Some(after)) = (palette.get(args.index), adjusted.get(args.index)) {
        printer.info(
            "Adjusted",
            &format!(
                "{}: {} -> {}",
                after.name,
                printer.chip(before.colour()),
                printer.chip(after.colour())
            ),
        );
    }

    write_json(&adjusted, args.output.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_adjust_writes_new_palette() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("palette.json");
        let output = dir.path().join("adjusted.json");
        std::fs::write(
            &input,
            r##"[{"hex": "#FF0000", "name": "Red", "suggestedRole": "Dominant"},
                 {"hex": "#0000FF", "name": "Blue", "suggestedRole": "Accent"}]"##,
        )
        .unwrap();

        let args = AdjustArgs {
            palette: input.clone(),
            index: 0,
            property: HslProperty::H,
            value: 120.0,
            output: Some(output.clone()),
        };
        run(args, &Printer::plain()).unwrap();

        let adjusted: Palette =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(adjusted.get(0).unwrap().hex, "#00FF00");
        assert_eq!(adjusted.get(1).unwrap().hex, "#0000FF");

        // Source file unchanged
        let original: Palette =
            serde_json::from_str(&std::fs::read_to_string(input).unwrap()).unwrap();
        assert_eq!(original.get(0).unwrap().hex, "#FF0000");
    }

    #[test]
    fn test_adjust_bad_index() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("palette.json");
        std::fs::write(&input, r##"[{"hex": "#FF0000", "name": "Red"}]"##).unwrap();

        let args = AdjustArgs {
            palette: input,
            index: 3,
            property: HslProperty::L,
            value: 50.0,
            output: None,
        };
        assert!(run(args, &Printer::plain()).unwrap_err().is_validation());
    }
}
