//! Output formats and aspect ratios.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SwatchError};

/// A requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputFormat {
    Image,
    Video,
    Series,
    ImageSeries,
    /// Expands to `Image`, `Video` and `Series` at dispatch time.
    Combined,
}

impl OutputFormat {
    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Image => "image",
            OutputFormat::Video => "video",
            OutputFormat::Series => "series",
            OutputFormat::ImageSeries => "image-series",
            OutputFormat::Combined => "combined",
        }
    }

    /// The independently executable formats this one stands for.
    pub fn expand(self) -> &'static [OutputFormat] {
        match self {
            OutputFormat::Combined => &[OutputFormat::Image, OutputFormat::Video, OutputFormat::Series],
            OutputFormat::Image => &[OutputFormat::Image],
            OutputFormat::Video => &[OutputFormat::Video],
            OutputFormat::Series => &[OutputFormat::Series],
            OutputFormat::ImageSeries => &[OutputFormat::ImageSeries],
        }
    }

    /// Formats whose prompts come from an image angle.
    pub fn needs_prompt_choice(self) -> bool {
        matches!(
            self,
            OutputFormat::Image | OutputFormat::Video | OutputFormat::Combined
        )
    }
}

/// Expand composite formats and drop duplicates, keeping first-seen order.
pub fn expand_formats(formats: &[OutputFormat]) -> Vec<OutputFormat> {
    let mut expanded = Vec::new();
    for format in formats.iter().flat_map(|f| f.expand()) {
        if !expanded.contains(format) {
            expanded.push(*format);
        }
    }
    expanded
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "image" => Ok(OutputFormat::Image),
            "video" => Ok(OutputFormat::Video),
            "series" => Ok(OutputFormat::Series),
            "imageseries" => Ok(OutputFormat::ImageSeries),
            "combined" => Ok(OutputFormat::Combined),
            _ => Err(SwatchError::Parse {
                message: format!("Unknown output format: {}", s),
                help: Some("Use image, video, series, image-series or combined".to_string()),
            }),
        }
    }
}

impl Serialize for OutputFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Supported aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "3:4")]
    ClassicPortrait,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::ClassicPortrait => "3:4",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = SwatchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "1:1" => Ok(AspectRatio::Square),
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            "4:3" => Ok(AspectRatio::Classic),
            "3:4" => Ok(AspectRatio::ClassicPortrait),
            other => Err(SwatchError::Parse {
                message: format!("Unsupported aspect ratio: {}", other),
                help: Some("Use 1:1, 16:9, 9:16, 4:3 or 3:4".to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!("Combined".parse::<OutputFormat>().unwrap(), OutputFormat::Combined);
        assert_eq!("image-series".parse::<OutputFormat>().unwrap(), OutputFormat::ImageSeries);
        assert_eq!("ImageSeries".parse::<OutputFormat>().unwrap(), OutputFormat::ImageSeries);
        assert_eq!("image_series".parse::<OutputFormat>().unwrap(), OutputFormat::ImageSeries);
        assert!("gif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_expand_combined() {
        let expanded = expand_formats(&[OutputFormat::Combined]);
        assert_eq!(
            expanded,
            vec![OutputFormat::Image, OutputFormat::Video, OutputFormat::Series]
        );
    }

    #[test]
    fn test_expand_dedupes() {
        let expanded = expand_formats(&[
            OutputFormat::Video,
            OutputFormat::Combined,
            OutputFormat::ImageSeries,
            OutputFormat::Video,
        ]);
        assert_eq!(
            expanded,
            vec![
                OutputFormat::Video,
                OutputFormat::Image,
                OutputFormat::Series,
                OutputFormat::ImageSeries
            ]
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&[OutputFormat::ImageSeries, OutputFormat::Image]).unwrap();
        assert_eq!(json, r#"["image-series","image"]"#);

        let back: Vec<OutputFormat> = serde_json::from_str(r#"["Combined","video"]"#).unwrap();
        assert_eq!(back, vec![OutputFormat::Combined, OutputFormat::Video]);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape);
        assert_eq!(serde_json::to_string(&AspectRatio::Portrait).unwrap(), r#""9:16""#);
        assert!("2:1".parse::<AspectRatio>().is_err());
    }
}
