//! Palette extraction from a local image, without a vision model.
//!
//! Pixels are bucketed on a coarse RGB grid, buckets are ranked by
//! frequency, and near-duplicates of already chosen colours are skipped.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::{Result, SwatchError};
use crate::types::{check_swatch_count, Colour, Palette, PaletteEntry};

use super::{ImageInput, PaletteExtractor};

/// Bits dropped from each channel when bucketing.
const BUCKET_SHIFT: u8 = 4;
/// Minimum RGB distance between two chosen swatches.
const MIN_DISTANCE: f64 = 48.0;
/// Images are shrunk to fit this box before sampling.
const SAMPLE_SIZE: u32 = 160;

/// Detect the MIME type of encoded image bytes.
///
/// Unknown data is rejected instead of being assumed to be JPEG.
pub fn detect_mime(bytes: &[u8]) -> Result<&'static str> {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .map_err(|_| SwatchError::Validation {
            message: "Could not detect the image type".to_string(),
            help: Some("Use a PNG, JPEG, GIF or WebP image".to_string()),
        })
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LocalExtractor;

impl LocalExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous extraction used by the async trait method.
    pub fn extract_from_bytes(&self, bytes: &[u8], swatch_count: usize) -> Result<Palette> {
        let swatch_count = check_swatch_count(swatch_count)?;
        let img = image::load_from_memory(bytes).map_err(|e| SwatchError::Parse {
            message: format!("Could not decode image: {}", e),
            help: None,
        })?;
        let img = if img.width() > SAMPLE_SIZE || img.height() > SAMPLE_SIZE {
            img.thumbnail(SAMPLE_SIZE, SAMPLE_SIZE).to_rgba8()
        } else {
            img.to_rgba8()
        };

        // Sum actual colours per bucket so each swatch is a real average
        let mut buckets: HashMap<[u8; 3], (usize, [u64; 3])> = HashMap::new();
        for pixel in img.pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            let key = [r >> BUCKET_SHIFT, g >> BUCKET_SHIFT, b >> BUCKET_SHIFT];
            let entry = buckets.entry(key).or_insert((0, [0; 3]));
            entry.0 += 1;
            entry.1[0] += r as u64;
            entry.1[1] += g as u64;
            entry.1[2] += b as u64;
        }

        let mut ranked: Vec<(usize, Colour)> = buckets
            .into_values()
            .map(|(count, sum)| {
                let n = count as f64;
                let colour = Colour::from_channels(
                    sum[0] as f64 / n,
                    sum[1] as f64 / n,
                    sum[2] as f64 / n,
                );
                (count, colour)
            })
            .collect();
        // Most common first; ties broken by hex so output is stable
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.to_string().cmp(&b.1.to_string())));

        let mut chosen: Vec<Colour> = Vec::new();
        for (_, colour) in &ranked {
            if chosen.len() == swatch_count {
                break;
            }
            if chosen.iter().all(|c| distance(*c, *colour) >= MIN_DISTANCE) {
                chosen.push(*colour);
            }
        }

        if chosen.len() < swatch_count.min(3) {
            return Err(SwatchError::Validation {
                message: format!("Image only has {} distinct colour(s)", chosen.len()),
                help: Some("Use an image with more colour variety".to_string()),
            });
        }

        let last = chosen.len() - 1;
        let entries = chosen
            .into_iter()
            .enumerate()
            .map(|(i, colour)| {
                let role = match i {
                    0 => "Dominant",
                    i if i == last => "Accent",
                    _ => "Supporting",
                };
                PaletteEntry::new(colour.to_string(), describe(colour), role)
            })
            .collect();

        Ok(Palette::new(entries))
    }
}

#[async_trait]
impl PaletteExtractor for LocalExtractor {
    fn name(&self) -> &str {
        "local"
    }

    async fn extract(&self, image: &ImageInput, swatch_count: usize) -> Result<Palette> {
        self.extract_from_bytes(&image.bytes, swatch_count)
    }
}

fn distance(a: Colour, b: Colour) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

/// A plain-language name like "Dark Blue" or "Light Grey".
fn describe(colour: Colour) -> String {
    let hsl = colour.to_hsl();

    if hsl.l < 8.0 {
        return "Black".to_string();
    }
    if hsl.l > 94.0 {
        return "White".to_string();
    }

    let base = if hsl.s < 12.0 {
        "Grey"
    } else {
        match hsl.h {
            h if h < 15.0 => "Red",
            h if h < 40.0 => "Orange",
            h if h < 65.0 => "Yellow",
            h if h < 160.0 => "Green",
            h if h < 195.0 => "Teal",
            h if h < 255.0 => "Blue",
            h if h < 290.0 => "Purple",
            h if h < 340.0 => "Pink",
            _ => "Red",
        }
    };

    if hsl.l < 30.0 {
        format!("Dark {}", base)
    } else if hsl.l > 72.0 {
        format!("Light {}", base)
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode a PNG with horizontal stripes of the given colours and heights.
    fn striped_png(stripes: &[([u8; 3], u32)]) -> Vec<u8> {
        let height: u32 = stripes.iter().map(|(_, h)| h).sum();
        let mut img = RgbaImage::new(10, height);
        let mut y = 0;
        for (rgb, h) in stripes {
            for row in y..y + h {
                for x in 0..10 {
                    img.put_pixel(x, row, Rgba([rgb[0], rgb[1], rgb[2], 255]));
                }
            }
            y += h;
        }
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_detect_mime() {
        let png = striped_png(&[([255, 0, 0], 2)]);
        assert_eq!(detect_mime(&png).unwrap(), "image/png");
        assert!(detect_mime(b"definitely not an image").unwrap_err().is_validation());
    }

    #[test]
    fn test_extract_orders_by_frequency() {
        let png = striped_png(&[([0, 0, 200], 12), ([200, 0, 0], 30), ([0, 200, 0], 5)]);
        let palette = LocalExtractor::new().extract_from_bytes(&png, 3).unwrap();

        assert_eq!(palette.len(), 3);
        assert_eq!(palette.get(0).unwrap().hex, "#C80000");
        assert_eq!(palette.get(0).unwrap().suggested_role, "Dominant");
        assert_eq!(palette.get(1).unwrap().hex, "#0000C8");
        assert_eq!(palette.get(2).unwrap().hex, "#00C800");
        assert_eq!(palette.get(2).unwrap().suggested_role, "Accent");
    }

    #[test]
    fn test_extract_rejects_flat_image() {
        let png = striped_png(&[([90, 90, 90], 8)]);
        assert!(LocalExtractor::new().extract_from_bytes(&png, 5).is_err());
    }

    #[test]
    fn test_swatch_count_checked_up_front() {
        let png = striped_png(&[([0, 0, 200], 4), ([200, 0, 0], 4), ([0, 200, 0], 4)]);
        let extractor = LocalExtractor::new();
        for count in [0, 2, 9] {
            let err = extractor.extract_from_bytes(&png, count).unwrap_err();
            assert!(err.is_validation(), "count {}", count);
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(Colour::rgb(200, 0, 0)), "Red");
        assert_eq!(describe(Colour::rgb(0, 0, 80)), "Dark Blue");
        assert_eq!(describe(Colour::rgb(128, 128, 128)), "Grey");
        assert_eq!(describe(Colour::rgb(250, 250, 250)), "White");
    }
}
