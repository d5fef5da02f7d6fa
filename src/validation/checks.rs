//! Request checks.
//!
//! Each check looks at one part of a request and returns a
//! `ValidationResult`; none of them call a backend.

use crate::prompt::{profile, theme, THEMES};
use crate::types::{
    Colour, Customizations, Domain, OutputFormat, Palette, SeriesConfig, MAX_SERIES_COUNT,
    MIN_SERIES_COUNT,
};

use super::warning::{Diagnostic, ValidationResult};

/// The palette must have at least one swatch and every hex must parse.
pub fn check_palette(palette: &Palette) -> ValidationResult {
    let mut result = ValidationResult::new();

    if palette.is_empty() {
        result.push(
            Diagnostic::error("swatch::validate::empty-palette", "The palette has no colours")
                .with_help("Extract a palette from an image first"),
        );
        return result;
    }

    for (i, entry) in palette.iter().enumerate() {
        if Colour::from_hex(&entry.hex).is_err() {
            result.push(
                Diagnostic::error(
                    "swatch::validate::bad-hex",
                    format!("Swatch {} ('{}') has an invalid hex '{}'", i + 1, entry.name, entry.hex),
                )
                .with_help("Colours are written as #RRGGBB"),
            );
        }
        if entry.name.trim().is_empty() {
            result.push(Diagnostic::warning(
                "swatch::validate::unnamed-swatch",
                format!("Swatch {} has no name", i + 1),
            ));
        }
    }

    result
}

pub fn check_formats(formats: &[OutputFormat]) -> ValidationResult {
    let mut result = ValidationResult::new();
    if formats.is_empty() {
        result.push(
            Diagnostic::error("swatch::validate::no-formats", "No output formats were requested")
                .with_help("Request at least one of image, video, series, image-series, combined"),
        );
    }
    result
}

/// Image, video and combined need a prompt choice naming one of the
/// domain's angles.
pub fn check_prompt_choice(
    domain: Domain,
    formats: &[OutputFormat],
    choice: Option<&str>,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !formats.iter().any(|f| f.needs_prompt_choice()) {
        return result;
    }

    let profile = profile(domain);
    let choices = profile.angle_names().join(", ");
    match choice.map(str::trim).filter(|c| !c.is_empty()) {
        None => result.push(
            Diagnostic::error(
                "swatch::validate::missing-prompt-choice",
                format!("Image and video formats need an image prompt choice for {}", domain),
            )
            .with_help(format!("Choose one of: {}", choices)),
        ),
        Some(choice) if profile.angle(choice).is_none() => result.push(
            Diagnostic::error(
                "swatch::validate::unknown-prompt-choice",
                format!("'{}' is not a {} prompt choice", choice, domain),
            )
            .with_help(format!("Choose one of: {}", choices)),
        ),
        Some(_) => {}
    }

    result
}

/// A set for a single-valued key is an error; unknown keys only warn since
/// they are ignored when building prompts.
pub fn check_customizations(domain: Domain, customizations: &Customizations) -> ValidationResult {
    let mut result = ValidationResult::new();
    let schema = profile(domain).schema;

    for key in customizations.keys() {
        let Some(field) = schema.field(key) else {
            let known: Vec<&str> = schema.fields.iter().map(|f| f.key).collect();
            result.push(
                Diagnostic::warning(
                    "swatch::validate::unknown-key",
                    format!("'{}' is not a {} customization and will be ignored", key, domain),
                )
                .with_help(format!("Known keys: {}", known.join(", "))),
            );
            continue;
        };

        let is_many = customizations.get(key).is_some_and(|v| v.is_many());
        if is_many && !field.multi {
            result.push(
                Diagnostic::error(
                    "swatch::validate::single-valued",
                    format!("Customization '{}' takes a single value, not a list", key),
                )
                .with_help("Pass one string instead of an array"),
            );
        }
    }

    result
}

/// Count and theme of an image series.
pub fn check_series_config(config: &SeriesConfig) -> ValidationResult {
    let mut result = ValidationResult::new();

    if !(MIN_SERIES_COUNT..=MAX_SERIES_COUNT).contains(&config.count) {
        result.push(Diagnostic::error(
            "swatch::validate::series-count",
            format!(
                "An image series has {} to {} images, got {}",
                MIN_SERIES_COUNT, MAX_SERIES_COUNT, config.count
            ),
        ));
    }

    if theme(&config.theme_id).is_none() {
        let ids: Vec<&str> = THEMES.iter().map(|t| t.id).collect();
        result.push(
            Diagnostic::error(
                "swatch::validate::unknown-theme",
                format!("Unknown series theme '{}'", config.theme_id),
            )
            .with_help(format!("Use one of: {}", ids.join(", "))),
        );
    }

    result
}

/// `image-series` needs a series config; one without it is ignored.
pub fn check_image_series(
    formats: &[OutputFormat],
    config: Option<&SeriesConfig>,
) -> ValidationResult {
    let wants_series = formats.contains(&OutputFormat::ImageSeries);
    match (wants_series, config) {
        (true, Some(config)) => check_series_config(config),
        (true, None) => {
            let mut result = ValidationResult::new();
            result.push(
                Diagnostic::error(
                    "swatch::validate::missing-series-config",
                    "The image-series format needs an imageSeriesConfig",
                )
                .with_help("Add {\"count\": 3..=10, \"themeId\": ...}"),
            );
            result
        }
        (false, Some(_)) => {
            let mut result = ValidationResult::new();
            result.push(Diagnostic::warning(
                "swatch::validate::unused-series-config",
                "imageSeriesConfig is ignored without the image-series format",
            ));
            result
        }
        (false, None) => ValidationResult::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaletteEntry;

    fn codes(result: &ValidationResult) -> Vec<&str> {
        result.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn test_empty_palette() {
        let result = check_palette(&Palette::default());
        assert_eq!(codes(&result), vec!["swatch::validate::empty-palette"]);
    }

    #[test]
    fn test_bad_hex() {
        let palette = Palette::new(vec![
            PaletteEntry::new("#FF0000", "Red", "Dominant"),
            PaletteEntry::new("#XYZ", "Broken", ""),
        ]);
        let result = check_palette(&palette);
        assert_eq!(result.error_count(), 1);
        assert!(result.iter().next().unwrap().message.contains("Swatch 2"));
    }

    #[test]
    fn test_prompt_choice_only_for_image_formats() {
        let result = check_prompt_choice(Domain::Cooking, &[OutputFormat::Series], None);
        assert!(result.is_ok());

        let result = check_prompt_choice(Domain::Cooking, &[OutputFormat::Combined], None);
        assert_eq!(codes(&result), vec!["swatch::validate::missing-prompt-choice"]);
    }

    #[test]
    fn test_prompt_choice_must_be_known() {
        let result =
            check_prompt_choice(Domain::Cooking, &[OutputFormat::Image], Some("Runway Look"));
        assert_eq!(codes(&result), vec!["swatch::validate::unknown-prompt-choice"]);

        let result =
            check_prompt_choice(Domain::Fashion, &[OutputFormat::Image], Some("runway look"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_customizations() {
        let c = Customizations::new()
            .with("cuisine", vec!["Thai", "Indian"])
            .with("dietary", vec!["Vegan"])
            .with("spice", "hot");
        let result = check_customizations(Domain::Cooking, &c);

        assert_eq!(result.error_count(), 1);
        assert_eq!(result.warning_count(), 1);
        assert!(result.errors().next().unwrap().message.contains("cuisine"));
    }

    #[test]
    fn test_series_config_bounds() {
        assert!(check_series_config(&SeriesConfig::new(3, "seasons")).is_ok());
        assert!(check_series_config(&SeriesConfig::new(10, "moods")).is_ok());
        assert!(check_series_config(&SeriesConfig::new(2, "seasons")).has_errors());
        assert!(check_series_config(&SeriesConfig::new(11, "seasons")).has_errors());
        assert_eq!(
            codes(&check_series_config(&SeriesConfig::new(4, "weather"))),
            vec!["swatch::validate::unknown-theme"]
        );
    }

    #[test]
    fn test_image_series_needs_config() {
        let result = check_image_series(&[OutputFormat::ImageSeries], None);
        assert_eq!(codes(&result), vec!["swatch::validate::missing-series-config"]);

        let config = SeriesConfig::new(4, "seasons");
        let result = check_image_series(&[OutputFormat::Image], Some(&config));
        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 1);
    }
}
