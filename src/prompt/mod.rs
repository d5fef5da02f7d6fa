//! Deterministic prompt construction.
//!
//! Prompts are pure functions of the domain, palette, customizations and
//! (optionally) previously generated ideas text, so they can be inspected
//! and tested without calling any backend.
//!
//! # Example
//!
//! ```ignore
//! use swatch::prompt::PromptBuilder;
//!
//! let builder = PromptBuilder::new(Domain::Cooking, &palette, &customizations);
//! let prompt = builder.image_prompt("Dish Plated", Some(&ideas))?;
//! ```

mod profile;
mod template;
mod theme;

pub use profile::{profile, AngleTemplate, DomainProfile};
pub use template::{excerpt, render, TemplateVars};
pub use theme::{theme, SeriesTheme, THEMES};

use crate::error::{Result, SwatchError};
use crate::types::{Customizations, Domain, Palette, PaletteEntry};

/// Fallback label when a palette has no swatches.
const NEUTRAL: &str = "a neutral tone";

/// The two swatches that anchor a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominantAccent<'a> {
    pub dominant: &'a PaletteEntry,
    pub accent: &'a PaletteEntry,
}

/// Pick the dominant and accent swatches by role, falling back to the first
/// and last entries. `None` for an empty palette.
pub fn resolve_dominant_accent(palette: &Palette) -> Option<DominantAccent<'_>> {
    let dominant = palette
        .iter()
        .find(|e| e.is_dominant())
        .or_else(|| palette.first())?;
    let accent = palette
        .iter()
        .find(|e| e.is_accent())
        .or_else(|| palette.last())?;
    Some(DominantAccent { dominant, accent })
}

/// `key: value` pairs for the set customizations, in the domain's key order.
pub fn customization_context(domain: Domain, customizations: &Customizations) -> String {
    profile(domain)
        .schema
        .resolve(customizations)
        .into_iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Image prompt for a `(domain, angle)` pair.
pub fn domain_prompt(
    domain: Domain,
    image_angle: &str,
    palette: &Palette,
    customizations: &Customizations,
    ideas: Option<&str>,
) -> Result<String> {
    PromptBuilder::new(domain, palette, customizations).image_prompt(image_angle, ideas)
}

/// Ordered prompts for a video series of `part_count` parts.
pub fn video_series_prompts(
    domain: Domain,
    palette: &Palette,
    customizations: &Customizations,
    part_count: usize,
) -> Vec<String> {
    PromptBuilder::new(domain, palette, customizations).video_series_prompts(part_count, None)
}

/// Builds every prompt for one domain/palette/customizations snapshot.
#[derive(Debug)]
pub struct PromptBuilder<'a> {
    profile: &'static DomainProfile,
    palette: &'a Palette,
    context: String,
    dominant: String,
    accent: String,
    names: String,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(domain: Domain, palette: &'a Palette, customizations: &Customizations) -> Self {
        let (dominant, accent) = match resolve_dominant_accent(palette) {
            Some(pair) => (pair.dominant.label(), pair.accent.label()),
            None => (NEUTRAL.to_string(), NEUTRAL.to_string()),
        };

        Self {
            profile: profile(domain),
            palette,
            context: customization_context(domain, customizations),
            dominant,
            accent,
            names: palette.names().join(", "),
        }
    }

    pub fn profile(&self) -> &'static DomainProfile {
        self.profile
    }

    /// Joined customization context (may be empty).
    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn dominant(&self) -> &str {
        &self.dominant
    }

    pub fn accent(&self) -> &str {
        &self.accent
    }

    fn vars<'v>(&'v self, ideas: Option<&'v str>) -> TemplateVars<'v> {
        TemplateVars {
            dominant: &self.dominant,
            accent: &self.accent,
            palette: &self.names,
            context: &self.context,
            ideas,
        }
    }

    fn angle(&self, name: &str) -> Result<&'static AngleTemplate> {
        self.profile.angle(name).ok_or_else(|| SwatchError::Validation {
            message: format!("'{}' is not a {} prompt choice", name, self.profile.domain),
            help: Some(format!("Choose one of: {}", self.profile.angle_names().join(", "))),
        })
    }

    pub fn image_prompt(&self, angle: &str, ideas: Option<&str>) -> Result<String> {
        let angle = self.angle(angle)?;
        Ok(render(angle.image, &self.vars(ideas)))
    }

    pub fn video_prompt(&self, angle: &str, ideas: Option<&str>) -> Result<String> {
        let angle = self.angle(angle)?;
        Ok(render(angle.video, &self.vars(ideas)))
    }

    /// Video style hint for this domain.
    pub fn video_style(&self) -> &'static str {
        self.profile.video_style
    }

    /// One prompt per part: introduce the palette, transform, then resolve
    /// into the final composition. Each prompt depends only on its index.
    pub fn video_series_prompts(&self, part_count: usize, ideas: Option<&str>) -> Vec<String> {
        (0..part_count)
            .map(|index| {
                let stage = series_stage(index, part_count);
                let template = format!(
                    "Part {} of {} of a {} sequence about {}: {}. \
                     Keep the palette {{palette}} throughout, with {{dominant}} dominant and {{accent}} as the accent.\
                     {{context}}{{ideas}}",
                    index + 1,
                    part_count,
                    self.profile.video_style,
                    self.profile.subject,
                    stage,
                );
                render(&template, &self.vars(ideas))
            })
            .collect()
    }

    /// One prompt per image of a themed series.
    pub fn image_series_prompts(&self, theme: &SeriesTheme, count: usize) -> Vec<String> {
        (0..count)
            .map(|index| {
                let template = format!(
                    "Image {} of {} in the series \"{}\": {} {}, keeping the same composition as the rest of the series. \
                     {{dominant}} stays dominant and {{accent}} stays the accent, from the palette {{palette}}.{{context}}",
                    index + 1,
                    count,
                    theme.title,
                    self.profile.subject,
                    theme.step(index),
                );
                render(&template, &self.vars(None))
            })
            .collect()
    }

    /// Instructions for the text backend.
    pub fn ideas_instructions(&self) -> String {
        let labels: Vec<String> = self.palette.iter().map(|e| e.label()).collect();
        let template = format!(
            "Create a new {} concept inspired by a palette of {} colours: {}. \
             The dominant colour is {{dominant}} and the accent is {{accent}}. {}{{context}}",
            self.profile.domain,
            labels.len(),
            labels.join(", "),
            self.profile.ideas_brief,
        );
        render(&template, &self.vars(None))
    }
}

fn series_stage(index: usize, count: usize) -> &'static str {
    if index + 1 == count {
        "resolve into the final composition, every palette colour in its place"
    } else if index == 0 {
        "introduce the palette, opening on the dominant colour alone"
    } else {
        "transform the scene as the remaining palette colours blend in"
    }
}
