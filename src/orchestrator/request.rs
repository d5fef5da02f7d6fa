use serde::{Deserialize, Serialize};

use crate::error::{Result, SwatchError};
use crate::types::{AspectRatio, Customizations, Domain, OutputFormat, Palette, SeriesConfig};

/// One generation request. Field names match the HTTP request body, where
/// the domain travels as `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(rename = "path")]
    pub domain: Domain,
    pub palette: Palette,
    #[serde(default)]
    pub customizations: Customizations,
    /// Image angle, required for image, video and combined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt_choice: Option<String>,
    pub formats: Vec<OutputFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_series_config: Option<SeriesConfig>,
}

impl GenerationRequest {
    pub fn new(domain: Domain, palette: Palette, formats: Vec<OutputFormat>) -> Self {
        Self {
            domain,
            palette,
            customizations: Customizations::default(),
            image_prompt_choice: None,
            formats,
            image_aspect_ratio: None,
            video_aspect_ratio: None,
            image_series_config: None,
        }
    }

    pub fn with_prompt_choice(mut self, choice: impl Into<String>) -> Self {
        self.image_prompt_choice = Some(choice.into());
        self
    }

    pub fn with_customizations(mut self, customizations: Customizations) -> Self {
        self.customizations = customizations;
        self
    }

    pub fn with_image_series(mut self, config: SeriesConfig) -> Self {
        self.image_series_config = Some(config);
        self
    }

    pub fn with_image_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.image_aspect_ratio = Some(ratio);
        self
    }

    pub fn with_video_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.video_aspect_ratio = Some(ratio);
        self
    }

    /// Parse a request from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SwatchError::Parse {
            message: format!("Invalid generation request: {}", e),
            help: Some(
                "Expected {path, palette, formats, imagePromptChoice?, customizations?, ...}"
                    .to_string(),
            ),
        })
    }
}

/// Input for the "add an image series to an existing result" flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMergeRequest {
    #[serde(rename = "path")]
    pub domain: Domain,
    pub palette: Palette,
    #[serde(default)]
    pub customizations: Customizations,
    pub config: SeriesConfig,
}

impl SeriesMergeRequest {
    pub fn new(domain: Domain, palette: Palette, config: SeriesConfig) -> Self {
        Self {
            domain,
            palette,
            customizations: Customizations::default(),
            config,
        }
    }

    /// Reuse the domain, palette and customizations of an earlier request.
    pub fn from_request(request: &GenerationRequest, config: SeriesConfig) -> Self {
        Self {
            domain: request.domain,
            palette: request.palette.clone(),
            customizations: request.customizations.clone(),
            config,
        }
    }
}
