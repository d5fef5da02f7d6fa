//! The aggregated result of a generation run.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwatchError};

use super::format::{AspectRatio, OutputFormat};

/// Smallest image series.
pub const MIN_SERIES_COUNT: u8 = 3;
/// Largest image series.
pub const MAX_SERIES_COUNT: u8 = 10;

/// Everything one run produced. Field names match the HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CreativeResult {
    #[serde(default)]
    pub ideas: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_urls: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_series_urls: Option<Vec<String>>,
    #[serde(default)]
    pub formats_generated: Vec<OutputFormat>,
    /// One entry per failed format task, `"<format>: <reason>"`.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Why the ideas step failed, if it did. Kept apart from `errors` so
    /// those stay one-per-format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideas_error: Option<String>,
}

/// How a finished run went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Nothing failed.
    Completed,
    /// At least one format succeeded and something failed.
    PartiallyFailed,
    /// No format succeeded.
    Failed,
}

impl CreativeResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has(&self, format: OutputFormat) -> bool {
        self.formats_generated.contains(&format)
    }

    /// Record a generated format once.
    pub fn mark_generated(&mut self, format: OutputFormat) {
        if !self.has(format) {
            self.formats_generated.push(format);
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.errors.is_empty() {
            Outcome::Completed
        } else if self.formats_generated.is_empty() {
            Outcome::Failed
        } else {
            Outcome::PartiallyFailed
        }
    }

    /// Turn a run where nothing succeeded into an error.
    pub fn ensure_any(self) -> Result<Self> {
        match self.outcome() {
            Outcome::Failed => Err(SwatchError::NothingGenerated { errors: self.errors }),
            _ => Ok(self),
        }
    }

    /// Fold a later partial result into this one without losing anything
    /// already present: formats are unioned, errors and series URLs
    /// appended, single assets and ideas only filled when missing.
    pub fn merge(mut self, other: CreativeResult) -> CreativeResult {
        if self.ideas.is_empty() {
            self.ideas = other.ideas;
        }
        if self.ideas_error.is_none() && self.ideas.is_empty() {
            self.ideas_error = other.ideas_error;
        }
        if self.image_url.is_none() {
            self.image_url = other.image_url;
        }
        if self.video_url.is_none() {
            self.video_url = other.video_url;
        }
        append_urls(&mut self.series_urls, other.series_urls);
        append_urls(&mut self.image_series_urls, other.image_series_urls);
        for format in other.formats_generated {
            self.mark_generated(format);
        }
        self.errors.extend(other.errors);
        self
    }
}

fn append_urls(target: &mut Option<Vec<String>>, extra: Option<Vec<String>>) {
    if let Some(extra) = extra {
        target.get_or_insert_with(Vec::new).extend(extra);
    }
}

/// Settings for an image series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesConfig {
    pub count: u8,
    pub theme_id: String,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl SeriesConfig {
    pub fn new(count: u8, theme_id: impl Into<String>) -> Self {
        Self {
            count,
            theme_id: theme_id.into(),
            aspect_ratio: AspectRatio::default(),
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }
}
