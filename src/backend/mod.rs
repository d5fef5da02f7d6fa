//! Contracts for the external generation services.
//!
//! Each service is a black box behind an async trait. The orchestrator only
//! sees these traits; vendors plug in by implementing them. Shipped
//! implementations:
//!
//! - [`HttpBackend`] - a vendor-agnostic JSON endpoint
//! - [`ScriptedBackend`] - deterministic offline backend for dry runs and tests
//! - [`LocalExtractor`] - palette extraction from a local image file
//! - [`OrderedVideoSeries`] / [`OrderedImageSeries`] - series over a single-asset backend

mod error;
mod http;
mod local;
mod scripted;
mod series;

pub use error::{BackendError, BackendResult};
pub use http::HttpBackend;
pub use local::{detect_mime, LocalExtractor};
pub use scripted::{Role, ScriptedBackend};
pub use series::{OrderedImageSeries, OrderedVideoSeries};

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{AspectRatio, Customizations, Domain, Palette};

/// Input for the ideas (text) step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRequest {
    pub domain: Domain,
    pub palette: Palette,
    pub customizations: Customizations,
    pub instructions: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    /// An earlier asset the new image should stay consistent with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
    pub duration_secs: u32,
    pub style: String,
}

/// Ordered prompts for a series; parts are generated in order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub prompts: Vec<String>,
    pub aspect_ratio: AspectRatio,
    pub reference_url: Option<String>,
    pub duration_secs: u32,
    pub style: String,
}

/// A failed part of a series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartFailure {
    /// Zero-based part index.
    pub index: usize,
    pub error: BackendError,
}

/// What a series produced: assets for the parts that worked and the
/// failures for the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesOutcome {
    pub urls: Vec<String>,
    pub failures: Vec<PartFailure>,
}

impl SeriesOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary of the failed parts, e.g. `part 2 of 3 failed: ...`.
    pub fn failure_summary(&self, total: usize) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("part {} of {} failed: {}", f.index + 1, total, f.error))
            .collect();
        Some(parts.join("; "))
    }
}

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime: String,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;
    async fn generate_text(&self, request: TextRequest) -> BackendResult<String>;
}

#[async_trait]
pub trait ImageGenerator: Send + Sync {
    fn name(&self) -> &str;
    /// Returns the generated asset URL.
    async fn generate_image(&self, request: ImageRequest) -> BackendResult<String>;
}

#[async_trait]
pub trait VideoGenerator: Send + Sync {
    fn name(&self) -> &str;
    /// Returns the generated asset URL.
    async fn generate_video(&self, request: VideoRequest) -> BackendResult<String>;
}

#[async_trait]
pub trait SeriesGenerator: Send + Sync {
    fn name(&self) -> &str;
    /// Generate every prompt in order, keeping partial results.
    async fn generate_ordered(&self, request: SeriesRequest) -> SeriesOutcome;
}

#[async_trait]
pub trait PaletteExtractor: Send + Sync {
    fn name(&self) -> &str;
    /// Extract `swatch_count` swatches (already checked against `[3, 8]`).
    async fn extract(&self, image: &ImageInput, swatch_count: usize) -> Result<Palette>;
}

/// The set of backends one orchestrator dispatches to.
#[derive(Clone)]
pub struct Backends {
    pub text: Arc<dyn TextGenerator>,
    pub image: Arc<dyn ImageGenerator>,
    pub video: Arc<dyn VideoGenerator>,
    pub series: Arc<dyn SeriesGenerator>,
    pub image_series: Arc<dyn SeriesGenerator>,
}

impl Backends {
    /// Use one backend for every role; series run part by part over its
    /// image and video generators.
    pub fn from_shared<B>(backend: Arc<B>) -> Self
    where
        B: TextGenerator + ImageGenerator + VideoGenerator + 'static,
    {
        Self {
            text: backend.clone(),
            image: backend.clone(),
            video: backend.clone(),
            series: Arc::new(OrderedVideoSeries::new(backend.clone())),
            image_series: Arc::new(OrderedImageSeries::new(backend)),
        }
    }

    pub fn with_series(mut self, series: Arc<dyn SeriesGenerator>) -> Self {
        self.series = series;
        self
    }

    pub fn with_image_series(mut self, image_series: Arc<dyn SeriesGenerator>) -> Self {
        self.image_series = image_series;
        self
    }
}

impl std::fmt::Debug for Backends {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backends")
            .field("text", &TextGenerator::name(self.text.as_ref()))
            .field("image", &ImageGenerator::name(self.image.as_ref()))
            .field("video", &VideoGenerator::name(self.video.as_ref()))
            .field("series", &self.series.name())
            .field("image_series", &self.image_series.name())
            .finish()
    }
}
