//! Series generators built from single-asset backends.
//!
//! Parts run strictly in order, one call each. A failed part is recorded and
//! the remaining parts still run.

use std::sync::Arc;

use async_trait::async_trait;

use super::{
    ImageGenerator, ImageRequest, PartFailure, SeriesGenerator, SeriesOutcome, SeriesRequest,
    VideoGenerator, VideoRequest,
};

/// Video series: one video per prompt.
pub struct OrderedVideoSeries<V: ?Sized> {
    inner: Arc<V>,
}

impl<V: VideoGenerator + ?Sized> OrderedVideoSeries<V> {
    pub fn new(inner: Arc<V>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<V: VideoGenerator + ?Sized> SeriesGenerator for OrderedVideoSeries<V> {
    fn name(&self) -> &str {
        "ordered-video-series"
    }

    async fn generate_ordered(&self, request: SeriesRequest) -> SeriesOutcome {
        let mut outcome = SeriesOutcome::default();

        for (index, prompt) in request.prompts.into_iter().enumerate() {
            let part = VideoRequest {
                prompt,
                aspect_ratio: request.aspect_ratio,
                duration_secs: request.duration_secs,
                style: request.style.clone(),
            };
            match self.inner.generate_video(part).await {
                Ok(url) => outcome.urls.push(url),
                Err(error) => {
                    tracing::warn!(part = index + 1, %error, "video series part failed");
                    outcome.failures.push(PartFailure { index, error });
                }
            }
        }

        outcome
    }
}

/// Image series: one image per prompt, all sharing the same reference.
pub struct OrderedImageSeries<I: ?Sized> {
    inner: Arc<I>,
}

impl<I: ImageGenerator + ?Sized> OrderedImageSeries<I> {
    pub fn new(inner: Arc<I>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<I: ImageGenerator + ?Sized> SeriesGenerator for OrderedImageSeries<I> {
    fn name(&self) -> &str {
        "ordered-image-series"
    }

    async fn generate_ordered(&self, request: SeriesRequest) -> SeriesOutcome {
        let mut outcome = SeriesOutcome::default();

        for (index, prompt) in request.prompts.into_iter().enumerate() {
            let part = ImageRequest {
                prompt,
                aspect_ratio: request.aspect_ratio,
                reference_url: request.reference_url.clone(),
            };
            match self.inner.generate_image(part).await {
                Ok(url) => outcome.urls.push(url),
                Err(error) => {
                    tracing::warn!(part = index + 1, %error, "image series part failed");
                    outcome.failures.push(PartFailure { index, error });
                }
            }
        }

        outcome
    }
}
