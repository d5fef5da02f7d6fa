//! A vendor-agnostic JSON backend.
//!
//! Every role is a `POST {endpoint}/{role}` with a JSON body. Text and
//! palette calls answer `{"text": "..."}`, image and video calls answer
//! `{"url": "..."}`.

use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::parse_palette_response;
use crate::types::Palette;

use super::{
    BackendError, BackendResult, ImageGenerator, ImageInput, ImageRequest, PaletteExtractor,
    TextGenerator, TextRequest, VideoGenerator, VideoRequest,
};

/// Longest response body quoted back in a `Rejected` error.
const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct TextReply {
    text: String,
}

#[derive(Deserialize)]
struct UrlReply {
    url: String,
}

#[derive(Serialize)]
struct PaletteBody<'a> {
    image: String,
    mime: &'a str,
    swatch_count: usize,
}

impl HttpBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, role: &str) -> String {
        format!("{}/{}", self.endpoint, role)
    }

    async fn post<B, R>(&self, role: &str, body: &B) -> BackendResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let url = self.url(role);
        tracing::debug!(%url, "posting backend request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let response = check_response(response).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }
}

/// Turn a non-2xx reply into `Rejected`, quoting the start of the body.
async fn check_response(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    let message = if body.is_empty() {
        status.to_string()
    } else {
        let quoted: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("{}: {}", status, quoted)
    };
    Err(BackendError::Rejected(message))
}

#[async_trait]
impl TextGenerator for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate_text(&self, request: TextRequest) -> BackendResult<String> {
        let reply: TextReply = self.post("text", &request).await?;
        Ok(reply.text)
    }
}

#[async_trait]
impl ImageGenerator for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate_image(&self, request: ImageRequest) -> BackendResult<String> {
        let reply: UrlReply = self.post("image", &request).await?;
        Ok(reply.url)
    }
}

#[async_trait]
impl VideoGenerator for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn generate_video(&self, request: VideoRequest) -> BackendResult<String> {
        let reply: UrlReply = self.post("video", &request).await?;
        Ok(reply.url)
    }
}

#[async_trait]
impl PaletteExtractor for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn extract(&self, image: &ImageInput, swatch_count: usize) -> Result<Palette> {
        let body = PaletteBody {
            image: base64::engine::general_purpose::STANDARD.encode(&image.bytes),
            mime: &image.mime,
            swatch_count,
        };
        let reply: TextReply = self.post("palette", &body).await?;
        let palette = parse_palette_response(&reply.text)?;
        Ok(palette.truncated(swatch_count))
    }
}
