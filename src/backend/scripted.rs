//! Deterministic offline backend.
//!
//! Returns placeholder asset URLs, records every call, and can be told to
//! fail or stall for a given role. Backs `swatch generate --dry-run` and the
//! test suite.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Palette, PaletteEntry};

use super::{
    BackendError, BackendResult, ImageGenerator, ImageInput, ImageRequest, PaletteExtractor,
    TextGenerator, TextRequest, VideoGenerator, VideoRequest,
};

/// Which service a call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Text,
    Image,
    Video,
    Palette,
}

#[derive(Debug, Clone)]
enum Failure {
    Always(BackendError),
    /// 1-based call number.
    OnCall(usize, BackendError),
}

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    failures: HashMap<Role, Failure>,
    delays: HashMap<Role, Duration>,
    sequence: AtomicUsize,
    log: Mutex<Vec<(Role, String)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every call for `role`.
    pub fn fail(mut self, role: Role, error: BackendError) -> Self {
        self.failures.insert(role, Failure::Always(error));
        self
    }

    /// Fail only the `nth` (1-based) call for `role`.
    pub fn fail_nth(mut self, role: Role, nth: usize, error: BackendError) -> Self {
        self.failures.insert(role, Failure::OnCall(nth, error));
        self
    }

    /// Sleep before answering calls for `role`.
    pub fn delay(mut self, role: Role, delay: Duration) -> Self {
        self.delays.insert(role, delay);
        self
    }

    /// Number of calls received for `role`.
    pub fn calls(&self, role: Role) -> usize {
        self.lock_log().iter().filter(|(r, _)| *r == role).count()
    }

    /// Total calls across every role.
    pub fn total_calls(&self) -> usize {
        self.lock_log().len()
    }

    /// Prompts (or instructions) received for `role`, in call order.
    pub fn prompts(&self, role: Role) -> Vec<String> {
        self.lock_log()
            .iter()
            .filter(|(r, _)| *r == role)
            .map(|(_, p)| p.clone())
            .collect()
    }

    fn lock_log(&self) -> std::sync::MutexGuard<'_, Vec<(Role, String)>> {
        self.log.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn answer(&self, role: Role, input: String) -> BackendResult<usize> {
        let call = {
            let mut log = self.lock_log();
            log.push((role, input));
            log.iter().filter(|(r, _)| *r == role).count()
        };

        if let Some(delay) = self.delays.get(&role) {
            tokio::time::sleep(*delay).await;
        }

        match self.failures.get(&role) {
            Some(Failure::Always(error)) => Err(error.clone()),
            Some(Failure::OnCall(nth, error)) if *nth == call => Err(error.clone()),
            _ => Ok(self.sequence.fetch_add(1, Ordering::SeqCst) + 1),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_text(&self, request: TextRequest) -> BackendResult<String> {
        let id = self.answer(Role::Text, request.instructions.clone()).await?;
        Ok(format!(
            "Concept #{} for {}: a study in {}.",
            id,
            request.domain,
            request.palette.names().join(", ")
        ))
    }
}

#[async_trait]
impl ImageGenerator for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_image(&self, request: ImageRequest) -> BackendResult<String> {
        let id = self.answer(Role::Image, request.prompt).await?;
        Ok(format!("scripted://image/{}?ratio={}", id, request.aspect_ratio))
    }
}

#[async_trait]
impl VideoGenerator for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate_video(&self, request: VideoRequest) -> BackendResult<String> {
        let id = self.answer(Role::Video, request.prompt).await?;
        Ok(format!("scripted://video/{}?ratio={}", id, request.aspect_ratio))
    }
}

#[async_trait]
impl PaletteExtractor for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn extract(&self, image: &ImageInput, swatch_count: usize) -> Result<Palette> {
        self.answer(Role::Palette, image.mime.clone()).await?;

        const GREYS: [(&str, &str); 8] = [
            ("#1A1A1A", "Charcoal"),
            ("#333333", "Graphite"),
            ("#4D4D4D", "Slate"),
            ("#666666", "Pewter"),
            ("#808080", "Stone"),
            ("#999999", "Ash"),
            ("#B3B3B3", "Silver"),
            ("#CCCCCC", "Mist"),
        ];

        let entries = GREYS
            .iter()
            .take(swatch_count)
            .enumerate()
            .map(|(i, (hex, name))| {
                let role = if i == 0 {
                    "Dominant"
                } else if i + 1 == swatch_count {
                    "Accent"
                } else {
                    "Supporting"
                };
                PaletteEntry::new(*hex, *name, role)
            })
            .collect();

        Ok(Palette::new(entries))
    }
}
