//! Run configuration (swatch.yaml).
//!
//! Every field has a default, so a missing file or an empty one both give a
//! usable configuration. CLI flags override what is loaded here.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SwatchError};
use crate::types::AspectRatio;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILENAME: &str = "swatch.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the HTTP backend. Without one, only dry runs are possible.
    pub endpoint: Option<String>,

    pub timeouts: Timeouts,

    pub defaults: Defaults,

    /// How long a finished run stays in its terminal state before the
    /// orchestrator drops back to idle.
    pub grace_period_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeouts: Timeouts::default(),
            defaults: Defaults::default(),
            grace_period_ms: 1500,
        }
    }
}

/// Per-backend timeouts, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    pub text: u64,
    pub image: u64,
    pub video: u64,
    /// Covers a whole series, not each part.
    pub series: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            text: 60,
            image: 120,
            video: 600,
            series: 900,
        }
    }
}

impl Timeouts {
    pub fn text(&self) -> Duration {
        Duration::from_secs(self.text)
    }

    pub fn image(&self) -> Duration {
        Duration::from_secs(self.image)
    }

    pub fn video(&self) -> Duration {
        Duration::from_secs(self.video)
    }

    pub fn series(&self) -> Duration {
        Duration::from_secs(self.series)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub image_aspect_ratio: AspectRatio,
    pub video_aspect_ratio: AspectRatio,
    /// Number of parts in a video series.
    pub series_parts: usize,
    pub video_duration_secs: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            image_aspect_ratio: AspectRatio::Square,
            video_aspect_ratio: AspectRatio::Landscape,
            series_parts: 3,
            video_duration_secs: 6,
        }
    }
}

impl Config {
    /// Load configuration from a swatch.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SwatchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `swatch.yaml` from `dir` if present, else defaults.
    ///
    /// The flag is true when a file was found.
    pub fn discover(dir: &Path) -> Result<(Self, bool)> {
        let path = dir.join(CONFIG_FILENAME);
        if path.is_file() {
            tracing::debug!(path = %path.display(), "loading config");
            Ok((Self::load(&path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Parse configuration from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // An empty document deserializes as null, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content).map_err(|e| SwatchError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.defaults.series_parts == 0 {
            return Err(SwatchError::Validation {
                message: "defaults.series_parts must be at least 1".to_string(),
                help: None,
            });
        }
        let t = &self.timeouts;
        if t.text == 0 || t.image == 0 || t.video == 0 || t.series == 0 {
            return Err(SwatchError::Validation {
                message: "Timeouts must be greater than zero".to_string(),
                help: Some("Timeouts are in seconds".to_string()),
            });
        }
        Ok(())
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }

    /// Render as YAML, for `swatch init`.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| SwatchError::Parse {
            message: format!("Could not serialize config: {}", e),
            help: None,
        })
    }
}
