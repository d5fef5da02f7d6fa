pub mod adjust;
pub mod completions;
pub mod extract;
pub mod generate;
pub mod harmony;
pub mod init;
pub mod mix;
pub mod prompt;
pub mod series;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::backend::{Backends, HttpBackend, ScriptedBackend};
use crate::config::Config;
use crate::error::{Result, SwatchError};
use crate::orchestrator::ProgressEvent;
use crate::output::{display_path, plural, Printer};
use crate::types::CreativeResult;

/// swatch - palette-driven creative generation
#[derive(Parser, Debug)]
#[command(name = "swatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate creative content from a request file
    Generate(generate::GenerateArgs),

    /// Add an image series to an earlier result
    Series(series::SeriesArgs),

    /// Extract a palette from an image
    Extract(extract::ExtractArgs),

    /// Show the colour harmonies of a base colour
    Harmony(harmony::HarmonyArgs),

    /// Mix two colours
    Mix(mix::MixArgs),

    /// Change one HSL property of one swatch in a palette
    Adjust(adjust::AdjustArgs),

    /// Print the prompts a request would send, without calling a backend
    Prompt(prompt::PromptArgs),

    /// Write a default swatch.yaml
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Backend selection shared by commands that call a backend.
#[derive(Args, Debug, Clone, Default)]
pub struct BackendArgs {
    /// Config file (default: ./swatch.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the config
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Use the offline scripted backend instead of a real one
    #[arg(long)]
    pub dry_run: bool,
}

impl BackendArgs {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::discover(Path::new("."))?.0,
        };
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = Some(endpoint.clone());
        }
        Ok(config)
    }

    pub fn backends(&self, config: &Config) -> Result<Backends> {
        if self.dry_run {
            return Ok(Backends::from_shared(Arc::new(ScriptedBackend::new())));
        }
        let endpoint = require_endpoint(config)?;
        Ok(Backends::from_shared(Arc::new(HttpBackend::new(endpoint))))
    }
}

pub(crate) fn require_endpoint(config: &Config) -> Result<&str> {
    config.endpoint.as_deref().ok_or_else(|| SwatchError::Validation {
        message: "No backend endpoint is configured".to_string(),
        help: Some("Set `endpoint` in swatch.yaml, pass --endpoint, or use --dry-run".to_string()),
    })
}

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| SwatchError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| SwatchError::Parse {
        message: format!("Invalid JSON in {}: {}", display_path(path), e),
        help: None,
    })
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SwatchError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Print progress events as status lines until the channel closes.
pub(crate) fn report_progress(
    mut events: broadcast::Receiver<ProgressEvent>,
    printer: Printer,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ProgressEvent::TaskDispatched { task, .. }) => {
                    printer.info("Dispatching", &task.to_string());
                }
                Ok(ProgressEvent::TaskCompleted { task, .. }) => {
                    printer.status("Finished", &task.to_string());
                }
                Ok(ProgressEvent::TaskFailed { task, reason, .. }) => {
                    printer.warning("Failed", &format!("{}: {}", task, reason));
                }
                Ok(_) => {}
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// One-line summary of a finished run.
pub(crate) fn summarize(result: &CreativeResult, printer: &Printer) {
    let generated: Vec<&str> = result.formats_generated.iter().map(|f| f.as_str()).collect();
    if !generated.is_empty() {
        printer.status("Generated", &generated.join(", "));
    }
    if let Some(reason) = &result.ideas_error {
        printer.warning("Ideas", &format!("not generated: {}", reason));
    }
    if !result.errors.is_empty() {
        printer.warning(
            "Errors",
            &plural(result.errors.len(), "format failed", "formats failed"),
        );
    }
}
