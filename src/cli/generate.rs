//! Generate command implementation.
//!
//! Reads a request JSON file, runs it through the orchestrator and writes
//! the `CreativeResult` JSON to stdout (or `--output`).

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::orchestrator::{FormatOrchestrator, GenerationRequest};
use crate::output::{display_path, write_json, Printer};
use crate::types::expand_formats;

/// Generate creative content from a request file
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Request JSON ({path, palette, formats, imagePromptChoice, ...})
    pub request: PathBuf,

    #[command(flatten)]
    pub backend: super::BackendArgs,

    /// Write the result JSON here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: GenerateArgs, printer: &Printer) -> Result<()> {
    let request = GenerationRequest::from_json(&super::read_text(&args.request)?)?;
    let config = args.backend.load_config()?;
    let backends = args.backend.backends(&config)?;

    let formats: Vec<&str> = expand_formats(&request.formats)
        .iter()
        .map(|f| f.as_str())
        .collect();
    printer.status(
        "Generating",
        &format!(
            "{} for {} from {}",
            formats.join(", "),
            request.domain,
            display_path(&args.request)
        ),
    );

    let orchestrator = FormatOrchestrator::new(backends, config);
    let reporter = super::report_progress(orchestrator.subscribe(), *printer);
    let result = orchestrator.submit(request).await;

    // Closing the channel lets the reporter drain and stop
    drop(orchestrator);
    let _ = reporter.await;

    let result = result?;
    super::summarize(&result, printer);
    write_json(&result, args.output.as_deref())?;

    result.ensure_any().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CreativeResult;
    use tempfile::TempDir;

    const REQUEST: &str = r##"{
        "path": "art",
        "palette": [
            {"hex": "#1D3557", "name": "Prussian Blue", "suggestedRole": "Dominant"},
            {"hex": "#E63946", "name": "Imperial Red", "suggestedRole": "Accent"}
        ],
        "imagePromptChoice": "Finished Artwork",
        "formats": ["combined"]
    }"##;

    #[tokio::test]
    async fn test_dry_run_writes_result() {
        let dir = TempDir::new().unwrap();
        let request = dir.path().join("request.json");
        let output = dir.path().join("result.json");
        std::fs::write(&request, REQUEST).unwrap();

        let args = GenerateArgs {
            request,
            backend: super::super::BackendArgs {
                dry_run: true,
                ..Default::default()
            },
            output: Some(output.clone()),
        };
        run(args, &Printer::plain()).await.unwrap();

        let result: CreativeResult =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(result.formats_generated.len(), 3);
        assert!(result.errors.is_empty());
        assert!(result.image_url.is_some());
    }

    #[tokio::test]
    async fn test_missing_endpoint() {
        let dir = TempDir::new().unwrap();
        let request = dir.path().join("request.json");
        std::fs::write(&request, REQUEST).unwrap();
        let config = dir.path().join("swatch.yaml");
        std::fs::write(&config, "grace_period_ms: 0\n").unwrap();

        let args = GenerateArgs {
            request,
            backend: super::super::BackendArgs {
                config: Some(config),
                ..Default::default()
            },
            output: None,
        };
        let err = run(args, &Printer::plain()).await.unwrap_err();
        assert!(err.is_validation());
    }
}
