//! Series command implementation.
//!
//! Adds an image series to a result produced by `swatch generate`, using
//! that result's image as the reference.

use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::orchestrator::{FormatOrchestrator, GenerationRequest, SeriesMergeRequest};
use crate::output::{write_json, Printer};
use crate::types::{AspectRatio, CreativeResult, SeriesConfig};

/// Add an image series to an earlier result
#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Result JSON from `swatch generate`
    pub result: PathBuf,

    /// The request that produced the result (for domain, palette and customizations)
    #[arg(long)]
    pub request: PathBuf,

    /// Number of images (3 to 10)
    #[arg(long, default_value = "4")]
    pub count: u8,

    /// Series theme: seasons, time-of-day, moods, evolution
    #[arg(long, default_value = "seasons")]
    pub theme: String,

    /// Aspect ratio of every image
    #[arg(long, default_value = "1:1")]
    pub aspect: AspectRatio,

    #[command(flatten)]
    pub backend: super::BackendArgs,

    /// Write the merged result here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub async fn run(args: SeriesArgs, printer: &Printer) -> Result<()> {
    let existing: CreativeResult = super::read_json(&args.result)?;
    let request = GenerationRequest::from_json(&super::read_text(&args.request)?)?;
    let config = args.backend.load_config()?;
    let backends = args.backend.backends(&config)?;

    let series = SeriesConfig::new(args.count, &args.theme).with_aspect_ratio(args.aspect);
    let merge = SeriesMergeRequest::from_request(&request, series);

    printer.status(
        "Generating",
        &format!("{} image series ({} images)", args.theme, args.count),
    );

    let orchestrator = FormatOrchestrator::new(backends, config);
    let reporter = super::report_progress(orchestrator.subscribe(), *printer);
    let merged = orchestrator.create_series(existing, merge).await;
    drop(orchestrator);
    let _ = reporter.await;

    let merged = merged?;
    super::summarize(&merged, printer);
    write_json(&merged, args.output.as_deref())
}
