//! Extract command implementation.
//!
//! Pulls a palette out of an image and prints it as JSON, ready to paste
//! into a generation request.

use std::path::PathBuf;

use clap::Args;

use crate::backend::{detect_mime, HttpBackend, ImageInput, LocalExtractor, PaletteExtractor};
use crate::error::{Result, SwatchError};
use crate::orchestrator::extract_palette;
use crate::output::{display_path, plural, write_json, Printer};

/// Extract a palette from an image
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// PNG, JPEG, GIF or WebP image
    pub image: PathBuf,

    /// Number of swatches (3 to 8)
    #[arg(long, short = 'n', default_value = "5")]
    pub count: usize,

    /// Ask the configured backend's vision model instead of sampling locally
    #[arg(long)]
    pub remote: bool,

    /// Config file (default: ./swatch.yaml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding the config
    #[arg(long)]
    pub endpoint: Option<String>,
}

pub async fn run(args: ExtractArgs, printer: &Printer) -> Result<()> {
    let bytes = std::fs::read(&args.image).map_err(|e| SwatchError::Io {
        path: args.image.clone(),
        message: e.to_string(),
    })?;
    let mime = detect_mime(&bytes)?;
    let input = ImageInput {
        bytes,
        mime: mime.to_string(),
    };

    let extractor: Box<dyn PaletteExtractor> = if args.remote {
        let backend = super::BackendArgs {
            config: args.config.clone(),
            endpoint: args.endpoint.clone(),
            dry_run: false,
        };
        let config = backend.load_config()?;
        Box::new(HttpBackend::new(super::require_endpoint(&config)?))
    } else {
        Box::new(LocalExtractor::new())
    };

    let palette = extract_palette(extractor.as_ref(), &input, args.count).await?;

    printer.status(
        "Extracted",
        &format!(
            "{} from {}",
            plural(palette.len(), "colour", "colours"),
            display_path(&args.image)
        ),
    );
    for entry in palette.iter() {
        eprintln!(
            "{:>12} {} {}",
            "",
            printer.chip(entry.colour()),
            printer.dim(&format!("{} ({})", entry.name, entry.suggested_role))
        );
    }

    write_json(&palette, None)
}
