//! Prompt command implementation.
//!
//! Validates a request and prints every prompt it would send, without
//! calling any backend.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::{Result, SwatchError};
use crate::orchestrator::GenerationRequest;
use crate::output::{write_json, Printer};
use crate::prompt::{theme, PromptBuilder};
use crate::types::{expand_formats, OutputFormat};
use crate::validation::{print_diagnostics, validate_request};

/// Print the prompts a request would send
#[derive(Args, Debug)]
pub struct PromptArgs {
    /// Request JSON
    pub request: PathBuf,

    /// Ideas text to fold into the prompts, as if the text step had run
    #[arg(long)]
    pub ideas: Option<String>,

    /// Config file (for the series part count)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PromptArgs, printer: &Printer) -> Result<()> {
    let request = GenerationRequest::from_json(&super::read_text(&args.request)?)?;
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(std::path::Path::new("."))?.0,
    };

    let validation = validate_request(&request);
    if !validation.is_ok() {
        print_diagnostics(&validation, printer);
    }
    validation.into_result()?;

    let prompts = build_prompts(&request, &config, args.ideas.as_deref())?;

    if args.json {
        return write_json(&prompts, None);
    }
    for (task, lines) in &prompts {
        println!("## {}", task);
        for line in lines {
            println!("{}", line);
        }
        println!();
    }
    Ok(())
}

/// Every prompt of a request, keyed by task name.
pub fn build_prompts(
    request: &GenerationRequest,
    config: &Config,
    ideas: Option<&str>,
) -> Result<BTreeMap<&'static str, Vec<String>>> {
    let builder = PromptBuilder::new(request.domain, &request.palette, &request.customizations);
    let angle = request.image_prompt_choice.as_deref().unwrap_or_default();
    let mut prompts = BTreeMap::new();

    prompts.insert("ideas", vec![builder.ideas_instructions()]);
    for format in expand_formats(&request.formats) {
        let lines = match format {
            OutputFormat::Image => vec![builder.image_prompt(angle, ideas)?],
            OutputFormat::Video => vec![builder.video_prompt(angle, ideas)?],
            OutputFormat::Series => {
                builder.video_series_prompts(config.defaults.series_parts, ideas)
            }
            OutputFormat::ImageSeries => {
                let series = request.image_series_config.as_ref().ok_or_else(|| {
                    SwatchError::validation("The image-series format needs an imageSeriesConfig")
                })?;
                let theme = theme(&series.theme_id).ok_or_else(|| {
                    SwatchError::validation(format!("Unknown series theme '{}'", series.theme_id))
                })?;
                builder.image_series_prompts(theme, series.count as usize)
            }
            OutputFormat::Combined => continue,
        };
        prompts.insert(format.as_str(), lines);
    }

    Ok(prompts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Domain, Palette, PaletteEntry, SeriesConfig};

    #[test]
    fn test_build_prompts_for_every_format() {
        let palette = Palette::new(vec![
            PaletteEntry::new("#2A9D8F", "Teal", "Dominant"),
            PaletteEntry::new("#E9C46A", "Sand", "Accent"),
        ]);
        let request = GenerationRequest::new(
            Domain::Interior,
            palette,
            vec![OutputFormat::Combined, OutputFormat::ImageSeries],
        )
        .with_prompt_choice("Room Overview")
        .with_image_series(SeriesConfig::new(5, "time-of-day"));

        let prompts = build_prompts(&request, &Config::default(), Some("A coastal loft")).unwrap();

        let keys: Vec<&str> = prompts.keys().copied().collect();
        assert_eq!(keys, vec!["ideas", "image", "image-series", "series", "video"]);
        assert_eq!(prompts["series"].len(), 3);
        assert_eq!(prompts["image-series"].len(), 5);
        assert!(prompts["image"][0].contains("Teal (#2A9D8F)"));
    }
}
