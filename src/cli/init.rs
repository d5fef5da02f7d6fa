//! Init command implementation.
//!
//! Writes a `swatch.yaml` holding every default, so each setting is
//! visible and can be edited in place.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::{Config, CONFIG_FILENAME};
use crate::error::{Result, SwatchError};
use crate::output::{display_path, Printer};

/// Write a default swatch.yaml
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to write into (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Backend base URL to record
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Overwrite an existing swatch.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let config_path = args.path.join(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        return Err(SwatchError::Validation {
            message: format!("{} already exists", CONFIG_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let config = Config {
        endpoint: args.endpoint,
        ..Config::default()
    };
    let yaml = format!(
        "# swatch configuration\n# Timeouts are in seconds.\n{}",
        config.to_yaml()?
    );

    fs::write(&config_path, yaml).map_err(|e| SwatchError::Io {
        path: config_path.clone(),
        message: format!("Failed to write {}: {}", CONFIG_FILENAME, e),
    })?;

    printer.status("Created", &display_path(&config_path));
    Ok(())
}
