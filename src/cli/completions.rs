//! Shell completion scripts for the `swatch` binary.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::error::{Result, SwatchError};

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let script = script(args.shell);
    match args.output {
        Some(path) => std::fs::write(&path, script).map_err(|e| SwatchError::Io {
            path,
            message: e.to_string(),
        }),
        None => Ok(std::io::stdout().write_all(&script)?),
    }
}

fn script(shell: Shell) -> Vec<u8> {
    let mut cmd = super::Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "swatch", &mut buf);
    buf
}
