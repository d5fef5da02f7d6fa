use clap::Parser;
use miette::Result;
use swatch::cli::{Cli, Commands};
use swatch::output::Printer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `SWATCH_LOG=swatch=debug`.
const LOG_ENV: &str = "SWATCH_LOG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Generate(args) => swatch::cli::generate::run(args, &printer).await?,
        Commands::Series(args) => swatch::cli::series::run(args, &printer).await?,
        Commands::Extract(args) => swatch::cli::extract::run(args, &printer).await?,
        Commands::Harmony(args) => swatch::cli::harmony::run(args, &printer)?,
        Commands::Mix(args) => swatch::cli::mix::run(args, &printer)?,
        Commands::Adjust(args) => swatch::cli::adjust::run(args, &printer)?,
        Commands::Prompt(args) => swatch::cli::prompt::run(args, &printer)?,
        Commands::Init(args) => swatch::cli::init::run(args, &printer)?,
        Commands::Completions(args) => swatch::cli::completions::run(args)?,
    }

    Ok(())
}
