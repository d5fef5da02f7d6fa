//! Harmony command implementation.

use clap::Args;

use crate::error::Result;
use crate::output::{write_json, Printer};
use crate::types::{generate_harmonies, Colour};

/// Show the colour harmonies of a base colour
#[derive(Args, Debug)]
pub struct HarmonyArgs {
    /// Base colour as #RRGGBB
    pub base: String,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: HarmonyArgs, printer: &Printer) -> Result<()> {
    // Strict parse so a typo is an error rather than harmonies of black
    let base = Colour::from_hex(&args.base)?;
    let harmonies = generate_harmonies(&base.to_string());

    if args.json {
        return write_json(&harmonies, None);
    }

    for harmony in harmonies.iter() {
        let chips: Vec<String> = harmony
            .colours
            .iter()
            .map(|hex| printer.chip(Colour::from_hex(hex).unwrap_or(Colour::BLACK)))
            .collect();
        println!("{:<20} {}", harmony.name, chips.join("  "));
        println!("{:<20} {}", "", printer.dim(&harmony.description));
    }
    Ok(())
}
