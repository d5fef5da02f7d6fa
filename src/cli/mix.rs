//! Mix command implementation.

use clap::Args;

use crate::error::{Result, SwatchError};
use crate::output::Printer;
use crate::types::Colour;

/// Mix two colours
#[derive(Args, Debug)]
pub struct MixArgs {
    /// First colour as #RRGGBB
    pub a: String,

    /// Second colour as #RRGGBB
    pub b: String,

    /// Share of the second colour, 0.0 to 1.0
    #[arg(long, default_value = "0.5")]
    pub ratio: f64,
}

pub fn run(args: MixArgs, printer: &Printer) -> Result<()> {
    if !(0.0..=1.0).contains(&args.ratio) {
        return Err(SwatchError::Validation {
            message: format!("Mix ratio {} is outside 0.0..=1.0", args.ratio),
            help: Some("0.0 gives the first colour, 1.0 the second".to_string()),
        });
    }

    let a = Colour::from_hex(&args.a)?;
    let b = Colour::from_hex(&args.b)?;
    let mixed = a.mix(b, args.ratio);

    printer.info(
        "Mixed",
        &format!("{} + {} at {:.2}", printer.chip(a), printer.chip(b), args.ratio),
    );
    println!("{}", mixed);
    Ok(())
}
