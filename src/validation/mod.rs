//! Request validation.
//!
//! Runs every check against a generation request before any backend is
//! called. Errors stop the run; warnings are logged and the run proceeds.
//! Used by the orchestrator and by `swatch prompt`.

mod checks;
mod warning;

pub use checks::{
    check_customizations, check_formats, check_image_series, check_palette, check_prompt_choice,
    check_series_config,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::orchestrator::GenerationRequest;
use crate::output::Printer;

/// Run all checks against a request.
pub fn validate_request(request: &GenerationRequest) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(check_palette(&request.palette));
    result.merge(check_formats(&request.formats));
    result.merge(check_prompt_choice(
        request.domain,
        &request.formats,
        request.image_prompt_choice.as_deref(),
    ));
    result.merge(check_customizations(request.domain, &request.customizations));
    result.merge(check_image_series(
        &request.formats,
        request.image_series_config.as_ref(),
    ));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = format!("{}[{}]", d.severity, d.code);
        eprintln!("{}: {}", printer.severity(&label, d.is_error()), d.message);
        if let Some(help) = &d.help {
            eprintln!("  {} {}", printer.dim("help:"), help);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Customizations, Domain, OutputFormat, Palette, PaletteEntry, SeriesConfig};

    fn palette() -> Palette {
        Palette::new(vec![
            PaletteEntry::new("#FF0000", "Red", "Dominant"),
            PaletteEntry::new("#F4C430", "Saffron", "Accent"),
        ])
    }

    #[test]
    fn test_valid_request() {
        let request = GenerationRequest::new(Domain::Cooking, palette(), vec![OutputFormat::Combined])
            .with_prompt_choice("Dish Plated")
            .with_customizations(Customizations::new().with("cuisine", "Thai"));
        let result = validate_request(&request);
        assert!(result.is_ok(), "{:?}", result);
    }

    #[test]
    fn test_collects_every_problem() {
        let request = GenerationRequest::new(
            Domain::Art,
            Palette::default(),
            vec![OutputFormat::Image, OutputFormat::ImageSeries],
        )
        .with_image_series(SeriesConfig::new(1, "seasons"));

        let result = validate_request(&request);
        // empty palette, missing prompt choice, series count
        assert_eq!(result.error_count(), 3);
        assert!(result.into_result().unwrap_err().is_validation());
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let request = GenerationRequest::new(Domain::Interior, palette(), vec![OutputFormat::Series])
            .with_customizations(Customizations::new().with("budget", "low"));
        let warnings = validate_request(&request).into_result().unwrap();
        assert_eq!(warnings.len(), 1);
    }
}
