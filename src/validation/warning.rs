//! Diagnostics collected while checking a request.

use std::fmt;

use crate::error::SwatchError;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Machine-readable code, e.g. `swatch::validate::bad-hex`.
    pub code: String,
    pub message: String,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            message: message.into(),
            help: None,
        }
    }

    /// Attach a help message.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Check if this diagnostic is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)
    }
}

/// Everything a validation pass found.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Create an empty validation result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Count of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Count of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// All error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    /// All warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    /// No diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Iterate over all diagnostics in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// Fail on the first error, or hand back the warnings.
    ///
    /// With several errors, the message is the first one and the help text
    /// lists the rest.
    pub fn into_result(self) -> Result<Vec<Diagnostic>, SwatchError> {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            self.diagnostics.into_iter().partition(Diagnostic::is_error);

        let mut errors = errors.into_iter();
        let Some(first) = errors.next() else {
            return Ok(warnings);
        };

        let rest: Vec<String> = errors.map(|d| d.message).collect();
        let help = match (first.help, rest.is_empty()) {
            (help, true) => help,
            (Some(help), false) => Some(format!("{}\nAlso: {}", help, rest.join("; "))),
            (None, false) => Some(format!("Also: {}", rest.join("; "))),
        };
        Err(SwatchError::Validation {
            message: first.message,
            help,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ValidationResult::new();
        assert!(result.is_ok());
        assert!(!result.has_errors());
        assert!(result.into_result().unwrap().is_empty());
    }

    #[test]
    fn test_warnings_pass_through() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::warning("swatch::validate::unknown-key", "unknown key 'spice'"));

        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 1);
        let warnings = result.into_result().unwrap();
        assert_eq!(warnings[0].code, "swatch::validate::unknown-key");
    }

    #[test]
    fn test_errors_fold_into_one() {
        let mut result = ValidationResult::new();
        result.push(Diagnostic::error("swatch::validate::a", "first").with_help("fix it"));
        result.push(Diagnostic::warning("swatch::validate::b", "meh"));
        result.push(Diagnostic::error("swatch::validate::c", "second"));

        assert_eq!(result.error_count(), 2);
        match result.into_result().unwrap_err() {
            SwatchError::Validation { message, help } => {
                assert_eq!(message, "first");
                assert_eq!(help.as_deref(), Some("fix it\nAlso: second"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::error("swatch::validate::bad-hex", "'#ZZZ' is not a colour");
        assert_eq!(d.to_string(), "error[swatch::validate::bad-hex]: '#ZZZ' is not a colour");
    }
}
