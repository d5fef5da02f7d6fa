use miette::Diagnostic;
use thiserror::Error;

use crate::backend::BackendError;

/// Main error type for swatch operations
#[derive(Error, Diagnostic, Debug)]
pub enum SwatchError {
    #[error("IO error: {0}")]
    #[diagnostic(code(swatch::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(swatch::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(swatch::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(swatch::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Backend error: {0}")]
    #[diagnostic(code(swatch::backend))]
    Backend(#[from] BackendError),

    #[error("Nothing could be generated ({} failed)", errors.len())]
    #[diagnostic(
        code(swatch::aggregate),
        help("Every requested format failed; see the errors list for reasons")
    )]
    NothingGenerated { errors: Vec<String> },
}

impl SwatchError {
    /// Shorthand for a validation error without help text.
    pub fn validation(message: impl Into<String>) -> Self {
        SwatchError::Validation {
            message: message.into(),
            help: None,
        }
    }

    /// True for errors raised before any backend was called.
    pub fn is_validation(&self) -> bool {
        matches!(self, SwatchError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, SwatchError>;
