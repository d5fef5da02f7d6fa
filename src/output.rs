//! Terminal output for the swatch CLI.
//!
//! Cargo-style status lines with right-aligned coloured verbs go to stderr;
//! stdout is reserved for JSON and other machine-readable output.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::{Result, SwatchError};
use crate::types::Colour;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Status printer. Colour is enabled when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// A printer that colours output when stderr is a terminal.
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// A printer that never emits escape codes.
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// e.g. "  Generating image, video, series"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print a cyan status line.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a yellow status line.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print a red status line.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Dim `text` when colour is on.
    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Bold `text` when colour is on.
    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// For paths and URLs.
    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    /// A diagnostic severity label, red for errors and yellow otherwise.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    /// A small block filled with `colour` followed by its hex. Without
    /// colour support only the hex is shown.
    pub fn chip(&self, colour: Colour) -> String {
        if self.color {
            format!(
                "\x1b[48;2;{};{};{}m    {RESET} {}",
                colour.r, colour.g, colour.b, colour
            )
        } else {
            colour.to_string()
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}");
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

/// Pluralize a count: `plural(1, "colour", "colours")` → "1 colour".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

/// Pretty JSON to `output`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| SwatchError::Parse {
        message: format!("Could not serialize output: {}", e),
        help: None,
    })?;

    match output {
        Some(path) => std::fs::write(path, json + "\n").map_err(|e| SwatchError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write output: {}", e),
        }),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
            Ok(())
        }
    }
}
