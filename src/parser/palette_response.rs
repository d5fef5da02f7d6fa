//! Recover a palette from a vision model's free-text reply.
//!
//! Models are asked for JSON but often wrap it in prose or code fences, or
//! drift into a loose list. Recovery runs in order:
//!
//! 1. the whole reply as JSON
//! 2. the first ```json (or bare) fenced block as JSON
//! 3. regex over object-like fragments (`{"hex": ..., "name": ...}`)
//! 4. regex over bare `#RRGGBB` tokens
//!
//! If every step comes up empty the reply is rejected; an empty palette is
//! never returned.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Result, SwatchError};
use crate::types::{Colour, Palette, PaletteEntry};

use super::fence::extract_fenced;

static OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("object regex should compile"));

static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"(?i)"(?:hex|colou?r|code)"\s*:\s*"#?([0-9a-f]{6})""##)
        .expect("hex regex should compile")
});

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"name"\s*:\s*"([^"]*)""#).expect("name regex should compile")
});

static ROLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)"(?:suggestedRole|suggested_role|role)"\s*:\s*"([^"]*)""#)
        .expect("role regex should compile")
});

static BARE_HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#([0-9a-fA-F]{6})\b").expect("bare hex regex should compile")
});

/// Keys a wrapping object may hold the swatch list under.
const LIST_KEYS: &[&str] = &["palette", "colors", "colours", "swatches"];
const HEX_KEYS: &[&str] = &["hex", "color", "colour", "code"];
const ROLE_KEYS: &[&str] = &["suggestedRole", "suggested_role", "role"];

/// Parse a palette out of a model reply.
pub fn parse_palette_response(text: &str) -> Result<Palette> {
    let text = text.trim();

    if let Some(palette) = from_json(text) {
        return Ok(palette);
    }
    if let Some(palette) = extract_fenced(text).and_then(from_json) {
        tracing::debug!("palette recovered from fenced block");
        return Ok(palette);
    }
    if let Some(palette) = from_object_fragments(text) {
        tracing::debug!("palette recovered from object fragments");
        return Ok(palette);
    }
    if let Some(palette) = from_bare_hexes(text) {
        tracing::debug!("palette recovered from bare hex codes");
        return Ok(palette);
    }

    Err(SwatchError::Parse {
        message: "Could not find a palette in the extraction response".to_string(),
        help: Some("Expected a JSON list of {hex, name, suggestedRole} objects".to_string()),
    })
}

fn from_json(text: &str) -> Option<Palette> {
    let value: Value = serde_json::from_str(text).ok()?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(map) => LIST_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))?,
        _ => return None,
    };

    let swatches: Vec<Swatch> = items.iter().filter_map(swatch_from_value).collect();
    finish(swatches)
}

fn swatch_from_value(value: &Value) -> Option<Swatch> {
    match value {
        Value::String(hex) => Some(Swatch::bare(normalise_hex(hex)?)),
        Value::Object(map) => {
            let hex = HEX_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .and_then(normalise_hex)?;
            let name = map.get("name").and_then(Value::as_str).map(str::to_string);
            let role = ROLE_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string);
            Some(Swatch { hex, name, role })
        }
        _ => None,
    }
}

fn from_object_fragments(text: &str) -> Option<Palette> {
    let swatches: Vec<Swatch> = OBJECT_RE
        .find_iter(text)
        .filter_map(|m| {
            let fragment = m.as_str();
            let hex = HEX_RE
                .captures(fragment)
                .and_then(|c| normalise_hex(c.get(1)?.as_str()))?;
            let name = NAME_RE
                .captures(fragment)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            let role = ROLE_RE
                .captures(fragment)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string());
            Some(Swatch { hex, name, role })
        })
        .collect();
    finish(swatches)
}

fn from_bare_hexes(text: &str) -> Option<Palette> {
    let mut swatches: Vec<Swatch> = Vec::new();
    for capture in BARE_HEX_RE.captures_iter(text) {
        let Some(hex) = capture.get(1).and_then(|m| normalise_hex(m.as_str())) else {
            continue;
        };
        if !swatches.iter().any(|s| s.hex == hex) {
            swatches.push(Swatch::bare(hex));
        }
    }
    finish(swatches)
}

/// A swatch before positional defaults are filled in.
struct Swatch {
    hex: String,
    name: Option<String>,
    role: Option<String>,
}

impl Swatch {
    fn bare(hex: String) -> Self {
        Self {
            hex,
            name: None,
            role: None,
        }
    }
}

fn finish(swatches: Vec<Swatch>) -> Option<Palette> {
    if swatches.is_empty() {
        return None;
    }
    let last = swatches.len() - 1;
    let entries = swatches
        .into_iter()
        .enumerate()
        .map(|(i, swatch)| {
            let name = swatch
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| format!("Colour {}", i + 1));
            let role = swatch.role.unwrap_or_else(|| positional_role(i, last).to_string());
            PaletteEntry::new(swatch.hex, name, role)
        })
        .collect();
    Some(Palette::new(entries))
}

fn positional_role(index: usize, last: usize) -> &'static str {
    match index {
        0 => "Dominant",
        i if i == last => "Accent",
        _ => "Supporting",
    }
}

/// Validate a hex code and return it as uppercase `#RRGGBB`.
fn normalise_hex(raw: &str) -> Option<String> {
    Colour::from_hex(raw.trim()).ok().map(|c| c.to_string())
}
