//! Parsers for backend replies.
//!
//! Generative backends answer in free text. This module turns those replies
//! into typed values, tolerating the usual wrapping (prose, code fences,
//! slightly broken JSON) before giving up with a parse error.
//!
//! # Usage
//!
//! ```
//! use swatch::parser::parse_palette_response;
//!
//! let reply = "Here you go:\n```json\n[\"#FF0000\", \"#00FF00\", \"#0000FF\"]\n```";
//! let palette = parse_palette_response(reply).unwrap();
//! assert_eq!(palette.len(), 3);
//! ```

mod fence;
mod palette_response;

pub use fence::extract_fenced;
pub use palette_response::parse_palette_response;
