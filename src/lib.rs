//! swatch - palette-driven creative generation
//!
//! Turns an extracted colour palette into generated creative content (a
//! text concept, an image, a video, image and video series) by fanning one
//! request out to external generative backends and folding their answers
//! into a single result.

pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod types;
pub mod validation;

pub use backend::{
    Backends, BackendError, HttpBackend, ImageGenerator, LocalExtractor, PaletteExtractor,
    ScriptedBackend, SeriesGenerator, TextGenerator, VideoGenerator,
};
pub use config::{Config, CONFIG_FILENAME};
pub use error::{Result, SwatchError};
pub use orchestrator::{
    extract_palette, FormatOrchestrator, GenerationRequest, ProgressEstimator, ProgressEvent,
    RunState, SeriesMergeRequest,
};
pub use parser::parse_palette_response;
pub use prompt::{customization_context, domain_prompt, resolve_dominant_accent, PromptBuilder};
pub use types::{
    adjust_color, generate_harmonies, hex_to_rgb, hsl_to_rgb, mix_colors, rgb_to_hex, rgb_to_hsl,
    AspectRatio, Colour, CreativeResult, Customizations, Domain, Harmonies, Hsl, HslProperty,
    OutputFormat, Outcome, Palette, PaletteEntry, SeriesConfig,
};
pub use validation::{validate_request, Diagnostic, Severity, ValidationResult};
