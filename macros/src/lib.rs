//! Proc macros for pandoc-reader.
//!
//! # Config derive macro
//!
//! Generates field path accessors and a commented TOML template.
//!
//! ```ignore
//! #[derive(Config)]
//! #[config(section = "reading_time")]
//! /// Reading time estimation.
//! pub struct ReadingTimeConfig {
//!     /// Add `reading_time` to the metadata.
//!     pub enable: bool,
//!
//!     /// Reading speed.
//!     #[config(default = "200", inline_doc = "words per minute")]
//!     pub words_per_minute: WordsPerMinute,
//! }
//!
//! // Generates:
//! // - ReadingTimeConfig::FIELDS.enable -> FieldPath("reading_time.enable")
//! // - ReadingTimeConfig::template() -> TOML body with comments
//! // - ReadingTimeConfig::template_with_header() -> with [section] header
//! ```
//!
//! # Attributes
//!
//! Struct-level:
//! - `#[config(section = "path")]` - TOML section path
//!
//! Field-level (anything else is rejected):
//! - `#[config(default = "x")]` - Default value shown in template
//! - `#[config(inline_doc = "x")]` - Trailing comment in template
//!
//! # Section inference
//!
//! Without `section` attribute, inferred from struct name:
//! - `ReadingTimeConfig` → `reading_time`
//! - `PandocSectionConfig` → `pandoc`

mod config;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro that generates FIELDS and template().
#[proc_macro_derive(Config, attributes(config))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    config::derive(&input).into()
}
