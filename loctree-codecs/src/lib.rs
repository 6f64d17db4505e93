//! # loctree-codecs
//!
//! Format codec registry: pure, stateless transcoders between file-format
//! bytes and a flat key→string mapping.
//!
//! [`decode`]/[`encode`] dispatch over the closed
//! [`Format`](loctree_core::Format) enum; each format lives in its own
//! module. Errors carry no file paths — the caller annotates.

pub mod error;
pub mod flatten;

mod csv;
mod json;
mod yaml;

use loctree_core::{Format, LanguageCode, NamespaceContent};

pub use error::CodecError;
pub use flatten::{flatten, unflatten};

/// Decode raw file bytes into a flat key→value mapping.
///
/// `reference_language` selects the value column for tabular formats; the
/// tree-shaped formats ignore it.
pub fn decode(
    format: Format,
    bytes: &[u8],
    reference_language: &LanguageCode,
) -> Result<NamespaceContent, CodecError> {
    match format {
        Format::Json | Format::Flat => json::decode(bytes),
        Format::Yaml => yaml::decode(bytes),
        Format::Csv => csv::decode(bytes, reference_language),
    }
}

/// Encode a flat mapping as file bytes for the target format.
pub fn encode(
    format: Format,
    content: &NamespaceContent,
    language: &LanguageCode,
) -> Result<Vec<u8>, CodecError> {
    match format {
        Format::Json => json::encode_nested(content),
        Format::Flat => json::encode_flat(content),
        Format::Yaml => yaml::encode(content),
        Format::Csv => csv::encode(content, language),
    }
}
