//! Error types for loctree-codecs.

use thiserror::Error;

/// All errors that can arise from decoding or encoding namespace files.
///
/// Codecs never annotate errors with file paths; the caller owns that
/// context.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON parse or serialize error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse or serialize error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV parse or write error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// I/O failure while writing encoded output to a buffer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document's top-level value is not an object/mapping.
    #[error("top-level value must be an object, found {found}")]
    TopLevel { found: &'static str },

    /// A dotted key nests under a key that already holds a scalar value
    /// (e.g. both `a` and `a.b` present).
    #[error("key \"{key}\" conflicts with an existing scalar value")]
    KeyConflict { key: String },
}
