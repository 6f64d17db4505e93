//! JSON codecs: nested (`json`) and single-level (`flat`).

use serde_json::Value;

use loctree_core::NamespaceContent;

use crate::error::CodecError;
use crate::flatten::{flatten, unflatten};

/// Decode a JSON document into flat dotted keys. `json` and `flat` decode
/// identically; a flat file simply has no nesting to collapse.
pub fn decode(bytes: &[u8]) -> Result<NamespaceContent, CodecError> {
    let value: Value = serde_json::from_slice(bytes)?;
    flatten(&value)
}

/// Encode as a nested JSON object, dotted keys expanded.
pub fn encode_nested(content: &NamespaceContent) -> Result<Vec<u8>, CodecError> {
    let value = unflatten(content)?;
    let mut bytes = serde_json::to_vec_pretty(&value)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Encode as a single-level JSON object, dotted keys kept literal.
pub fn encode_flat(content: &NamespaceContent) -> Result<Vec<u8>, CodecError> {
    let mut bytes = serde_json::to_vec_pretty(content)?;
    bytes.push(b'\n');
    Ok(bytes)
}
