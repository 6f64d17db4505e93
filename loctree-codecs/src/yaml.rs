//! YAML codec: parsed through `serde_json::Value`, flattened like JSON.

use serde_json::Value;

use loctree_core::NamespaceContent;

use crate::error::CodecError;
use crate::flatten::{flatten, unflatten};

pub fn decode(bytes: &[u8]) -> Result<NamespaceContent, CodecError> {
    let value: Value = serde_yaml::from_slice(bytes)?;
    flatten(&value)
}

pub fn encode(content: &NamespaceContent) -> Result<Vec<u8>, CodecError> {
    let value = unflatten(content)?;
    Ok(serde_yaml::to_string(&value)?.into_bytes())
}
