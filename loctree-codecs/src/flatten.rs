//! Flatten nested JSON trees to dotted keys, and back.
//!
//! `{"a": {"b": "x"}}` ⇄ `{"a.b": "x"}`. Arrays flatten through numeric
//! segments (`list.0`, `list.1`); unflattening rebuilds them as objects,
//! which every supported codec accepts as input again.

use serde_json::{Map, Value};

use loctree_core::NamespaceContent;

use crate::error::CodecError;

/// Human-readable name of a JSON value kind, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Flatten a parsed document into a single-level dotted-key mapping.
///
/// `null` at the top level is an empty mapping (never-translated namespaces
/// download as `null` or `{}`). `null` leaves are treated as absent keys.
/// Non-string scalars stringify.
pub fn flatten(value: &Value) -> Result<NamespaceContent, CodecError> {
    let mut out = NamespaceContent::new();
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, key.clone(), &mut out);
            }
        }
        other => {
            return Err(CodecError::TopLevel {
                found: kind_of(other),
            })
        }
    }
    Ok(out)
}

fn flatten_into(value: &Value, prefix: String, out: &mut NamespaceContent) {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            out.insert(prefix, b.to_string());
        }
        Value::Number(n) => {
            out.insert(prefix, n.to_string());
        }
        Value::String(s) => {
            out.insert(prefix, s.clone());
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(child, format!("{prefix}.{index}"), out);
            }
        }
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(child, format!("{prefix}.{key}"), out);
            }
        }
    }
}

/// Rebuild a nested object from a dotted-key mapping.
///
/// Fails with [`CodecError::KeyConflict`] when a key nests under an existing
/// scalar (`a` = "x" alongside `a.b` = "y").
pub fn unflatten(content: &NamespaceContent) -> Result<Value, CodecError> {
    let mut root = Map::new();
    for (key, value) in content {
        insert_dotted(&mut root, key, value)?;
    }
    Ok(Value::Object(root))
}

fn insert_dotted(root: &mut Map<String, Value>, key: &str, value: &str) -> Result<(), CodecError> {
    let mut segments = key.split('.').peekable();
    let mut node = root;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            if node.contains_key(segment) {
                return Err(CodecError::KeyConflict {
                    key: key.to_owned(),
                });
            }
            node.insert(segment.to_owned(), Value::String(value.to_owned()));
            return Ok(());
        }
        node = node
            .entry(segment.to_owned())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| CodecError::KeyConflict {
                key: key.to_owned(),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn flattens_nested_objects() {
        let value = json!({"a": {"b": "x", "c": {"d": "y"}}, "e": "z"});
        let flat = flatten(&value).unwrap();
        assert_eq!(flat.get("a.b").map(String::as_str), Some("x"));
        assert_eq!(flat.get("a.c.d").map(String::as_str), Some("y"));
        assert_eq!(flat.get("e").map(String::as_str), Some("z"));
        assert_eq!(flat.len(), 3);
    }

    #[test]
    fn flattens_arrays_with_index_segments() {
        let value = json!({"list": ["a", "b"]});
        let flat = flatten(&value).unwrap();
        assert_eq!(flat.get("list.0").map(String::as_str), Some("a"));
        assert_eq!(flat.get("list.1").map(String::as_str), Some("b"));
    }

    #[test]
    fn null_leaves_are_absent() {
        let value = json!({"keep": "v", "drop": null});
        let flat = flatten(&value).unwrap();
        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key("keep"));
    }

    #[test]
    fn null_document_is_empty() {
        assert!(flatten(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn scalar_document_is_rejected() {
        let err = flatten(&json!("just a string")).unwrap_err();
        assert!(matches!(err, CodecError::TopLevel { found: "string" }));
    }

    #[test]
    fn non_string_scalars_stringify() {
        let flat = flatten(&json!({"n": 42, "b": true})).unwrap();
        assert_eq!(flat.get("n").map(String::as_str), Some("42"));
        assert_eq!(flat.get("b").map(String::as_str), Some("true"));
    }

    #[test]
    fn unflatten_rebuilds_nesting() {
        let mut content = NamespaceContent::new();
        content.insert("a.b".into(), "x".into());
        content.insert("a.c.d".into(), "y".into());
        content.insert("e".into(), "z".into());
        let value = unflatten(&content).unwrap();
        assert_eq!(value, json!({"a": {"b": "x", "c": {"d": "y"}}, "e": "z"}));
    }

    #[test]
    fn unflatten_flatten_roundtrip() {
        let mut content = NamespaceContent::new();
        content.insert("nav.home".into(), "Home".into());
        content.insert("nav.about".into(), "About".into());
        content.insert("title".into(), "Hello".into());
        let roundtripped = flatten(&unflatten(&content).unwrap()).unwrap();
        assert_eq!(roundtripped, content);
    }

    #[test]
    fn conflicting_nesting_is_an_error() {
        let mut content = NamespaceContent::new();
        content.insert("a".into(), "x".into());
        content.insert("a.b".into(), "y".into());
        let err = unflatten(&content).unwrap_err();
        assert!(matches!(err, CodecError::KeyConflict { .. }));
    }
}
