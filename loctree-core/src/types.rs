//! Domain types for translation-tree synchronization.
//!
//! All path fields use `PathBuf`; never `&str` or `String` for filesystem paths.
//! Wire-facing types are serializable/deserializable via serde.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed language code (`en`, `de`, `pt-BR`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LanguageCode(pub String);

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for LanguageCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LanguageCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed namespace name; one namespace corresponds to one file
/// per language on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NamespaceName(pub String);

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for NamespaceName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for NamespaceName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// A namespace's flat translation content: unique dotted keys mapped to
/// string values, deterministic iteration order.
pub type NamespaceContent = BTreeMap<String, String>;

/// One per-namespace file found under the reference-language directory
/// during a sync run. Immutable after creation, discarded at run end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalNamespace {
    pub namespace: NamespaceName,
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// File extension including the dot (`.json`).
    pub extension: String,
    pub content: NamespaceContent,
}

// ---------------------------------------------------------------------------
// Remote blobs
// ---------------------------------------------------------------------------

/// One (language, namespace) pair known to the remote store.
///
/// A namespace that exists in the reference language but is missing for some
/// other known language is synthesized with `last_modified: None` and
/// `size: 0` — every language eventually gets a file per namespace, even an
/// empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobDescriptor {
    pub language: LanguageCode,
    pub namespace: NamespaceName,
    /// `None` for synthesized descriptors of not-yet-existing namespaces.
    pub last_modified: Option<DateTime<Utc>>,
    pub size: u64,
    pub url: String,
    pub is_private: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
