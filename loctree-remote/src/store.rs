//! The remote-service collaborator boundary.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use loctree_core::{BlobDescriptor, LanguageCode, NamespaceContent, NamespaceName};

use crate::error::RemoteError;

/// Key mutations for one (language, namespace) push. `None` serializes to
/// JSON `null`, the remote store's deletion marker.
pub type UpdatePayload = BTreeMap<String, Option<String>>;

/// Operations the synchronization engine needs from the remote store.
///
/// `Sync` is a supertrait so one store can serve concurrent fan-out workers.
pub trait RemoteStore: Sync {
    /// Authoritative language list for the project/version.
    fn list_languages(&self) -> Result<Vec<LanguageCode>, RemoteError>;

    /// Every (language, namespace) blob known to the remote store.
    fn list_blobs(&self) -> Result<Vec<BlobDescriptor>, RemoteError>;

    /// A namespace's current content, flattened, plus its modification time
    /// when the store reports one. A namespace the store has never seen is
    /// empty content, not an error.
    fn fetch_namespace(
        &self,
        language: &LanguageCode,
        namespace: &NamespaceName,
        is_private: bool,
    ) -> Result<(NamespaceContent, Option<DateTime<Utc>>), RemoteError>;

    /// Apply a set of key mutations to one language/namespace.
    fn push_changes(
        &self,
        language: &LanguageCode,
        namespace: &NamespaceName,
        payload: &UpdatePayload,
    ) -> Result<(), RemoteError>;
}

/// Parse a wire blob key into its language and namespace.
///
/// Public projects: `<project>/<version>/<language>/<namespace>`.
/// Private projects carry an extra segment:
/// `<project>/<version>/<segment>/<language>/<namespace>`.
pub fn parse_blob_key(key: &str, is_private: bool) -> Option<(LanguageCode, NamespaceName)> {
    let segments: Vec<&str> = key.split('/').collect();
    let expected = if is_private { 5 } else { 4 };
    if segments.len() != expected {
        return None;
    }
    let (language, namespace) = if is_private {
        (segments[3], segments[4])
    } else {
        (segments[2], segments[3])
    };
    if language.is_empty() || namespace.is_empty() {
        return None;
    }
    Some((LanguageCode::from(language), NamespaceName::from(namespace)))
}
