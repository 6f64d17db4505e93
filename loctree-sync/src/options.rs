//! Immutable configuration for one synchronization run.

use std::path::PathBuf;
use std::time::Duration;

use loctree_core::{Format, LanguageCode, NamespaceName};

/// Options for one sync run. Built once by the caller, never mutated by the
/// engine; no state survives between runs.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Remote project identifier.
    pub project_id: String,
    /// Remote project version (`latest`, `production`, ...).
    pub version: String,
    /// Base URL of the translation service API.
    pub api_path: String,
    /// Credential forwarded as the Authorization header.
    pub api_key: Option<String>,
    /// Local translation tree root.
    pub path: PathBuf,
    /// Source-of-truth language for structural changes.
    pub reference_language: LanguageCode,
    /// Target file format for local namespace files.
    pub format: Format,
    /// Prefix for language folder names (`""` or e.g. `"locale-"`).
    pub language_folder_prefix: String,
    /// Simulate: compute everything, write and push nothing.
    pub dry: bool,
    /// Wipe the local root before syncing.
    pub clean: bool,
    /// Do not write namespaces whose content is empty.
    pub skip_empty: bool,
    /// Also push value changes, not just key additions/removals.
    pub update_values: bool,
    /// How long to wait after pushes before the final pull; see
    /// [`crate::pipeline::DEFAULT_SETTLE_DELAY`].
    pub settle_delay: Duration,
}

impl SyncOptions {
    /// `<root>/<prefix><language>`
    pub fn language_dir(&self, language: &LanguageCode) -> PathBuf {
        self.path
            .join(format!("{}{}", self.language_folder_prefix, language))
    }

    /// The reference language's directory.
    pub fn reference_dir(&self) -> PathBuf {
        self.language_dir(&self.reference_language)
    }

    /// `<root>/<prefix><language>/<namespace><ext>`
    pub fn namespace_file(&self, language: &LanguageCode, namespace: &NamespaceName) -> PathBuf {
        self.language_dir(language)
            .join(format!("{}{}", namespace, self.format.extension()))
    }

    /// Language encoded by a directory name, if it follows the
    /// `<prefix><language>` convention.
    pub fn language_of_dir(&self, dir_name: &str) -> Option<LanguageCode> {
        dir_name
            .strip_prefix(&self.language_folder_prefix)
            .filter(|rest| !rest.is_empty())
            .map(LanguageCode::from)
    }
}
