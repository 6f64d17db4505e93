//! Local repository writer: language-directory hygiene and atomic namespace
//! file writes.
//!
//! Writes go to `<path>.loctree.tmp` and are renamed into place (atomic on
//! POSIX); a failed rename cleans up the temp file.

use std::path::{Path, PathBuf};

use loctree_core::{LanguageCode, NamespaceName};

use crate::error::{io_err, SyncError};
use crate::options::SyncOptions;

/// Outcome of one blob during the pull stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written.
    Written { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
    /// `skip_empty` policy: the namespace flattened to an empty mapping.
    SkippedEmpty {
        language: LanguageCode,
        namespace: NamespaceName,
    },
}

/// Remove everything under the local root (the `clean` policy knob). The
/// root itself survives; a missing root is a no-op.
pub fn clean_root(opt: &SyncOptions) -> Result<(), SyncError> {
    if !opt.path.exists() {
        return Ok(());
    }
    for entry in std::fs::read_dir(&opt.path).map_err(|e| io_err(&opt.path, e))? {
        let entry = entry.map_err(|e| io_err(&opt.path, e))?;
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let removed = if is_dir {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        removed.map_err(|e| io_err(&path, e))?;
    }
    Ok(())
}

/// Ensure the local root exists.
pub fn ensure_root(opt: &SyncOptions) -> Result<(), SyncError> {
    std::fs::create_dir_all(&opt.path).map_err(|e| io_err(&opt.path, e))
}

/// Delete local language directories for languages the remote no longer
/// knows (the reference language is never deleted), then (re)create a
/// directory per remote language. Dot-directories and directories that do
/// not follow the `<prefix><language>` convention are left alone.
pub fn cleanup_languages(
    opt: &SyncOptions,
    remote_languages: &[LanguageCode],
) -> Result<(), SyncError> {
    if opt.path.exists() {
        for entry in std::fs::read_dir(&opt.path).map_err(|e| io_err(&opt.path, e))? {
            let entry = entry.map_err(|e| io_err(&opt.path, e))?;
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            let Some(language) = opt.language_of_dir(&name) else {
                continue;
            };
            if language != opt.reference_language && !remote_languages.contains(&language) {
                tracing::info!("removing stale language directory {name}");
                std::fs::remove_dir_all(entry.path()).map_err(|e| io_err(entry.path(), e))?;
            }
        }
    }
    for language in remote_languages {
        let dir = opt.language_dir(language);
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    }
    Ok(())
}

/// Atomically write one encoded namespace file.
pub fn write_namespace(path: &Path, bytes: &[u8]) -> Result<WriteResult, SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    let tmp = PathBuf::from(format!("{}.loctree.tmp", path.display()));
    std::fs::write(&tmp, bytes).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }

    tracing::debug!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}
