//! Local repository reader: per-namespace files under the reference
//! language directory.

use std::path::Path;

use loctree_core::{Format, LocalNamespace, NamespaceName};

use crate::error::{io_err, SyncError};
use crate::options::SyncOptions;

/// Enumerate and decode the reference language's namespace files.
///
/// A missing reference directory is the first-sync case and yields an empty
/// list. Only regular files with a recognized extension are considered;
/// entries are returned in file-name order.
///
/// Side effect (unless dry-run): the reference directory is created first.
pub fn read_reference(opt: &SyncOptions) -> Result<Vec<LocalNamespace>, SyncError> {
    let dir = opt.reference_dir();
    if !opt.dry {
        std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    }
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<_> = std::fs::read_dir(&dir)
        .map_err(|e| io_err(&dir, e))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    let mut records = Vec::new();
    for entry in entries {
        let path = entry.path();
        let Some((stem, extension)) = split_name(&path) else {
            continue;
        };
        let formats = Format::for_extension(&extension);
        if formats.is_empty() {
            continue;
        }
        if !formats.contains(&opt.format) {
            return Err(SyncError::FormatMismatch {
                found: formats[0],
                requested: opt.format,
                path,
            });
        }

        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;
        let content = loctree_codecs::decode(opt.format, &bytes, &opt.reference_language)
            .map_err(|source| SyncError::InvalidContent {
                path: path.clone(),
                format: opt.format,
                source,
            })?;

        records.push(LocalNamespace {
            namespace: NamespaceName::from(stem),
            path,
            extension,
            content,
        });
    }
    Ok(records)
}

/// File stem and extension (dot included), or `None` for extension-less
/// files. A file with an extension always has a non-empty stem, so a
/// namespace name can never come out empty.
fn split_name(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_string_lossy().into_owned();
    let extension = format!(".{}", path.extension()?.to_string_lossy());
    Some((stem, extension))
}
