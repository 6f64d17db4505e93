//! Error types for loctree-sync.

use std::path::PathBuf;

use thiserror::Error;

use loctree_codecs::CodecError;
use loctree_core::Format;
use loctree_remote::RemoteError;

/// All errors that can arise from a synchronization run.
///
/// The engine performs no retries and no rollback; the first error at any
/// stage aborts the run and propagates whole.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A local file's extension disagrees with the requested target format.
    #[error("format mismatch! found {found} but requested {requested} ({})", path.display())]
    FormatMismatch {
        found: Format,
        requested: Format,
        path: PathBuf,
    },

    /// A codec could not parse or produce content; annotated with the
    /// offending path and target format (user-facing diagnostic).
    #[error("invalid content for \"{format}\" format!\n{source}\n{}", path.display())]
    InvalidContent {
        path: PathBuf,
        format: Format,
        #[source]
        source: CodecError,
    },

    /// An error from the remote store boundary.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// A codec error outside the per-file decode path.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
