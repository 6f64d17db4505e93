//! Translation synchronization engine.
//!
//! Reconciles a local language tree (one directory per language, one file
//! per namespace) with a remote translation store, pushing reference
//! language changes up and pulling the full merged set back down. The
//! remote side is abstracted behind [`loctree_remote::RemoteStore`], so the
//! engine itself never talks HTTP.

pub mod diff;
pub mod error;
pub mod options;
pub mod pipeline;
pub mod reader;
pub mod writer;

pub use diff::Diff;
pub use error::SyncError;
pub use options::SyncOptions;
pub use pipeline::{sync, NamespacePush, SyncReport, DEFAULT_SETTLE_DELAY};
pub use writer::WriteResult;
