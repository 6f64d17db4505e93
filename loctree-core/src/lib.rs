//! Loctree core library — domain types shared across the workspace.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`format`] — the closed [`Format`] enum and its extension maps

pub mod format;
pub mod types;

pub use format::Format;
pub use types::{
    BlobDescriptor, LanguageCode, LocalNamespace, NamespaceContent, NamespaceName,
};
