//! # loctree-remote
//!
//! The remote translation-store boundary: the [`RemoteStore`] collaborator
//! contract the engine is written against, and [`HttpRemote`], its blocking
//! HTTP implementation.

pub mod client;
pub mod error;
pub mod store;

pub use client::HttpRemote;
pub use error::RemoteError;
pub use store::{parse_blob_key, RemoteStore, UpdatePayload};
