//! Error types for loctree-remote.

use thiserror::Error;

use loctree_codecs::CodecError;

/// All errors that can arise from talking to the remote translation store.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Transport failure: connection, TLS, timeout, or body read error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API reported an error payload (`errorMessage` or `message`).
    #[error("remote API error: {message}")]
    Api { message: String },

    /// Non-success HTTP status with no usable error payload.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Fetched namespace content could not be flattened.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
