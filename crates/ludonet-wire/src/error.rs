//! Error types for the wire layer.

use ludonet_transport::TransportError;

/// Errors that can occur while decoding a response body.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// A body or line failed to parse as JSON.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A text body or line was not valid UTF-8.
    #[error("invalid utf-8 in response: {0}")]
    Utf8(#[source] std::str::Utf8Error),

    /// The underlying chunk stream failed mid-body.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
