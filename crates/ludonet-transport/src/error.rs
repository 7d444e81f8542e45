//! Error types for the transport layer.

/// Errors that can occur while sending a request or receiving its body.
///
/// These are connection-level failures — DNS resolution, refused
/// connections, timeouts, TLS handshakes, or a body cut off mid-read.
/// An HTTP response that completes with an error status is *not* a
/// `TransportError`; status classification happens above this layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be constructed — the path did not resolve
    /// against the base URL.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Sending the request failed before any response arrived.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving the response body (or the next chunk of it) failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),
}
