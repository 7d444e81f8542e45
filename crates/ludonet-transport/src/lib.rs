//! Transport abstraction layer for Ludonet.
//!
//! Provides the [`HttpTransport`] trait that abstracts over the actual
//! HTTP client. The trait takes a fully built request (method, URL,
//! headers, body) and returns a status code, a reason phrase, and either
//! a buffered body or a stream of raw byte chunks — nothing more. URL
//! resolution, authentication headers, status classification, and
//! response decoding all live in the layers above.
//!
//! # Feature Flags
//!
//! - `reqwest` (default) — HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "reqwest")]
mod http;

pub use error::TransportError;
#[cfg(feature = "reqwest")]
pub use http::ReqwestTransport;

use std::fmt;

use bytes::Bytes;
use futures_util::Stream;
pub use url::Url;

/// HTTP verb for an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// The verb as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of an outgoing request.
///
/// Form bodies are URL-encoded and JSON bodies serialized by the
/// transport implementation, so the layers above never deal with body
/// encoding themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` key/value pairs.
    Form(Vec<(String, String)>),
    /// A JSON document.
    Json(serde_json::Value),
    /// A plain-text body, sent as-is.
    Text(String),
}

/// A fully built request, ready to hand to an [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP verb.
    pub method: Method,
    /// Absolute request URL, query string included.
    pub url: Url,
    /// Headers to attach, in order.
    pub headers: Vec<(&'static str, String)>,
    /// Optional request payload.
    pub body: Option<RequestBody>,
}

/// A completed response with a fully buffered body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase (e.g. `"Not Found"`).
    pub reason: String,
    /// The entire response body.
    pub body: Bytes,
}

/// A response whose body arrives incrementally as byte chunks.
///
/// The chunk stream owns the underlying connection: dropping it before
/// exhaustion releases the connection.
#[derive(Debug)]
pub struct StreamingResponse<C> {
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase.
    pub reason: String,
    /// The body as a stream of raw byte chunks. Chunk boundaries carry
    /// no meaning — a chunk may hold a fraction of a line or many lines.
    pub chunks: C,
}

impl<C> StreamingResponse<C>
where
    C: Stream<Item = Result<Bytes, TransportError>> + Unpin,
{
    /// Reads the remaining chunks into a single buffer.
    ///
    /// Used when a streaming request comes back with an error status and
    /// the body is needed whole for error reporting.
    pub async fn drain_body(mut self) -> Result<Bytes, TransportError> {
        use bytes::BytesMut;
        use futures_util::StreamExt;

        let mut buf = BytesMut::new();
        while let Some(chunk) = self.chunks.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

/// Sends HTTP requests on behalf of the client.
///
/// Implementations only move bytes: they must not retry, follow custom
/// redirect policies, or inspect response bodies. Connection-level
/// failures surface as [`TransportError`]; a completed response is
/// returned whatever its status code.
pub trait HttpTransport: Send + Sync + 'static {
    /// The chunk stream type produced for streaming responses.
    type Chunks: Stream<Item = Result<Bytes, TransportError>>
        + Send
        + Unpin
        + 'static;

    /// Sends a request and buffers the entire response body.
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError>;

    /// Sends a request and returns the response body as a chunk stream.
    ///
    /// The response headers are read before this returns; the body is
    /// pulled from the wire as the caller polls the stream.
    async fn send_streaming(
        &self,
        request: HttpRequest,
    ) -> Result<StreamingResponse<Self::Chunks>, TransportError>;
}
