//! HTTP transport implementation using `reqwest`.

use std::io;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::{
    HttpRequest, HttpResponse, HttpTransport, RequestBody, StreamingResponse,
    TransportError,
};

/// A [`HttpTransport`] backed by a shared [`reqwest::Client`].
///
/// The inner client holds the connection pool; cloning this handle is
/// cheap and clones share the pool. No timeouts or retries are
/// configured — failure policy belongs to the caller.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wraps an existing `reqwest::Client`, keeping its configuration.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(&self, request: HttpRequest) -> reqwest::RequestBuilder {
        let method = match request.method {
            crate::Method::Get => reqwest::Method::GET,
            crate::Method::Post => reqwest::Method::POST,
            crate::Method::Put => reqwest::Method::PUT,
            crate::Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        match request.body {
            Some(RequestBody::Form(pairs)) => builder.form(&pairs),
            Some(RequestBody::Json(value)) => builder.json(&value),
            Some(RequestBody::Text(text)) => builder.body(text),
            None => builder,
        }
    }
}

fn send_error(e: reqwest::Error) -> TransportError {
    TransportError::SendFailed(io::Error::other(e))
}

fn receive_error(e: reqwest::Error) -> TransportError {
    TransportError::ReceiveFailed(io::Error::other(e))
}

fn reason_phrase(status: reqwest::StatusCode) -> String {
    status.canonical_reason().unwrap_or_default().to_string()
}

impl HttpTransport for ReqwestTransport {
    type Chunks =
        Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let response =
            self.build(request).send().await.map_err(send_error)?;
        let status = response.status();
        tracing::trace!(status = status.as_u16(), "response headers received");
        let body = response.bytes().await.map_err(receive_error)?;
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: reason_phrase(status),
            body,
        })
    }

    async fn send_streaming(
        &self,
        request: HttpRequest,
    ) -> Result<StreamingResponse<Self::Chunks>, TransportError> {
        let response =
            self.build(request).send().await.map_err(send_error)?;
        let status = response.status();
        tracing::trace!(status = status.as_u16(), "stream headers received");
        let chunks = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(receive_error))
            .boxed();
        Ok(StreamingResponse {
            status: status.as_u16(),
            reason: reason_phrase(status),
            chunks,
        })
    }
}
