//! Request orchestration: URL resolution, auth, sending, and response
//! dispatch.
//!
//! [`Requestor`] owns the base endpoint, the bearer token, and the
//! transport. Endpoint methods describe a request through
//! [`RequestBuilder`] and finish it with one of the receive methods,
//! which classify the outcome in a fixed order:
//!
//! 1. a transport failure aborts with [`ApiError::Transport`] — no
//!    retry at this layer;
//! 2. a completed response with status >= 400 becomes
//!    [`ApiError::Response`];
//! 3. anything else is decoded by the chosen format and run through
//!    the entity converter.

use std::pin::Pin;
use std::sync::Arc;

use futures_util::{Stream, StreamExt};
use ludonet_models::Entity;
use ludonet_transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, RequestBody,
    StreamingResponse, TransportError, Url,
};
use ludonet_wire::{FormatHandler, Json, LineStream, Text};
use serde_json::Value;

use crate::{ApiError, ResponseError};

/// Base URL for the hosted service.
pub const API_URL: &str = "https://ludonet.org/";

/// A lazy stream of decoded JSON records from a streaming endpoint.
///
/// Single-pass and forward-only. Dropping it before exhaustion releases
/// the underlying connection.
pub type RecordStream =
    Pin<Box<dyn Stream<Item = Result<Value, ApiError>> + Send>>;

/// A lazy stream of text lines from a streaming endpoint.
pub type TextStream =
    Pin<Box<dyn Stream<Item = Result<String, ApiError>> + Send>>;

/// Issues authenticated requests against the configured base endpoint.
///
/// One requestor is shared by all endpoint groups of a [`Client`];
/// every request it issues is independent and carries its own buffers,
/// so concurrent requests never share mutable state.
///
/// [`Client`]: crate::Client
#[derive(Debug)]
pub struct Requestor<T> {
    transport: T,
    base_url: Url,
    token: String,
}

impl<T: HttpTransport> Requestor<T> {
    /// Creates a requestor for the given endpoint and bearer token.
    pub fn new(
        transport: T,
        base_url: Url,
        token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url,
            token: token.into(),
        }
    }

    /// The configured base endpoint.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Starts building a request for the given verb and path.
    ///
    /// `path` resolves against the base endpoint with RFC 3986 join
    /// semantics: a relative path is appended, an absolute URL replaces
    /// the base entirely.
    pub fn request(
        &self,
        method: Method,
        path: impl Into<String>,
    ) -> RequestBuilder<'_, T> {
        RequestBuilder {
            requestor: self,
            method,
            path: path.into(),
            params: Vec::new(),
            body: None,
            entity: None,
        }
    }

    /// Convenience for a GET request.
    pub fn get(&self, path: impl Into<String>) -> RequestBuilder<'_, T> {
        self.request(Method::Get, path)
    }

    /// Convenience for a POST request.
    pub fn post(&self, path: impl Into<String>) -> RequestBuilder<'_, T> {
        self.request(Method::Post, path)
    }
}

/// One request in the making: optional query parameters, body, and
/// entity converter, finished by a receive method.
#[derive(Debug)]
pub struct RequestBuilder<'a, T> {
    requestor: &'a Requestor<T>,
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    body: Option<RequestBody>,
    entity: Option<Entity>,
}

impl<T: HttpTransport> RequestBuilder<'_, T> {
    /// Appends one query parameter. Call repeatedly with the same key
    /// for multi-value filters — the key is repeated in the query
    /// string.
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Sets a URL-encoded form body.
    pub fn form(
        mut self,
        pairs: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Self {
        self.body = Some(RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        ));
        self
    }

    /// Sets a JSON body.
    pub fn json_body(mut self, value: Value) -> Self {
        self.body = Some(RequestBody::Json(value));
        self
    }

    /// Sets a plain-text body.
    pub fn text_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    /// Tags the response with an entity kind; its conversion rules run
    /// over every decoded record.
    pub fn convert(mut self, entity: Entity) -> Self {
        self.entity = Some(entity);
        self
    }

    fn build(&self, accept: &'static str) -> Result<HttpRequest, ApiError> {
        let mut url = self
            .requestor
            .base_url
            .join(&self.path)
            .map_err(TransportError::from)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(
                self.params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(HttpRequest {
            method: self.method,
            url,
            headers: vec![
                (
                    "Authorization",
                    format!("Bearer {}", self.requestor.token),
                ),
                ("Accept", accept.to_string()),
            ],
            body: self.body.clone(),
        })
    }

    /// Sends the request and decodes the buffered body as one JSON
    /// document, converted by the tagged entity.
    pub async fn recv_json(self) -> Result<Value, ApiError> {
        let entity = self.entity;
        let response = self.send_buffered(Json.accept()).await?;
        let value = Json.parse_whole(&response.body)?;
        Ok(apply(entity, value))
    }

    /// Sends the request and returns the buffered body as text.
    pub async fn recv_text(self) -> Result<String, ApiError> {
        let response = self.send_buffered(Text.accept()).await?;
        Ok(Text.parse_whole(&response.body)?)
    }

    /// Sends the request and returns a lazy stream of JSON records,
    /// one per line, each converted by the tagged entity. Blank
    /// keep-alive lines surface as empty records.
    pub async fn stream_json(self) -> Result<RecordStream, ApiError> {
        let entity = self.entity;
        let response = self.send_streaming(Json.accept()).await?;
        let records = LineStream::new(Json, response.chunks).map(
            move |item| match item {
                Ok(value) => Ok(apply(entity, value)),
                Err(e) => Err(ApiError::from(e)),
            },
        );
        Ok(records.boxed())
    }

    /// Sends the request and returns a lazy stream of text lines.
    pub async fn stream_text(self) -> Result<TextStream, ApiError> {
        let response = self.send_streaming(Text.accept()).await?;
        let lines = LineStream::new(Text, response.chunks)
            .map(|item| item.map_err(ApiError::from));
        Ok(lines.boxed())
    }

    async fn send_buffered(
        self,
        accept: &'static str,
    ) -> Result<HttpResponse, ApiError> {
        let request = self.build(accept)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            stream = false,
            "sending request"
        );
        let response = self.requestor.transport.send(request).await?;
        if response.status >= 400 {
            return Err(ResponseError::new(
                response.status,
                response.reason,
                response.body,
            )
            .into());
        }
        Ok(response)
    }

    async fn send_streaming(
        self,
        accept: &'static str,
    ) -> Result<StreamingResponse<T::Chunks>, ApiError> {
        let request = self.build(accept)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            stream = true,
            "sending request"
        );
        let response =
            self.requestor.transport.send_streaming(request).await?;
        if response.status >= 400 {
            let status = response.status;
            let reason = response.reason.clone();
            // The error body is needed whole for the cause.
            let body = response.drain_body().await?;
            return Err(ResponseError::new(status, reason, body).into());
        }
        Ok(response)
    }
}

fn apply(entity: Option<Entity>, value: Value) -> Value {
    match entity {
        Some(entity) => entity.convert(value),
        None => value,
    }
}

/// Pulls a required field out of a 2xx response body.
pub(crate) fn extract_field(
    mut value: Value,
    key: &'static str,
) -> Result<Value, ApiError> {
    match value.get_mut(key) {
        Some(field) => Ok(field.take()),
        None => Err(ApiError::MissingField(key)),
    }
}

/// Pulls the conventional boolean `ok` acknowledgement out of a
/// response body.
pub(crate) fn extract_ok(value: Value) -> Result<bool, ApiError> {
    extract_field(value, "ok")?
        .as_bool()
        .ok_or(ApiError::MissingField("ok"))
}

/// Shares one requestor across all endpoint groups.
pub(crate) type SharedRequestor<T> = Arc<Requestor<T>>;

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures_util::stream::Empty;

    /// A transport that must never be reached — these tests only
    /// exercise request construction.
    struct UnreachableTransport;

    impl HttpTransport for UnreachableTransport {
        type Chunks = Empty<Result<Bytes, TransportError>>;

        async fn send(
            &self,
            _request: HttpRequest,
        ) -> Result<HttpResponse, TransportError> {
            unreachable!("request construction tests never send")
        }

        async fn send_streaming(
            &self,
            _request: HttpRequest,
        ) -> Result<StreamingResponse<Self::Chunks>, TransportError>
        {
            unreachable!("request construction tests never send")
        }
    }

    fn requestor() -> Requestor<UnreachableTransport> {
        Requestor::new(
            UnreachableTransport,
            Url::parse(API_URL).unwrap(),
            "tok-123",
        )
    }

    #[test]
    fn test_relative_path_appends_to_base() {
        let requestor = requestor();
        let request =
            requestor.get("api/account").build("application/json").unwrap();
        assert_eq!(request.url.as_str(), "https://ludonet.org/api/account");
    }

    #[test]
    fn test_rooted_path_replaces_base_path() {
        let requestor = requestor();
        let request = requestor
            .get("/api/board/seek")
            .build("application/json")
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://ludonet.org/api/board/seek"
        );
    }

    #[test]
    fn test_absolute_url_replaces_base_entirely() {
        let requestor = requestor();
        let request = requestor
            .get("https://mirror.example.com/api/account")
            .build("application/json")
            .unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://mirror.example.com/api/account"
        );
    }

    #[test]
    fn test_bearer_and_accept_headers_attached() {
        let requestor = requestor();
        let request =
            requestor.get("api/account").build("application/json").unwrap();
        assert!(request.headers.contains(&(
            "Authorization",
            "Bearer tok-123".to_string()
        )));
        assert!(request
            .headers
            .contains(&("Accept", "application/json".to_string())));
    }

    #[test]
    fn test_repeated_query_keys_for_multi_value_filters() {
        let requestor = requestor();
        let request = requestor
            .get("api/games")
            .query("ids", "g1")
            .query("ids", "g2")
            .query("max", 5)
            .build("application/json")
            .unwrap();
        assert_eq!(request.url.query(), Some("ids=g1&ids=g2&max=5"));
    }

    #[test]
    fn test_no_params_leaves_query_absent() {
        let requestor = requestor();
        let request =
            requestor.get("api/account").build("application/json").unwrap();
        assert_eq!(request.url.query(), None);
    }

    #[test]
    fn test_form_body_is_carried() {
        let requestor = requestor();
        let request = requestor
            .post("api/board/seek")
            .form([("time", "10".to_string()), ("rated", "false".to_string())])
            .build("text/plain")
            .unwrap();
        assert_eq!(
            request.body,
            Some(RequestBody::Form(vec![
                ("time".to_string(), "10".to_string()),
                ("rated".to_string(), "false".to_string()),
            ]))
        );
    }

    #[test]
    fn test_extract_field_takes_named_value() {
        let value = serde_json::json!({"prefs": {"dark": true}});
        let prefs = extract_field(value, "prefs").unwrap();
        assert_eq!(prefs, serde_json::json!({"dark": true}));
    }

    #[test]
    fn test_extract_field_missing_is_typed_error() {
        let err =
            extract_field(serde_json::json!({}), "prefs").unwrap_err();
        assert!(matches!(err, ApiError::MissingField("prefs")));
    }

    #[test]
    fn test_extract_ok() {
        assert!(extract_ok(serde_json::json!({"ok": true})).unwrap());
        assert!(!extract_ok(serde_json::json!({"ok": false})).unwrap());
        assert!(extract_ok(serde_json::json!({"ok": "yes"})).is_err());
    }
}
