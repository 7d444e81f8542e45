//! Error taxonomy for the Ludonet client.
//!
//! Two tiers: [`ApiError`] covers everything a request can fail with —
//! a connection-level transport failure, a decode failure, or a
//! completed response with an error status. The last of those is
//! [`ResponseError`], which carries the status, reason phrase, and a
//! lazily parsed structured cause extracted from the error body.

use std::fmt;
use std::sync::OnceLock;

use bytes::Bytes;
use ludonet_transport::TransportError;
use ludonet_wire::WireError;
use serde_json::Value;

/// Top-level error for every client operation.
///
/// The `#[from]` attribute on each variant auto-generates `From`
/// impls, so `?` converts layer errors automatically. Nothing is
/// retried or recovered at this layer — every failure surfaces to the
/// caller as one of these.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying call could not complete (DNS, refused connection,
    /// timeout, TLS, or a body cut off mid-read).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response completed but its body or a streamed line failed to
    /// decode.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The response completed with status >= 400.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// A 2xx response did not contain a field an endpoint requires.
    #[error("missing field `{0}` in response")]
    MissingField(&'static str),
}

/// A completed HTTP response whose status indicates failure.
///
/// The structured cause is extracted from the body on first access and
/// cached. The cache distinguishes three states: not yet computed,
/// computed but absent (the body was not JSON), and computed-present.
/// A body that fails to parse yields the absent state — the parse
/// failure itself never propagates.
#[derive(Debug)]
pub struct ResponseError {
    status: u16,
    reason: String,
    body: Bytes,
    cause: OnceLock<Option<Value>>,
}

impl ResponseError {
    /// Builds a response error from a completed response's parts.
    pub fn new(status: u16, reason: impl Into<String>, body: Bytes) -> Self {
        Self {
            status,
            reason: reason.into(),
            body,
            cause: OnceLock::new(),
        }
    }

    /// HTTP status code of the response.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// HTTP reason phrase of the response.
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The structured cause parsed from the error body, if the body
    /// was valid JSON. Parsed at most once, then cached.
    pub fn cause(&self) -> Option<&Value> {
        self.cause
            .get_or_init(|| serde_json::from_slice(&self.body).ok())
            .as_ref()
    }

    /// The raw error body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    fn band_template(&self) -> Option<&'static str> {
        match self.status {
            400..=499 => Some("client error"),
            500..=599 => Some("server error"),
            // Statuses outside both bands get no descriptive template.
            _ => None,
        }
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.reason)?;
        if let Some(template) = self.band_template() {
            write!(f, " ({template})")?;
        }
        if let Some(cause) = self.cause() {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ResponseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_error(status: u16, reason: &str, body: &[u8]) -> ResponseError {
        ResponseError::new(status, reason, Bytes::copy_from_slice(body))
    }

    #[test]
    fn test_client_error_band_message() {
        let err = response_error(404, "Not Found", b"");
        let message = err.to_string();
        assert!(message.starts_with("HTTP 404:"), "{message}");
        assert!(message.contains("client error"), "{message}");
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.reason(), "Not Found");
    }

    #[test]
    fn test_server_error_band_message() {
        let err = response_error(503, "Service Unavailable", b"");
        let message = err.to_string();
        assert!(message.starts_with("HTTP 503:"), "{message}");
        assert!(message.contains("server error"), "{message}");
    }

    #[test]
    fn test_out_of_band_status_has_bare_message() {
        let err = response_error(302, "Found", b"");
        assert_eq!(err.to_string(), "HTTP 302: Found");
    }

    #[test]
    fn test_cause_parsed_from_json_body() {
        let err = response_error(400, "Bad Request", br#"{"error":"invalid move"}"#);
        let cause = err.cause().unwrap();
        assert_eq!(cause["error"], "invalid move");
        assert!(err.to_string().contains("invalid move"));
    }

    #[test]
    fn test_cause_absent_for_non_json_body() {
        let err = response_error(502, "Bad Gateway", b"<html>oops</html>");
        // Absent on first and every subsequent access.
        assert!(err.cause().is_none());
        assert!(err.cause().is_none());
        assert!(!err.to_string().contains("oops"));
    }

    #[test]
    fn test_cause_computed_once() {
        let err = response_error(400, "Bad Request", br#"{"n":1}"#);
        let first = err.cause().unwrap() as *const Value;
        let second = err.cause().unwrap() as *const Value;
        assert_eq!(first, second, "cause should be cached, not re-parsed");
    }

    #[test]
    fn test_api_error_from_transport() {
        let err: ApiError = TransportError::SendFailed(
            std::io::Error::other("refused"),
        )
        .into();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_api_error_from_wire() {
        let decode_err =
            serde_json::from_slice::<Value>(b"{").unwrap_err();
        let err: ApiError = WireError::Decode(decode_err).into();
        assert!(matches!(err, ApiError::Wire(_)));
    }

    #[test]
    fn test_api_error_from_response() {
        let err: ApiError =
            response_error(429, "Too Many Requests", b"").into();
        assert!(matches!(err, ApiError::Response(_)));
        assert!(err.to_string().starts_with("HTTP 429:"));
    }
}
