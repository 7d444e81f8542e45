//! Format handlers for decoding response bodies.
//!
//! A format handler knows how to turn raw bytes into one decoded value,
//! both for a whole buffered body and for a single line of a streamed
//! body. The two shipped handlers are [`Json`] (NDJSON-capable) and
//! [`Text`] (plain lines). Endpoints pick a handler per request; the
//! handler also supplies the `Accept` header value for that request.

use serde_json::Value;

use crate::WireError;

/// Decodes response bytes into values of one format.
///
/// `decode_line` is called once per complete newline-delimited line of a
/// streamed body, never with the terminator included. `empty_line` is
/// the sentinel for a zero-byte line: long-lived streams emit blank
/// lines as keep-alive heartbeats, and those must surface as values
/// rather than terminate or stall the stream.
pub trait FormatHandler: Send + Sync + Copy + 'static {
    /// The decoded value type.
    type Output: Send + 'static;

    /// The MIME type to request via the `Accept` header.
    fn accept(&self) -> &'static str;

    /// Decodes an entire buffered body as one value.
    fn parse_whole(&self, body: &[u8]) -> Result<Self::Output, WireError>;

    /// Decodes one complete, non-empty line.
    fn decode_line(&self, line: &[u8]) -> Result<Self::Output, WireError>;

    /// The sentinel value for an empty (keep-alive) line.
    fn empty_line(&self) -> Self::Output;
}

/// JSON format: whole bodies are one document, streamed bodies are
/// newline-delimited JSON with `{}` as the keep-alive sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl FormatHandler for Json {
    type Output = Value;

    fn accept(&self) -> &'static str {
        "application/json"
    }

    fn parse_whole(&self, body: &[u8]) -> Result<Value, WireError> {
        serde_json::from_slice(body).map_err(WireError::Decode)
    }

    fn decode_line(&self, line: &[u8]) -> Result<Value, WireError> {
        serde_json::from_slice(line).map_err(WireError::Decode)
    }

    fn empty_line(&self) -> Value {
        Value::Object(serde_json::Map::new())
    }
}

/// Plain-text format: whole bodies and lines are UTF-8 strings, and an
/// empty line decodes to the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl FormatHandler for Text {
    type Output = String;

    fn accept(&self) -> &'static str {
        "text/plain"
    }

    fn parse_whole(&self, body: &[u8]) -> Result<String, WireError> {
        std::str::from_utf8(body)
            .map(str::to_owned)
            .map_err(WireError::Utf8)
    }

    fn decode_line(&self, line: &[u8]) -> Result<String, WireError> {
        self.parse_whole(line)
    }

    fn empty_line(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_accept_mime_type() {
        assert_eq!(Json.accept(), "application/json");
    }

    #[test]
    fn test_text_accept_mime_type() {
        assert_eq!(Text.accept(), "text/plain");
    }

    #[test]
    fn test_json_parse_whole_document() {
        let value = Json.parse_whole(br#"{"id":"game-1","rated":true}"#).unwrap();
        assert_eq!(value["id"], "game-1");
        assert_eq!(value["rated"], true);
    }

    #[test]
    fn test_json_parse_whole_rejects_malformed() {
        let err = Json.parse_whole(b"{\"id\":").unwrap_err();
        assert!(matches!(err, WireError::Decode(_)));
    }

    #[test]
    fn test_json_decode_line() {
        let value = Json.decode_line(br#"{"a":1}"#).unwrap();
        assert_eq!(value, serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_json_empty_line_is_empty_object() {
        assert_eq!(Json.empty_line(), serde_json::json!({}));
    }

    #[test]
    fn test_text_parse_whole() {
        let text = Text.parse_whole(b"1. e4 e5 2. Nf3").unwrap();
        assert_eq!(text, "1. e4 e5 2. Nf3");
    }

    #[test]
    fn test_text_rejects_invalid_utf8() {
        let err = Text.parse_whole(&[0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, WireError::Utf8(_)));
    }

    #[test]
    fn test_text_empty_line_is_empty_string() {
        assert_eq!(Text.empty_line(), "");
    }
}
