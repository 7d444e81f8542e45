//! Wire formats for Ludonet responses.
//!
//! This crate defines how raw response bytes become values:
//!
//! - **Formats** ([`FormatHandler`] trait, [`Json`], [`Text`]) — how a
//!   buffered body or a single streamed line is decoded.
//! - **Line framing** ([`LineStream`]) — how a stream of arbitrary byte
//!   chunks is re-framed into newline-delimited records.
//! - **Errors** ([`WireError`]) — what can go wrong while decoding.
//!
//! # Architecture
//!
//! The wire layer sits between transport (raw bytes) and the request
//! orchestrator (URLs, auth, status classification). It knows nothing
//! about endpoints or entities — only how bytes become records.
//!
//! ```text
//! Transport (bytes) → Wire (records) → Requestor (converted values)
//! ```

mod error;
mod format;
mod stream;

pub use error::WireError;
pub use format::{FormatHandler, Json, Text};
pub use stream::LineStream;
