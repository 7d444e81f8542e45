//! # Ludonet
//!
//! Client library for the Ludonet game-hosting HTTP API.
//!
//! Ludonet issues authenticated requests, decodes both single JSON
//! responses and newline-delimited streaming responses, converts epoch
//! timestamps in responses into RFC 3339 values, and surfaces a typed
//! error taxonomy separating connection failures from HTTP error
//! statuses.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use ludonet::Client;
//!
//! # async fn run() -> Result<(), ludonet::ApiError> {
//! let client = Client::new("my-api-token")?;
//!
//! // Single response, fields converted in place.
//! let me = client.account.get().await?;
//!
//! // Long-lived stream, one record per line.
//! let mut events = client.board.stream_incoming_events().await?;
//! while let Some(event) = events.next().await {
//!     println!("{}", event?);
//! }
//! # Ok(())
//! # }
//! ```

mod account;
mod board;
mod client;
mod enums;
mod error;
mod games;
mod requestor;
mod teams;
mod users;

pub use account::Account;
pub use board::{Board, SeekParams};
pub use client::Client;
pub use enums::{Color, Mode, PerfType, Room, Variant};
pub use error::{ApiError, ResponseError};
pub use games::Games;
pub use requestor::{
    API_URL, RecordStream, RequestBuilder, Requestor, TextStream,
};
pub use teams::Teams;
pub use users::Users;

// The boundary types callers implement or hold.
pub use ludonet_models::Entity;
pub use ludonet_transport::{HttpTransport, Method, Url};
#[cfg(feature = "reqwest")]
pub use ludonet_transport::ReqwestTransport;
pub use ludonet_wire::{Json, Text};
