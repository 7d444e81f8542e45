//! The top-level [`Client`] tying endpoint groups to one requestor.

use std::sync::Arc;

use ludonet_transport::{HttpTransport, TransportError, Url};

use crate::ApiError;
use crate::account::Account;
use crate::board::Board;
use crate::games::Games;
use crate::requestor::{API_URL, Requestor};
use crate::teams::Teams;
use crate::users::Users;

/// Client for the hosted game service.
///
/// All endpoint groups share one [`Requestor`] (and with it one
/// transport connection pool). The groups are plain fields, so usage
/// reads as `client.board.make_move(...)`.
#[derive(Debug)]
pub struct Client<T> {
    /// Account endpoints for the authenticated user.
    pub account: Account<T>,
    /// Game listing endpoints.
    pub games: Games<T>,
    /// Board-play endpoints (streams, moves, seeks, chat).
    pub board: Board<T>,
    /// Other-user endpoints.
    pub users: Users<T>,
    /// Team membership endpoints.
    pub teams: Teams<T>,
}

impl<T: HttpTransport> Client<T> {
    /// Builds a client over a specific transport and base endpoint.
    ///
    /// This is the constructor tests use to substitute a mock
    /// transport; [`Client::new`] is the production spelling.
    pub fn with_transport(
        transport: T,
        base_url: &str,
        token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(TransportError::from)?;
        let requestor =
            Arc::new(Requestor::new(transport, base_url, token));
        Ok(Self {
            account: Account::new(Arc::clone(&requestor)),
            games: Games::new(Arc::clone(&requestor)),
            board: Board::new(Arc::clone(&requestor)),
            users: Users::new(Arc::clone(&requestor)),
            teams: Teams::new(requestor),
        })
    }
}

#[cfg(feature = "reqwest")]
impl Client<ludonet_transport::ReqwestTransport> {
    /// Builds a client for the hosted service with the given bearer
    /// token.
    pub fn new(token: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_base_url(token, API_URL)
    }

    /// Builds a client against a different base endpoint (e.g. a
    /// self-hosted instance).
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, ApiError> {
        Self::with_transport(
            ludonet_transport::ReqwestTransport::new(),
            base_url,
            token,
        )
    }
}
