//! Endpoints about games of the authenticated user.

use ludonet_transport::HttpTransport;
use serde_json::Value;

use crate::ApiError;
use crate::requestor::{SharedRequestor, extract_field};

/// Client for games endpoints.
#[derive(Debug)]
pub struct Games<T> {
    requestor: SharedRequestor<T>,
}

impl<T: HttpTransport> Games<T> {
    pub(crate) fn new(requestor: SharedRequestor<T>) -> Self {
        Self { requestor }
    }

    /// The authenticated user's currently ongoing games, up to `count`.
    pub async fn ongoing(&self, count: u32) -> Result<Value, ApiError> {
        let value = self
            .requestor
            .get("api/account/playing")
            .query("nb", count)
            .recv_json()
            .await?;
        extract_field(value, "nowPlaying")
    }
}
