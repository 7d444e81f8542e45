//! Endpoints about the authenticated account.

use ludonet_models::Entity;
use ludonet_transport::HttpTransport;
use serde_json::Value;

use crate::ApiError;
use crate::requestor::{SharedRequestor, extract_field};

/// Client for account endpoints.
#[derive(Debug)]
pub struct Account<T> {
    requestor: SharedRequestor<T>,
}

impl<T: HttpTransport> Account<T> {
    pub(crate) fn new(requestor: SharedRequestor<T>) -> Self {
        Self { requestor }
    }

    /// Public information about the authenticated user.
    pub async fn get(&self) -> Result<Value, ApiError> {
        self.requestor
            .get("api/account")
            .convert(Entity::Account)
            .recv_json()
            .await
    }

    /// Preferences of the authenticated user.
    pub async fn preferences(&self) -> Result<Value, ApiError> {
        let value = self
            .requestor
            .get("api/account/preferences")
            .recv_json()
            .await?;
        extract_field(value, "prefs")
    }
}
