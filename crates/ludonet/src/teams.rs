//! Endpoints for team membership.

use ludonet_models::Entity;
use ludonet_transport::HttpTransport;

use crate::ApiError;
use crate::requestor::{RecordStream, SharedRequestor, extract_ok};

/// Client for team endpoints.
#[derive(Debug)]
pub struct Teams<T> {
    requestor: SharedRequestor<T>,
}

impl<T: HttpTransport> Teams<T> {
    pub(crate) fn new(requestor: SharedRequestor<T>) -> Self {
        Self { requestor }
    }

    /// Streams the members of a team.
    pub async fn members(
        &self,
        team_id: &str,
    ) -> Result<RecordStream, ApiError> {
        self.requestor
            .get(format!("team/{team_id}/users"))
            .convert(Entity::User)
            .stream_json()
            .await
    }

    /// Joins a team.
    pub async fn join(&self, team_id: &str) -> Result<bool, ApiError> {
        let value = self
            .requestor
            .post(format!("/team/{team_id}/join"))
            .recv_json()
            .await?;
        extract_ok(value)
    }

    /// Leaves a team.
    pub async fn leave(&self, team_id: &str) -> Result<bool, ApiError> {
        let value = self
            .requestor
            .post(format!("/team/{team_id}/quit"))
            .recv_json()
            .await?;
        extract_ok(value)
    }

    /// Kicks a member out of a team the authenticated user leads.
    pub async fn kick_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<bool, ApiError> {
        let value = self
            .requestor
            .post(format!("/team/{team_id}/kick/{user_id}"))
            .recv_json()
            .await?;
        extract_ok(value)
    }
}
