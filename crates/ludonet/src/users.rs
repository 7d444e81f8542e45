//! Endpoints about other users: public data, activity, leaderboards,
//! and follow streams.

use ludonet_models::Entity;
use ludonet_transport::HttpTransport;
use serde_json::Value;

use crate::requestor::{RecordStream, SharedRequestor, extract_field};
use crate::{ApiError, PerfType};

/// Client for user endpoints.
#[derive(Debug)]
pub struct Users<T> {
    requestor: SharedRequestor<T>,
}

impl<T: HttpTransport> Users<T> {
    pub(crate) fn new(requestor: SharedRequestor<T>) -> Self {
        Self { requestor }
    }

    /// Online, playing, and streaming statuses of the given players.
    ///
    /// Offline users come back with only their id and name.
    pub async fn realtime_statuses(
        &self,
        user_ids: &[&str],
    ) -> Result<Value, ApiError> {
        self.requestor
            .get("api/users/status")
            .query("ids", user_ids.join(","))
            .recv_json()
            .await
    }

    /// The top 10 players for each speed and variant.
    pub async fn all_top_10(&self) -> Result<Value, ApiError> {
        self.requestor.get("player").recv_json().await
    }

    /// The top `count` players for one speed or variant.
    pub async fn leaderboard(
        &self,
        perf_type: PerfType,
        count: u32,
    ) -> Result<Value, ApiError> {
        let value = self
            .requestor
            .get(format!("player/top/{count}/{perf_type}"))
            .recv_json()
            .await?;
        extract_field(value, "users")
    }

    /// Public data for one user.
    pub async fn public_data(
        &self,
        username: &str,
    ) -> Result<Value, ApiError> {
        self.requestor
            .get(format!("api/user/{username}"))
            .convert(Entity::User)
            .recv_json()
            .await
    }

    /// The activity feed of a user.
    pub async fn activity_feed(
        &self,
        username: &str,
    ) -> Result<Value, ApiError> {
        self.requestor
            .get(format!("api/user/{username}/activity"))
            .convert(Entity::Activity)
            .recv_json()
            .await
    }

    /// Data for multiple users by their ids.
    pub async fn by_ids(
        &self,
        usernames: &[&str],
    ) -> Result<Value, ApiError> {
        self.requestor
            .post("api/users")
            .text_body(usernames.join(","))
            .convert(Entity::User)
            .recv_json()
            .await
    }

    /// Basic information about users currently streaming a game.
    pub async fn live_streamers(&self) -> Result<Value, ApiError> {
        self.requestor.get("streamer/live").recv_json().await
    }

    /// Streams the users the given user follows.
    pub async fn followed(
        &self,
        username: &str,
    ) -> Result<RecordStream, ApiError> {
        self.requestor
            .get(format!("/api/user/{username}/following"))
            .convert(Entity::User)
            .stream_json()
            .await
    }

    /// Streams the users that follow the given user.
    pub async fn following(
        &self,
        username: &str,
    ) -> Result<RecordStream, ApiError> {
        self.requestor
            .get(format!("/api/user/{username}/followers"))
            .convert(Entity::User)
            .stream_json()
            .await
    }

    /// The rating history of a user, for all game types.
    pub async fn rating_history(
        &self,
        username: &str,
    ) -> Result<Value, ApiError> {
        self.requestor
            .get(format!("/api/user/{username}/rating-history"))
            .convert(Entity::RatingHistory)
            .recv_json()
            .await
    }
}
