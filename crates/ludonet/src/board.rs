//! Endpoints for driving a game from a physical board or an external
//! application: event streams, seeks, moves, chat, and draw offers.

use std::time::{Duration, Instant};

use futures_util::StreamExt;
use ludonet_models::Entity;
use ludonet_transport::HttpTransport;
use serde_json::json;

use crate::requestor::{RecordStream, SharedRequestor, extract_ok};
use crate::{ApiError, Color, Room, Variant};

/// Parameters for a public seek.
#[derive(Debug, Clone)]
pub struct SeekParams {
    /// Initial clock time in minutes.
    pub time: u32,
    /// Clock increment in seconds.
    pub increment: u32,
    /// Whether the game affects ratings.
    pub rated: bool,
    /// Game variant to play.
    pub variant: Variant,
    /// Side to play; `None` lets the server pick at random.
    pub color: Option<Color>,
    /// Acceptable opponent rating range, low to high.
    pub rating_range: Option<(u16, u16)>,
}

impl Default for SeekParams {
    fn default() -> Self {
        Self {
            time: 10,
            increment: 0,
            rated: false,
            variant: Variant::Standard,
            color: None,
            rating_range: None,
        }
    }
}

/// Client for board endpoints.
#[derive(Debug)]
pub struct Board<T> {
    requestor: SharedRequestor<T>,
}

impl<T: HttpTransport> Board<T> {
    pub(crate) fn new(requestor: SharedRequestor<T>) -> Self {
        Self { requestor }
    }

    /// The realtime stream of incoming events for the authenticated
    /// user. The stream stays open until dropped or the server closes
    /// it; blank keep-alive lines surface as empty records.
    pub async fn stream_incoming_events(
        &self,
    ) -> Result<RecordStream, ApiError> {
        self.requestor.get("api/stream/event").stream_json().await
    }

    /// Creates a public seek and holds it open until the server closes
    /// the stream (a match was found or the seek lapsed). Returns how
    /// long the seek was held.
    pub async fn seek(
        &self,
        params: SeekParams,
    ) -> Result<Duration, ApiError> {
        let rating_range = params
            .rating_range
            .map(|(low, high)| format!("{low}-{high}"))
            .unwrap_or_default();
        let color =
            params.color.map_or("random", Color::as_str).to_string();
        let form = [
            ("rated", params.rated.to_string()),
            ("time", params.time.to_string()),
            ("increment", params.increment.to_string()),
            ("variant", params.variant.as_str().to_string()),
            ("color", color),
            ("ratingRange", rating_range),
        ];

        let start = Instant::now();
        // Reading the stream is what keeps the seek alive.
        let mut lines = self
            .requestor
            .post("/api/board/seek")
            .form(form)
            .stream_text()
            .await?;
        while let Some(line) = lines.next().await {
            line?;
        }
        Ok(start.elapsed())
    }

    /// The stream of states for a board game.
    pub async fn stream_game_state(
        &self,
        game_id: &str,
    ) -> Result<RecordStream, ApiError> {
        self.requestor
            .get(format!("api/board/game/stream/{game_id}"))
            .convert(Entity::GameState)
            .stream_json()
            .await
    }

    /// Makes a move in a board game. Returns whether the server
    /// accepted it.
    pub async fn make_move(
        &self,
        game_id: &str,
        mov: &str,
    ) -> Result<bool, ApiError> {
        let value = self
            .requestor
            .post(format!("api/board/game/{game_id}/move/{mov}"))
            .recv_json()
            .await?;
        extract_ok(value)
    }

    /// Posts a chat message to the player or spectator room of a game.
    pub async fn post_message(
        &self,
        game_id: &str,
        text: &str,
        room: Room,
    ) -> Result<bool, ApiError> {
        let value = self
            .requestor
            .post(format!("api/board/game/{game_id}/chat"))
            .json_body(json!({
                "room": room.as_str(),
                "text": text,
            }))
            .recv_json()
            .await?;
        extract_ok(value)
    }

    /// Aborts a board game.
    pub async fn abort_game(&self, game_id: &str) -> Result<bool, ApiError> {
        let value = self
            .requestor
            .post(format!("api/board/game/{game_id}/abort"))
            .recv_json()
            .await?;
        extract_ok(value)
    }

    /// Resigns a board game.
    pub async fn resign_game(
        &self,
        game_id: &str,
    ) -> Result<bool, ApiError> {
        let value = self
            .requestor
            .post(format!("api/board/game/{game_id}/resign"))
            .recv_json()
            .await?;
        extract_ok(value)
    }

    /// Creates, accepts, or declines a draw offer.
    ///
    /// Pass `accept = true` in a game with no pending offer to create
    /// one; pass `true` or `false` in a game with a pending offer to
    /// respond to it. [`offer_draw`], [`accept_draw`], and
    /// [`decline_draw`] are the readable spellings.
    ///
    /// [`offer_draw`]: Board::offer_draw
    /// [`accept_draw`]: Board::accept_draw
    /// [`decline_draw`]: Board::decline_draw
    pub async fn handle_draw_offer(
        &self,
        game_id: &str,
        accept: bool,
    ) -> Result<bool, ApiError> {
        let answer = if accept { "yes" } else { "no" };
        let value = self
            .requestor
            .post(format!("/api/board/game/{game_id}/draw/{answer}"))
            .recv_json()
            .await?;
        extract_ok(value)
    }

    /// Offers a draw in the given game.
    pub async fn offer_draw(&self, game_id: &str) -> Result<bool, ApiError> {
        self.handle_draw_offer(game_id, true).await
    }

    /// Accepts an already offered draw in the given game.
    pub async fn accept_draw(
        &self,
        game_id: &str,
    ) -> Result<bool, ApiError> {
        self.handle_draw_offer(game_id, true).await
    }

    /// Declines an already offered draw in the given game.
    pub async fn decline_draw(
        &self,
        game_id: &str,
    ) -> Result<bool, ApiError> {
        self.handle_draw_offer(game_id, false).await
    }
}
