//! Game catalog service
//!
//! Issues public game ids, serves games for play and keeps the play counter
//! and results table up to date.

use std::sync::Arc;
use tracing::{info, warn, debug};
use crate::config::GamesConfig;
use crate::database::repositories::GameRepository;
use crate::models::game::{CreateGameRequest, CreatedGame, GameDetail, GameResult, GameSummary, SubmitResultRequest};
use crate::utils::errors::{GameBotError, Result};
use crate::utils::helpers::{build_share_url, clamp_limit, generate_game_id, is_valid_game_id, normalize_whitespace};
use crate::utils::logging::log_game_action;

const DEFAULT_LEADERBOARD_SIZE: i64 = 10;
const MAX_GAME_TYPE_LENGTH: usize = 100;
const MAX_TITLE_LENGTH: usize = 255;
const MAX_PLAYER_NAME_LENGTH: usize = 255;

/// Produces candidate game ids of the requested length
pub type IdGenerator = Arc<dyn Fn(usize) -> String + Send + Sync>;

#[derive(Clone)]
pub struct GameService {
    repository: GameRepository,
    web_app_url: String,
    id_length: usize,
    max_id_attempts: u32,
    id_generator: IdGenerator,
}

impl GameService {
    pub fn new(repository: GameRepository, web_app_url: String, config: &GamesConfig) -> Self {
        Self {
            repository,
            web_app_url,
            id_length: config.id_length,
            max_id_attempts: config.max_id_attempts,
            id_generator: Arc::new(generate_game_id),
        }
    }

    /// Replace the random id source
    pub fn with_id_generator(mut self, id_generator: IdGenerator) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Store a new game under a fresh public id.
    ///
    /// Id collisions are retried with a new candidate up to the configured
    /// attempt count, after which the call fails with `IdGenerationFailed`.
    pub async fn create(&self, request: CreateGameRequest) -> Result<CreatedGame> {
        check_length("game_type", &request.game_type, MAX_GAME_TYPE_LENGTH)?;
        check_length("title", &request.title, MAX_TITLE_LENGTH)?;

        for attempt in 1..=self.max_id_attempts {
            let game_id = (self.id_generator)(self.id_length);

            match self.repository.insert(&game_id, &request).await? {
                Some(game) => {
                    let share_url = build_share_url(&self.web_app_url, &game.game_id)?;
                    log_game_action(&game.game_id, "create", Some(request.creator_id));
                    info!(
                        game_id = %game.game_id,
                        user_id = request.creator_id,
                        game_type = %game.game_type,
                        attempt = attempt,
                        "Game created"
                    );

                    return Ok(CreatedGame {
                        game_id: game.game_id,
                        share_url,
                    });
                }
                None => {
                    warn!(game_id = %game_id, attempt = attempt, "Game id collision, generating another");
                }
            }
        }

        Err(GameBotError::IdGenerationFailed {
            attempts: self.max_id_attempts,
        })
    }

    /// Load a game for play, counting the play.
    ///
    /// The returned `plays_count` already includes this play.
    pub async fn fetch_for_play(&self, game_id: &str) -> Result<GameDetail> {
        if !is_valid_game_id(game_id) {
            return Err(GameBotError::GameNotFound { game_id: game_id.to_string() });
        }

        let game = self
            .repository
            .increment_and_fetch(game_id)
            .await?
            .ok_or_else(|| GameBotError::GameNotFound { game_id: game_id.to_string() })?;

        log_game_action(&game.game_id, "play", None);
        debug!(game_id = %game.game_id, plays_count = game.plays_count, "Game served for play");
        Ok(game)
    }

    /// Games created by a user, newest first
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<GameSummary>> {
        self.repository.list_by_owner(owner_id).await
    }

    /// Record a finished play
    pub async fn submit_result(&self, request: SubmitResultRequest) -> Result<GameResult> {
        if request.score < 0 {
            return Err(GameBotError::InvalidInput("Score must not be negative".to_string()));
        }
        if !is_valid_game_id(&request.game_id) {
            return Err(GameBotError::GameNotFound { game_id: request.game_id });
        }

        let request = SubmitResultRequest {
            player_name: request
                .player_name
                .map(|name| normalize_whitespace(&name))
                .filter(|name| !name.is_empty()),
            ..request
        };
        if let Some(name) = &request.player_name {
            check_length("player_name", name, MAX_PLAYER_NAME_LENGTH)?;
        }

        let result = self.repository.insert_result(&request).await?;
        log_game_action(&result.game_id, "result", result.player_id);
        Ok(result)
    }

    /// Best results of a game
    pub async fn leaderboard(&self, game_id: &str, limit: Option<i64>) -> Result<Vec<GameResult>> {
        let results = self
            .repository
            .top_results(game_id, clamp_limit(limit, DEFAULT_LEADERBOARD_SIZE))
            .await?;

        if results.is_empty() && !self.repository.exists(game_id).await? {
            return Err(GameBotError::GameNotFound { game_id: game_id.to_string() });
        }

        Ok(results)
    }
}

/// Column limits are counted in characters, as Postgres does
fn check_length(field: &str, value: &str, max: usize) -> Result<()> {
    if value.chars().count() > max {
        return Err(GameBotError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
