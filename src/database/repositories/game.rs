//! Game repository implementation

use sqlx::PgPool;
use crate::models::game::{GameDetail, GameSummary, CreateGameRequest, GameResult, SubmitResultRequest};
use crate::utils::errors::GameBotError;

const SUMMARY_COLUMNS: &str = "game_id, game_type, title, description, plays_count, is_pro_only, created_at";

#[derive(Clone, Debug)]
pub struct GameRepository {
    pool: PgPool,
}

impl GameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a game under the given public id.
    ///
    /// Returns `Ok(None)` when the id is already taken so the caller can pick
    /// another one.
    pub async fn insert(&self, game_id: &str, request: &CreateGameRequest) -> Result<Option<GameSummary>, GameBotError> {
        let result = sqlx::query_as::<_, GameSummary>(&format!(
            r#"
            INSERT INTO games (game_id, creator_id, game_type, title, description,
                               questions, settings, is_pro_only)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {SUMMARY_COLUMNS}
            "#
        ))
        .bind(game_id)
        .bind(request.creator_id)
        .bind(&request.game_type)
        .bind(&request.title)
        .bind(&request.description)
        .bind(&request.questions)
        .bind(&request.settings)
        .bind(request.is_pro_only)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(game) => Ok(Some(game)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(None),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(GameBotError::UserNotFound { user_id: request.creator_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Increment the play counter and return the game with its creator's name.
    ///
    /// A single statement, so concurrent plays never lose an increment and the
    /// returned counter is the post-increment value.
    pub async fn increment_and_fetch(&self, game_id: &str) -> Result<Option<GameDetail>, GameBotError> {
        let game = sqlx::query_as::<_, GameDetail>(
            r#"
            WITH played AS (
                UPDATE games
                SET plays_count = plays_count + 1
                WHERE game_id = $1
                RETURNING game_id, creator_id, game_type, title, description,
                          questions, settings, plays_count, is_pro_only, created_at
            )
            SELECT p.game_id, p.creator_id, u.name AS creator_name, p.game_type, p.title,
                   p.description, p.questions, p.settings, p.plays_count, p.is_pro_only,
                   p.created_at
            FROM played p
            JOIN users u ON u.user_id = p.creator_id
            "#
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(game)
    }

    /// Games of one owner, most recent first
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<GameSummary>, GameBotError> {
        let games = sqlx::query_as::<_, GameSummary>(&format!(
            r#"
            SELECT {SUMMARY_COLUMNS}
            FROM games
            WHERE creator_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(games)
    }

    pub async fn exists(&self, game_id: &str) -> Result<bool, GameBotError> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM games WHERE game_id = $1)")
            .bind(game_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    /// Record a finished play
    pub async fn insert_result(&self, request: &SubmitResultRequest) -> Result<GameResult, GameBotError> {
        let result = sqlx::query_as::<_, GameResult>(
            r#"
            INSERT INTO game_results (game_id, player_id, player_name, score)
            VALUES ($1, $2, $3, $4)
            RETURNING id, game_id, player_id, player_name, score, completed_at
            "#
        )
        .bind(&request.game_id)
        .bind(request.player_id)
        .bind(&request.player_name)
        .bind(request.score)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db_err)) if db_err.is_foreign_key_violation() => {
                Err(GameBotError::GameNotFound { game_id: request.game_id.clone() })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Best scores first; ties go to whoever finished earlier
    pub async fn top_results(&self, game_id: &str, limit: i64) -> Result<Vec<GameResult>, GameBotError> {
        let results = sqlx::query_as::<_, GameResult>(
            r#"
            SELECT id, game_id, player_id, player_name, score, completed_at
            FROM game_results
            WHERE game_id = $1
            ORDER BY score DESC, completed_at ASC, id ASC
            LIMIT $2
            "#
        )
        .bind(game_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}
