//! Game model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Full game record as returned to a player, including the creator's name
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameDetail {
    pub game_id: String,
    pub creator_id: i64,
    pub creator_name: String,
    pub game_type: String,
    pub title: String,
    pub description: String,
    pub questions: serde_json::Value,
    pub settings: Option<serde_json::Value>,
    pub plays_count: i64,
    pub is_pro_only: bool,
    pub created_at: DateTime<Utc>,
}

/// Game row as listed for its owner
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameSummary {
    pub game_id: String,
    pub game_type: String,
    pub title: String,
    pub description: String,
    pub plays_count: i64,
    pub is_pro_only: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a game. `questions` and `settings` are stored as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameRequest {
    pub creator_id: i64,
    pub game_type: String,
    pub title: String,
    pub description: String,
    pub questions: serde_json::Value,
    pub settings: Option<serde_json::Value>,
    pub is_pro_only: bool,
}

/// Result of a successful game creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedGame {
    pub game_id: String,
    pub share_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameResult {
    pub id: i64,
    pub game_id: String,
    pub player_id: Option<i64>,
    pub player_name: Option<String>,
    pub score: i32,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResultRequest {
    pub game_id: String,
    pub player_id: Option<i64>,
    pub player_name: Option<String>,
    pub score: i32,
}
