//! API Data Models
//!
//! Request bodies and response payloads that differ from the domain models.

use serde::{Deserialize, Serialize};
use crate::models::game::GameSummary;

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub version: String,
}

/// POST /api/games body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGameBody {
    pub creator_id: i64,
    pub game_type: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "empty_questions")]
    pub questions: serde_json::Value,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
    #[serde(default)]
    pub is_pro_only: bool,
}

fn empty_questions() -> serde_json::Value {
    serde_json::Value::Array(Vec::new())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGameResponse {
    pub success: bool,
    pub game_id: String,
    pub share_url: String,
}

/// Game listed for its owner, with its share link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedGame {
    #[serde(flatten)]
    pub game: GameSummary,
    pub share_url: String,
}

/// POST /api/games/{game_id}/results body
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResultBody {
    #[serde(default)]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub player_name: Option<String>,
    pub score: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<i64>,
}

/// POST /api/pro-request body
#[derive(Debug, Clone, Deserialize)]
pub struct ProRequestBody {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProRequestCreated {
    pub success: bool,
    pub message: String,
    pub request_id: i64,
    pub status: String,
}

/// POST /api/admin/approve-pro body; `action` defaults to approve
#[derive(Debug, Clone, Deserialize)]
pub struct DecideBody {
    pub request_id: i64,
    pub admin_id: i64,
    #[serde(default)]
    pub admin_note: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub success: bool,
    pub message: String,
    pub request_id: i64,
    pub status: String,
}

/// POST /api/admin/block-user body; `blocked` defaults to true
#[derive(Debug, Clone, Deserialize)]
pub struct BlockUserBody {
    pub user_id: i64,
    pub admin_id: i64,
    #[serde(default = "default_blocked")]
    pub blocked: bool,
}

fn default_blocked() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsersQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_game_defaults() {
        let body: CreateGameBody = serde_json::from_str(
            r#"{"creator_id": 1, "game_type": "quiz", "title": "Math"}"#
        ).unwrap();

        assert_eq!(body.description, "");
        assert_eq!(body.questions, serde_json::json!([]));
        assert!(body.settings.is_none());
        assert!(!body.is_pro_only);
    }

    #[test]
    fn test_decide_and_block_defaults() {
        let decide: DecideBody = serde_json::from_str(r#"{"request_id": 3, "admin_id": 9}"#).unwrap();
        assert!(decide.action.is_none());
        assert!(decide.admin_note.is_none());

        let block: BlockUserBody = serde_json::from_str(r#"{"user_id": 3, "admin_id": 9}"#).unwrap();
        assert!(block.blocked);
    }
}
