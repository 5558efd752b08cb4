//! Admin model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Audit entry to append; entries are never read back by the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminLogRequest {
    pub admin_id: i64,
    pub action: String,
    pub target_user_id: Option<i64>,
    pub details: Option<String>,
}

/// Aggregate counters for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PlatformStats {
    pub total_users: i64,
    pub pro_users: i64,
    pub total_games: i64,
    pub total_plays: i64,
    pub pending_requests: i64,
}
