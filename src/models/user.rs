//! User model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub phone: String,
    pub is_pro: bool,
    pub is_admin: bool,
    pub is_blocked: bool,
    pub registered_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Registration payload; re-registering only refreshes name, phone and activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub user_id: i64,
    pub name: String,
    pub phone: String,
}

/// User row enriched with authoring totals, as shown in the admin panel
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserOverview {
    pub user_id: i64,
    pub name: String,
    pub phone: String,
    pub is_pro: bool,
    pub is_blocked: bool,
    pub games_count: i64,
    pub total_plays: i64,
    pub registered_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Personal statistics for the chat `/stats` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub user: User,
    pub games_count: i64,
    pub total_plays: i64,
}
