//! User repository implementation

use sqlx::PgPool;
use crate::models::admin::CreateAdminLogRequest;
use crate::models::user::{User, RegisterUserRequest, UserOverview};
use crate::utils::errors::GameBotError;
use super::admin::insert_log;

const USER_COLUMNS: &str = "user_id, name, phone, is_pro, is_admin, is_blocked, registered_at, last_active";

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user or refresh name, phone and activity of an existing one.
    ///
    /// Privilege and block flags are never touched here.
    pub async fn upsert(&self, request: RegisterUserRequest) -> Result<User, GameBotError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (user_id, name, phone)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET name = EXCLUDED.name,
                phone = EXCLUDED.phone,
                last_active = NOW()
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(request.user_id)
        .bind(request.name)
        .bind(request.phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, GameBotError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update last activity; returns false when the user is not registered
    pub async fn touch(&self, user_id: i64) -> Result<bool, GameBotError> {
        let result = sqlx::query("UPDATE users SET last_active = NOW() WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Number of games authored and plays accumulated across them
    pub async fn authoring_totals(&self, user_id: i64) -> Result<(i64, i64), GameBotError> {
        let totals: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(plays_count), 0)::BIGINT
            FROM games
            WHERE creator_id = $1
            "#
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }

    /// List non-admin users with authoring totals, newest first
    pub async fn list_overview(&self, limit: i64, offset: i64) -> Result<Vec<UserOverview>, GameBotError> {
        let users = sqlx::query_as::<_, UserOverview>(
            r#"
            SELECT u.user_id, u.name, u.phone, u.is_pro, u.is_blocked,
                   COUNT(g.id) AS games_count,
                   COALESCE(SUM(g.plays_count), 0)::BIGINT AS total_plays,
                   u.registered_at, u.last_active
            FROM users u
            LEFT JOIN games g ON g.creator_id = u.user_id
            WHERE u.is_admin = FALSE
            GROUP BY u.user_id
            ORDER BY u.registered_at DESC, u.user_id DESC
            LIMIT $1 OFFSET $2
            "#
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Block or unblock a user and record the admin action in one transaction
    pub async fn set_blocked(&self, admin_id: i64, user_id: i64, blocked: bool) -> Result<User, GameBotError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET is_blocked = $2 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(blocked)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(GameBotError::UserNotFound { user_id })?;

        let log = CreateAdminLogRequest {
            admin_id,
            action: if blocked { "block_user" } else { "unblock_user" }.to_string(),
            target_user_id: Some(user_id),
            details: None,
        };
        insert_log(&mut *tx, &log).await?;

        tx.commit().await?;
        Ok(user)
    }
}
