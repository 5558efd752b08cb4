//! Admin repository implementation

use sqlx::{PgExecutor, PgPool};
use crate::models::admin::{CreateAdminLogRequest, PlatformStats};
use crate::utils::errors::GameBotError;

/// Placeholder contact stored for admins that never registered themselves
const ADMIN_PLACEHOLDER_NAME: &str = "Admin";
const ADMIN_PLACEHOLDER_PHONE: &str = "+998000000000";

/// Append an audit entry using any executor, so callers can include it in
/// their own transaction.
pub(crate) async fn insert_log<'e, E>(executor: E, request: &CreateAdminLogRequest) -> Result<i64, GameBotError>
where
    E: PgExecutor<'e>,
{
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO admin_logs (admin_id, action, target_user_id, details)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#
    )
    .bind(request.admin_id)
    .bind(&request.action)
    .bind(request.target_user_id)
    .bind(&request.details)
    .fetch_one(executor)
    .await?;

    Ok(id)
}

#[derive(Clone, Debug)]
pub struct AdminRepository {
    pool: PgPool,
}

impl AdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mark exactly the configured ids as admins.
    ///
    /// Missing admins are inserted with placeholder contact details; any other
    /// row carrying the admin flag loses it. Safe to run on every start.
    pub async fn sync_admins(&self, admin_ids: &[i64]) -> Result<(), GameBotError> {
        let mut tx = self.pool.begin().await?;

        for admin_id in admin_ids {
            sqlx::query(
                r#"
                INSERT INTO users (user_id, name, phone, is_admin)
                VALUES ($1, $2, $3, TRUE)
                ON CONFLICT (user_id) DO UPDATE SET is_admin = TRUE
                "#
            )
            .bind(admin_id)
            .bind(ADMIN_PLACEHOLDER_NAME)
            .bind(ADMIN_PLACEHOLDER_PHONE)
            .execute(&mut *tx)
            .await?;
        }

        let demoted = sqlx::query(
            "UPDATE users SET is_admin = FALSE WHERE is_admin = TRUE AND NOT (user_id = ANY($1))"
        )
        .bind(admin_ids.to_vec())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if demoted.rows_affected() > 0 {
            tracing::warn!(demoted = demoted.rows_affected(), "Removed admin flag from users outside the configured admin set");
        }
        tracing::info!(admins = admin_ids.len(), "Admin accounts synchronized");
        Ok(())
    }

    /// Get platform statistics
    pub async fn get_stats(&self) -> Result<PlatformStats, GameBotError> {
        let stats = sqlx::query_as::<_, PlatformStats>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE is_admin = FALSE) AS total_users,
                (SELECT COUNT(*) FROM users WHERE is_pro = TRUE) AS pro_users,
                (SELECT COUNT(*) FROM games) AS total_games,
                (SELECT COALESCE(SUM(plays_count), 0)::BIGINT FROM games) AS total_plays,
                (SELECT COUNT(*) FROM pro_requests WHERE status = 'pending') AS pending_requests
            "#
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }
}
