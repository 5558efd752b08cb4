//! PRO request repository implementation
//!
//! Both state transitions run inside one transaction and lock the row they
//! guard, so concurrent callers are serialized by Postgres.

use sqlx::PgPool;
use crate::models::admin::CreateAdminLogRequest;
use crate::models::pro_request::{Decision, ProRequest, ProRequestView};
use crate::utils::errors::GameBotError;
use super::admin::insert_log;

const REQUEST_COLUMNS: &str = "id, user_id, status, requested_at, reviewed_at, admin_note, reviewed_by";

#[derive(Clone, Debug)]
pub struct ProRequestRepository {
    pool: PgPool,
}

impl ProRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pending request for a user.
    ///
    /// The user row is locked for the duration of the transaction, which
    /// serializes concurrent requests from the same user. The partial unique
    /// index on pending rows backs this up.
    pub async fn create_pending(&self, user_id: i64) -> Result<ProRequest, GameBotError> {
        let mut tx = self.pool.begin().await?;

        let user: Option<(bool,)> = sqlx::query_as(
            "SELECT is_pro FROM users WHERE user_id = $1 FOR UPDATE"
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        match user {
            None => return Err(GameBotError::UserNotFound { user_id }),
            Some((true,)) => return Err(GameBotError::AlreadyPrivileged { user_id }),
            Some((false,)) => {}
        }

        let existing: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM pro_requests WHERE user_id = $1 AND status = 'pending' LIMIT 1"
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(GameBotError::DuplicatePending { user_id });
        }

        let inserted = sqlx::query_as::<_, ProRequest>(&format!(
            "INSERT INTO pro_requests (user_id, status) VALUES ($1, 'pending') RETURNING {REQUEST_COLUMNS}"
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await;

        let request = match inserted {
            Ok(request) => request,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                return Err(GameBotError::DuplicatePending { user_id });
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        Ok(request)
    }

    /// Move a pending request to its terminal state.
    ///
    /// Approval grants PRO to the requester. The status change, the privilege
    /// grant and the audit entry commit together or not at all.
    pub async fn decide(
        &self,
        request_id: i64,
        admin_id: i64,
        decision: Decision,
        note: Option<&str>,
    ) -> Result<ProRequest, GameBotError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, ProRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM pro_requests WHERE id = $1 FOR UPDATE"
        ))
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(GameBotError::ProRequestNotFound { request_id })?;

        let status = current.status();
        if status.is_terminal() {
            return Err(GameBotError::AlreadyDecided {
                request_id,
                status: status.to_string(),
            });
        }

        if decision == Decision::Approve {
            sqlx::query("UPDATE users SET is_pro = TRUE WHERE user_id = $1")
                .bind(current.user_id)
                .execute(&mut *tx)
                .await?;
        }

        let updated = sqlx::query_as::<_, ProRequest>(&format!(
            r#"
            UPDATE pro_requests
            SET status = $2, reviewed_at = NOW(), admin_note = $3, reviewed_by = $4
            WHERE id = $1
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(request_id)
        .bind(decision.target_status().as_str())
        .bind(note)
        .bind(admin_id)
        .fetch_one(&mut *tx)
        .await?;

        let log = CreateAdminLogRequest {
            admin_id,
            action: decision.audit_action().to_string(),
            target_user_id: Some(current.user_id),
            details: note.map(str::to_string),
        };
        insert_log(&mut *tx, &log).await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Requests of one user, newest first
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<ProRequest>, GameBotError> {
        let requests = sqlx::query_as::<_, ProRequest>(&format!(
            "SELECT {REQUEST_COLUMNS} FROM pro_requests WHERE user_id = $1 ORDER BY requested_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// All requests with requester contact details, newest first
    pub async fn list_all(&self) -> Result<Vec<ProRequestView>, GameBotError> {
        let requests = sqlx::query_as::<_, ProRequestView>(
            r#"
            SELECT pr.id, pr.user_id, u.name, u.phone, pr.status, pr.requested_at,
                   pr.reviewed_at, pr.admin_note, pr.reviewed_by
            FROM pro_requests pr
            JOIN users u ON u.user_id = pr.user_id
            ORDER BY pr.requested_at DESC, pr.id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
