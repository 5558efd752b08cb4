//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{DatabasePool, UserRepository, GameRepository, ProRequestRepository, AdminRepository};
use crate::utils::errors::GameBotError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub games: GameRepository,
    pub pro_requests: ProRequestRepository,
    pub admin: AdminRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            games: GameRepository::new(pool.clone()),
            pro_requests: ProRequestRepository::new(pool.clone()),
            admin: AdminRepository::new(pool.clone()),
            pool,
        }
    }

    /// Ensure the schema exists and the admin accounts match the configured set
    pub async fn bootstrap(&self, admin_ids: &[i64]) -> Result<(), GameBotError> {
        super::run_migrations(&self.pool).await?;
        self.admin.sync_admins(admin_ids).await?;
        Ok(())
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), GameBotError> {
        super::health_check(&self.pool).await
    }

    /// Close the pool, waiting for checked-out connections to return
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}
