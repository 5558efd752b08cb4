//! Admin service implementation

use tracing::{info, debug};
use crate::database::repositories::{AdminRepository, UserRepository};
use crate::middleware::AdminSet;
use crate::models::admin::PlatformStats;
use crate::models::user::{User, UserOverview};
use crate::utils::errors::{GameBotError, Result};
use crate::utils::helpers::clamp_limit;
use crate::utils::logging::log_admin_action;

const DEFAULT_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct AdminService {
    users: UserRepository,
    admin: AdminRepository,
    admins: AdminSet,
}

impl AdminService {
    pub fn new(users: UserRepository, admin: AdminRepository, admins: AdminSet) -> Self {
        Self { users, admin, admins }
    }

    /// Non-admin users with authoring totals, newest first
    pub async fn list_users(&self, limit: Option<i64>, offset: Option<i64>) -> Result<Vec<UserOverview>> {
        let limit = clamp_limit(limit, DEFAULT_PAGE_SIZE);
        let offset = offset.unwrap_or(0).max(0);
        debug!(limit = limit, offset = offset, "Listing users");

        self.users.list_overview(limit, offset).await
    }

    /// Block or unblock a user on behalf of an admin
    pub async fn set_blocked(&self, admin_id: i64, user_id: i64, blocked: bool) -> Result<User> {
        self.admins.check_admin(admin_id)?;
        if self.admins.is_admin(user_id) {
            return Err(GameBotError::InvalidInput("Admins cannot be blocked".to_string()));
        }

        let user = self.users.set_blocked(admin_id, user_id, blocked).await?;
        let action = if blocked { "block_user" } else { "unblock_user" };
        log_admin_action(admin_id, action, Some(user_id), None);
        info!(admin_id = admin_id, user_id = user_id, blocked = blocked, "User block flag changed");

        Ok(user)
    }

    pub async fn platform_stats(&self) -> Result<PlatformStats> {
        self.admin.get_stats().await
    }
}
