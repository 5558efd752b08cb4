//! Services module
//!
//! This module contains business logic services

pub mod admin;
pub mod game;
pub mod notification;
pub mod pro_request;
pub mod user;

// Re-export commonly used services
pub use admin::AdminService;
pub use game::{GameService, IdGenerator};
pub use notification::{NotificationService, MessageTemplate, NotificationStats, RetryPolicy};
pub use pro_request::ProRequestService;
pub use user::UserService;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::middleware::AdminSet;
use teloxide::Bot;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub game_service: GameService,
    pub pro_request_service: ProRequestService,
    pub admin_service: AdminService,
    pub notification_service: NotificationService,
    pub admins: AdminSet,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: &Settings, database: DatabaseService, admins: AdminSet) -> Self {
        let notification_service = NotificationService::new(bot, admins.clone(), &settings.notifications);
        let user_service = UserService::new(database.users.clone());
        let game_service = GameService::new(
            database.games.clone(),
            settings.bot.web_app_url.clone(),
            &settings.games,
        );
        let pro_request_service = ProRequestService::new(
            database.pro_requests.clone(),
            notification_service.clone(),
            admins.clone(),
        );
        let admin_service = AdminService::new(database.users.clone(), database.admin.clone(), admins.clone());

        Self {
            user_service,
            game_service,
            pro_request_service,
            admin_service,
            notification_service,
            admins,
            database,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = self.database.health_check().await.is_ok();

        ServiceHealthStatus {
            database_healthy,
            admins_configured: !self.admins.is_empty(),
            notifications: self.notification_service.stats(),
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub admins_configured: bool,
    pub notifications: NotificationStats,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }
        if !self.admins_configured {
            issues.push("No admin IDs configured".to_string());
        }

        issues
    }
}
