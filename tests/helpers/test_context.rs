//! Test context for unified test setup
//!
//! Wires a real database, a mock Telegram server and the full service graph
//! the way `main` does, so tests exercise the same code paths.

use axum::Router;
use EduGames::{
    config::Settings,
    database::DatabaseService,
    middleware::AdminSet,
    services::ServiceFactory,
    ApiServer,
};

use super::{
    database_helper::TestDatabase,
    telegram_mock::{MockResponseConfig, TelegramMockServer, TEST_BOT_TOKEN},
};

pub const ADMIN_ID: i64 = 900_001;
pub const SECOND_ADMIN_ID: i64 = 900_002;
pub const API_SECRET: &str = "test-secret";
pub const WEB_APP_URL: &str = "https://games.example.com";

/// Unified test context that manages all test components
pub struct TestContext {
    pub database: TestDatabase,
    pub telegram_mock: TelegramMockServer,
    pub settings: Settings,
    pub admins: AdminSet,
    pub services: ServiceFactory,
}

/// Options for building a context
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Whether sendMessage calls succeed
    pub telegram_available: bool,
    pub admin_ids: Vec<i64>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            telegram_available: true,
            admin_ids: vec![ADMIN_ID, SECOND_ADMIN_ID],
        }
    }
}

impl TestContext {
    /// Create a new test context with all components initialized
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Self::new_with_config(TestConfig::default()).await
    }

    /// Create a new test context with custom configuration
    pub async fn new_with_config(config: TestConfig) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let database = TestDatabase::new().await?;

        let telegram_mock = TelegramMockServer::new().await;
        telegram_mock
            .mock_send_message(MockResponseConfig {
                success: config.telegram_available,
                delay_ms: None,
            })
            .await;

        let settings = Self::create_test_settings(&database, &config);

        let admins = AdminSet::from_settings(&settings);
        let database_service = DatabaseService::new(database.pool.clone());
        database_service.bootstrap(admins.ids()).await?;

        let services = ServiceFactory::new(
            telegram_mock.bot(),
            &settings,
            database_service,
            admins.clone(),
        );

        Ok(Self {
            database,
            telegram_mock,
            settings,
            admins,
            services,
        })
    }

    /// Create test-specific settings
    fn create_test_settings(database: &TestDatabase, config: &TestConfig) -> Settings {
        let mut settings = Settings::default();

        settings.bot.token = TEST_BOT_TOKEN.to_string();
        settings.bot.web_app_url = WEB_APP_URL.to_string();
        settings.bot.webhook_url = None;
        settings.bot.admin_ids = config.admin_ids.clone();

        settings.api.secret_token = API_SECRET.to_string();
        settings.api.request_timeout_secs = 10;

        settings.database.url = database.database_url.clone();
        settings.database.max_connections = 10;
        settings.database.min_connections = 1;

        // Keep failed deliveries fast
        settings.notifications.max_retries = 1;
        settings.notifications.initial_delay_ms = 10;
        settings.notifications.max_delay_ms = 50;

        settings.logging.level = "debug".to_string();

        settings
    }

    /// HTTP application with the production middleware stack
    pub fn app(&self) -> Router {
        ApiServer::new(
            self.settings.api.clone(),
            self.services.clone(),
            self.settings.bot.web_app_url.clone(),
        )
        .create_app()
    }

    /// Register a regular user through the service layer
    pub async fn register_user(&self, user_id: i64, name: &str) -> EduGames::Result<EduGames::models::user::User> {
        self.services
            .user_service
            .register(super::database_helper::registration(user_id, name))
            .await
    }

    /// Get database pool for direct access
    pub fn db_pool(&self) -> &sqlx::PgPool {
        &self.database.pool
    }
}
