//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub bot: BotConfig,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub notifications: NotificationConfig,
    pub games: GamesConfig,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
    pub web_app_url: String,
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    pub admin_ids: Vec<i64>,
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub secret_token: String,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

/// Out-of-band notification delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    pub language: String,
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
}

/// Game catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GamesConfig {
    pub id_length: usize,
    pub max_id_attempts: u32,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("EDUGAMES")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("bot.admin_ids")
                    .with_list_parse_key("api.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::GameBotError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot: BotConfig {
                token: String::new(),
                web_app_url: "https://localhost:3000".to_string(),
                webhook_url: None,
                webhook_port: 8443,
                admin_ids: vec![],
            },
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                secret_token: String::new(),
                allowed_origins: vec!["*".to_string()],
                request_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/edugames".to_string(),
                max_connections: 20,
                min_connections: 5,
                acquire_timeout_secs: 10,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
            },
            notifications: NotificationConfig {
                language: "uz".to_string(),
                max_retries: 3,
                initial_delay_ms: 200,
                max_delay_ms: 5_000,
            },
            games: GamesConfig {
                id_length: 8,
                max_id_attempts: 5,
            },
        }
    }
}
