//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{GameBotError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_api_config(&settings.api)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;
    validate_notification_config(&settings.notifications)?;
    validate_games_config(&settings.games)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(GameBotError::Config(
            "Bot token is required".to_string()
        ));
    }

    if config.admin_ids.is_empty() {
        return Err(GameBotError::Config(
            "At least one admin ID must be configured".to_string()
        ));
    }

    if config.web_app_url.is_empty() {
        return Err(GameBotError::Config(
            "Web app URL is required".to_string()
        ));
    }

    url::Url::parse(&config.web_app_url).map_err(|e| {
        GameBotError::Config(format!("Invalid web app URL: {}", e))
    })?;

    if let Some(webhook_url) = &config.webhook_url {
        url::Url::parse(webhook_url).map_err(|e| {
            GameBotError::Config(format!("Invalid webhook URL: {}", e))
        })?;

        if config.webhook_port == 0 {
            return Err(GameBotError::Config(
                "Webhook port must be greater than 0".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate HTTP API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.secret_token.is_empty() {
        return Err(GameBotError::Config(
            "API secret token is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(GameBotError::Config(
            "API port must be greater than 0".to_string()
        ));
    }

    if config.request_timeout_secs == 0 {
        return Err(GameBotError::Config(
            "Request timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(GameBotError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(GameBotError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(GameBotError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_secs == 0 {
        return Err(GameBotError::Config(
            "Acquire timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(GameBotError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(GameBotError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}

fn validate_notification_config(config: &super::NotificationConfig) -> Result<()> {
    if config.language.is_empty() {
        return Err(GameBotError::Config(
            "Notification language is required".to_string()
        ));
    }

    if config.initial_delay_ms > config.max_delay_ms {
        return Err(GameBotError::Config(
            "Initial notification delay cannot exceed max delay".to_string()
        ));
    }

    Ok(())
}

fn validate_games_config(config: &super::GamesConfig) -> Result<()> {
    if !(6..=32).contains(&config.id_length) {
        return Err(GameBotError::Config(
            format!("Game id length must be between 6 and 32, got {}", config.id_length)
        ));
    }

    if config.max_id_attempts == 0 {
        return Err(GameBotError::Config(
            "Max game id attempts must be greater than 0".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.bot.token = "12345:token".to_string();
        settings.bot.admin_ids = vec![1172284285];
        settings.api.secret_token = "secret".to_string();
        settings
    }

    #[test]
    fn test_valid_settings_pass() {
        assert!(validate_settings(&valid_settings()).is_ok());
    }

    #[test]
    fn test_missing_admins_rejected() {
        let mut settings = valid_settings();
        settings.bot.admin_ids.clear();
        assert!(matches!(validate_settings(&settings), Err(GameBotError::Config(_))));
    }

    #[test]
    fn test_missing_secret_rejected() {
        let mut settings = valid_settings();
        settings.api.secret_token.clear();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_bad_web_app_url_rejected() {
        let mut settings = valid_settings();
        settings.bot.web_app_url = "not a url".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_pool_bounds() {
        let mut settings = valid_settings();
        settings.database.min_connections = 30;
        assert!(validate_settings(&settings).is_err());

        let mut settings = valid_settings();
        settings.database.acquire_timeout_secs = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_game_id_length_bounds() {
        let mut settings = valid_settings();
        settings.games.id_length = 4;
        assert!(validate_settings(&settings).is_err());
        settings.games.id_length = 8;
        settings.games.max_id_attempts = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut settings = valid_settings();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
