//! EduGames Telegram Bot
//!
//! Backend for an educational games platform: a Telegram bot front door and a
//! REST API shared with the companion web application. Users register, author
//! and play games, and may request PRO access reviewed by a fixed admin set.

#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;
pub mod middleware;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{GameBotError, Result};

// Re-export main components for easy access
pub use api::ApiServer;
pub use database::DatabaseService;
pub use middleware::AdminSet;
pub use services::ServiceFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
