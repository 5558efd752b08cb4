//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /help, etc.

pub mod start;
pub mod help;
pub mod stats;
pub mod pro;
pub mod admin;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::utils::errors::{GameBotError, Result};
use crate::services::ServiceFactory;

/// All available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Mavjud buyruqlar:")]
pub enum Command {
    #[command(description = "Botni ishga tushirish va o'yinlarni ochish")]
    Start,
    #[command(description = "Yordam")]
    Help,
    #[command(description = "Statistikangiz")]
    Stats,
    #[command(description = "PRO status so'rash")]
    Pro,
    #[command(description = "Admin panel (faqat adminlar)")]
    Admin,
}

/// Main command dispatcher
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: ServiceFactory,
    web_app_url: &str,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, services, web_app_url).await,
        Command::Help => help::handle_help(bot, msg).await,
        Command::Stats => stats::handle_stats(bot, msg, services).await,
        Command::Pro => pro::handle_pro_request(bot, msg, services).await,
        Command::Admin => admin::handle_admin_panel(bot, msg, services, web_app_url).await,
    }
}

/// Numeric id of the message author
pub(crate) fn sender_id(msg: &Message) -> Result<i64> {
    msg.from
        .as_ref()
        .map(|user| user.id.0 as i64)
        .ok_or_else(|| GameBotError::InvalidInput("No user in message".to_string()))
}
