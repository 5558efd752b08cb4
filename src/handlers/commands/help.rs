//! Help command handler

use teloxide::{Bot, types::Message, prelude::*, utils::command::BotCommands};
use crate::utils::errors::Result;
use super::Command;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let help_text = format!(
        "{}\n\nO'yinlarni yaratish va o'ynash uchun /start buyrug'idan Web App'ni oching.",
        Command::descriptions()
    );

    bot.send_message(msg.chat.id, help_text).await?;
    Ok(())
}
