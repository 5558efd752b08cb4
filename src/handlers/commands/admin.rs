//! Admin command handlers

use teloxide::{
    Bot,
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode, WebAppInfo},
};
use tracing::{debug, info};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;
use crate::utils::helpers::build_admin_url;
use super::sender_id;

/// Handle /admin command - link admins to the admin panel
pub async fn handle_admin_panel(bot: Bot, msg: Message, services: ServiceFactory, web_app_url: &str) -> Result<()> {
    let user_id = sender_id(&msg)?;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /admin command");

    if !services.admins.is_admin(user_id) {
        bot.send_message(chat_id, "❌ Sizda admin huquqi yo'q!").await?;
        return Ok(());
    }

    let keyboard = InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::web_app(
        "👨‍💼 Admin Panel",
        WebAppInfo { url: build_admin_url(web_app_url)? },
    )]]);

    bot.send_message(chat_id, "👨‍💼 <b>Admin Panel</b>\n\nAdmin paneliga kirish uchun tugmani bosing:")
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    info!(user_id = user_id, "Admin opened admin panel");
    Ok(())
}
