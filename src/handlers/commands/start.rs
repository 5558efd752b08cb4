//! Start command handler
//!
//! Handles the /start command: records activity and opens the web app

use teloxide::{
    Bot,
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode, WebAppInfo},
};
use tracing::{debug, warn};
use url::Url;
use crate::utils::errors::Result;
use crate::services::ServiceFactory;
use super::sender_id;

const WELCOME_TEXT: &str = "🎮 <b>Ta'limiy O'yinlar Platformasiga Xush Kelibsiz!</b>\n\n\
    📚 20+ turli o'yin mavjud\n\
    🎯 O'z o'yiningizni yarating va ulashing\n\
    🏆 PRO funksiyalar bilan yanada ko'proq imkoniyatlar\n\n\
    Boshlash uchun <b>O'yinlar</b> tugmasini bosing 👇";

/// Handle /start command - main entry point into the web app
pub async fn handle_start(bot: Bot, msg: Message, services: ServiceFactory, web_app_url: &str) -> Result<()> {
    let user_id = sender_id(&msg)?;
    let chat_id = msg.chat.id;

    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /start command");

    // Activity tracking must not keep the user out of the app
    if let Err(e) = services.user_service.touch(user_id).await {
        warn!(user_id = user_id, error = %e, "Failed to update last activity");
    }

    let keyboard = start_keyboard(web_app_url, services.admins.primary_contact())?;

    bot.send_message(chat_id, WELCOME_TEXT)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboard)
        .await?;

    Ok(())
}

/// Web app button plus, when an admin is configured, a contact link
pub fn start_keyboard(web_app_url: &str, admin_contact: Option<i64>) -> Result<InlineKeyboardMarkup> {
    let mut rows = vec![vec![InlineKeyboardButton::web_app(
        "🎮 O'yinlar",
        WebAppInfo { url: Url::parse(web_app_url)? },
    )]];

    if let Some(admin_id) = admin_contact {
        let contact = Url::parse(&format!("tg://user?id={}", admin_id))?;
        rows.push(vec![InlineKeyboardButton::url("📞 Admin bilan bog'lanish", contact)]);
    }

    Ok(InlineKeyboardMarkup::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_keyboard_layout() {
        let keyboard = start_keyboard("https://games.example.com", Some(1172284285)).unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 2);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "🎮 O'yinlar");

        let keyboard = start_keyboard("https://games.example.com", None).unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 1);
    }

    #[test]
    fn test_start_keyboard_rejects_bad_url() {
        assert!(start_keyboard("not a url", None).is_err());
    }
}
