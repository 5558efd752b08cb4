//! PRO request command handler

use teloxide::{Bot, prelude::*, types::Message};
use tracing::{debug, info};
use crate::services::ServiceFactory;
use crate::utils::errors::{GameBotError, Result};
use super::sender_id;

/// Handle /pro command - open a PRO request for the sender
pub async fn handle_pro_request(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user_id = sender_id(&msg)?;
    debug!(user_id = user_id, "Processing /pro command");

    let text = match services.pro_request_service.create_request(user_id).await {
        Ok(request) => {
            info!(user_id = user_id, request_id = request.id, "PRO request opened from chat");
            "✅ PRO so'rovingiz yuborildi! Admin javobini kuting."
        }
        Err(e) => match reply_for_error(&e) {
            Some(text) => text,
            None => return Err(e),
        },
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// User-facing reply for expected failures
fn reply_for_error(err: &GameBotError) -> Option<&'static str> {
    match err {
        GameBotError::UserNotFound { .. } => Some("❌ Avval Web App orqali ro'yxatdan o'ting."),
        GameBotError::AlreadyPrivileged { .. } => Some("⭐ Sizda allaqachon PRO status mavjud."),
        GameBotError::DuplicatePending { .. } => Some("⏳ Sizning so'rovingiz allaqachon ko'rib chiqilmoqda."),
        GameBotError::TransientStore(_) => Some("⚠️ Xizmat vaqtincha ishlamayapti, keyinroq urinib ko'ring."),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_failures_have_replies() {
        assert!(reply_for_error(&GameBotError::UserNotFound { user_id: 1 }).unwrap().contains("ro'yxatdan"));
        assert!(reply_for_error(&GameBotError::AlreadyPrivileged { user_id: 1 }).unwrap().contains("PRO"));
        assert!(reply_for_error(&GameBotError::DuplicatePending { user_id: 1 }).unwrap().contains("ko'rib"));
        assert!(reply_for_error(&GameBotError::TransientStore("pool".to_string())).unwrap().contains("keyinroq"));
    }

    #[test]
    fn test_unexpected_failures_propagate() {
        let err = GameBotError::Database(sqlx::Error::RowNotFound);
        assert!(reply_for_error(&err).is_none());
    }
}
