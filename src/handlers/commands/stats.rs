//! Stats command handler

use teloxide::{Bot, prelude::*, types::{Message, ParseMode}, utils::html};
use tracing::debug;
use crate::models::pro_request::{ProRequest, ProRequestStatus};
use crate::models::user::UserStats;
use crate::services::ServiceFactory;
use crate::utils::errors::{GameBotError, Result};
use crate::utils::helpers::format_date;
use super::sender_id;

const NOT_REGISTERED_TEXT: &str = "❌ Siz ro'yxatdan o'tmagansiz! Web App orqali ro'yxatdan o'ting.";

/// Handle /stats command - personal statistics
pub async fn handle_stats(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user_id = sender_id(&msg)?;
    debug!(user_id = user_id, "Processing /stats command");

    let stats = match services.user_service.user_stats(user_id).await {
        Ok(stats) => stats,
        Err(GameBotError::UserNotFound { .. }) => {
            bot.send_message(msg.chat.id, NOT_REGISTERED_TEXT).await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let requests = services.pro_request_service.requests_of(user_id).await?;
    let text = format_stats(&stats, requests.first());

    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;

    Ok(())
}

/// Render the statistics message
pub fn format_stats(stats: &UserStats, latest_request: Option<&ProRequest>) -> String {
    let status = if stats.user.is_pro { "⭐ PRO" } else { "🆓 Free" };

    let mut text = format!(
        "📊 <b>Statistikangiz:</b>\n\n\
         👤 Ism: {}\n\
         📱 Telefon: {}\n\
         🎯 Status: {}\n\
         🎮 Yaratilgan o'yinlar: {}\n\
         ▶️ Jami o'ynashlar: {}\n\
         📅 Ro'yxatdan o'tgan: {}",
        html::escape(&stats.user.name),
        html::escape(&stats.user.phone),
        status,
        stats.games_count,
        stats.total_plays,
        format_date(stats.user.registered_at),
    );

    if !stats.user.is_pro {
        if let Some(ProRequestStatus::Pending) = latest_request.map(ProRequest::status) {
            text.push_str("\n⏳ PRO so'rovingiz ko'rib chiqilmoqda");
        }
    }

    text
}
