//! Notification service implementation
//!
//! Best-effort delivery of chat messages to single users or to the admin set.
//! Every delivery runs on its own detached task: callers get a `JoinHandle`
//! they may ignore, delivery failures are logged and counted but never
//! returned, and retries back off exponentially with jitter.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use rand::Rng;
use teloxide::{Bot, RequestError, types::{ChatId, ParseMode}, requests::Requester, prelude::Request, payloads::SendMessageSetters};
use teloxide::utils::html;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{info, warn, error, debug};
use crate::config::NotificationConfig;
use crate::middleware::AdminSet;
use crate::models::pro_request::Decision;
use crate::utils::errors::{GameBotError, Result};

/// Template keys
pub const TEMPLATE_PRO_REQUEST_NEW: &str = "pro_request_new";
pub const TEMPLATE_PRO_APPROVED: &str = "pro_approved";
pub const TEMPLATE_PRO_REJECTED: &str = "pro_rejected";
pub const TEMPLATE_ADMIN_NOTE: &str = "admin_note";
pub const TEMPLATE_REJECTION_REASON: &str = "rejection_reason";

/// Message template structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub key: String,
    pub content: HashMap<String, String>, // language -> content mapping
}

/// Backoff schedule for transient delivery failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_delay: Duration::from_millis(config.initial_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            ..Self::default()
        }
    }

    /// Nominal delay before retry number `attempt` (0-based), capped at `max_delay`
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay_ms.min(self.max_delay.as_millis() as f64) as u64);
        delay.min(self.max_delay)
    }

    /// Base delay with +/-20% jitter, still capped at `max_delay`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = rand::thread_rng().gen_range(0.8..=1.2);
        self.base_delay(attempt).mul_f64(factor).min(self.max_delay)
    }
}

/// Snapshot of delivery counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationStats {
    pub total_sent: u64,
    pub total_failed: u64,
    pub total_retries: u64,
}

#[derive(Debug, Default)]
struct DeliveryCounters {
    sent: AtomicU64,
    failed: AtomicU64,
    retries: AtomicU64,
}

/// Notification service for message handling
#[derive(Clone)]
pub struct NotificationService {
    bot: Bot,
    admins: AdminSet,
    language: String,
    templates: Arc<HashMap<String, MessageTemplate>>,
    policy: RetryPolicy,
    counters: Arc<DeliveryCounters>,
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(bot: Bot, admins: AdminSet, config: &NotificationConfig) -> Self {
        Self {
            bot,
            admins,
            language: config.language.clone(),
            templates: Arc::new(Self::load_default_templates()),
            policy: RetryPolicy::from_config(config),
            counters: Arc::new(DeliveryCounters::default()),
        }
    }

    /// Queue a message for one recipient and return immediately.
    ///
    /// The handle resolves to whether the message was delivered; dropping it
    /// does not cancel delivery.
    pub fn notify(&self, recipient: i64, text: String) -> JoinHandle<bool> {
        let service = self.clone();
        tokio::spawn(async move { service.deliver(recipient, &text).await })
    }

    /// Queue the same message for every admin
    pub fn notify_admins(&self, text: &str) -> Vec<JoinHandle<bool>> {
        if self.admins.is_empty() {
            warn!("No admin IDs configured for admin notifications");
            return Vec::new();
        }

        self.admins
            .ids()
            .iter()
            .map(|&admin_id| self.notify(admin_id, text.to_string()))
            .collect()
    }

    /// Tell the admins that a user asked for PRO access
    pub fn notify_new_pro_request(&self, user_id: i64) -> Vec<JoinHandle<bool>> {
        let mut parameters = HashMap::new();
        parameters.insert("user_id".to_string(), user_id.to_string());

        match self.format_message(TEMPLATE_PRO_REQUEST_NEW, &self.language, &parameters) {
            Ok(text) => self.notify_admins(&text),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to render PRO request notification");
                Vec::new()
            }
        }
    }

    /// Tell a user how their PRO request was decided
    pub fn notify_pro_decision(&self, user_id: i64, decision: Decision, note: Option<&str>) -> JoinHandle<bool> {
        match self.render_decision(decision, note) {
            Ok(text) => self.notify(user_id, text),
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to render PRO decision notification");
                tokio::spawn(async { false })
            }
        }
    }

    /// Send with retries. Never fails: the outcome is logged, counted and
    /// reported as a boolean.
    pub async fn deliver(&self, recipient: i64, text: &str) -> bool {
        let mut attempt = 0;

        loop {
            let result = self.bot
                .send_message(ChatId(recipient), text)
                .parse_mode(ParseMode::Html)
                .send()
                .await;

            let err = match result {
                Ok(_) => {
                    self.counters.sent.fetch_add(1, Ordering::Relaxed);
                    info!(recipient = recipient, attempt = attempt, "Notification sent successfully");
                    return true;
                }
                Err(err) => err,
            };

            match Self::retry_delay(&err, &self.policy, attempt) {
                Some(delay) if attempt < self.policy.max_retries => {
                    self.counters.retries.fetch_add(1, Ordering::Relaxed);
                    debug!(recipient = recipient, attempt = attempt, delay_ms = delay.as_millis() as u64, error = %err, "Retrying notification");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                _ => {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(recipient = recipient, attempt = attempt, error = %err, "Failed to send notification, dropping it");
                    return false;
                }
            }
        }
    }

    /// Transport failures and rate limits are worth retrying; Telegram
    /// rejections (blocked bot, unknown chat) and unparsable replies are not.
    fn retry_delay(err: &RequestError, policy: &RetryPolicy, attempt: u32) -> Option<Duration> {
        match err {
            RequestError::RetryAfter(secs) => Some(secs.duration()),
            RequestError::Network(_) | RequestError::Io(_) => Some(policy.delay_for_attempt(attempt)),
            _ => None,
        }
    }

    fn render_decision(&self, decision: Decision, note: Option<&str>) -> Result<String> {
        let note = note.map(str::trim).filter(|n| !n.is_empty());
        let (template_key, note_key) = match decision {
            Decision::Approve => (TEMPLATE_PRO_APPROVED, TEMPLATE_ADMIN_NOTE),
            Decision::Reject => (TEMPLATE_PRO_REJECTED, TEMPLATE_REJECTION_REASON),
        };

        let note_block = match note {
            Some(note) => {
                let mut parameters = HashMap::new();
                parameters.insert("note".to_string(), html::escape(note));
                self.format_message(note_key, &self.language, &parameters)?
            }
            None => String::new(),
        };

        let mut parameters = HashMap::new();
        parameters.insert("note_block".to_string(), note_block);
        self.format_message(template_key, &self.language, &parameters)
    }

    /// Format message using template and parameters
    fn format_message(&self, template_key: &str, language: &str, parameters: &HashMap<String, String>) -> Result<String> {
        let template = self.templates.get(template_key)
            .ok_or_else(|| GameBotError::InvalidInput(format!("Template not found: {}", template_key)))?;

        let content = template.content.get(language)
            .or_else(|| template.content.get("en"))
            .ok_or_else(|| GameBotError::InvalidInput(format!("Template content not found for language: {}", language)))?;

        let mut formatted = content.clone();

        // Replace parameters in the template
        for (key, value) in parameters {
            let placeholder = format!("{{{}}}", key);
            formatted = formatted.replace(&placeholder, value);
        }

        Ok(formatted)
    }

    /// Get notification statistics
    pub fn stats(&self) -> NotificationStats {
        NotificationStats {
            total_sent: self.counters.sent.load(Ordering::Relaxed),
            total_failed: self.counters.failed.load(Ordering::Relaxed),
            total_retries: self.counters.retries.load(Ordering::Relaxed),
        }
    }

    /// Get available template keys
    pub fn template_keys(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    /// Load default message templates
    fn load_default_templates() -> HashMap<String, MessageTemplate> {
        let mut templates = HashMap::new();

        let mut add = |key: &str, uz: &str, en: &str| {
            let mut content = HashMap::new();
            content.insert("uz".to_string(), uz.to_string());
            content.insert("en".to_string(), en.to_string());
            templates.insert(key.to_string(), MessageTemplate {
                key: key.to_string(),
                content,
            });
        };

        add(
            TEMPLATE_PRO_REQUEST_NEW,
            "📨 <b>Yangi PRO so'rov!</b>\n\nUser ID: {user_id}\nAdmin paneldan ko'rib chiqing.",
            "📨 <b>New PRO request!</b>\n\nUser ID: {user_id}\nReview it in the admin panel.",
        );
        add(
            TEMPLATE_PRO_APPROVED,
            "🎉 <b>Tabriklaymiz!</b>\n\nPRO statusingiz tasdiqlandi! Endi barcha PRO funksiyalardan foydalanishingiz mumkin.{note_block}",
            "🎉 <b>Congratulations!</b>\n\nYour PRO status has been approved! All PRO features are now available to you.{note_block}",
        );
        add(
            TEMPLATE_PRO_REJECTED,
            "❌ <b>PRO so'rovi rad etildi</b>\n\nPRO so'rovingiz ko'rib chiqildi.{note_block}",
            "❌ <b>PRO request rejected</b>\n\nYour PRO request has been reviewed.{note_block}",
        );
        add(
            TEMPLATE_ADMIN_NOTE,
            "\n\n💬 Admin izohi: {note}",
            "\n\n💬 Admin note: {note}",
        );
        add(
            TEMPLATE_REJECTION_REASON,
            "\n\n💬 Sabab: {note}",
            "\n\n💬 Reason: {note}",
        );

        templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::Bot;

    fn service(language: &str) -> NotificationService {
        let config = NotificationConfig {
            language: language.to_string(),
            max_retries: 2,
            initial_delay_ms: 100,
            max_delay_ms: 1_000,
        };
        NotificationService::new(Bot::new("12345:test_token"), AdminSet::new([1, 2]), &config)
    }

    #[test]
    fn test_format_message() {
        let service = service("uz");

        let mut parameters = HashMap::new();
        parameters.insert("user_id".to_string(), "777".to_string());

        let result = service.format_message(TEMPLATE_PRO_REQUEST_NEW, "uz", &parameters).unwrap();
        assert!(result.contains("User ID: 777"));
        assert!(result.contains("Yangi PRO"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        let service = service("uz");
        let result = service.format_message(TEMPLATE_PRO_REQUEST_NEW, "de", &HashMap::new()).unwrap();
        assert!(result.contains("New PRO request"));
    }

    #[test]
    fn test_unknown_template() {
        let service = service("uz");
        assert!(service.format_message("missing", "uz", &HashMap::new()).is_err());
    }

    #[test]
    fn test_decision_messages() {
        let service = service("en");

        let approved = service.render_decision(Decision::Approve, Some("welcome")).unwrap();
        assert!(approved.contains("approved"));
        assert!(approved.ends_with("Admin note: welcome"));

        let approved = service.render_decision(Decision::Approve, None).unwrap();
        assert!(!approved.contains("Admin note"));
        assert!(!approved.contains("{note_block}"));

        let rejected = service.render_decision(Decision::Reject, Some("  ")).unwrap();
        assert!(rejected.contains("rejected"));
        assert!(!rejected.contains("Reason"));
    }

    #[test]
    fn test_note_is_html_escaped() {
        let service = service("en");
        let text = service.render_decision(Decision::Reject, Some("<b>spam</b> & co")).unwrap();
        assert!(text.contains("Reason: &lt;b&gt;spam&lt;/b&gt; &amp; co"));
    }

    #[test]
    fn test_retry_policy_backoff() {
        let policy = RetryPolicy {
            max_retries: 5,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(500),
            multiplier: 2.0,
        };

        assert_eq!(policy.base_delay(0), Duration::from_millis(100));
        assert_eq!(policy.base_delay(1), Duration::from_millis(200));
        assert_eq!(policy.base_delay(2), Duration::from_millis(400));
        assert_eq!(policy.base_delay(3), Duration::from_millis(500));
        assert_eq!(policy.base_delay(30), Duration::from_millis(500));

        for attempt in 0..6 {
            let delay = policy.delay_for_attempt(attempt);
            assert!(delay <= Duration::from_millis(500));
            assert!(delay >= policy.base_delay(attempt).mul_f64(0.8) - Duration::from_millis(1));
        }
    }

    #[test]
    fn test_stats_start_at_zero() {
        let service = service("uz");
        assert_eq!(service.stats(), NotificationStats::default());
        assert!(service.template_keys().contains(&TEMPLATE_PRO_APPROVED.to_string()));
    }
}
