//! Mock Telegram API Server for testing
//!
//! A wiremock server standing in for the Bot API. Notifications are sent in
//! background tasks, so tests poll the recorded requests instead of asserting
//! right after the call.

use serde_json::{json, Value};
use std::time::Duration;
use teloxide::Bot;
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
        }
    }
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot pointed at this server
    pub fn bot(&self) -> Bot {
        let url = self.server.uri().parse().expect("mock server uri is a valid url");
        Bot::new(TEST_BOT_TOKEN).set_api_url(url)
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        let (status, body) = if config.success {
            (
                200,
                json!({
                    "ok": true,
                    "result": {
                        "message_id": 123,
                        "from": {
                            "id": 12345,
                            "is_bot": true,
                            "first_name": "EduGamesBot",
                            "username": "edugames_bot"
                        },
                        "chat": {
                            "id": 1001,
                            "first_name": "Test",
                            "type": "private"
                        },
                        "date": 1640995200,
                        "text": "Test message"
                    }
                }),
            )
        } else {
            (
                403,
                json!({
                    "ok": false,
                    "error_code": 403,
                    "description": "Forbidden: bot was blocked by the user"
                }),
            )
        };

        let mut response = ResponseTemplate::new(status).set_body_json(body);
        if let Some(delay) = config.delay_ms {
            response = response.set_delay(Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path_regex(r"(?i)/bot.+/sendmessage$"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Chat ids of every sendMessage call received so far
    pub async fn sent_message_recipients(&self) -> Vec<i64> {
        let requests = self.server.received_requests().await.unwrap_or_default();

        requests
            .iter()
            .filter(|r| r.url.path().to_ascii_lowercase().ends_with("/sendmessage"))
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .filter_map(|body| body.get("chat_id").and_then(Value::as_i64))
            .collect()
    }

    /// Texts of every sendMessage call received so far
    pub async fn sent_message_texts(&self) -> Vec<String> {
        let requests = self.server.received_requests().await.unwrap_or_default();

        requests
            .iter()
            .filter(|r| r.url.path().to_ascii_lowercase().ends_with("/sendmessage"))
            .filter_map(|r| serde_json::from_slice::<Value>(&r.body).ok())
            .filter_map(|body| body.get("text").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    /// Poll until at least `expected` messages arrived or the timeout passes
    pub async fn wait_for_messages(&self, expected: usize, timeout: Duration) -> Vec<i64> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let recipients = self.sent_message_recipients().await;
            if recipients.len() >= expected || tokio::time::Instant::now() >= deadline {
                return recipients;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }
}
