// src/notify.rs
use crate::config::TelegramConfig;
use crate::error::{PayoutError, PayoutResult};
use async_trait::async_trait;
use std::time::Duration;

const TELEGRAM_API: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Outbound status channel. One recipient, text only, no inbound handling.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> PayoutResult<()>;
}

/// Telegram bot notifier.
pub struct TelegramNotifier {
    config: TelegramConfig,
    base_url: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> PayoutResult<Self> {
        Self::with_base_url(config, TELEGRAM_API)
    }

    pub fn with_base_url(config: TelegramConfig, base_url: impl Into<String>) -> PayoutResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PayoutError::Network(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            config,
            base_url: base_url.into(),
            client,
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> PayoutResult<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.config.bot_token);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.config.chat_id,
                "text": text,
            }))
            .send()
            .await
            .map_err(|e| PayoutError::Notify(format!("sendMessage failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PayoutError::Notify(format!(
                "sendMessage returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PayoutError::Notify(format!("sendMessage parse failed: {}", e)))?;
        if body["ok"] != true {
            return Err(PayoutError::Notify(format!(
                "sendMessage not ok: {}",
                body["description"]
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_notifier(base_url: &str) -> TelegramNotifier {
        TelegramNotifier::with_base_url(
            TelegramConfig {
                bot_token: "123:abc".to_string(),
                chat_id: "42".to_string(),
            },
            base_url,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn send_posts_chat_id_and_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bot123:abc/sendMessage")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "chat_id": "42",
                "text": "Jobs done",
            })))
            .with_body(r#"{"ok":true,"result":{}}"#)
            .create_async()
            .await;

        test_notifier(&server.url()).send("Jobs done").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn api_rejection_surfaces_as_notify_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/bot123:abc/sendMessage")
            .with_status(400)
            .with_body(r#"{"ok":false,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let err = test_notifier(&server.url()).send("hi").await.unwrap_err();
        assert!(matches!(err, PayoutError::Notify(_)));
    }
}
