// src/okx/client.rs
use crate::config::OkxCredentials;
use crate::error::{PayoutError, PayoutResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

const BASE_URL: &str = "https://www.okx.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Signed REST client for the OKX v5 API.
///
/// Every request carries the four OK-ACCESS headers; the signature is an
/// HMAC-SHA256 over `timestamp + METHOD + path + body`, base64-encoded.
pub struct OkxClient {
    credentials: OkxCredentials,
    base_url: String,
    client: reqwest::Client,
}

impl OkxClient {
    pub fn new(credentials: OkxCredentials) -> PayoutResult<Self> {
        Self::with_base_url(credentials, BASE_URL)
    }

    pub fn with_base_url(
        credentials: OkxCredentials,
        base_url: impl Into<String>,
    ) -> PayoutResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PayoutError::Network(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            credentials,
            base_url: base_url.into(),
            client,
        })
    }

    /// ISO-8601 UTC with millisecond precision and a literal `Z` suffix,
    /// e.g. `2025-06-05T10:30:15.123Z`. The exchange validates this format.
    fn timestamp() -> String {
        chrono::Utc::now()
            .format("%Y-%m-%dT%H:%M:%S%.3fZ")
            .to_string()
    }

    pub(crate) fn sign(&self, timestamp: &str, method: &str, path: &str, body: &str) -> String {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        type HmacSha256 = Hmac<Sha256>;
        let message = format!("{}{}{}{}", timestamp, method.to_uppercase(), path, body);
        let mut mac = HmacSha256::new_from_slice(self.credentials.api_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(message.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Issue a signed request and parse the response as JSON.
    ///
    /// An unparseable body is logged and returned as an empty object; callers
    /// must tolerate missing fields.
    pub async fn request(
        &self,
        method: &str,
        endpoint: &str,
        params: &[(&str, &str)],
        body: &str,
    ) -> PayoutResult<Value> {
        let mut request_path = endpoint.to_string();
        if !params.is_empty() {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            request_path.push('?');
            request_path.push_str(&query.join("&"));
        }

        let timestamp = Self::timestamp();
        let signature = self.sign(&timestamp, method, &request_path, body);
        let url = format!("{}{}", self.base_url, request_path);

        let builder = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url).body(body.to_string()),
            other => return Err(PayoutError::UnsupportedMethod(other.to_string())),
        };

        let response = builder
            .header("OK-ACCESS-KEY", &self.credentials.api_key)
            .header("OK-ACCESS-SIGN", signature)
            .header("OK-ACCESS-TIMESTAMP", timestamp)
            .header("OK-ACCESS-PASSPHRASE", &self.credentials.passphrase)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| PayoutError::Network(format!("{} {} failed: {}", method, endpoint, e)))?;

        let text = response
            .text()
            .await
            .map_err(|e| PayoutError::Network(format!("{} {} body read failed: {}", method, endpoint, e)))?;

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(_) => {
                warn!(raw = %text, "unparseable exchange response, treating as empty");
                Ok(serde_json::json!({}))
            }
        }
    }
}
