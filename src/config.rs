// src/config.rs
use crate::error::{PayoutError, PayoutResult};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exchange API credentials.
#[derive(Debug, Clone)]
pub struct OkxCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub passphrase: String,
}

/// Telegram bot credentials for outbound status messages.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

/// Google Sheets ledger target.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub credentials_file: PathBuf,
    pub spreadsheet_id: String,
    pub worksheet: String,
}

/// Everything the process needs, loaded once at startup and immutable after.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub okx: OkxCredentials,
    pub telegram: TelegramConfig,
    pub sheets: SheetsConfig,
    pub wallets_file: PathBuf,
    pub success_file: PathBuf,
}

impl AppConfig {
    /// Load configuration from the environment. Secrets are required; file
    /// paths fall back to the conventional names in the working directory.
    pub fn from_env() -> PayoutResult<Self> {
        Ok(Self {
            okx: OkxCredentials {
                api_key: require("OKX_API_KEY")?,
                api_secret: require("OKX_API_SECRET")?,
                passphrase: require("OKX_API_PASSPHRASE")?,
            },
            telegram: TelegramConfig {
                bot_token: require("TELEGRAM_TOKEN")?,
                chat_id: require("TELEGRAM_CHAT_ID")?,
            },
            sheets: SheetsConfig {
                credentials_file: optional("GOOGLE_CREDENTIALS_FILE", "credentials.json").into(),
                spreadsheet_id: require("SPREADSHEET_ID")?,
                worksheet: require("WORKSHEET_NAME")?,
            },
            wallets_file: optional("WALLETS_FILE", "wallets.txt").into(),
            success_file: optional("SUCCESS_FILE", "success_wallets.txt").into(),
        })
    }
}

fn require(key: &str) -> PayoutResult<String> {
    std::env::var(key).map_err(|_| PayoutError::MissingConfigurationKey(key.to_string()))
}

fn optional(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Initialize logging with configurable format.
///
/// Respects `RUST_LOG` for level filtering (default `info`);
/// `LOG_FORMAT=pretty` switches to human-readable output.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("pretty") => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .pretty()
                .init();
        }
        _ => {
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_is_reported_by_name() {
        // Run in-process without touching real env keys used elsewhere.
        let err = require("PAYOUT_BOT_TEST_NO_SUCH_KEY").unwrap_err();
        match err {
            PayoutError::MissingConfigurationKey(key) => {
                assert_eq!(key, "PAYOUT_BOT_TEST_NO_SUCH_KEY")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn optional_falls_back_to_default() {
        assert_eq!(
            optional("PAYOUT_BOT_TEST_NO_SUCH_KEY", "wallets.txt"),
            "wallets.txt"
        );
    }
}
