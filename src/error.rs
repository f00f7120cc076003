use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayoutError {
    // Network / exchange errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    // Notification errors
    #[error("Notification failed: {0}")]
    Notify(String),

    // Ledger errors
    #[error("Ledger append failed: {0}")]
    Ledger(String),

    #[error("Sheets auth failed: {0}")]
    SheetsAuth(String),

    // Configuration errors
    #[error("Missing configuration key: {0}")]
    MissingConfigurationKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    // State / system errors
    #[error("Wallet list unavailable: {0}")]
    WalletList(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PayoutError {
    /// Get error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            PayoutError::Network(_) | PayoutError::UnsupportedMethod(_) => "exchange",

            PayoutError::Notify(_) => "notify",

            PayoutError::Ledger(_) | PayoutError::SheetsAuth(_) => "ledger",

            PayoutError::MissingConfigurationKey(_)
            | PayoutError::InvalidConfiguration(_) => "configuration",

            PayoutError::WalletList(_) | PayoutError::Io(_) => "state",
        }
    }
}

// Result type alias for convenience
pub type PayoutResult<T> = Result<T, PayoutError>;
