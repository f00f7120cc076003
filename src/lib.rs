// src/lib.rs
pub mod config;
pub mod error;
pub mod ledger;
pub mod notify;
pub mod okx;
pub mod runner;
pub mod state;
pub mod types;

pub use config::AppConfig;
pub use error::{PayoutError, PayoutResult};
pub use ledger::{Ledger, SheetsLedger};
pub use notify::{Notifier, TelegramNotifier};
pub use okx::{Exchange, OkxClient};
pub use runner::{PayoutRunner, RunnerConfig, Sleeper, TokioSleeper};
pub use state::SuccessSet;
pub use types::{Network, RunStats, WithdrawalRecord, WithdrawalRequest};
