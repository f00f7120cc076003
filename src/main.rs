// src/main.rs
use payout_bot::{
    config, AppConfig, OkxClient, PayoutRunner, RunnerConfig, SheetsLedger, SuccessSet,
    TelegramNotifier, TokioSleeper,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    config::init_logging();

    let config = AppConfig::from_env()?;

    // Missing wallet list is fatal; a missing success file is an empty set.
    let wallets = payout_bot::state::load_wallets(&config.wallets_file)?;
    let success = SuccessSet::load(&config.success_file)?;
    info!(
        wallets = wallets.len(),
        already_paid = success.len(),
        "state loaded"
    );

    let exchange = OkxClient::new(config.okx.clone())?;
    let notifier = TelegramNotifier::new(config.telegram.clone())?;
    let ledger = SheetsLedger::from_key_file(&config.sheets)?;

    let mut runner = PayoutRunner::new(
        exchange,
        notifier,
        ledger,
        TokioSleeper,
        success,
        RunnerConfig::default(),
    );
    let stats = runner.run(wallets).await?;

    info!(
        processed = stats.processed,
        skipped = stats.skipped,
        low_balance = stats.low_balance,
        withdrawn = stats.withdrawn,
        "run complete"
    );
    Ok(())
}
