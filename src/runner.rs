// src/runner.rs
use crate::error::PayoutResult;
use crate::ledger::Ledger;
use crate::notify::Notifier;
use crate::okx::Exchange;
use crate::state::SuccessSet;
use crate::types::{Network, RunStats, WithdrawalRecord, WithdrawalRequest};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::time::Duration;
use tracing::{info, warn};

/// Injectable sleep so tests can simulate elapsed time without real delays.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Numeric contract of the run loop. The defaults are the documented
/// behavior; they are a struct so tests can tighten the delays.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub currency: String,
    /// Balances at or below this skip the wallet for this pass.
    pub min_balance: f64,
    /// Withdrawal amount is drawn uniformly from here, rounded to 6 dp.
    pub amount_range: RangeInclusive<f64>,
    pub networks: Vec<Network>,
    /// Cooldown after every submission attempt, counted down per minute.
    pub cooldown_minutes: RangeInclusive<u64>,
    /// Extra settle delay after the countdown.
    pub settle_secs: RangeInclusive<u64>,
    pub low_balance_pause: Duration,
    pub post_withdraw_pause: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            currency: "ETH".to_string(),
            min_balance: 0.015,
            amount_range: 0.0104..=0.0135,
            networks: Network::ALL.to_vec(),
            cooldown_minutes: 15..=60,
            settle_secs: 120..=240,
            low_balance_pause: Duration::from_millis(500),
            post_withdraw_pause: Duration::from_secs(2),
        }
    }
}

/// Sequential withdrawal workflow: one wallet at a time over a shuffled
/// list, one submission in flight at most, long randomized cooldowns in
/// between. Every external call is independently guarded; a failure for one
/// wallet never halts the loop.
pub struct PayoutRunner<E, N, L, S> {
    exchange: E,
    notifier: N,
    ledger: L,
    sleeper: S,
    success: SuccessSet,
    config: RunnerConfig,
    rng: StdRng,
}

impl<E, N, L, S> PayoutRunner<E, N, L, S>
where
    E: Exchange,
    N: Notifier,
    L: Ledger,
    S: Sleeper,
{
    pub fn new(
        exchange: E,
        notifier: N,
        ledger: L,
        sleeper: S,
        success: SuccessSet,
        config: RunnerConfig,
    ) -> Self {
        Self::with_rng(
            exchange,
            notifier,
            ledger,
            sleeper,
            success,
            config,
            StdRng::from_entropy(),
        )
    }

    /// Seeded construction; the whole run is deterministic given the seed.
    pub fn with_rng(
        exchange: E,
        notifier: N,
        ledger: L,
        sleeper: S,
        success: SuccessSet,
        config: RunnerConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            exchange,
            notifier,
            ledger,
            sleeper,
            success,
            config,
            rng,
        }
    }

    pub async fn run(&mut self, mut wallets: Vec<String>) -> PayoutResult<RunStats> {
        wallets.shuffle(&mut self.rng);
        let mut stats = RunStats::default();

        for wallet in &wallets {
            stats.processed += 1;

            if self.success.contains(wallet) {
                info!(wallet = %wallet, "already paid, skipping");
                stats.skipped += 1;
                continue;
            }

            let balance = match self.exchange.available_balance(&self.config.currency).await {
                Ok(balance) => balance,
                Err(e) => {
                    warn!(category = e.category(), error = %e, "balance query failed");
                    0.0
                }
            };

            if balance <= self.config.min_balance {
                stats.low_balance += 1;
                self.notify(&format!("❌ Balance too low ({balance:.4} ETH)"))
                    .await;
                self.sleeper.sleep(self.config.low_balance_pause).await;
                continue;
            }

            let amount = self.draw_amount();
            let network = self.draw_network();
            let request = WithdrawalRequest::eth(wallet.clone(), amount, network);

            let submitted = match self.exchange.withdraw(&request).await {
                Ok(submitted) => submitted,
                Err(e) => {
                    warn!(category = e.category(), error = %e, "withdrawal failed");
                    false
                }
            };

            if submitted {
                stats.withdrawn += 1;
                if let Err(e) = self.success.record(wallet) {
                    warn!(category = e.category(), error = %e, "success file append failed");
                }

                let record = WithdrawalRecord::new(wallet.clone(), amount, network);
                if let Err(e) = self.ledger.append(&record).await {
                    warn!(category = e.category(), error = %e, "ledger append failed");
                }

                let chain = network.chain();
                self.notify(&format!(
                    "✅ Withdraw from bal {balance:.4} ETH\n{wallet}\n{amount:.6} {chain}"
                ))
                .await;
                self.sleeper.sleep(self.config.post_withdraw_pause).await;
            }

            // Submitted or not, back off before the next wallet.
            self.cooldown().await;
        }

        self.notify("Jobs done").await;
        Ok(stats)
    }

    fn draw_amount(&mut self) -> f64 {
        let raw = self.rng.gen_range(self.config.amount_range.clone());
        (raw * 1e6).round() / 1e6
    }

    fn draw_network(&mut self) -> Network {
        self.config
            .networks
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Network::ArbitrumOne)
    }

    /// Per-minute countdown notifications, then a shorter random settle
    /// delay. This dominates wall-clock run time.
    async fn cooldown(&mut self) {
        let minutes = self.rng.gen_range(self.config.cooldown_minutes.clone());
        for remaining in (1..=minutes).rev() {
            self.notify(&format!("⏳ Next withdraw in {remaining}m")).await;
            self.sleeper.sleep(Duration::from_secs(60)).await;
        }

        let settle = self.rng.gen_range(self.config.settle_secs.clone());
        self.sleeper.sleep(Duration::from_secs(settle)).await;
    }

    async fn notify(&self, text: &str) {
        info!("{}", text);
        if let Err(e) = self.notifier.send(text).await {
            warn!(category = e.category(), error = %e, "notification failed");
        }
    }
}
