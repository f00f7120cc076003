// src/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// ETH layer-2 networks the exchange can route a withdrawal to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    ArbitrumOne,
    Optimism,
    Base,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::ArbitrumOne, Network::Optimism, Network::Base];

    /// Chain code the exchange expects for withdrawal routing.
    pub fn chain(&self) -> &'static str {
        match self {
            Network::ArbitrumOne => "ETH-Arbitrum One",
            Network::Optimism => "ETH-Optimism",
            Network::Base => "ETH-Base",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.chain())
    }
}

#[derive(Debug, Clone)]
pub struct WithdrawalRequest {
    pub currency: String,
    pub amount: f64,
    pub address: String,
    pub network: Network,
}

impl WithdrawalRequest {
    pub fn eth(address: impl Into<String>, amount: f64, network: Network) -> Self {
        Self {
            currency: "ETH".to_string(),
            amount,
            address: address.into(),
            network,
        }
    }
}

/// One successful withdrawal, as appended to the ledger. Never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRecord {
    pub id: Uuid,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub wallet: String,
    pub amount: f64,
    pub network: Network,
}

impl WithdrawalRecord {
    pub fn new(wallet: impl Into<String>, amount: f64, network: Network) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            wallet: wallet.into(),
            amount,
            network,
        }
    }

    /// Spreadsheet row: timestamp, wallet, amount, network.
    pub fn row(&self) -> [String; 4] {
        [
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            self.wallet.clone(),
            self.amount.to_string(),
            self.network.chain().to_string(),
        ]
    }
}

/// Counters returned by a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub processed: usize,
    pub skipped: usize,
    pub low_balance: usize,
    pub withdrawn: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_codes_are_the_three_exchange_networks() {
        let chains: Vec<&str> = Network::ALL.iter().map(|n| n.chain()).collect();
        assert_eq!(
            chains,
            vec!["ETH-Arbitrum One", "ETH-Optimism", "ETH-Base"]
        );
    }

    #[test]
    fn record_row_layout() {
        let record = WithdrawalRecord::new("0xabc", 0.0123, Network::Base);
        let row = record.row();
        assert_eq!(row[1], "0xabc");
        assert_eq!(row[2], "0.0123");
        assert_eq!(row[3], "ETH-Base");
        // timestamp column is "YYYY-MM-DD HH:MM:SS"
        assert_eq!(row[0].len(), 19);
    }
}
