// src/okx/asset.rs
use crate::error::PayoutResult;
use crate::okx::client::OkxClient;
use crate::types::{Network, WithdrawalRequest};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Asset operations the workflow needs from the exchange.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Available balance for `ccy`. A non-success response code is not an
    /// error: it reads as a zero balance and the run continues.
    async fn available_balance(&self, ccy: &str) -> PayoutResult<f64>;

    /// Withdrawal fee for `ccy` on `network`. `None` means the exchange does
    /// not list that chain at all, which is distinct from a zero fee.
    async fn withdrawal_fee(&self, ccy: &str, network: Network) -> PayoutResult<Option<f64>>;

    /// Submit a withdrawal. `Ok(false)` covers both a rejected submission and
    /// a missing fee entry (in which case no withdrawal request is sent).
    async fn withdraw(&self, request: &WithdrawalRequest) -> PayoutResult<bool>;
}

#[async_trait]
impl Exchange for OkxClient {
    async fn available_balance(&self, ccy: &str) -> PayoutResult<f64> {
        let res = self
            .request("GET", "/api/v5/asset/balances", &[("ccy", ccy)], "")
            .await?;

        if res["code"] != "0" {
            warn!(code = %res["code"], msg = %res["msg"], "balance query rejected");
            return Ok(0.0);
        }

        for item in res["data"].as_array().into_iter().flatten() {
            if item["ccy"] == ccy {
                return Ok(number_field(item, "availBal").unwrap_or(0.0));
            }
        }
        Ok(0.0)
    }

    async fn withdrawal_fee(&self, ccy: &str, network: Network) -> PayoutResult<Option<f64>> {
        let res = self
            .request("GET", "/api/v5/asset/currencies", &[], "")
            .await?;

        if res["code"] != "0" {
            warn!(code = %res["code"], msg = %res["msg"], "currency query rejected");
            return Ok(None);
        }

        for item in res["data"].as_array().into_iter().flatten() {
            if item["ccy"] == ccy && item["chain"] == network.chain() {
                let fee = number_field(item, "fee")
                    .or_else(|| number_field(item, "minFee"))
                    .unwrap_or(0.0);
                debug!(chain = network.chain(), fee, "withdrawal fee resolved");
                return Ok(Some(fee));
            }
        }
        Ok(None)
    }

    async fn withdraw(&self, request: &WithdrawalRequest) -> PayoutResult<bool> {
        let Some(fee) = self
            .withdrawal_fee(&request.currency, request.network)
            .await?
        else {
            warn!(chain = request.network.chain(), "no fee entry, skipping withdrawal");
            return Ok(false);
        };

        let body = serde_json::json!({
            "ccy": request.currency,
            "amt": request.amount.to_string(),
            "dest": "4", // external address
            "toAddr": request.address,
            "chain": request.network.chain(),
            "fee": fee.to_string(),
        })
        .to_string();

        let res = self
            .request("POST", "/api/v5/asset/withdrawal", &[], &body)
            .await?;
        debug!(response = %res, "withdrawal response");

        Ok(res["code"] == "0")
    }
}

/// OKX returns numbers as strings; absent or empty fields read as `None`.
fn number_field(item: &Value, key: &str) -> Option<f64> {
    match &item[key] {
        Value::String(s) if !s.is_empty() => s.parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
