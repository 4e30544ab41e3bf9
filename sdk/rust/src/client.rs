use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRequest {
    pub buyer: String,
    pub seller: String,
    pub amount_eth: f64,
    pub trade_type: String,
}

#[derive(Debug, Deserialize)]
pub struct TradeResponse {
    pub transaction_hash: String,
    pub trade_details: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<serde_json::Value>,
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.to_string(),
        }
    }

    /// Check relay liveness.
    pub async fn ping(&self) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/ping", self.relay_url))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("Relay returned error status {}: {}", status, text).into());
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Execute a trade between two provisioned accounts.
    pub async fn execute_trade(
        &self,
        req: TradeRequest,
    ) -> Result<TradeResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/execute_trade", self.relay_url))
            .json(&req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("Relay returned error status {}: {}", status, text).into());
        }

        match serde_json::from_str::<TradeResponse>(&text) {
            Ok(trade_resp) => Ok(trade_resp),
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch trade history for a wallet.
    pub async fn transactions(
        &self,
        wallet: &str,
    ) -> Result<TransactionsResponse, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/transactions", self.relay_url))
            .query(&[("wallet", wallet)])
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("Relay returned error status {}: {}", status, text).into());
        }

        Ok(serde_json::from_str(&text)?)
    }
}
