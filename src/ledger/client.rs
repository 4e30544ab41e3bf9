//! Trade ledger REST client.
//!
//! # Responsibilities
//! - Insert one trade record per successful trade
//! - Query records where a wallet is buyer or seller
//! - Provide health check for ledger connectivity
//!
//! The ledger speaks the PostgREST dialect: rows live under
//! `/rest/v1/<table>`, authentication is an `apikey` header plus a bearer
//! token, and OR-filters use the `or=(col.eq.x,col.eq.y)` query syntax.

use crate::ledger::types::{LedgerConfig, LedgerError, LedgerResult, TradeRecord};
use crate::observability::metrics;

/// Environment variable name for the ledger service key.
pub const LEDGER_API_KEY_ENV_VAR: &str = "RELAY_LEDGER_API_KEY";

/// HTTP client for the trade ledger.
#[derive(Debug, Clone)]
pub struct LedgerClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl LedgerClient {
    /// Create a new ledger client.
    ///
    /// The underlying connection pool is created once and reused for the
    /// life of the process.
    pub fn new(config: &LedgerConfig, api_key: String) -> Self {
        let endpoint = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );

        tracing::info!(endpoint = %endpoint, "Ledger client initialized");

        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
        }
    }

    /// Insert a trade record.
    pub async fn insert(&self, record: &TradeRecord) -> LedgerResult<()> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(
            buyer = %record.buyer,
            seller = %record.seller,
            "Trade record inserted"
        );
        Ok(())
    }

    /// Fetch every record where the wallet is buyer or seller.
    ///
    /// Returns an empty list for a wallet with no trades. No pagination
    /// or ordering is applied.
    pub async fn for_wallet(&self, wallet: &str) -> LedgerResult<Vec<TradeRecord>> {
        let filter = format!("(buyer.eq.{},seller.eq.{})", wallet, wallet);
        let response = self
            .http
            .get(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*"), ("or", filter.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let records = response.json::<Vec<TradeRecord>>().await?;
        Ok(records)
    }

    /// Check if the ledger is reachable and healthy.
    ///
    /// Returns true if a single-row probe query succeeds.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self
            .http
            .get(&self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .query(&[("select", "*"), ("limit", "1")])
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false);
        // Record health metric
        metrics::record_backend_health("ledger", healthy);
        healthy
    }

    /// The resolved table endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
