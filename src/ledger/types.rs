//! Trade ledger types and error definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export LedgerConfig from config module to avoid duplication
pub use crate::config::schema::LedgerConfig;

/// A persisted trade.
///
/// `amount_eth` is the human-denominated amount; the wei value used
/// on-chain never reaches the ledger. Records are inserted exactly once
/// and never updated or deleted by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Buyer address exactly as submitted (not checksummed).
    pub buyer: String,
    /// Seller address exactly as submitted (not checksummed).
    pub seller: String,
    /// Trade amount in ether.
    pub amount_eth: f64,
    /// Free-form trade label.
    pub trade_type: String,
    /// Creation timestamp, UTC.
    pub created_at: DateTime<Utc>,
}

/// Errors that can occur talking to the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transport-level failure (connect, send, decode body).
    #[error("Ledger request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The ledger answered with a non-success status.
    #[error("Ledger returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
