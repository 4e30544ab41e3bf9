//! Trade request/response types and error taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::ChainError;
use crate::ledger::types::{LedgerError, TradeRecord};

/// A trade execution request. Transient; exists only for the duration of
/// one request.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeRequest {
    /// Buyer address.
    pub buyer: String,
    /// Seller address.
    pub seller: String,
    /// Trade amount in ether. Must be positive.
    pub amount_eth: f64,
    /// Free-form trade label.
    pub trade_type: String,
}

/// The result of a successful trade execution.
#[derive(Debug, Clone, Serialize)]
pub struct TradeOutcome {
    /// Hash of the SELLER's confirmation transaction (the second and
    /// final on-chain step).
    pub transaction_hash: String,
    /// The record as persisted in the ledger.
    pub trade_details: TradeRecord,
}

/// Named stages of the two-step workflow, in order.
///
/// Logged and counted as each irreversible step lands, so an operator can
/// tell how far a failed trade got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeStage {
    /// The buyer's `confirmPayment` transaction is mined.
    PaymentConfirmed,
    /// The seller's `confirmReceipt` transaction is mined.
    ReceiptConfirmed,
    /// The trade record is persisted in the ledger.
    Recorded,
}

impl TradeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStage::PaymentConfirmed => "payment_confirmed",
            TradeStage::ReceiptConfirmed => "receipt_confirmed",
            TradeStage::Recorded => "recorded",
        }
    }
}

impl fmt::Display for TradeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can go wrong executing a trade.
///
/// The HTTP boundary collapses all of these into one generic 500 carrying
/// the message; the discrimination exists so callers and telemetry can
/// tell the kinds apart.
#[derive(Debug, Error)]
pub enum TradeError {
    /// Buyer or seller has no provisioned signer.
    #[error("No provisioned signer for address {0}")]
    UnknownAccount(String),

    /// An address field does not parse.
    #[error("Invalid {field} address: '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    /// The amount is not a positive finite number of ether.
    #[error("Invalid trade amount: {0}")]
    InvalidAmount(f64),

    /// Buyer and seller resolve to the same account.
    #[error("Buyer and seller must be distinct accounts")]
    SelfTrade,

    /// A chain submission or confirmation wait failed.
    #[error("Chain submission failed: {0}")]
    ChainSubmission(#[from] ChainError),

    /// The ledger insert failed.
    #[error("Ledger write failed: {0}")]
    LedgerWrite(#[from] LedgerError),
}

impl TradeError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TradeError::UnknownAccount(_) => "unknown_account",
            TradeError::InvalidAddress { .. } => "invalid_address",
            TradeError::InvalidAmount(_) => "invalid_amount",
            TradeError::SelfTrade => "self_trade",
            TradeError::ChainSubmission(_) => "chain_submission",
            TradeError::LedgerWrite(_) => "ledger_write",
        }
    }
}
