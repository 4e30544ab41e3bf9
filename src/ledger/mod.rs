//! Trade ledger subsystem.
//!
//! # Data Flow
//! ```text
//! Environment variable (service key)
//!     → client.rs (authenticated REST client)
//!     → insert-one / OR-filter query against the trades table
//! ```
//!
//! The ledger is append-only from this service's point of view: records
//! are inserted after both on-chain confirmations and never touched again.

pub mod client;
pub mod types;

pub use client::{LedgerClient, LEDGER_API_KEY_ENV_VAR};
pub use types::{LedgerConfig, LedgerError, TradeRecord};
