//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (account private keys)
//!     → registry.rs (closed address → signer table)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → escrow.rs (encode, sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Unknown addresses are refused before any chain interaction

pub mod client;
pub mod escrow;
pub mod registry;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use escrow::EscrowContract;
pub use registry::AccountRegistry;
pub use types::{ChainConfig, ChainError, ChainId};
pub use wallet::Wallet;
