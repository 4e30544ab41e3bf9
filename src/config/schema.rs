//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.
//! Secrets (account private keys, ledger service key) never appear here;
//! they are read from the environment at startup by their owners.

use serde::{Deserialize, Serialize};

/// Root configuration for the escrow trade relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Chain RPC settings.
    pub chain: ChainConfig,

    /// Escrow contract settings.
    pub escrow: EscrowConfig,

    /// Trade ledger endpoint settings.
    pub ledger: LedgerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Chain RPC configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (11155111 for Sepolia, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a submitted transaction to be mined,
    /// in seconds.
    pub confirmation_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 11_155_111,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            confirmation_timeout_secs: 180,
        }
    }
}

/// Escrow contract configuration.
///
/// Gas parameters are fixed by configuration; the relay never estimates.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EscrowConfig {
    /// Address of the deployed escrow contract.
    pub contract_address: String,

    /// Fixed gas limit for each confirmation call.
    pub gas_limit: u64,

    /// Fixed gas price in gwei for each confirmation call.
    pub gas_price_gwei: u64,
}

impl Default for EscrowConfig {
    fn default() -> Self {
        Self {
            contract_address: String::new(),
            gas_limit: 200_000,
            gas_price_gwei: 10,
        }
    }
}

/// Trade ledger endpoint configuration.
///
/// The ledger speaks the PostgREST dialect; the service key is read from
/// the environment, not from this file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Base URL of the ledger service (e.g., "https://xyz.supabase.co").
    pub base_url: String,

    /// Table holding trade records.
    pub table: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            table: "trades".to_string(),
        }
    }
}

/// Timeout configuration for the HTTP surface.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    /// Must cover two mined transactions plus the ledger write.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 420 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
