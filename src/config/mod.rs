//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared with all subsystems at startup
//!
//! environment variables (secrets only)
//!     → loader.rs::require_env
//!     → account registry / ledger client construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Missing secrets are startup failures, never runtime ones

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::RelayConfig;
pub use schema::{ChainConfig, EscrowConfig, LedgerConfig, ListenerConfig, ObservabilityConfig};
