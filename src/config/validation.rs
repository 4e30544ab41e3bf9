//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check that required endpoints are present
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use alloy::primitives::Address;

use crate::config::schema::RelayConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "chain.rpc_url").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a valid socket address: '{}'", config.listener.bind_address),
        ));
    }

    if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::new(
            "chain.rpc_url",
            format!("not a valid URL: '{}'", config.chain.rpc_url),
        ));
    }
    for (i, url) in config.chain.failover_urls.iter().enumerate() {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::new(
                &format!("chain.failover_urls[{}]", i),
                format!("not a valid URL: '{}'", url),
            ));
        }
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be > 0"));
    }
    if config.chain.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "chain.confirmation_timeout_secs",
            "must be > 0",
        ));
    }

    if config.escrow.contract_address.parse::<Address>().is_err() {
        errors.push(ValidationError::new(
            "escrow.contract_address",
            format!("not a valid address: '{}'", config.escrow.contract_address),
        ));
    }
    if config.escrow.gas_limit == 0 {
        errors.push(ValidationError::new("escrow.gas_limit", "must be > 0"));
    }
    if config.escrow.gas_price_gwei == 0 {
        errors.push(ValidationError::new("escrow.gas_price_gwei", "must be > 0"));
    }

    if config.ledger.base_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::new(
            "ledger.base_url",
            format!("not a valid URL: '{}'", config.ledger.base_url),
        ));
    }
    if config.ledger.table.is_empty() {
        errors.push(ValidationError::new("ledger.table", "must not be empty"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "not a valid socket address: '{}'",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RelayConfig {
        let mut config = RelayConfig::default();
        config.escrow.contract_address =
            "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string();
        config.ledger.base_url = "https://project.supabase.co".to_string();
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_config_collects_all_errors() {
        let config = RelayConfig::default();
        let errors = validate_config(&config).unwrap_err();
        // Missing contract address AND missing ledger URL are both reported
        assert!(errors.iter().any(|e| e.field == "escrow.contract_address"));
        assert!(errors.iter().any(|e| e.field == "ledger.base_url"));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_zero_ranges_rejected() {
        let mut config = valid_config();
        config.chain.rpc_timeout_secs = 0;
        config.escrow.gas_limit = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "chain.rpc_timeout_secs"));
        assert!(errors.iter().any(|e| e.field == "escrow.gas_limit"));
    }

    #[test]
    fn test_bad_metrics_address_only_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "nonsense".to_string();
        assert!(validate_config(&config).is_err());

        config.observability.metrics_enabled = false;
        assert!(validate_config(&config).is_ok());
    }
}
