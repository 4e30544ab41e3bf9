//! Closed registry of provisioned signing accounts.
//!
//! # Responsibilities
//! - Load exactly the provisioned private keys from the environment
//! - Derive each key's address and index the signer by it
//! - Resolve a request address to its signer, or refuse
//!
//! # Security
//! - Only these addresses may act as buyer or seller; everything else is
//!   rejected before any chain interaction
//! - The registry is built once at startup and passed in explicitly, so
//!   tests can inject their own keys without touching the process
//!   environment

use std::collections::HashMap;

use alloy::primitives::Address;

use crate::blockchain::types::{ChainError, ChainResult};
use crate::blockchain::wallet::Wallet;

/// Environment variable prefix for provisioned account keys.
///
/// Keys are read from `RELAY_ACCOUNT_KEY_1` through
/// `RELAY_ACCOUNT_KEY_<PROVISIONED_ACCOUNTS>`.
pub const ACCOUNT_KEY_ENV_PREFIX: &str = "RELAY_ACCOUNT_KEY_";

/// Number of provisioned accounts the relay expects.
pub const PROVISIONED_ACCOUNTS: usize = 4;

/// Fixed mapping from account address to signing wallet.
#[derive(Debug, Clone)]
pub struct AccountRegistry {
    signers: HashMap<Address, Wallet>,
}

impl AccountRegistry {
    /// Build a registry from hex-encoded private keys.
    pub fn from_keys<K: AsRef<str>>(keys: &[K], chain_id: u64) -> ChainResult<Self> {
        let mut signers = HashMap::with_capacity(keys.len());
        for key in keys {
            let wallet = Wallet::from_private_key(key.as_ref(), chain_id)?;
            if signers.insert(wallet.address(), wallet).is_some() {
                return Err(ChainError::Wallet(
                    "Duplicate provisioned account key".to_string(),
                ));
            }
        }
        Ok(Self { signers })
    }

    /// Load the registry from environment variables.
    ///
    /// Absence of any key is a fatal startup error.
    pub fn from_env(chain_id: u64) -> ChainResult<Self> {
        let mut keys = Vec::with_capacity(PROVISIONED_ACCOUNTS);
        for i in 1..=PROVISIONED_ACCOUNTS {
            let name = format!("{}{}", ACCOUNT_KEY_ENV_PREFIX, i);
            let key = std::env::var(&name).map_err(|_| {
                ChainError::Wallet(format!("Environment variable {} not set", name))
            })?;
            keys.push(key);
        }
        let registry = Self::from_keys(&keys, chain_id)?;
        tracing::info!(
            accounts = registry.len(),
            chain_id = chain_id,
            "Account registry loaded"
        );
        Ok(registry)
    }

    /// Resolve an address to its provisioned signer.
    pub fn signer_for(&self, address: &Address) -> Option<&Wallet> {
        self.signers.get(address)
    }

    /// Whether an address is provisioned.
    pub fn contains(&self, address: &Address) -> bool {
        self.signers.contains_key(address)
    }

    /// Number of provisioned accounts.
    pub fn len(&self) -> usize {
        self.signers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    /// Iterator over provisioned addresses.
    pub fn addresses(&self) -> impl Iterator<Item = &Address> {
        self.signers.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // Anvil's well-known test accounts #0 and #1
    const KEY_0: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_1: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
    const ADDR_0: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    const ADDR_1: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    #[test]
    fn test_resolves_provisioned_addresses() {
        let registry = AccountRegistry::from_keys(&[KEY_0, KEY_1], 31337).unwrap();
        assert_eq!(registry.len(), 2);

        let addr = Address::from_str(ADDR_0).unwrap();
        let wallet = registry.signer_for(&addr).expect("signer missing");
        assert_eq!(wallet.address(), addr);

        assert!(registry.contains(&Address::from_str(ADDR_1).unwrap()));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = AccountRegistry::from_keys(&[KEY_0], 31337).unwrap();
        // Addresses parse regardless of hex casing; the registry is keyed
        // by the canonical 20-byte value, not a string.
        let lower = Address::from_str(&ADDR_0.to_lowercase()).unwrap();
        assert!(registry.contains(&lower));
    }

    #[test]
    fn test_unknown_address_rejected() {
        let registry = AccountRegistry::from_keys(&[KEY_0], 31337).unwrap();
        let unknown = Address::from_str("0x000000000000000000000000000000000000dEaD").unwrap();
        assert!(registry.signer_for(&unknown).is_none());
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = AccountRegistry::from_keys(&[KEY_0, KEY_0], 31337);
        assert!(result.is_err());
    }

    #[test]
    fn test_bad_key_propagates() {
        let result = AccountRegistry::from_keys(&["zz"], 31337);
        assert!(result.is_err());
    }
}
