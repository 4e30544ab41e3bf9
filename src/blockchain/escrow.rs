//! Escrow contract call submission and confirmation monitoring.
//!
//! # Responsibilities
//! - Encode the two confirmation entry points of the deployed contract
//! - Build, sign, and broadcast each call with fixed gas parameters
//! - Poll receipts until the transaction reaches the required depth
//!
//! The contract itself is an opaque collaborator; the relay only triggers
//! its `confirmPayment` and `confirmReceipt` transitions and never reads
//! its internal state.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use alloy::sol;
use alloy::sol_types::SolCall;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ChainError, ChainResult, ConfirmationStatus};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::EscrowConfig;

sol! {
    /// The two state transitions this relay is allowed to trigger.
    interface IEscrow {
        function confirmPayment();
        function confirmReceipt();
    }
}

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Caller for the deployed escrow contract.
#[derive(Debug, Clone)]
pub struct EscrowContract {
    client: ChainClient,
    address: Address,
    gas_limit: u64,
    gas_price_wei: u128,
}

impl EscrowContract {
    /// Create a caller for the configured contract.
    pub fn new(client: ChainClient, config: &EscrowConfig) -> ChainResult<Self> {
        let address: Address = config
            .contract_address
            .parse()
            .map_err(|_| ChainError::ContractAddress(config.contract_address.clone()))?;

        Ok(Self {
            client,
            address,
            gas_limit: config.gas_limit,
            gas_price_wei: config.gas_price_gwei as u128 * WEI_PER_GWEI,
        })
    }

    /// The contract's address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Submit `confirmPayment` as the given signer and wait for inclusion.
    pub async fn confirm_payment(&self, signer: &Wallet) -> ChainResult<TxHash> {
        self.submit(
            signer,
            IEscrow::confirmPaymentCall {}.abi_encode().into(),
            "confirmPayment",
        )
        .await
    }

    /// Submit `confirmReceipt` as the given signer and wait for inclusion.
    pub async fn confirm_receipt(&self, signer: &Wallet) -> ChainResult<TxHash> {
        self.submit(
            signer,
            IEscrow::confirmReceiptCall {}.abi_encode().into(),
            "confirmReceipt",
        )
        .await
    }

    /// Build, sign, broadcast, and block until the call is mined.
    ///
    /// The current nonce is fetched from the chain for every submission;
    /// concurrent submissions for the same account surface as the node's
    /// rejection, not as local coordination.
    async fn submit(&self, signer: &Wallet, calldata: Bytes, method: &str) -> ChainResult<TxHash> {
        let from = signer.address();
        let nonce = self.client.get_transaction_count(from).await?;

        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.address)
            .with_input(calldata)
            .with_nonce(nonce)
            .with_gas_limit(self.gas_limit)
            .with_gas_price(self.gas_price_wei)
            .with_chain_id(signer.chain_id());

        let envelope = tx
            .build(&signer.network_wallet())
            .await
            .map_err(|e| ChainError::Wallet(format!("Failed to sign transaction: {}", e)))?;

        let tx_hash = self.client.send_transaction(envelope).await?;

        tracing::info!(
            method = method,
            from = %from,
            contract = %self.address,
            tx_hash = %tx_hash,
            nonce = nonce,
            "Confirmation transaction broadcast"
        );

        match self.wait_for_confirmation(tx_hash).await? {
            ConfirmationStatus::Confirmed { block_number } => {
                tracing::info!(
                    method = method,
                    tx_hash = %tx_hash,
                    block_number = block_number,
                    "Confirmation transaction mined"
                );
                Ok(tx_hash)
            }
            ConfirmationStatus::Failed(reason) => Err(ChainError::Reverted(reason)),
            // The wait loop only resolves to Confirmed or Failed
            other => Err(ChainError::Rpc(format!(
                "Unexpected confirmation state: {:?}",
                other
            ))),
        }
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// Polls receipts every two seconds until the transaction reaches the
    /// configured block depth or the confirmation window elapses.
    async fn wait_for_confirmation(&self, tx_hash: TxHash) -> ChainResult<ConfirmationStatus> {
        let required_confirmations = self.client.confirmation_blocks();
        let timeout_secs = self.client.config().confirmation_timeout_secs;
        let timeout_duration = Duration::from_secs(timeout_secs);
        let poll_interval = Duration::from_secs(2);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                // Get the receipt
                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                // Check if transaction succeeded
                if !receipt.status() {
                    return Ok(ConfirmationStatus::Failed(
                        "Transaction reverted".to_string(),
                    ));
                }

                // Get current block number
                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32 + 1;

                if confirmations >= required_confirmations {
                    return Ok(ConfirmationStatus::Confirmed {
                        block_number: tx_block,
                    });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(ChainError::ConfirmationTimeout(timeout_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::keccak256;
    use crate::config::schema::ChainConfig;

    #[test]
    fn test_selectors_match_signatures() {
        assert_eq!(
            IEscrow::confirmPaymentCall::SELECTOR.as_slice(),
            &keccak256("confirmPayment()")[..4]
        );
        assert_eq!(
            IEscrow::confirmReceiptCall::SELECTOR.as_slice(),
            &keccak256("confirmReceipt()")[..4]
        );
    }

    #[test]
    fn test_calldata_is_selector_only() {
        // Zero-argument calls encode to exactly the 4-byte selector
        assert_eq!(IEscrow::confirmPaymentCall {}.abi_encode().len(), 4);
        assert_eq!(IEscrow::confirmReceiptCall {}.abi_encode().len(), 4);
    }

    #[tokio::test]
    async fn test_contract_construction() {
        let client = ChainClient::new(ChainConfig::default()).await.unwrap();
        let config = EscrowConfig {
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            gas_limit: 200_000,
            gas_price_gwei: 10,
        };
        let contract = EscrowContract::new(client, &config).unwrap();
        assert_eq!(
            contract.address().to_string().to_lowercase(),
            "0x5fbdb2315678afecb367f032d93f642f64180aa3"
        );
        assert_eq!(contract.gas_price_wei, 10_000_000_000);
    }

    #[tokio::test]
    async fn test_bad_contract_address_rejected() {
        let client = ChainClient::new(ChainConfig::default()).await.unwrap();
        let config = EscrowConfig {
            contract_address: "not-an-address".to_string(),
            ..EscrowConfig::default()
        };
        let result = EscrowContract::new(client, &config);
        assert!(matches!(result, Err(ChainError::ContractAddress(_))));
    }
}
