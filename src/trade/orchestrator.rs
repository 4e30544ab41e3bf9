//! Trade orchestration: the one original piece of logic in this service.
//!
//! # Workflow
//! ```text
//! TradeRequest
//!     → resolve buyer and seller in the account registry
//!     → buyer signs confirmPayment, wait for inclusion   (payment_confirmed)
//!     → seller signs confirmReceipt, wait for inclusion  (receipt_confirmed)
//!     → insert trade record into the ledger              (recorded)
//!     → TradeOutcome { seller tx hash, record }
//! ```
//!
//! Strictly sequential; there is no compensation if a later step fails
//! after an earlier irreversible one. The stage that was reached is
//! logged and counted so the gap can be reconciled by hand.

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, TxHash, U256};
use chrono::Utc;

use crate::blockchain::escrow::EscrowContract;
use crate::blockchain::registry::AccountRegistry;
use crate::blockchain::types::ChainResult;
use crate::blockchain::wallet::Wallet;
use crate::ledger::client::LedgerClient;
use crate::ledger::types::{LedgerResult, TradeRecord};
use crate::observability::metrics;
use crate::trade::types::{TradeError, TradeOutcome, TradeRequest, TradeStage};

/// The two escrow state transitions, as seen by the orchestrator.
#[allow(async_fn_in_trait)]
pub trait EscrowGateway {
    /// Submit `confirmPayment` as the given signer; resolve once mined.
    async fn confirm_payment(&self, signer: &Wallet) -> ChainResult<TxHash>;
    /// Submit `confirmReceipt` as the given signer; resolve once mined.
    async fn confirm_receipt(&self, signer: &Wallet) -> ChainResult<TxHash>;
}

/// The ledger write, as seen by the orchestrator.
#[allow(async_fn_in_trait)]
pub trait TradeLedger {
    /// Persist one trade record.
    async fn record(&self, record: &TradeRecord) -> LedgerResult<()>;
}

impl EscrowGateway for EscrowContract {
    async fn confirm_payment(&self, signer: &Wallet) -> ChainResult<TxHash> {
        EscrowContract::confirm_payment(self, signer).await
    }

    async fn confirm_receipt(&self, signer: &Wallet) -> ChainResult<TxHash> {
        EscrowContract::confirm_receipt(self, signer).await
    }
}

impl TradeLedger for LedgerClient {
    async fn record(&self, record: &TradeRecord) -> LedgerResult<()> {
        self.insert(record).await
    }
}

/// Drives a trade through the escrow contract and into the ledger.
#[derive(Debug, Clone)]
pub struct TradeOrchestrator<E, L> {
    registry: AccountRegistry,
    escrow: E,
    ledger: L,
}

impl<E: EscrowGateway, L: TradeLedger> TradeOrchestrator<E, L> {
    /// Create an orchestrator over the given collaborators.
    ///
    /// The registry is passed in explicitly rather than read from ambient
    /// state so tests can inject their own keys.
    pub fn new(registry: AccountRegistry, escrow: E, ledger: L) -> Self {
        Self {
            registry,
            escrow,
            ledger,
        }
    }

    /// Execute one trade end to end.
    ///
    /// Both parties must resolve to provisioned signers before any chain
    /// interaction happens. The returned hash is always the SELLER's
    /// confirmation transaction.
    pub async fn execute_trade(&self, request: TradeRequest) -> Result<TradeOutcome, TradeError> {
        // Normalize both addresses to their canonical (checksum) form.
        let buyer = parse_address("buyer", &request.buyer)?;
        let seller = parse_address("seller", &request.seller)?;

        if buyer == seller {
            return Err(TradeError::SelfTrade);
        }

        let buyer_signer = self
            .registry
            .signer_for(&buyer)
            .ok_or_else(|| TradeError::UnknownAccount(buyer.to_checksum(None)))?;
        let seller_signer = self
            .registry
            .signer_for(&seller)
            .ok_or_else(|| TradeError::UnknownAccount(seller.to_checksum(None)))?;

        let amount_wei = amount_to_wei(request.amount_eth)?;

        tracing::info!(
            buyer = %buyer.to_checksum(None),
            seller = %seller.to_checksum(None),
            amount_eth = request.amount_eth,
            amount_wei = %amount_wei,
            trade_type = %request.trade_type,
            "Executing trade"
        );

        // Step 1: buyer confirms payment
        self.escrow.confirm_payment(buyer_signer).await?;
        self.mark_stage(TradeStage::PaymentConfirmed);

        // Step 2: seller confirms receipt
        let receipt_hash = self.escrow.confirm_receipt(seller_signer).await?;
        self.mark_stage(TradeStage::ReceiptConfirmed);

        // Step 3: persist the record with the addresses exactly as
        // submitted and the human-denominated amount
        let record = TradeRecord {
            buyer: request.buyer,
            seller: request.seller,
            amount_eth: request.amount_eth,
            trade_type: request.trade_type,
            created_at: Utc::now(),
        };
        self.ledger.record(&record).await?;
        self.mark_stage(TradeStage::Recorded);

        Ok(TradeOutcome {
            transaction_hash: format!("{:#x}", receipt_hash),
            trade_details: record,
        })
    }

    fn mark_stage(&self, stage: TradeStage) {
        tracing::info!(stage = %stage, "Trade stage reached");
        metrics::record_trade_stage(stage.as_str());
    }
}

/// Parse a request address, naming the offending field on failure.
fn parse_address(field: &'static str, value: &str) -> Result<Address, TradeError> {
    value.parse().map_err(|_| TradeError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

/// Convert a human-denominated ether amount to wei.
///
/// The wei value is only used on-chain; the ledger always stores the
/// ether amount as submitted.
fn amount_to_wei(amount_eth: f64) -> Result<U256, TradeError> {
    if !amount_eth.is_finite() || amount_eth <= 0.0 {
        return Err(TradeError::InvalidAmount(amount_eth));
    }
    parse_ether(&amount_eth.to_string()).map_err(|_| TradeError::InvalidAmount(amount_eth))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Anvil's well-known test accounts #0 and #1
    const BUYER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const SELLER_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";
    const BUYER_ADDR: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
    const SELLER_ADDR: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    const PAYMENT_HASH: [u8; 32] = [0x11; 32];
    const RECEIPT_HASH: [u8; 32] = [0x22; 32];

    #[derive(Default)]
    struct FakeEscrow {
        fail_payment: bool,
        fail_receipt: bool,
        calls: Mutex<Vec<&'static str>>,
    }

    impl EscrowGateway for &FakeEscrow {
        async fn confirm_payment(&self, _signer: &Wallet) -> ChainResult<TxHash> {
            self.calls.lock().unwrap().push("confirmPayment");
            if self.fail_payment {
                Err(crate::blockchain::types::ChainError::Rpc(
                    "node unreachable".to_string(),
                ))
            } else {
                Ok(TxHash::from(PAYMENT_HASH))
            }
        }

        async fn confirm_receipt(&self, _signer: &Wallet) -> ChainResult<TxHash> {
            self.calls.lock().unwrap().push("confirmReceipt");
            if self.fail_receipt {
                Err(crate::blockchain::types::ChainError::Reverted(
                    "wrong caller".to_string(),
                ))
            } else {
                Ok(TxHash::from(RECEIPT_HASH))
            }
        }
    }

    #[derive(Default)]
    struct FakeLedger {
        fail: bool,
        inserted: Mutex<Vec<TradeRecord>>,
    }

    impl TradeLedger for &FakeLedger {
        async fn record(&self, record: &TradeRecord) -> LedgerResult<()> {
            if self.fail {
                return Err(crate::ledger::types::LedgerError::UnexpectedStatus {
                    status: 500,
                    body: "insert failed".to_string(),
                });
            }
            self.inserted.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    fn registry() -> AccountRegistry {
        AccountRegistry::from_keys(&[BUYER_KEY, SELLER_KEY], 31337).unwrap()
    }

    fn request(buyer: &str, seller: &str) -> TradeRequest {
        TradeRequest {
            buyer: buyer.to_string(),
            seller: seller.to_string(),
            amount_eth: 0.01,
            trade_type: "buy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_successful_trade() {
        let escrow = FakeEscrow::default();
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        let outcome = orchestrator
            .execute_trade(request(BUYER_ADDR, SELLER_ADDR))
            .await
            .unwrap();

        // The returned hash is the seller confirmation, never the buyer's
        assert_eq!(outcome.transaction_hash, format!("{:#x}", TxHash::from(RECEIPT_HASH)));

        // Both calls happened, in order
        assert_eq!(
            *escrow.calls.lock().unwrap(),
            vec!["confirmPayment", "confirmReceipt"]
        );

        // Exactly one record, in the human-denominated unit
        let inserted = ledger.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].amount_eth, 0.01);
        assert_eq!(inserted[0].trade_type, "buy");
    }

    #[tokio::test]
    async fn test_record_keeps_addresses_as_submitted() {
        let escrow = FakeEscrow::default();
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        // Lower-cased input parses to the same account but must be stored
        // exactly as submitted
        let lower_buyer = BUYER_ADDR.to_lowercase();
        let outcome = orchestrator
            .execute_trade(request(&lower_buyer, SELLER_ADDR))
            .await
            .unwrap();

        assert_eq!(outcome.trade_details.buyer, lower_buyer);
        assert_eq!(outcome.trade_details.seller, SELLER_ADDR);
        assert_eq!(ledger.inserted.lock().unwrap()[0].buyer, lower_buyer);
    }

    #[tokio::test]
    async fn test_unknown_account_touches_nothing() {
        let escrow = FakeEscrow::default();
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        let result = orchestrator
            .execute_trade(request(
                "0x000000000000000000000000000000000000dEaD",
                SELLER_ADDR,
            ))
            .await;

        assert!(matches!(result, Err(TradeError::UnknownAccount(_))));
        assert!(escrow.calls.lock().unwrap().is_empty());
        assert!(ledger.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_payment_failure_stops_before_receipt_and_ledger() {
        let escrow = FakeEscrow {
            fail_payment: true,
            ..FakeEscrow::default()
        };
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        let result = orchestrator
            .execute_trade(request(BUYER_ADDR, SELLER_ADDR))
            .await;

        assert!(matches!(result, Err(TradeError::ChainSubmission(_))));
        assert_eq!(*escrow.calls.lock().unwrap(), vec!["confirmPayment"]);
        assert!(ledger.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_receipt_failure_leaves_no_record() {
        let escrow = FakeEscrow {
            fail_receipt: true,
            ..FakeEscrow::default()
        };
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        let result = orchestrator
            .execute_trade(request(BUYER_ADDR, SELLER_ADDR))
            .await;

        assert!(matches!(result, Err(TradeError::ChainSubmission(_))));
        // The buyer's confirmation already landed; the gap is the known
        // partial-failure window
        assert_eq!(
            *escrow.calls.lock().unwrap(),
            vec!["confirmPayment", "confirmReceipt"]
        );
        assert!(ledger.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ledger_failure_surfaces_as_ledger_write() {
        let escrow = FakeEscrow::default();
        let ledger = FakeLedger {
            fail: true,
            ..FakeLedger::default()
        };
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        let result = orchestrator
            .execute_trade(request(BUYER_ADDR, SELLER_ADDR))
            .await;

        assert!(matches!(result, Err(TradeError::LedgerWrite(_))));
    }

    #[tokio::test]
    async fn test_self_trade_rejected() {
        let escrow = FakeEscrow::default();
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        // Same account through different casings
        let result = orchestrator
            .execute_trade(request(BUYER_ADDR, &BUYER_ADDR.to_lowercase()))
            .await;

        assert!(matches!(result, Err(TradeError::SelfTrade)));
        assert!(escrow.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_address_rejected() {
        let escrow = FakeEscrow::default();
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        let result = orchestrator.execute_trade(request("0x123", SELLER_ADDR)).await;

        assert!(matches!(
            result,
            Err(TradeError::InvalidAddress { field: "buyer", .. })
        ));
        assert!(escrow.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let escrow = FakeEscrow::default();
        let ledger = FakeLedger::default();
        let orchestrator = TradeOrchestrator::new(registry(), &escrow, &ledger);

        for amount in [0.0, -0.5, f64::NAN] {
            let mut req = request(BUYER_ADDR, SELLER_ADDR);
            req.amount_eth = amount;
            let result = orchestrator.execute_trade(req).await;
            assert!(matches!(result, Err(TradeError::InvalidAmount(_))));
        }
        assert!(escrow.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_amount_to_wei() {
        assert_eq!(
            amount_to_wei(0.01).unwrap(),
            U256::from(10_000_000_000_000_000u64)
        );
        assert_eq!(
            amount_to_wei(1.0).unwrap(),
            U256::from(1_000_000_000_000_000_000u64)
        );
        assert!(amount_to_wei(0.0).is_err());
        assert!(amount_to_wei(-1.0).is_err());
    }
}
