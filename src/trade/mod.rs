//! Trade orchestration subsystem.
//!
//! # Data Flow
//! ```text
//! TradeRequest (HTTP)
//!     → types.rs (request/outcome types, error taxonomy, stages)
//!     → orchestrator.rs (registry resolution, two confirmations, record)
//! ```
//!
//! # Design Decisions
//! - Failures carry a discriminated kind, not a stringly-typed blob
//! - Collaborators sit behind traits so the flow is testable offline
//! - No retries, no compensation: every failure aborts the request

pub mod orchestrator;
pub mod types;

pub use orchestrator::{EscrowGateway, TradeLedger, TradeOrchestrator};
pub use types::{TradeError, TradeOutcome, TradeRequest, TradeStage};
