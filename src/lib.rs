//! Escrow Trade Relay
//!
//! A small HTTP service that mediates a two-party trade against a
//! deployed escrow contract: the buyer's account confirms payment, the
//! seller's account confirms receipt, and the finished trade is recorded
//! in an external ledger.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                ESCROW RELAY                  │
//!                      │                                              │
//!   POST /execute_trade│  ┌────────┐   ┌──────────────┐   ┌────────┐  │
//!   ───────────────────┼─▶│  http  │──▶│    trade     │──▶│ block- │──┼──▶ JSON-RPC node
//!                      │  │ server │   │ orchestrator │   │ chain  │  │    (escrow contract)
//!                      │  └────────┘   └──────┬───────┘   └────────┘  │
//!                      │                      │                       │
//!   GET /transactions  │                      ▼                       │
//!   ───────────────────┼────────────────▶┌────────┐                   │
//!                      │                 │ ledger │───────────────────┼──▶ trades table
//!                      │                 └────────┘                   │    (PostgREST)
//!                      │                                              │
//!                      │  ┌────────────────────────────────────────┐  │
//!                      │  │         Cross-Cutting Concerns         │  │
//!                      │  │   ┌────────┐        ┌───────────────┐  │  │
//!                      │  │   │ config │        │ observability │  │  │
//!                      │  │   └────────┘        └───────────────┘  │  │
//!                      │  └────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! The escrow contract itself is out of scope: it is an opaque
//! collaborator exposing exactly two state transitions. Everything the
//! relay does is strictly sequential; any failure aborts the request.

// Core subsystems
pub mod config;
pub mod http;

// Collaborators
pub mod blockchain;
pub mod ledger;

// The one original piece of logic
pub mod trade;

// Cross-cutting concerns
pub mod observability;

pub use config::RelayConfig;
pub use http::{AppState, HttpServer};
pub use trade::TradeOrchestrator;
