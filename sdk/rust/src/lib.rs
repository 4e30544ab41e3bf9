//! Thin client for the escrow trade relay HTTP API.

pub mod client;

pub use client::{RelayClient, TradeRequest, TradeResponse, TransactionsResponse};
