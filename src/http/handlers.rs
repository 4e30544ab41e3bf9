//! Route handlers for the relay API.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::ledger::types::TradeRecord;
use crate::observability::metrics;
use crate::trade::types::TradeRequest;

/// Uniform failure body: every error kind collapses to a 500 carrying
/// the underlying message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Deserialize)]
pub struct TransactionsQuery {
    /// Wallet address to filter transactions.
    pub wallet: String,
}

#[derive(Debug, Serialize)]
pub struct TransactionsBody {
    pub transactions: Vec<TradeRecord>,
}

/// `POST /execute_trade` — run the two-step confirmation workflow.
pub async fn execute_trade(
    State(state): State<AppState>,
    Json(request): Json<TradeRequest>,
) -> impl IntoResponse {
    let start = Instant::now();

    match state.orchestrator.execute_trade(request).await {
        Ok(outcome) => {
            metrics::record_request("/execute_trade", 200, start);
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(e) => {
            tracing::error!(kind = e.kind(), error = %e, "Trade execution failed");
            metrics::record_trade_failure(e.kind());
            metrics::record_request("/execute_trade", 500, start);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /transactions?wallet=<address>` — trade history for a wallet.
pub async fn transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> impl IntoResponse {
    let start = Instant::now();

    match state.ledger.for_wallet(&query.wallet).await {
        Ok(records) => {
            metrics::record_request("/transactions", 200, start);
            (
                StatusCode::OK,
                Json(TransactionsBody {
                    transactions: records,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(wallet = %query.wallet, error = %e, "Transaction lookup failed");
            metrics::record_request("/transactions", 500, start);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `GET /ping` — liveness marker. No dependencies, no side effects.
pub async fn ping() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Escrow trade relay is running" })),
    )
}
