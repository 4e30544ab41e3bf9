//! Relay entry point: load configuration, initialize subsystems in
//! dependency order, bind the listener last.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use escrow_relay::blockchain::client::ChainClient;
use escrow_relay::blockchain::escrow::EscrowContract;
use escrow_relay::blockchain::registry::AccountRegistry;
use escrow_relay::config::loader;
use escrow_relay::http::{AppState, HttpServer};
use escrow_relay::ledger::client::{LedgerClient, LEDGER_API_KEY_ENV_VAR};
use escrow_relay::observability::{logging, metrics};
use escrow_relay::trade::TradeOrchestrator;

#[derive(Parser)]
#[command(name = "escrow-relay")]
#[command(about = "HTTP relay driving two-party escrow confirmations", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "relay.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Any configuration problem is fatal here; the process refuses to
    // start rather than failing on the first request.
    let config = loader::load_config(&args.config)?;

    logging::init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        chain_id = config.chain.chain_id,
        contract = %config.escrow.contract_address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Signing accounts and the ledger key come from the environment only
    let registry = AccountRegistry::from_env(config.chain.chain_id)?;
    let ledger_key = loader::require_env(LEDGER_API_KEY_ENV_VAR)?;

    let client = ChainClient::new(config.chain.clone()).await?;
    let escrow = EscrowContract::new(client.clone(), &config.escrow)?;
    let ledger = LedgerClient::new(&config.ledger, ledger_key);

    // One startup probe per collaborator; degraded is logged, not fatal
    if !client.is_healthy().await {
        tracing::warn!("Chain RPC endpoint is unreachable at startup");
    }
    if !ledger.is_healthy().await {
        tracing::warn!("Ledger endpoint is unreachable at startup");
    }

    let orchestrator = Arc::new(TradeOrchestrator::new(registry, escrow, ledger.clone()));
    let state = AppState {
        orchestrator,
        ledger,
    };

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // Create and run HTTP server
    let server = HttpServer::new(config, state);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
