use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Operator CLI for the escrow trade relay", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check relay liveness
    Ping,
    /// Fetch trade history for a wallet
    Transactions {
        /// Wallet address to filter on
        wallet: String,
    },
    /// Execute a trade between two provisioned accounts
    Trade {
        /// Buyer address
        buyer: String,
        /// Seller address
        seller: String,
        /// Amount in ether
        amount_eth: f64,
        /// Trade label
        #[arg(default_value = "buy")]
        trade_type: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Ping => {
            let res = client.get(format!("{}/ping", cli.url)).send().await?;
            print_response(res).await?;
        }
        Commands::Transactions { wallet } => {
            let res = client
                .get(format!("{}/transactions", cli.url))
                .query(&[("wallet", wallet.as_str())])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Trade {
            buyer,
            seller,
            amount_eth,
            trade_type,
        } => {
            let body = serde_json::json!({
                "buyer": buyer,
                "seller": seller,
                "amount_eth": amount_eth,
                "trade_type": trade_type,
            });
            let res = client
                .post(format!("{}/execute_trade", cli.url))
                .json(&body)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("{}", text);
        }
        std::process::exit(1);
    }

    let body: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
