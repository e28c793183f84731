//! Aave Native Deposit
//!
//! Runs a single native asset deposit described by environment variables
//! and prints the resulting receipt as JSON.

use std::env;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aave_native_deposit::{
    ethereum::constants::POLYGON_CHAIN_ID, AppError, Config, DepositRequest, DepositService,
    NativeAsset, NetworkMode,
};

fn required_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("{} environment variable not set", name)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::info!(network = %config.network, "Starting Aave native deposit");

    let asset: NativeAsset = required_var("DEPOSIT_ASSET")?.parse()?;
    let request = DepositRequest::new(
        required_var("DEPOSIT_PRIVATE_KEY")?,
        required_var("DEPOSIT_AMOUNT")?,
        required_var("DEPOSIT_RECIPIENT")?,
    );

    let service = DepositService::new(&config)?;

    let chain_id = service.chain_id().await?;
    if config.network == NetworkMode::Mainnet && chain_id != POLYGON_CHAIN_ID {
        tracing::warn!(chain_id, expected = POLYGON_CHAIN_ID, "Mainnet mode on a non-Polygon chain");
    }

    let receipt = service.deposit(asset, request).await?;

    println!("{}", serde_json::to_string_pretty(&receipt)?);

    Ok(())
}
