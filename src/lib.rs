//! Aave Native Deposit Library
//!
//! Deposits native MATIC or ETH into the Aave v3 lending pool on behalf of
//! a recipient wallet.
//!
//! # Features
//!
//! - **Testnet path**: wrap the native asset, approve the pool, then `supply`
//! - **Mainnet path**: `depositETH` through the wrapped token gateway with
//!   EIP-1559 fees fetched from the Polygon gas station, then `supply`
//! - **Receipts**: every mined step is reported back to the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use aave_native_deposit::{Config, DepositRequest, DepositService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let service = DepositService::new(&config)?;
//!     let request = DepositRequest::new(private_key, "1.5", recipient);
//!     let receipt = service.deposit_matic(request).await?;
//!     println!("{}", serde_json::to_string_pretty(&receipt)?);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod ethereum;
pub mod services;
pub mod types;

pub use config::{Config, NetworkMode};
pub use error::{AppError, Result};
pub use services::{DepositFlow, DepositService, GasEstimator, LendingBackend};
pub use types::{DepositReceipt, DepositRequest, GasParameters, NativeAsset};
