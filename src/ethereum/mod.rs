//! Ethereum interaction module.
//!
//! Contains the RPC client, wallet management, network constants and
//! contract bindings.

pub mod client;
pub mod constants;
pub mod contracts;
pub mod wallet;

pub use client::{EthereumClient, HttpProvider, SigningProvider};
pub use wallet::WalletManager;
