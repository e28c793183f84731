//! Error types and handling module.
//!
//! Defines all application-specific error types and conversions.

use thiserror::Error;

use crate::types::{DepositStep, StepReceipt};

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Ethereum RPC errors.
    #[error("Ethereum RPC error: {0}")]
    Rpc(String),

    /// Transport errors.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid Ethereum address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid deposit amount.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Wallet-related errors.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric overflow during conversion.
    #[error("Numeric overflow: {0}")]
    NumericOverflow(String),

    /// Pending transaction error (confirmation never arrived).
    #[error("Pending transaction error: {0}")]
    PendingTransaction(String),

    /// A transaction was mined but reverted.
    #[error("Transaction reverted during {step}: {tx_hash}")]
    TransactionReverted { step: DepositStep, tx_hash: String },

    /// A deposit stopped after some of its transactions were already mined.
    ///
    /// Nothing is rolled back; `completed` holds the receipts of the steps
    /// that went through so the deposit can be resumed by hand.
    #[error("Deposit interrupted at {failed_step} after {} completed step(s): {reason}", completed.len())]
    DepositInterrupted { failed_step: DepositStep, completed: Vec<StepReceipt>, reason: String },
}

impl From<alloy::transports::TransportError> for AppError {
    fn from(err: alloy::transports::TransportError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<alloy::contract::Error> for AppError {
    fn from(err: alloy::contract::Error) -> Self {
        AppError::Rpc(err.to_string())
    }
}

impl From<alloy::providers::PendingTransactionError> for AppError {
    fn from(err: alloy::providers::PendingTransactionError) -> Self {
        AppError::PendingTransaction(err.to_string())
    }
}

impl From<alloy::signers::local::LocalSignerError> for AppError {
    fn from(err: alloy::signers::local::LocalSignerError) -> Self {
        AppError::Wallet(err.to_string())
    }
}

impl From<alloy::hex::FromHexError> for AppError {
    fn from(err: alloy::hex::FromHexError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err.to_string())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
