//! Deposit-related types.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{
    config::NetworkMode,
    error::{AppError, Result},
    types::units::{parse_address, parse_units, NATIVE_DECIMALS},
};

/// Native asset being deposited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeAsset {
    /// Polygon MATIC, supplied as WMATIC.
    Matic,
    /// Ether, supplied as WETH.
    Eth,
}

impl NativeAsset {
    /// Native asset symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            NativeAsset::Matic => "MATIC",
            NativeAsset::Eth => "ETH",
        }
    }

    /// Symbol of the wrapped token that ends up in the pool.
    pub fn wrapped_symbol(&self) -> &'static str {
        match self {
            NativeAsset::Matic => "WMATIC",
            NativeAsset::Eth => "WETH",
        }
    }
}

impl std::str::FromStr for NativeAsset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "MATIC" | "WMATIC" => Ok(NativeAsset::Matic),
            "ETH" | "WETH" => Ok(NativeAsset::Eth),
            _ => Err(AppError::Parse(format!("Unknown native asset: {}", s))),
        }
    }
}

impl std::fmt::Display for NativeAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A caller's deposit instruction.
#[derive(Clone, Deserialize)]
pub struct DepositRequest {
    /// Private key of the paying wallet (hex, `0x` optional).
    pub key: String,
    /// Amount in whole native units, e.g. `"1.5"`.
    pub amount: String,
    /// Address credited with the Aave position.
    pub user: String,
}

impl DepositRequest {
    /// Create a new deposit request.
    pub fn new(key: impl Into<String>, amount: impl Into<String>, user: impl Into<String>) -> Self {
        Self { key: key.into(), amount: amount.into(), user: user.into() }
    }

    /// Amount in wei. Zero is rejected.
    pub fn amount_wei(&self) -> Result<U256> {
        let amount = parse_units(&self.amount, NATIVE_DECIMALS)?;
        if amount == U256::ZERO {
            return Err(AppError::InvalidAmount("Amount must be greater than zero".to_string()));
        }
        Ok(amount)
    }

    /// Recipient of the supplied position.
    pub fn recipient(&self) -> Result<Address> {
        parse_address(&self.user)
    }
}

impl std::fmt::Debug for DepositRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DepositRequest")
            .field("key", &"<redacted>")
            .field("amount", &self.amount)
            .field("user", &self.user)
            .finish()
    }
}

/// A single step of the deposit sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositStep {
    /// Native asset wrapped into the ERC20 token.
    Wrap,
    /// Pool allowed to pull the wrapped token.
    Approve,
    /// Gas estimate for the gateway deposit (no transaction).
    EstimateGas,
    /// Gateway `depositETH`.
    GatewayDeposit,
    /// Pool `supply`.
    Supply,
}

impl std::fmt::Display for DepositStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DepositStep::Wrap => "wrap",
            DepositStep::Approve => "approve",
            DepositStep::EstimateGas => "estimate_gas",
            DepositStep::GatewayDeposit => "gateway_deposit",
            DepositStep::Supply => "supply",
        };
        f.write_str(name)
    }
}

/// A mined transaction belonging to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReceipt {
    /// Step this transaction performed.
    pub step: DepositStep,
    /// Transaction hash (0x-prefixed).
    pub tx_hash: String,
    /// Block the transaction was mined in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Gas consumed.
    pub gas_used: u64,
}

/// Result of a completed deposit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositReceipt {
    /// Native asset deposited.
    pub native_asset: NativeAsset,
    /// Wrapped token passed to `supply`, lowercase hex.
    pub asset: String,
    /// Human-readable amount.
    pub amount: String,
    /// Amount in wei.
    pub amount_raw: String,
    /// Address credited with the position.
    pub recipient: String,
    /// Pool resolved for this deposit.
    pub pool: String,
    /// Network mode the deposit ran under.
    pub network: NetworkMode,
    /// Mined transactions in execution order.
    pub steps: Vec<StepReceipt>,
}

/// Lowercase 0x-prefixed hex rendering of an address.
pub fn lowercase_address(address: Address) -> String {
    format!("{address:?}").to_lowercase()
}
