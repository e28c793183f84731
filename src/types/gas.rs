//! Gas-related types.

use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Wei per gwei.
pub const GWEI: u128 = 1_000_000_000;

/// Fallback max fee per gas, in gwei.
pub const DEFAULT_MAX_FEE_GWEI: u128 = 40;

/// Fallback max priority fee per gas, in gwei.
pub const DEFAULT_MAX_PRIORITY_FEE_GWEI: u128 = 40;

/// EIP-1559 fee parameters attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasParameters {
    /// Gas limit in gas units.
    pub gas_limit: u64,
    /// Max fee per gas in wei.
    pub max_fee_per_gas: u128,
    /// Max priority fee per gas in wei.
    pub max_priority_fee_per_gas: u128,
}

/// One speed tier of the gas station response, fees in gwei.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasStationTier {
    /// Max priority fee (tip) in gwei.
    pub max_priority_fee: Decimal,
    /// Max fee in gwei.
    pub max_fee: Decimal,
}

/// Polygon gas station v2 response. Only the `fast` tier is used.
#[derive(Debug, Clone, Deserialize)]
pub struct GasStationResponse {
    /// Fast inclusion tier.
    pub fast: GasStationTier,
}

impl GasParameters {
    /// The fixed fees used whenever the gas station cannot be read.
    pub fn fallback(gas_limit: u64) -> Self {
        Self {
            gas_limit,
            max_fee_per_gas: DEFAULT_MAX_FEE_GWEI * GWEI,
            max_priority_fee_per_gas: DEFAULT_MAX_PRIORITY_FEE_GWEI * GWEI,
        }
    }

    /// Fees from a gas station tier, each rounded up to whole gwei.
    pub fn from_tier(gas_limit: u64, tier: &GasStationTier) -> Result<Self> {
        Ok(Self {
            gas_limit,
            max_fee_per_gas: gwei_ceil_to_wei(tier.max_fee)?,
            max_priority_fee_per_gas: gwei_ceil_to_wei(tier.max_priority_fee)?,
        })
    }

    /// Parse a raw gas station body.
    pub fn from_station_body(gas_limit: u64, body: &str) -> Result<Self> {
        let response: GasStationResponse = serde_json::from_str(body)?;
        Self::from_tier(gas_limit, &response.fast)
    }
}

/// Round a gwei amount up to the next whole gwei and convert to wei.
fn gwei_ceil_to_wei(gwei: Decimal) -> Result<u128> {
    if gwei.is_sign_negative() {
        return Err(AppError::Parse(format!("Negative gas fee: {} gwei", gwei)));
    }

    gwei.ceil()
        .to_u128()
        .and_then(|whole| whole.checked_mul(GWEI))
        .ok_or_else(|| AppError::NumericOverflow(format!("Gas fee {} gwei exceeds u128", gwei)))
}
