//! Network constants.
//!
//! Contains chain IDs and the built-in Aave v3 contract addresses.

use alloy::primitives::{address, Address};

// ============================================================================
// Chain IDs
// ============================================================================

/// Polygon PoS mainnet chain ID.
pub const POLYGON_CHAIN_ID: u64 = 137;

// ============================================================================
// Testnet Addresses
// ============================================================================

/// Wrapped MATIC on the Aave testnet market.
pub const TESTNET_WMATIC_ADDRESS: Address = address!("b685400156cF3CBE8725958DeAA61436727A30c3");

/// Wrapped Ether on the Aave testnet market.
pub const TESTNET_WETH_ADDRESS: Address = address!("d575d4047f8c667E064a4ad433D04E25187F40BB");

// ============================================================================
// Mainnet Addresses (Polygon)
// ============================================================================

/// Wrapped MATIC on Polygon.
pub const MAINNET_WMATIC_ADDRESS: Address = address!("0d500b1d8e8ef31e21c99d1db9a6444d3adf1270");

/// Wrapped Ether on Polygon.
pub const MAINNET_WETH_ADDRESS: Address = address!("7ceb23fd6bc0add59e62ac25578270cff1b9f619");

/// Aave v3 `WrappedTokenGatewayV3` on Polygon.
pub const MAINNET_WRAPPED_TOKEN_GATEWAY: Address =
    address!("1e4b7A6b903680eab0c5dAbcb8fD429cD2a9598c");

/// Aave v3 `PoolAddressesProvider` on Polygon.
pub const MAINNET_POOL_ADDRESSES_PROVIDER: Address =
    address!("a97684ead0e402dC232d5A977953DF7ECBaB3CDb");

/// Aave referral code sent with every deposit.
pub const REFERRAL_CODE: u16 = 0;
