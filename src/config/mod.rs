//! Configuration management module.
//!
//! Handles loading configuration from environment variables. The network
//! mode and every contract address are fixed once a [`Config`] is built.

use std::env;

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, Result},
    ethereum::constants,
    types::NativeAsset,
};

/// Default Polygon gas station endpoint (v2 API).
pub const DEFAULT_GAS_STATION_URL: &str = "https://gasstation.polygon.technology/v2";

/// Which set of contracts and which deposit path to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// Direct wrap, approve and supply.
    #[default]
    Testnet,
    /// Gateway `depositETH` with gas-station pricing.
    Mainnet,
}

impl std::str::FromStr for NetworkMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "testnet" => Ok(NetworkMode::Testnet),
            "mainnet" => Ok(NetworkMode::Mainnet),
            _ => Err(AppError::Config(format!("Invalid network mode: {}", s))),
        }
    }
}

impl std::fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkMode::Testnet => f.write_str("testnet"),
            NetworkMode::Mainnet => f.write_str("mainnet"),
        }
    }
}

/// Contracts involved in depositing one native asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetAddresses {
    /// Wrapped token (WMATIC / WETH). This is the `asset` passed to `supply`.
    pub token: Address,
    /// Wrapped token gateway used by the mainnet `depositETH` path.
    pub gateway: Address,
}

/// Address set for one network mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkAddresses {
    /// WMATIC token and gateway.
    pub wmatic: AssetAddresses,
    /// WETH token and gateway.
    pub weth: AssetAddresses,
    /// Aave `PoolAddressesProvider`, queried for the pool on every deposit.
    pub pool_addresses_provider: Address,
}

impl NetworkAddresses {
    /// Built-in addresses for a network mode.
    ///
    /// Testnet has no built-in pool addresses provider, so one must be
    /// supplied. On testnet the gateway is never called and defaults to the
    /// token itself.
    pub fn for_mode(mode: NetworkMode, pool_addresses_provider: Option<Address>) -> Result<Self> {
        match mode {
            NetworkMode::Testnet => {
                let pool_addresses_provider = pool_addresses_provider.ok_or_else(|| {
                    AppError::Config(
                        "AAVE_POOL_ADDRESSES_PROVIDER must be set in testnet mode".into(),
                    )
                })?;
                Ok(Self {
                    wmatic: AssetAddresses {
                        token: constants::TESTNET_WMATIC_ADDRESS,
                        gateway: constants::TESTNET_WMATIC_ADDRESS,
                    },
                    weth: AssetAddresses {
                        token: constants::TESTNET_WETH_ADDRESS,
                        gateway: constants::TESTNET_WETH_ADDRESS,
                    },
                    pool_addresses_provider,
                })
            }
            NetworkMode::Mainnet => Ok(Self {
                wmatic: AssetAddresses {
                    token: constants::MAINNET_WMATIC_ADDRESS,
                    gateway: constants::MAINNET_WRAPPED_TOKEN_GATEWAY,
                },
                weth: AssetAddresses {
                    token: constants::MAINNET_WETH_ADDRESS,
                    gateway: constants::MAINNET_WRAPPED_TOKEN_GATEWAY,
                },
                pool_addresses_provider: pool_addresses_provider
                    .unwrap_or(constants::MAINNET_POOL_ADDRESSES_PROVIDER),
            }),
        }
    }

    /// Addresses for the given native asset.
    pub fn asset(&self, asset: NativeAsset) -> AssetAddresses {
        match asset {
            NativeAsset::Matic => self.wmatic,
            NativeAsset::Eth => self.weth,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,
    /// Deposit path and address set.
    pub network: NetworkMode,
    /// Contract addresses for `network`.
    pub addresses: NetworkAddresses,
    /// Gas station endpoint used on mainnet.
    pub gas_station_url: String,
    /// Logging level (default: info).
    pub log_level: String,
}

impl Config {
    /// Build a configuration with the built-in addresses for `network`.
    pub fn new(
        rpc_url: impl Into<String>,
        network: NetworkMode,
        pool_addresses_provider: Option<Address>,
    ) -> Result<Self> {
        Ok(Self {
            rpc_url: rpc_url.into(),
            network,
            addresses: NetworkAddresses::for_mode(network, pool_addresses_provider)?,
            gas_station_url: DEFAULT_GAS_STATION_URL.to_string(),
            log_level: "info".to_string(),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `ETHEREUM_RPC_URL`: JSON-RPC endpoint
    /// - `AAVE_POOL_ADDRESSES_PROVIDER`: only in testnet mode
    ///
    /// Optional environment variables:
    /// - `NETWORK_MODE`: `testnet` (default) or `mainnet`
    /// - `AAVE_WMATIC_ADDRESS`, `AAVE_WETH_ADDRESS`: wrapped token overrides
    /// - `AAVE_WMATIC_GATEWAY`, `AAVE_WETH_GATEWAY`: gateway overrides
    /// - `GAS_STATION_URL`: gas station endpoint
    /// - `LOG_LEVEL`: Logging level (default: info)
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let rpc_url = lookup("ETHEREUM_RPC_URL").filter(|v| !v.trim().is_empty()).ok_or_else(
            || AppError::Config("ETHEREUM_RPC_URL environment variable not set".into()),
        )?;

        let network = match lookup("NETWORK_MODE") {
            Some(mode) => mode.parse()?,
            None => NetworkMode::default(),
        };

        let provider = address_var(&lookup, "AAVE_POOL_ADDRESSES_PROVIDER")?;
        let mut addresses = NetworkAddresses::for_mode(network, provider)?;

        if let Some(token) = address_var(&lookup, "AAVE_WMATIC_ADDRESS")? {
            addresses.wmatic.token = token;
        }
        if let Some(token) = address_var(&lookup, "AAVE_WETH_ADDRESS")? {
            addresses.weth.token = token;
        }
        if let Some(gateway) = address_var(&lookup, "AAVE_WMATIC_GATEWAY")? {
            addresses.wmatic.gateway = gateway;
        }
        if let Some(gateway) = address_var(&lookup, "AAVE_WETH_GATEWAY")? {
            addresses.weth.gateway = gateway;
        }

        let gas_station_url =
            lookup("GAS_STATION_URL").unwrap_or_else(|| DEFAULT_GAS_STATION_URL.to_string());
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self { rpc_url, network, addresses, gas_station_url, log_level })
    }
}

fn address_var<F>(lookup: &F, name: &str) -> Result<Option<Address>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<Address>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} is not a valid address: {}", name, e))),
        _ => Ok(None),
    }
}
