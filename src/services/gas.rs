//! Gas station fee estimation.
//!
//! Turns a gas estimate into EIP-1559 fee parameters using the Polygon gas
//! station's `fast` tier. Any failure falls back to fixed fees, so
//! [`GasEstimator::estimate`] always produces a value.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    config::DEFAULT_GAS_STATION_URL,
    error::{AppError, Result},
    types::{GasParameters, GasStationResponse},
};

/// HTTP timeout for the gas station request.
pub const GAS_STATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Gas station client.
#[derive(Debug, Clone)]
pub struct GasEstimator {
    /// HTTP client for the gas station.
    client: reqwest::Client,
    /// Gas station endpoint.
    url: String,
}

impl GasEstimator {
    /// Create an estimator for the given gas station URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(GAS_STATION_TIMEOUT)
            .build()
            .map_err(|e| AppError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url: url.into() })
    }

    /// Create an estimator for the public Polygon gas station.
    pub fn polygon() -> Result<Self> {
        Self::new(DEFAULT_GAS_STATION_URL)
    }

    /// Gas station endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fee parameters for a transaction needing `gas_estimated` gas.
    ///
    /// Never fails: on any gas station error the fallback fees are returned
    /// and a warning is logged.
    pub async fn estimate(&self, gas_estimated: u64) -> GasParameters {
        match self.fetch(gas_estimated).await {
            Ok(gas) => {
                debug!(
                    gas_limit = gas.gas_limit,
                    max_fee_per_gas = gas.max_fee_per_gas,
                    max_priority_fee_per_gas = gas.max_priority_fee_per_gas,
                    "Gas station fees applied"
                );
                gas
            }
            Err(e) => {
                let fallback = GasParameters::fallback(gas_estimated);
                warn!(
                    url = %self.url,
                    error = %e,
                    max_fee_per_gas = fallback.max_fee_per_gas,
                    max_priority_fee_per_gas = fallback.max_priority_fee_per_gas,
                    "Gas station unavailable, using fallback fees"
                );
                fallback
            }
        }
    }

    /// Query the gas station once.
    async fn fetch(&self, gas_estimated: u64) -> Result<GasParameters> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to query gas station: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Transport(format!(
                "Gas station returned status: {}",
                response.status()
            )));
        }

        let station: GasStationResponse = response
            .json()
            .await
            .map_err(|e| AppError::Parse(format!("Failed to parse gas station response: {}", e)))?;

        GasParameters::from_tier(gas_estimated, &station.fast)
    }
}
