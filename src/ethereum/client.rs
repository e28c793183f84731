//! Ethereum RPC client.

use alloy::{
    network::Ethereum,
    providers::{DynProvider, Provider, ProviderBuilder, RootProvider},
    transports::http::reqwest::Url,
};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::{
    error::{AppError, Result},
    ethereum::WalletManager,
};

/// Type alias for the read-only HTTP provider.
pub type HttpProvider = RootProvider<Ethereum>;

/// Type alias for a wallet-backed provider that fills nonce, gas and chain id.
pub type SigningProvider = DynProvider<Ethereum>;

/// Ethereum RPC client wrapper with lazy initialization.
#[derive(Clone)]
pub struct EthereumClient {
    /// The underlying read-only provider.
    provider: Arc<HttpProvider>,
    /// Parsed RPC URL, reused for signing providers.
    url: Url,
    /// RPC URL for logging.
    rpc_url: String,
    /// Lazily initialized chain ID.
    chain_id: Arc<OnceCell<u64>>,
}

impl EthereumClient {
    /// Create a new Ethereum client.
    ///
    /// Note: This does NOT make any network calls. The connection is
    /// established lazily when the first operation is performed.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url: Url = rpc_url
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid RPC URL: {}", rpc_url)))?;

        let provider = RootProvider::<Ethereum>::new_http(url.clone());

        tracing::info!(rpc_url = %rpc_url, "Ethereum client created (lazy initialization)");

        Ok(Self {
            provider: Arc::new(provider),
            url,
            rpc_url: rpc_url.to_string(),
            chain_id: Arc::new(OnceCell::new()),
        })
    }

    /// Get the chain ID (fetches from network on first call).
    pub async fn chain_id(&self) -> Result<u64> {
        self.chain_id
            .get_or_try_init(|| async {
                let chain_id = self.provider.get_chain_id().await?;
                tracing::info!(chain_id = chain_id, rpc_url = %self.rpc_url, "Connected to Ethereum node");
                Ok(chain_id)
            })
            .await
            .copied()
    }

    /// Get the underlying read-only provider.
    pub fn provider(&self) -> &HttpProvider {
        &self.provider
    }

    /// Build a provider that signs and sends transactions from `wallet`.
    pub fn signing_provider(&self, wallet: &WalletManager) -> SigningProvider {
        tracing::debug!(address = %wallet.address(), "Creating signing provider");

        ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(self.url.clone())
            .erased()
    }
}

impl std::fmt::Debug for EthereumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumClient").field("rpc_url", &self.rpc_url).finish()
    }
}
