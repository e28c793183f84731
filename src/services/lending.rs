//! Lending pool access.
//!
//! [`LendingBackend`] is the set of remote operations a deposit needs.
//! [`OnchainLending`] implements it against live contracts through a
//! wallet-backed provider.

use std::sync::Arc;

use alloy::{
    network::{Ethereum, ReceiptResponse},
    primitives::{Address, U256},
    providers::PendingTransactionBuilder,
};
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{
    error::{AppError, Result},
    ethereum::{
        constants::REFERRAL_CODE,
        contracts::{IPool, IPoolAddressesProvider, IWrappedNative, IWrappedTokenGateway},
        EthereumClient, SigningProvider, WalletManager,
    },
    types::{DepositStep, GasParameters, StepReceipt},
};

/// Remote operations used by a deposit.
///
/// Every method that returns a [`StepReceipt`] waits until the transaction
/// is mined and fails if it reverted.
#[async_trait]
pub trait LendingBackend: Send + Sync {
    /// Address that signs and pays for transactions.
    fn signer_address(&self) -> Address;

    /// Current pool address from the addresses provider.
    async fn pool_address(&self) -> Result<Address>;

    /// Wrap `amount` of the native asset into `token`.
    async fn wrap(&self, token: Address, amount: U256) -> Result<StepReceipt>;

    /// Allow `spender` to pull `amount` of `token` from the signer.
    async fn approve(&self, token: Address, spender: Address, amount: U256)
        -> Result<StepReceipt>;

    /// Estimate gas for a gateway `depositETH` without sending it.
    async fn estimate_gateway_deposit(
        &self,
        gateway: Address,
        pool: Address,
        on_behalf_of: Address,
        amount: U256,
    ) -> Result<u64>;

    /// Send a gateway `depositETH` carrying `amount` with explicit fees.
    async fn gateway_deposit(
        &self,
        gateway: Address,
        pool: Address,
        on_behalf_of: Address,
        amount: U256,
        gas: &GasParameters,
    ) -> Result<StepReceipt>;

    /// Supply `amount` of `asset` to `pool`, credited to `on_behalf_of`.
    async fn supply(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
    ) -> Result<StepReceipt>;
}

/// [`LendingBackend`] backed by live contracts.
pub struct OnchainLending {
    /// Read-only client, used for view calls.
    client: Arc<EthereumClient>,
    /// Wallet-backed provider, used for transactions.
    provider: SigningProvider,
    /// Signer address.
    signer: Address,
    /// Aave `PoolAddressesProvider`.
    pool_addresses_provider: Address,
}

impl OnchainLending {
    /// Create a backend that signs with `wallet`.
    pub fn new(
        client: Arc<EthereumClient>,
        wallet: &WalletManager,
        pool_addresses_provider: Address,
    ) -> Self {
        let provider = client.signing_provider(wallet);
        Self { client, provider, signer: wallet.address(), pool_addresses_provider }
    }

    /// Wait for a submitted transaction and turn its receipt into a [`StepReceipt`].
    async fn confirm(
        &self,
        step: DepositStep,
        pending: PendingTransactionBuilder<Ethereum>,
    ) -> Result<StepReceipt> {
        let tx_hash = *pending.tx_hash();
        info!(step = %step, tx_hash = %tx_hash, "Transaction submitted, waiting for confirmation");

        let receipt = pending.get_receipt().await?;

        if !receipt.status() {
            return Err(AppError::TransactionReverted { step, tx_hash: format!("{tx_hash:?}") });
        }

        let outcome = StepReceipt {
            step,
            tx_hash: format!("{:?}", receipt.transaction_hash()),
            block_number: receipt.block_number(),
            gas_used: receipt.gas_used(),
        };

        info!(
            step = %step,
            tx_hash = %outcome.tx_hash,
            block = ?outcome.block_number,
            gas_used = outcome.gas_used,
            "Transaction mined"
        );

        Ok(outcome)
    }
}

#[async_trait]
impl LendingBackend for OnchainLending {
    fn signer_address(&self) -> Address {
        self.signer
    }

    async fn pool_address(&self) -> Result<Address> {
        let provider =
            IPoolAddressesProvider::new(self.pool_addresses_provider, self.client.provider().clone());

        // getPool returns Address directly
        let pool: Address = provider.getPool().call().await?;

        if pool == Address::ZERO {
            return Err(AppError::Rpc(format!(
                "Addresses provider {} returned the zero pool address",
                self.pool_addresses_provider
            )));
        }

        debug!(provider = %self.pool_addresses_provider, pool = %pool, "Resolved pool address");
        Ok(pool)
    }

    async fn wrap(&self, token: Address, amount: U256) -> Result<StepReceipt> {
        let contract = IWrappedNative::new(token, self.provider.clone());
        let pending = contract.deposit().value(amount).send().await?;
        self.confirm(DepositStep::Wrap, pending).await
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<StepReceipt> {
        let contract = IWrappedNative::new(token, self.provider.clone());
        let pending = contract.approve(spender, amount).send().await?;
        self.confirm(DepositStep::Approve, pending).await
    }

    async fn estimate_gateway_deposit(
        &self,
        gateway: Address,
        pool: Address,
        on_behalf_of: Address,
        amount: U256,
    ) -> Result<u64> {
        let contract = IWrappedTokenGateway::new(gateway, self.provider.clone());
        let gas = contract
            .depositETH(pool, on_behalf_of, REFERRAL_CODE)
            .value(amount)
            .from(self.signer)
            .estimate_gas()
            .await?;

        debug!(gateway = %gateway, gas = gas, "Estimated gateway deposit gas");
        Ok(gas)
    }

    async fn gateway_deposit(
        &self,
        gateway: Address,
        pool: Address,
        on_behalf_of: Address,
        amount: U256,
        gas: &GasParameters,
    ) -> Result<StepReceipt> {
        let contract = IWrappedTokenGateway::new(gateway, self.provider.clone());
        let pending = contract
            .depositETH(pool, on_behalf_of, REFERRAL_CODE)
            .value(amount)
            .gas(gas.gas_limit)
            .max_fee_per_gas(gas.max_fee_per_gas)
            .max_priority_fee_per_gas(gas.max_priority_fee_per_gas)
            .send()
            .await?;
        self.confirm(DepositStep::GatewayDeposit, pending).await
    }

    async fn supply(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
    ) -> Result<StepReceipt> {
        let contract = IPool::new(pool, self.provider.clone());
        let pending = contract.supply(asset, amount, on_behalf_of, REFERRAL_CODE).send().await?;
        self.confirm(DepositStep::Supply, pending).await
    }
}

impl std::fmt::Debug for OnchainLending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnchainLending")
            .field("signer", &self.signer)
            .field("pool_addresses_provider", &self.pool_addresses_provider)
            .finish()
    }
}
