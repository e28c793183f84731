//! Native asset deposit service.

use std::sync::Arc;

use alloy::primitives::{Address, U256};
use tracing::{info, warn};

use crate::{
    config::{Config, NetworkAddresses, NetworkMode},
    error::{AppError, Result},
    ethereum::{EthereumClient, WalletManager},
    services::{GasEstimator, LendingBackend, OnchainLending},
    types::{
        format_units, lowercase_address, DepositReceipt, DepositRequest, DepositStep,
        NativeAsset, StepReceipt, NATIVE_DECIMALS,
    },
};

/// Fully validated inputs of one deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositPlan {
    /// Native asset being deposited.
    pub asset: NativeAsset,
    /// Wrapped token supplied to the pool.
    pub token: Address,
    /// Gateway used on the mainnet path.
    pub gateway: Address,
    /// Amount in wei.
    pub amount: U256,
    /// Address credited with the position.
    pub recipient: Address,
}

/// Receipts of the steps mined so far.
///
/// A failure before anything was mined is returned unchanged. Once a
/// transaction has been mined, a later failure becomes
/// [`AppError::DepositInterrupted`] carrying those receipts.
#[derive(Debug, Default)]
struct Progress {
    completed: Vec<StepReceipt>,
}

impl Progress {
    fn record(&mut self, step: DepositStep, outcome: Result<StepReceipt>) -> Result<()> {
        match outcome {
            Ok(receipt) => {
                self.completed.push(receipt);
                Ok(())
            }
            Err(e) => Err(self.interrupt(step, e)),
        }
    }

    fn interrupt(&self, step: DepositStep, err: AppError) -> AppError {
        if self.completed.is_empty() {
            return err;
        }

        warn!(
            failed_step = %step,
            completed = self.completed.len(),
            error = %err,
            "Deposit interrupted; completed steps are not rolled back"
        );

        AppError::DepositInterrupted {
            failed_step: step,
            completed: self.completed.clone(),
            reason: err.to_string(),
        }
    }
}

/// Ordered deposit sequence for one network mode.
#[derive(Debug, Clone)]
pub struct DepositFlow {
    network: NetworkMode,
    gas_estimator: Arc<GasEstimator>,
}

impl DepositFlow {
    /// Create a flow for `network`.
    pub fn new(network: NetworkMode, gas_estimator: Arc<GasEstimator>) -> Self {
        Self { network, gas_estimator }
    }

    /// Network mode this flow runs.
    pub fn network(&self) -> NetworkMode {
        self.network
    }

    /// Run the deposit against `backend`.
    ///
    /// Each step starts only after the previous one is mined. The first
    /// failure stops the sequence; nothing already mined is undone.
    pub async fn execute<B>(&self, backend: &B, plan: &DepositPlan) -> Result<DepositReceipt>
    where
        B: LendingBackend + ?Sized,
    {
        let pool = backend.pool_address().await?;

        info!(
            network = %self.network,
            asset = %plan.asset,
            amount = %format_units(plan.amount, NATIVE_DECIMALS),
            signer = %backend.signer_address(),
            recipient = %plan.recipient,
            pool = %pool,
            "Starting deposit"
        );

        let steps = match self.network {
            NetworkMode::Testnet => self.wrap_and_supply(backend, plan, pool).await?,
            NetworkMode::Mainnet => self.gateway_and_supply(backend, plan, pool).await?,
        };

        info!(asset = %plan.asset, steps = steps.len(), "Deposit complete");

        Ok(DepositReceipt {
            native_asset: plan.asset,
            asset: lowercase_address(plan.token),
            amount: format_units(plan.amount, NATIVE_DECIMALS),
            amount_raw: plan.amount.to_string(),
            recipient: format!("{:?}", plan.recipient),
            pool: format!("{:?}", pool),
            network: self.network,
            steps,
        })
    }

    /// Testnet: wrap, approve the pool, supply.
    async fn wrap_and_supply<B>(
        &self,
        backend: &B,
        plan: &DepositPlan,
        pool: Address,
    ) -> Result<Vec<StepReceipt>>
    where
        B: LendingBackend + ?Sized,
    {
        let mut progress = Progress::default();

        let wrapped = backend.wrap(plan.token, plan.amount).await;
        progress.record(DepositStep::Wrap, wrapped)?;

        let approved = backend.approve(plan.token, pool, plan.amount).await;
        progress.record(DepositStep::Approve, approved)?;

        let supplied = backend.supply(pool, plan.token, plan.amount, plan.recipient).await;
        progress.record(DepositStep::Supply, supplied)?;

        Ok(progress.completed)
    }

    /// Mainnet: estimate, price gas, gateway deposit, supply.
    async fn gateway_and_supply<B>(
        &self,
        backend: &B,
        plan: &DepositPlan,
        pool: Address,
    ) -> Result<Vec<StepReceipt>>
    where
        B: LendingBackend + ?Sized,
    {
        let mut progress = Progress::default();

        let gas_estimated = backend
            .estimate_gateway_deposit(plan.gateway, pool, plan.recipient, plan.amount)
            .await
            .map_err(|e| progress.interrupt(DepositStep::EstimateGas, e))?;

        let gas = self.gas_estimator.estimate(gas_estimated).await;

        let deposited =
            backend.gateway_deposit(plan.gateway, pool, plan.recipient, plan.amount, &gas).await;
        progress.record(DepositStep::GatewayDeposit, deposited)?;

        let supplied = backend.supply(pool, plan.token, plan.amount, plan.recipient).await;
        progress.record(DepositStep::Supply, supplied)?;

        Ok(progress.completed)
    }
}

/// Entry point for native asset deposits.
#[derive(Debug, Clone)]
pub struct DepositService {
    client: Arc<EthereumClient>,
    addresses: NetworkAddresses,
    flow: DepositFlow,
}

impl DepositService {
    /// Create a new deposit service.
    ///
    /// No network calls are made until a deposit runs.
    pub fn new(config: &Config) -> Result<Self> {
        tracing::info!(network = %config.network, "Initializing deposit service");

        let client = Arc::new(EthereumClient::new(&config.rpc_url)?);
        let gas_estimator = Arc::new(GasEstimator::new(config.gas_station_url.clone())?);

        Ok(Self {
            client,
            addresses: config.addresses,
            flow: DepositFlow::new(config.network, gas_estimator),
        })
    }

    /// Chain ID of the connected node.
    pub async fn chain_id(&self) -> Result<u64> {
        self.client.chain_id().await
    }

    /// Deposit native MATIC, supplied to the pool as WMATIC.
    pub async fn deposit_matic(&self, request: DepositRequest) -> Result<DepositReceipt> {
        self.deposit(NativeAsset::Matic, request).await
    }

    /// Deposit native ETH, supplied to the pool as WETH.
    pub async fn deposit_eth(&self, request: DepositRequest) -> Result<DepositReceipt> {
        self.deposit(NativeAsset::Eth, request).await
    }

    /// Deposit `asset` as described by `request`.
    ///
    /// All input is validated before any remote call is made.
    pub async fn deposit(
        &self,
        asset: NativeAsset,
        request: DepositRequest,
    ) -> Result<DepositReceipt> {
        let plan = self.plan(asset, &request)?;
        let wallet = WalletManager::from_private_key(&request.key)?;

        let backend = OnchainLending::new(
            self.client.clone(),
            &wallet,
            self.addresses.pool_addresses_provider,
        );

        self.flow.execute(&backend, &plan).await
    }

    /// Validate `request` and resolve the contracts for `asset`.
    pub fn plan(&self, asset: NativeAsset, request: &DepositRequest) -> Result<DepositPlan> {
        let addresses = self.addresses.asset(asset);

        Ok(DepositPlan {
            asset,
            token: addresses.token,
            gateway: addresses.gateway,
            amount: request.amount_wei()?,
            recipient: request.recipient()?,
        })
    }
}
