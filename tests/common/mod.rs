//! Common utilities for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use aave_native_deposit::{
    config::NetworkMode,
    error::{AppError, Result},
    services::DepositPlan,
    types::{DepositStep, GasParameters, StepReceipt},
    Config, DepositService, LendingBackend, NativeAsset,
};
use alloy::primitives::{address, Address, U256};
use async_trait::async_trait;

pub const POOL: Address = address!("794a61358D6845594F94dc1DB02A252b5b4814aD");
pub const RECIPIENT: Address = address!("70997970C51812dc3A010C7d01b50e0d17dc79C8");
pub const SIGNER: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const GATEWAY: Address = address!("1e4b7A6b903680eab0c5dAbcb8fD429cD2a9598c");

/// 1.5 native units in wei.
pub fn one_and_a_half() -> U256 {
    U256::from(1_500_000_000_000_000_000u64)
}

pub fn plan(asset: NativeAsset, token: Address) -> DepositPlan {
    DepositPlan { asset, token, gateway: GATEWAY, amount: one_and_a_half(), recipient: RECIPIENT }
}

/// Remote operation recorded by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PoolAddress,
    Wrap { token: Address, amount: U256 },
    Approve { token: Address, spender: Address, amount: U256 },
    EstimateGatewayDeposit { gateway: Address, pool: Address, on_behalf_of: Address, amount: U256 },
    GatewayDeposit {
        gateway: Address,
        pool: Address,
        on_behalf_of: Address,
        amount: U256,
        gas: GasParameters,
    },
    Supply { pool: Address, asset: Address, amount: U256, on_behalf_of: Address },
}

/// Transaction lifecycle event recorded by [`RecordingBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Submitted(DepositStep),
    Mined(DepositStep),
}

/// Operation that [`RecordingBackend`] should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    PoolAddress,
    Wrap,
    Approve,
    Estimate,
    GatewayDeposit,
    Supply,
}

/// In-memory [`LendingBackend`] that records every call in order.
pub struct RecordingBackend {
    pub pool: Address,
    pub gas_estimate: u64,
    pub fail_on: Option<FailOn>,
    calls: Mutex<Vec<Call>>,
    events: Mutex<Vec<Event>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            pool: POOL,
            gas_estimate: 180_000,
            fail_on: None,
            calls: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(fail_on: FailOn) -> Self {
        Self { fail_on: Some(fail_on), ..Self::new() }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Calls that would have sent a transaction.
    pub fn transactions(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(c, Call::PoolAddress | Call::EstimateGatewayDeposit { .. })
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    async fn mine(&self, step: DepositStep, fail: FailOn) -> Result<StepReceipt> {
        self.events.lock().unwrap().push(Event::Submitted(step));

        // Let any other ready task run before the receipt arrives.
        tokio::task::yield_now().await;

        if self.fail_on == Some(fail) {
            return Err(AppError::TransactionReverted { step, tx_hash: format!("0x{:064x}", 0) });
        }

        let mut events = self.events.lock().unwrap();
        events.push(Event::Mined(step));
        let n = events.len() as u64;

        Ok(StepReceipt {
            step,
            tx_hash: format!("0x{:064x}", n),
            block_number: Some(1_000 + n),
            gas_used: 50_000,
        })
    }
}

#[async_trait]
impl LendingBackend for RecordingBackend {
    fn signer_address(&self) -> Address {
        SIGNER
    }

    async fn pool_address(&self) -> Result<Address> {
        self.record(Call::PoolAddress);
        if self.fail_on == Some(FailOn::PoolAddress) {
            return Err(AppError::Rpc("getPool reverted".to_string()));
        }
        Ok(self.pool)
    }

    async fn wrap(&self, token: Address, amount: U256) -> Result<StepReceipt> {
        self.record(Call::Wrap { token, amount });
        self.mine(DepositStep::Wrap, FailOn::Wrap).await
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<StepReceipt> {
        self.record(Call::Approve { token, spender, amount });
        self.mine(DepositStep::Approve, FailOn::Approve).await
    }

    async fn estimate_gateway_deposit(
        &self,
        gateway: Address,
        pool: Address,
        on_behalf_of: Address,
        amount: U256,
    ) -> Result<u64> {
        self.record(Call::EstimateGatewayDeposit { gateway, pool, on_behalf_of, amount });
        if self.fail_on == Some(FailOn::Estimate) {
            return Err(AppError::Rpc("execution reverted".to_string()));
        }
        Ok(self.gas_estimate)
    }

    async fn gateway_deposit(
        &self,
        gateway: Address,
        pool: Address,
        on_behalf_of: Address,
        amount: U256,
        gas: &GasParameters,
    ) -> Result<StepReceipt> {
        self.record(Call::GatewayDeposit { gateway, pool, on_behalf_of, amount, gas: *gas });
        self.mine(DepositStep::GatewayDeposit, FailOn::GatewayDeposit).await
    }

    async fn supply(
        &self,
        pool: Address,
        asset: Address,
        amount: U256,
        on_behalf_of: Address,
    ) -> Result<StepReceipt> {
        self.record(Call::Supply { pool, asset, amount, on_behalf_of });
        self.mine(DepositStep::Supply, FailOn::Supply).await
    }
}

/// Helper to create a live deposit service from environment variables.
pub fn create_live_service() -> Option<DepositService> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let config = Config::from_env().ok()?;
    if config.network != NetworkMode::Testnet {
        // Never spend mainnet funds from the test suite.
        return None;
    }

    DepositService::new(&config).ok()
}

/// Skip test if the live service cannot be created (missing env vars).
#[macro_export]
macro_rules! skip_if_no_service {
    () => {
        match common::create_live_service() {
            Some(service) => service,
            None => {
                eprintln!("Skipping test: testnet ETHEREUM_RPC_URL / AAVE_POOL_ADDRESSES_PROVIDER not set");
                return;
            }
        }
    };
}
