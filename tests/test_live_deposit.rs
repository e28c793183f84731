//! Live testnet deposit tests.
//!
//! These spend testnet funds. Run with:
//! `cargo test --test test_live_deposit -- --ignored`
//!
//! Requires `ETHEREUM_RPC_URL`, `AAVE_POOL_ADDRESSES_PROVIDER` and
//! `DEPOSIT_PRIVATE_KEY`, with `NETWORK_MODE` unset or `testnet`.

mod common;

use aave_native_deposit::{types::DepositStep, DepositRequest, NetworkMode};

fn live_request(amount: &str) -> Option<DepositRequest> {
    let key = std::env::var("DEPOSIT_PRIVATE_KEY").ok()?;
    let wallet = aave_native_deposit::ethereum::WalletManager::from_private_key(&key).ok()?;
    // Credit the signer itself unless a recipient is given.
    let recipient =
        std::env::var("DEPOSIT_RECIPIENT").unwrap_or_else(|_| format!("{:?}", wallet.address()));
    Some(DepositRequest::new(key, amount, recipient))
}

/// Test chain connectivity.
#[tokio::test]
#[ignore = "Requires network access and environment variables"]
async fn test_live_chain_id() {
    let service = skip_if_no_service!();

    let chain_id = service.chain_id().await;
    assert!(chain_id.is_ok(), "chain_id should succeed: {:?}", chain_id.err());
}

/// Test a small MATIC deposit end to end.
#[tokio::test]
#[ignore = "Requires network access, environment variables and testnet funds"]
async fn test_live_deposit_matic() {
    let service = skip_if_no_service!();
    let Some(request) = live_request("0.001") else {
        eprintln!("Skipping test: DEPOSIT_PRIVATE_KEY not set");
        return;
    };

    let result = service.deposit_matic(request).await;
    assert!(result.is_ok(), "deposit_matic should succeed: {:?}", result.err());

    let receipt = result.unwrap();
    assert_eq!(receipt.network, NetworkMode::Testnet);
    let steps: Vec<_> = receipt.steps.iter().map(|s| s.step).collect();
    assert_eq!(steps, vec![DepositStep::Wrap, DepositStep::Approve, DepositStep::Supply]);
    assert!(receipt.steps.iter().all(|s| s.tx_hash.starts_with("0x")));

    println!("Deposit receipt: {}", serde_json::to_string_pretty(&receipt).unwrap());
}
