//! Business logic services module.

pub mod deposit;
pub mod gas;
pub mod lending;

pub use deposit::{DepositFlow, DepositPlan, DepositService};
pub use gas::GasEstimator;
pub use lending::{LendingBackend, OnchainLending};
