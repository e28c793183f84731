//! Type definitions module.
//!
//! Contains shared types used across the application.

pub mod deposit;
pub mod gas;
pub mod units;

pub use deposit::*;
pub use gas::*;
pub use units::*;
