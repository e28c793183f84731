//! Smart contract bindings.

pub mod aave;
pub mod wrapped_native;

pub use aave::{IPool, IPoolAddressesProvider, IWrappedTokenGateway};
pub use wrapped_native::IWrappedNative;
