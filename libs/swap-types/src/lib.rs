#![no_std]

mod balance;
mod error;
mod lock;
mod permission;
mod pool;

pub use balance::*;
pub use error::*;
pub use lock::*;
pub use permission::*;
pub use pool::*;

/// Denominator of the swap fee: fees are expressed in parts per thousand
pub const FEE_DENOMINATOR: u32 = 1000;

/// Maximum number of locks a pool keeps outstanding at once.
/// Every quote replays the registry, so this bounds the per-call work
/// as well as the size of the instance entry holding the registry.
pub const MAX_OUTSTANDING_LOCKS: u32 = 32;
