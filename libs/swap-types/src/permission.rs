use crate::PoolError;
use soroban_sdk::{contracttype, Address, Vec};

/// Who may call the gated pool entry points. Fixed at initialization.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Permission {
    Anybody,
    AllowList(Vec<Address>),
}

impl Permission {
    pub fn allows(&self, address: &Address) -> bool {
        match self {
            Permission::Anybody => true,
            Permission::AllowList(addresses) => addresses.contains(address),
        }
    }
}

/// Operation categories guarded by a [`Permission`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwapOperation {
    /// Acquiring, executing and cancelling swap locks
    LockSwap,
    InstantSwap,
}

impl SwapOperation {
    /// Stable permission tag of the operation
    pub fn tag(&self) -> &'static str {
        match self {
            SwapOperation::LockSwap => "lock swap",
            SwapOperation::InstantSwap => "instant swap",
        }
    }

    /// Error reported when a caller lacks this permission
    pub fn unauthorized(&self) -> PoolError {
        match self {
            SwapOperation::LockSwap => PoolError::UnauthorizedLockSwap,
            SwapOperation::InstantSwap => PoolError::UnauthorizedInstantSwap,
        }
    }
}
