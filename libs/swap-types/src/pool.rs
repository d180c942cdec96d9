use crate::{DepositToken, Direction, Lock, LockId, LockSums, Permission, PoolError, TokenBalance};
use soroban_sdk::{contracttype, Address, Vec};

/// Pool configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub token_a: Address,
    pub token_b: Address,
    /// Swap fee in parts per thousand, within [0, 1000]
    pub fee_per_mille: u32,
    pub permission: Permission,
}

impl PoolConfig {
    /// Direction of a swap paying `token_in` into the pool
    pub fn direction_for(&self, token_in: &Address) -> Result<Direction, PoolError> {
        if *token_in == self.token_a {
            Ok(Direction::AToB)
        } else if *token_in == self.token_b {
            Ok(Direction::BToA)
        } else {
            Err(PoolError::UnknownToken)
        }
    }

    /// Ledger field backing a deposit or withdrawal of `token`
    pub fn deposit_token_for(&self, token: &Address) -> Result<DepositToken, PoolError> {
        self.direction_for(token).map(|direction| direction.token_in())
    }
}

/// Committed reserves of the pool
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    pub reserve_a: u128,
    pub reserve_b: u128,
    pub total_shares: u128,
}

impl PoolState {
    pub fn has_liquidity(&self) -> bool {
        self.reserve_a > 0 && self.reserve_b > 0
    }
}

impl From<&TokenBalance> for PoolState {
    fn from(pool: &TokenBalance) -> Self {
        Self {
            reserve_a: pool.a_tokens,
            reserve_b: pool.b_tokens,
            total_shares: pool.liquidity_tokens,
        }
    }
}

/// Lock-adjusted view of the pool: the reserves after replaying every
/// outstanding lock in id order, plus the locks themselves
#[contracttype]
#[derive(Clone, Debug)]
pub struct VirtualState {
    pub reserve_a: u128,
    pub reserve_b: u128,
    pub locks: Vec<Lock>,
    pub lock_sums: LockSums,
    pub next_lock_id: LockId,
}
