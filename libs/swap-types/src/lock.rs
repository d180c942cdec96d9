use crate::{DepositToken, PoolError};
use soroban_sdk::{contracttype, Address, Env, Map};

/// Identifier of a swap lock, drawn from a counter that is never reset
pub type LockId = u64;

/// Side of the pool a swap pays into
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    /// Token A in, token B out
    AToB,
    /// Token B in, token A out
    BToA,
}

impl Direction {
    pub fn token_in(&self) -> DepositToken {
        match self {
            Direction::AToB => DepositToken::A,
            Direction::BToA => DepositToken::B,
        }
    }

    pub fn token_out(&self) -> DepositToken {
        match self {
            Direction::AToB => DepositToken::B,
            Direction::BToA => DepositToken::A,
        }
    }
}

/// A reserved swap whose price was fixed at acquisition
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    pub id: LockId,
    /// Account whose collateral backs the lock and who receives the output
    pub owner: Address,
    pub direction: Direction,
    pub amount_in: u128,
    pub amount_out: u128,
    /// Ledger sequence at acquisition
    pub created_at: u32,
}

/// Sum of `amount_in` over outstanding locks, grouped by direction.
/// Only used to cross-check the registry and the locked collateral.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LockSums {
    pub a_in: u128,
    pub b_in: u128,
}

impl LockSums {
    fn slot_mut(&mut self, direction: Direction) -> &mut u128 {
        match direction {
            Direction::AToB => &mut self.a_in,
            Direction::BToA => &mut self.b_in,
        }
    }

    pub fn add(&mut self, direction: Direction, amount: u128) -> Result<(), PoolError> {
        let slot = self.slot_mut(direction);
        *slot = slot.checked_add(amount).ok_or(PoolError::InvariantViolation)?;
        Ok(())
    }

    pub fn sub(&mut self, direction: Direction, amount: u128) -> Result<(), PoolError> {
        let slot = self.slot_mut(direction);
        *slot = slot.checked_sub(amount).ok_or(PoolError::InvariantViolation)?;
        Ok(())
    }
}

/// Outstanding locks of a pool, keyed and iterated by ascending id
#[contracttype]
#[derive(Clone, Debug)]
pub struct LockRegistry {
    pub next_lock_id: LockId,
    pub locks: Map<LockId, Lock>,
    pub lock_sums: LockSums,
}

impl LockRegistry {
    pub fn new(env: &Env) -> Self {
        Self {
            next_lock_id: 0,
            locks: Map::new(env),
            lock_sums: LockSums::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// True if any outstanding lock pays into `direction`
    pub fn has_direction(&self, direction: Direction) -> bool {
        self.locks.values().iter().any(|lock| lock.direction == direction)
    }

    /// True if a lock older than `id` in the same direction is outstanding
    pub fn has_older(&self, id: LockId, direction: Direction) -> bool {
        self.locks
            .iter()
            .any(|(other, lock)| other < id && lock.direction == direction)
    }

    /// Record a new lock under the next id
    pub fn insert(
        &mut self,
        owner: Address,
        direction: Direction,
        amount_in: u128,
        amount_out: u128,
        created_at: u32,
    ) -> Result<Lock, PoolError> {
        let id = self.next_lock_id;
        self.next_lock_id = id.checked_add(1).ok_or(PoolError::InvariantViolation)?;
        self.lock_sums.add(direction, amount_in)?;
        let lock = Lock {
            id,
            owner,
            direction,
            amount_in,
            amount_out,
            created_at,
        };
        self.locks.set(id, lock.clone());
        Ok(lock)
    }

    /// Remove and return a lock
    pub fn take(&mut self, id: LockId) -> Result<Lock, PoolError> {
        let lock = self.locks.get(id).ok_or(PoolError::LockNotFound)?;
        self.locks.remove(id);
        self.lock_sums.sub(lock.direction, lock.amount_in)?;
        Ok(lock)
    }
}
