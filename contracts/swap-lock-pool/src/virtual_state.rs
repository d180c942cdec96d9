use soroban_sdk::Env;
use swap_math::product;
use swap_types::{Direction, LockRegistry, LockSums, PoolError, TokenBalance};

/// Outcome of replaying outstanding locks on top of the actual reserves
#[derive(Clone, Debug)]
pub struct Replay {
    pub reserve_a: u128,
    pub reserve_b: u128,
    /// Per-direction `amount_in` sums recomputed from the replayed locks
    pub sums: LockSums,
    /// False if any replay step lowered the reserve product
    pub monotonic: bool,
}

/// Order a pair of reserves as (input side, output side) for `direction`
pub fn oriented(direction: Direction, reserve_a: u128, reserve_b: u128) -> (u128, u128) {
    match direction {
        Direction::AToB => (reserve_a, reserve_b),
        Direction::BToA => (reserve_b, reserve_a),
    }
}

/// Replay outstanding locks one at a time in ascending id order.
///
/// Each lock adds its `amount_in` to the input reserve and takes its
/// `amount_out` from the output reserve, exactly as execution would.
/// With `only` set, locks paying into the other direction are skipped.
pub fn replay(
    env: &Env,
    pool: &TokenBalance,
    registry: &LockRegistry,
    only: Option<Direction>,
) -> Result<Replay, PoolError> {
    let mut reserve_a = pool.a_tokens;
    let mut reserve_b = pool.b_tokens;
    let mut sums = LockSums::default();
    let mut monotonic = true;

    for (_, lock) in registry.locks.iter() {
        if only.is_some_and(|direction| direction != lock.direction) {
            continue;
        }

        let before = product(env, reserve_a, reserve_b);
        let (reserve_in, reserve_out) = match lock.direction {
            Direction::AToB => (&mut reserve_a, &mut reserve_b),
            Direction::BToA => (&mut reserve_b, &mut reserve_a),
        };
        *reserve_in = reserve_in
            .checked_add(lock.amount_in)
            .ok_or(PoolError::InvariantViolation)?;
        *reserve_out = reserve_out
            .checked_sub(lock.amount_out)
            .ok_or(PoolError::InvariantViolation)?;
        sums.add(lock.direction, lock.amount_in)?;

        if product(env, reserve_a, reserve_b) < before {
            monotonic = false;
        }
    }

    Ok(Replay {
        reserve_a,
        reserve_b,
        sums,
        monotonic,
    })
}

/// Reserves a new swap in `direction` is quoted against, as (input, output).
///
/// Only same-direction locks are replayed. Opposite-direction locks can
/// still be cancelled, so their liquidity is never promised to anyone else.
pub fn settlement_reserves(
    env: &Env,
    pool: &TokenBalance,
    registry: &LockRegistry,
    direction: Direction,
) -> Result<(u128, u128), PoolError> {
    let replayed = replay(env, pool, registry, Some(direction))?;
    Ok(oriented(direction, replayed.reserve_a, replayed.reserve_b))
}
