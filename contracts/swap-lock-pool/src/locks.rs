use crate::events;
use crate::invariants::{ensure, lock_sums_consistent, virtual_product_covers_actual};
use crate::permission::require_permission;
use crate::storage::{
    get_balance, get_collateral, get_config, get_pool_balance, get_registry, set_balance,
    set_collateral, set_pool_balance, set_registry,
};
use crate::swap::{quote, settle};
use crate::virtual_state::replay;
use soroban_sdk::{Address, Env};
use swap_types::{
    move_tokens, LockId, LockRegistry, PoolError, PoolState, SwapOperation, TokenBalance,
    MAX_OUTSTANDING_LOCKS,
};

/// Validate the registry against a full replay and the escrowed collateral
pub fn check_registry(
    env: &Env,
    pool: &TokenBalance,
    registry: &LockRegistry,
    collateral: &TokenBalance,
) -> Result<(), PoolError> {
    let replayed = replay(env, pool, registry, None)?;
    ensure(lock_sums_consistent(
        &registry.lock_sums,
        &replayed.sums,
        collateral,
    ))?;
    ensure(virtual_product_covers_actual(env, pool, &replayed))
}

/// Reserve a swap of `amount_in` of `token_in` at today's price
pub fn acquire(
    env: &Env,
    caller: &Address,
    token_in: &Address,
    amount_in: u128,
    minimum_out: u128,
) -> Result<LockId, PoolError> {
    let config = get_config(env)?;
    require_permission(env, &config, caller, SwapOperation::LockSwap)?;

    let direction = config.direction_for(token_in)?;
    if amount_in == 0 {
        return Err(PoolError::InvalidAmount);
    }

    let pool = get_pool_balance(env);
    if !PoolState::from(&pool).has_liquidity() {
        return Err(PoolError::NoLiquidity);
    }

    let mut registry = get_registry(env);
    if registry.locks.len() >= MAX_OUTSTANDING_LOCKS {
        return Err(PoolError::TooManyLocks);
    }

    let mut account = get_balance(env, caller);
    let mut collateral = get_collateral(env);
    move_tokens(&mut account, &mut collateral, direction.token_in(), amount_in)?;

    let amount_out = quote(env, &config, &pool, &registry, direction, amount_in)?;
    if amount_out < minimum_out {
        return Err(PoolError::InsufficientOutput);
    }

    let lock = registry.insert(
        caller.clone(),
        direction,
        amount_in,
        amount_out,
        env.ledger().sequence(),
    )?;
    check_registry(env, &pool, &registry, &collateral)?;

    set_balance(env, caller, &account);
    set_collateral(env, &collateral);
    set_registry(env, &registry);

    events::lock_acquired(env, &lock);
    Ok(lock.id)
}

/// Settle a lock at its reserved price. Output goes to the lock owner.
pub fn execute(env: &Env, caller: &Address, lock_id: LockId) -> Result<u128, PoolError> {
    let config = get_config(env)?;
    require_permission(env, &config, caller, SwapOperation::LockSwap)?;

    let mut registry = get_registry(env);
    let lock = registry.take(lock_id)?;
    if registry.has_older(lock_id, lock.direction) {
        return Err(PoolError::LockOutOfOrder);
    }

    let mut collateral = get_collateral(env);
    let mut pool = get_pool_balance(env);
    let before = (pool.a_tokens, pool.b_tokens);
    move_tokens(
        &mut collateral,
        &mut pool,
        lock.direction.token_in(),
        lock.amount_in,
    )
    .map_err(|_| PoolError::InvariantViolation)?;

    let mut owner = get_balance(env, &lock.owner);
    settle(
        env,
        before,
        &mut pool,
        &mut owner,
        lock.direction,
        lock.amount_out,
    )?;
    check_registry(env, &pool, &registry, &collateral)?;

    set_pool_balance(env, &pool);
    set_balance(env, &lock.owner, &owner);
    set_collateral(env, &collateral);
    set_registry(env, &registry);

    events::lock_executed(env, caller, &lock);
    Ok(lock.amount_out)
}

/// Drop a lock and refund its collateral to the owner. Reserves are untouched.
pub fn cancel(env: &Env, caller: &Address, lock_id: LockId) -> Result<(), PoolError> {
    let config = get_config(env)?;
    require_permission(env, &config, caller, SwapOperation::LockSwap)?;

    let mut registry = get_registry(env);
    let lock = registry.take(lock_id)?;

    let mut collateral = get_collateral(env);
    let mut owner = get_balance(env, &lock.owner);
    move_tokens(
        &mut collateral,
        &mut owner,
        lock.direction.token_in(),
        lock.amount_in,
    )
    .map_err(|_| PoolError::InvariantViolation)?;

    let pool = get_pool_balance(env);
    check_registry(env, &pool, &registry, &collateral)?;

    set_balance(env, &lock.owner, &owner);
    set_collateral(env, &collateral);
    set_registry(env, &registry);

    events::lock_cancelled(env, caller, lock_id, lock.amount_in);
    Ok(())
}
