use crate::events;
use crate::invariants::{ensure, product_non_decreasing};
use crate::permission::require_permission;
use crate::storage::{
    get_balance, get_config, get_pool_balance, get_registry, set_balance, set_pool_balance,
};
use crate::virtual_state::{oriented, settlement_reserves};
use soroban_sdk::{Address, Env};
use swap_math::{get_amount_in, get_amount_out};
use swap_types::{
    move_tokens, Direction, LockRegistry, PoolConfig, PoolError, PoolState, SwapOperation,
    TokenBalance,
};

/// Quote `amount_in` against the settlement reserves of `direction`
pub fn quote(
    env: &Env,
    config: &PoolConfig,
    pool: &TokenBalance,
    registry: &LockRegistry,
    direction: Direction,
    amount_in: u128,
) -> Result<u128, PoolError> {
    let (reserve_in, reserve_out) = settlement_reserves(env, pool, registry, direction)?;
    get_amount_out(env, amount_in, reserve_in, reserve_out, config.fee_per_mille)
        .ok_or(PoolError::NoLiquidity)
}

/// Output a lock acquired now for `amount_in` of `token_in` would receive
pub fn quote_swap(env: &Env, token_in: &Address, amount_in: u128) -> Result<u128, PoolError> {
    let config = get_config(env)?;
    let direction = config.direction_for(token_in)?;
    let pool = get_pool_balance(env);
    if !PoolState::from(&pool).has_liquidity() {
        return Err(PoolError::NoLiquidity);
    }
    quote(env, &config, &pool, &get_registry(env), direction, amount_in)
}

/// Smallest input of `token_in` whose quote reaches `amount_out`
pub fn quote_exact_output(
    env: &Env,
    token_in: &Address,
    amount_out: u128,
) -> Result<u128, PoolError> {
    let config = get_config(env)?;
    let direction = config.direction_for(token_in)?;
    let pool = get_pool_balance(env);
    if !PoolState::from(&pool).has_liquidity() {
        return Err(PoolError::NoLiquidity);
    }
    let (reserve_in, reserve_out) =
        settlement_reserves(env, &pool, &get_registry(env), direction)?;
    get_amount_in(env, amount_out, reserve_in, reserve_out, config.fee_per_mille)
        .ok_or(PoolError::InsufficientOutput)
}

/// Pay `amount_out` of a priced swap from the reserves to `recipient`.
///
/// The input must already be in `pool`. Fails if the reserve product
/// ends below `before`.
pub fn settle(
    env: &Env,
    before: (u128, u128),
    pool: &mut TokenBalance,
    recipient: &mut TokenBalance,
    direction: Direction,
    amount_out: u128,
) -> Result<(), PoolError> {
    move_tokens(pool, recipient, direction.token_out(), amount_out)
        .map_err(|_| PoolError::InvariantViolation)?;

    ensure(product_non_decreasing(
        env,
        before,
        (pool.a_tokens, pool.b_tokens),
    ))
}

/// Swap against the actual reserves with no reservation step
pub fn instant_swap(
    env: &Env,
    caller: &Address,
    token_in: &Address,
    amount_in: u128,
    minimum_out: u128,
) -> Result<u128, PoolError> {
    let config = get_config(env)?;
    require_permission(env, &config, caller, SwapOperation::InstantSwap)?;

    let direction = config.direction_for(token_in)?;
    if amount_in == 0 {
        return Err(PoolError::InvalidAmount);
    }

    let mut pool = get_pool_balance(env);
    if !PoolState::from(&pool).has_liquidity() {
        return Err(PoolError::NoLiquidity);
    }

    // Reserved settlements in this direction keep their place in line
    if get_registry(env).has_direction(direction) {
        return Err(PoolError::LocksOutstanding);
    }

    let (reserve_in, reserve_out) = oriented(direction, pool.a_tokens, pool.b_tokens);
    let amount_out = get_amount_out(env, amount_in, reserve_in, reserve_out, config.fee_per_mille)
        .ok_or(PoolError::NoLiquidity)?;
    if amount_out < minimum_out {
        return Err(PoolError::InsufficientOutput);
    }

    let before = (pool.a_tokens, pool.b_tokens);
    let mut account = get_balance(env, caller);
    move_tokens(&mut account, &mut pool, direction.token_in(), amount_in)?;
    settle(env, before, &mut pool, &mut account, direction, amount_out)?;

    set_pool_balance(env, &pool);
    set_balance(env, caller, &account);

    events::swap(env, caller, direction, amount_in, amount_out);
    Ok(amount_out)
}
