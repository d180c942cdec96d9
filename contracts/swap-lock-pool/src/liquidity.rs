use crate::events;
use crate::locks::check_registry;
use crate::storage::{
    get_balance, get_collateral, get_config, get_pool_balance, get_registry, set_balance,
    set_pool_balance,
};
use soroban_sdk::{Address, Env};
use swap_math::{paired_amount, reclaim_amount, shares_for_amount};
use swap_types::{DepositToken, PoolError, PoolState};

/// Shares may only be burned while no lock holds a price against the reserves
fn require_no_locks(env: &Env) -> Result<(), PoolError> {
    if get_registry(env).is_empty() {
        Ok(())
    } else {
        Err(PoolError::LocksOutstanding)
    }
}

/// Seed an empty pool. Mints `amount_a` shares to the provider.
pub fn provide_initial(
    env: &Env,
    provider: &Address,
    amount_a: u128,
    amount_b: u128,
) -> Result<u128, PoolError> {
    get_config(env)?;

    let mut pool = get_pool_balance(env);
    if pool.a_tokens != 0 || pool.b_tokens != 0 {
        return Err(PoolError::AlreadyInitialized);
    }

    let shares = amount_a;
    if shares == 0 {
        return Err(PoolError::ZeroMintedLiquidity);
    }
    if amount_b == 0 {
        return Err(PoolError::InvalidAmount);
    }

    let mut account = get_balance(env, provider);
    account.debit(DepositToken::A, amount_a)?;
    account.debit(DepositToken::B, amount_b)?;
    account.credit(DepositToken::Liquidity, shares)?;

    pool.credit(DepositToken::A, amount_a)?;
    pool.credit(DepositToken::B, amount_b)?;
    pool.credit(DepositToken::Liquidity, shares)?;

    set_pool_balance(env, &pool);
    set_balance(env, provider, &account);

    events::liquidity_added(env, provider, amount_a, amount_b, shares);
    Ok(shares)
}

/// Add `amount` of `token` plus the matching amount of the other token.
///
/// Allowed with locks outstanding: both reserves grow by at least the same
/// factor, which never worsens a reserved price. The registry is re-checked
/// against the grown reserves before anything is stored, and a provision
/// that would leave a lock uncovered fails `LocksOutstanding`.
pub fn provide(
    env: &Env,
    provider: &Address,
    token: &Address,
    amount: u128,
) -> Result<u128, PoolError> {
    let config = get_config(env)?;
    let direction = config.direction_for(token)?;

    let mut pool = get_pool_balance(env);
    if !PoolState::from(&pool).has_liquidity() {
        return Err(PoolError::NoLiquidity);
    }

    let token_in = direction.token_in();
    let token_other = direction.token_out();
    let reserve_in = pool.amount_of(token_in);
    let reserve_other = pool.amount_of(token_other);

    let shares = shares_for_amount(env, amount, pool.liquidity_tokens, reserve_in)
        .ok_or(PoolError::InvariantViolation)?;
    if shares == 0 {
        return Err(PoolError::ZeroMintedLiquidity);
    }
    let other_amount = paired_amount(env, amount, reserve_in, reserve_other)
        .ok_or(PoolError::InvariantViolation)?;

    let mut account = get_balance(env, provider);
    account.debit(token_in, amount)?;
    account.debit(token_other, other_amount)?;
    account.credit(DepositToken::Liquidity, shares)?;

    pool.credit(token_in, amount)?;
    pool.credit(token_other, other_amount)?;
    pool.credit(DepositToken::Liquidity, shares)?;
    // The +1 on the paired side can outgrow a reverse lock's rounding slack
    check_registry(env, &pool, &get_registry(env), &get_collateral(env))
        .map_err(|_| PoolError::LocksOutstanding)?;

    set_pool_balance(env, &pool);
    set_balance(env, provider, &account);

    let (amount_a, amount_b) = match token_in {
        DepositToken::A => (amount, other_amount),
        _ => (other_amount, amount),
    };
    events::liquidity_added(env, provider, amount_a, amount_b, shares);
    Ok(shares)
}

/// Burn `shares` for a pro-rata part of both reserves
pub fn reclaim(env: &Env, provider: &Address, shares: u128) -> Result<(u128, u128), PoolError> {
    get_config(env)?;
    if shares == 0 {
        return Err(PoolError::InvalidAmount);
    }
    require_no_locks(env)?;

    let mut account = get_balance(env, provider);
    account.debit(DepositToken::Liquidity, shares)?;

    let mut pool = get_pool_balance(env);
    let total_shares = pool.liquidity_tokens;
    let amount_a = reclaim_amount(env, shares, pool.a_tokens, total_shares)
        .ok_or(PoolError::InvariantViolation)?;
    let amount_b = reclaim_amount(env, shares, pool.b_tokens, total_shares)
        .ok_or(PoolError::InvariantViolation)?;

    pool.debit(DepositToken::Liquidity, shares)
        .map_err(|_| PoolError::InvariantViolation)?;
    pool.debit(DepositToken::A, amount_a)
        .map_err(|_| PoolError::InvariantViolation)?;
    pool.debit(DepositToken::B, amount_b)
        .map_err(|_| PoolError::InvariantViolation)?;
    account.credit(DepositToken::A, amount_a)?;
    account.credit(DepositToken::B, amount_b)?;

    set_pool_balance(env, &pool);
    set_balance(env, provider, &account);

    events::liquidity_removed(env, provider, amount_a, amount_b, shares);
    Ok((amount_a, amount_b))
}
