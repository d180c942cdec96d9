// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Predicates over pool state that must hold after every successful call.
// Entry points check the ones they can affect and fail with
// InvariantViolation otherwise. Tests check all of them.
//
// INVARIANT CATEGORIES:
//
// 1. CONSTANT-PRODUCT INVARIANTS
//    - reserve_a * reserve_b never decreases across a swap or settlement
//    - Replaying outstanding locks never lowers the product
//
// 2. LOCK ACCOUNTING INVARIANTS
//    - Lock sums equal the per-direction sum over outstanding locks
//    - Lock sums equal the escrowed collateral
//
// 3. LEDGER INVARIANTS
//    - No ledger entry is stored with all fields zero
//    - Account shares add up to the pool's total shares
//
// ============================================================================

use soroban_sdk::Env;
use swap_math::product;
use swap_types::{LockSums, PoolError, TokenBalance, FEE_DENOMINATOR};

use crate::virtual_state::Replay;

/// Turn a failed invariant into the fatal pool error
pub fn ensure(holds: bool) -> Result<(), PoolError> {
    if holds {
        Ok(())
    } else {
        Err(PoolError::InvariantViolation)
    }
}

// ============================================================================
// CONSTANT-PRODUCT INVARIANTS
// ============================================================================

/// Invariant: the reserve product does not decrease
///
/// Property:
///   after_a * after_b >= before_a * before_b
///
/// Checked with 256-bit products after every swap and lock execution.
pub fn product_non_decreasing(
    env: &Env,
    before: (u128, u128),
    after: (u128, u128),
) -> bool {
    product(env, after.0, after.1) >= product(env, before.0, before.1)
}

/// Invariant: outstanding locks never promise more than the pool holds
///
/// Property:
///   replaying every lock in id order never lowers the product, so
///   virtual_a * virtual_b >= reserve_a * reserve_b
pub fn virtual_product_covers_actual(env: &Env, pool: &TokenBalance, replay: &Replay) -> bool {
    replay.monotonic
        && product_non_decreasing(
            env,
            (pool.a_tokens, pool.b_tokens),
            (replay.reserve_a, replay.reserve_b),
        )
}

// ============================================================================
// LOCK ACCOUNTING INVARIANTS
// ============================================================================

/// Invariant: lock sums agree with the locks and with the collateral
///
/// Property:
///   recorded == replayed
///   recorded.a_in == collateral.a_tokens && recorded.b_in == collateral.b_tokens
pub fn lock_sums_consistent(
    recorded: &LockSums,
    replayed: &LockSums,
    collateral: &TokenBalance,
) -> bool {
    recorded == replayed
        && recorded.a_in == collateral.a_tokens
        && recorded.b_in == collateral.b_tokens
        && collateral.liquidity_tokens == 0
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Fee is expressed per mille and may not exceed the whole input
pub fn fee_in_range(fee_per_mille: u32) -> bool {
    fee_per_mille <= FEE_DENOMINATOR
}
