#![no_std]

#[cfg(test)]
extern crate std;

mod events;
mod invariants;
mod ledger;
mod liquidity;
mod locks;
mod permission;
#[cfg(test)]
mod scenarios;
mod storage;
mod swap;
mod virtual_state;

use invariants::{ensure, fee_in_range, lock_sums_consistent, virtual_product_covers_actual};
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};
use storage::{
    get_balance, get_collateral, get_config, get_pool_balance, get_registry, has_balance,
    has_config, set_config,
};
use swap_types::{
    Lock, LockId, Permission, PoolConfig, PoolError, PoolState, TokenBalance, VirtualState,
};

#[contract]
pub struct SwapLockPool;

#[contractimpl]
impl SwapLockPool {
    /// Initialize the pool over `token_a` / `token_b`
    ///
    /// # Arguments
    /// * `fee_per_mille` - Swap fee in parts per thousand, at most 1000
    /// * `permission` - Who may acquire, execute and cancel locks or swap instantly
    pub fn initialize(
        env: Env,
        token_a: Address,
        token_b: Address,
        fee_per_mille: u32,
        permission: Permission,
    ) -> Result<(), PoolError> {
        if has_config(&env) {
            return Err(PoolError::AlreadyInitialized);
        }
        if token_a == token_b {
            return Err(PoolError::IdenticalTokens);
        }
        if !fee_in_range(fee_per_mille) {
            return Err(PoolError::InvalidFee);
        }

        let config = PoolConfig {
            token_a,
            token_b,
            fee_per_mille,
            permission,
        };
        set_config(&env, &config);

        events::initialized(&env, &config);
        Ok(())
    }

    // === Deposit Ledger ===

    /// Move `amount` of `token` from `account` into the pool's custody.
    /// Requires a prior allowance with the pool as spender.
    pub fn deposit(env: Env, account: Address, token: Address, amount: u128) -> Result<(), PoolError> {
        account.require_auth();
        ledger::deposit(&env, &account, &token, amount)
    }

    /// Send `amount` of `token` from the account's ledger entry back to it
    pub fn withdraw(
        env: Env,
        account: Address,
        token: Address,
        amount: u128,
        unwrap_to_native: bool,
    ) -> Result<(), PoolError> {
        account.require_auth();
        ledger::withdraw(&env, &account, &token, amount, unwrap_to_native)
    }

    // === Liquidity ===

    /// Seed an empty pool from the provider's ledger entry
    ///
    /// # Returns
    /// Shares minted, equal to `amount_a`
    pub fn provide_initial_liquidity(
        env: Env,
        provider: Address,
        amount_a: u128,
        amount_b: u128,
    ) -> Result<u128, PoolError> {
        provider.require_auth();
        liquidity::provide_initial(&env, &provider, amount_a, amount_b)
    }

    /// Add `amount` of `token` plus the proportional amount of the other token
    ///
    /// # Returns
    /// Shares minted
    pub fn provide_liquidity(
        env: Env,
        provider: Address,
        token: Address,
        amount: u128,
    ) -> Result<u128, PoolError> {
        provider.require_auth();
        liquidity::provide(&env, &provider, &token, amount)
    }

    /// Burn `shares` for a pro-rata part of both reserves
    ///
    /// # Returns
    /// (amount_a, amount_b) credited to the provider
    pub fn reclaim_liquidity(
        env: Env,
        provider: Address,
        shares: u128,
    ) -> Result<(u128, u128), PoolError> {
        provider.require_auth();
        liquidity::reclaim(&env, &provider, shares)
    }

    // === Swaps ===

    /// Swap against the actual reserves in one step
    ///
    /// # Returns
    /// Amount of the other token credited to `caller`
    pub fn instant_swap(
        env: Env,
        caller: Address,
        token_in: Address,
        amount_in: u128,
        minimum_out: u128,
    ) -> Result<u128, PoolError> {
        caller.require_auth();
        swap::instant_swap(&env, &caller, &token_in, amount_in, minimum_out)
    }

    /// Reserve a swap at the current price, escrowing `amount_in`
    ///
    /// # Returns
    /// Id of the new lock
    pub fn acquire_swap_lock(
        env: Env,
        caller: Address,
        token_in: Address,
        amount_in: u128,
        minimum_out: u128,
    ) -> Result<LockId, PoolError> {
        caller.require_auth();
        locks::acquire(&env, &caller, &token_in, amount_in, minimum_out)
    }

    /// Settle a lock at its reserved price
    ///
    /// # Returns
    /// Amount credited to the lock owner
    pub fn execute_lock_swap(env: Env, caller: Address, lock_id: LockId) -> Result<u128, PoolError> {
        caller.require_auth();
        locks::execute(&env, &caller, lock_id)
    }

    /// Drop a lock and refund its collateral to the owner
    pub fn cancel_lock(env: Env, caller: Address, lock_id: LockId) -> Result<(), PoolError> {
        caller.require_auth();
        locks::cancel(&env, &caller, lock_id)
    }

    // === View Functions ===

    pub fn get_config(env: Env) -> Result<PoolConfig, PoolError> {
        get_config(&env)
    }

    pub fn token_a(env: Env) -> Result<Address, PoolError> {
        Ok(get_config(&env)?.token_a)
    }

    pub fn token_b(env: Env) -> Result<Address, PoolError> {
        Ok(get_config(&env)?.token_b)
    }

    pub fn fee_per_mille(env: Env) -> Result<u32, PoolError> {
        Ok(get_config(&env)?.fee_per_mille)
    }

    pub fn permission(env: Env) -> Result<Permission, PoolError> {
        Ok(get_config(&env)?.permission)
    }

    /// Ledger entry of `account`, all zeros if it has none
    pub fn get_balance(env: Env, account: Address) -> TokenBalance {
        get_balance(&env, &account)
    }

    /// Whether `account` has a stored ledger entry. Empty entries are never stored.
    pub fn has_ledger_entry(env: Env, account: Address) -> bool {
        has_balance(&env, &account)
    }

    /// Actual reserves and total shares
    pub fn pool_state(env: Env) -> PoolState {
        PoolState::from(&get_pool_balance(&env))
    }

    /// Collateral escrowed by outstanding locks
    pub fn locked_collateral(env: Env) -> TokenBalance {
        get_collateral(&env)
    }

    /// Reserves after replaying every outstanding lock in id order
    pub fn virtual_state(env: Env) -> Result<VirtualState, PoolError> {
        let registry = get_registry(&env);
        let replayed = virtual_state::replay(&env, &get_pool_balance(&env), &registry, None)?;

        let mut outstanding = Vec::new(&env);
        for (_, lock) in registry.locks.iter() {
            outstanding.push_back(lock);
        }

        Ok(VirtualState {
            reserve_a: replayed.reserve_a,
            reserve_b: replayed.reserve_b,
            locks: outstanding,
            lock_sums: registry.lock_sums,
            next_lock_id: registry.next_lock_id,
        })
    }

    pub fn get_lock(env: Env, lock_id: LockId) -> Option<Lock> {
        get_registry(&env).locks.get(lock_id)
    }

    pub fn next_lock_id(env: Env) -> LockId {
        get_registry(&env).next_lock_id
    }

    /// Output a lock acquired now for `amount_in` of `token_in` would reserve
    pub fn quote_swap(env: Env, token_in: Address, amount_in: u128) -> Result<u128, PoolError> {
        swap::quote_swap(&env, &token_in, amount_in)
    }

    /// Smallest `amount_in` of `token_in` that quotes at least `amount_out`
    pub fn quote_exact_output(
        env: Env,
        token_in: Address,
        amount_out: u128,
    ) -> Result<u128, PoolError> {
        swap::quote_exact_output(&env, &token_in, amount_out)
    }

    /// Re-check the lock accounting and virtual product against stored state
    pub fn verify_invariants(env: Env) -> Result<(), PoolError> {
        let config = get_config(&env)?;
        ensure(fee_in_range(config.fee_per_mille))?;

        let pool = get_pool_balance(&env);
        let registry = get_registry(&env);
        let replayed = virtual_state::replay(&env, &pool, &registry, None)?;
        ensure(lock_sums_consistent(
            &registry.lock_sums,
            &replayed.sums,
            &get_collateral(&env),
        ))?;
        ensure(virtual_product_covers_actual(&env, &pool, &replayed))
    }
}
