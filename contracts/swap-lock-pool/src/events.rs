use soroban_sdk::{Address, Env, Symbol};
use swap_types::{Direction, Lock, LockId, PoolConfig};

pub fn initialized(env: &Env, config: &PoolConfig) {
    env.events().publish(
        (Symbol::new(env, "initialized"),),
        (
            config.token_a.clone(),
            config.token_b.clone(),
            config.fee_per_mille,
        ),
    );
}

pub fn deposit(env: &Env, account: &Address, token: &Address, amount: u128) {
    env.events().publish(
        (Symbol::new(env, "deposit"), account.clone(), token.clone()),
        amount,
    );
}

pub fn withdraw(env: &Env, account: &Address, token: &Address, amount: u128, unwrap_to_native: bool) {
    env.events().publish(
        (Symbol::new(env, "withdraw"), account.clone(), token.clone()),
        (amount, unwrap_to_native),
    );
}

pub fn liquidity_added(env: &Env, provider: &Address, amount_a: u128, amount_b: u128, shares: u128) {
    env.events().publish(
        (Symbol::new(env, "liquidity_added"), provider.clone()),
        (amount_a, amount_b, shares),
    );
}

pub fn liquidity_removed(env: &Env, provider: &Address, amount_a: u128, amount_b: u128, shares: u128) {
    env.events().publish(
        (Symbol::new(env, "liquidity_removed"), provider.clone()),
        (amount_a, amount_b, shares),
    );
}

pub fn swap(env: &Env, caller: &Address, direction: Direction, amount_in: u128, amount_out: u128) {
    env.events().publish(
        (Symbol::new(env, "swap"), caller.clone(), direction),
        (amount_in, amount_out),
    );
}

pub fn lock_acquired(env: &Env, lock: &Lock) {
    env.events().publish(
        (Symbol::new(env, "lock_acquired"), lock.id, lock.owner.clone()),
        (lock.direction, lock.amount_in, lock.amount_out),
    );
}

pub fn lock_executed(env: &Env, caller: &Address, lock: &Lock) {
    env.events().publish(
        (Symbol::new(env, "lock_executed"), lock.id, caller.clone()),
        (lock.amount_in, lock.amount_out),
    );
}

pub fn lock_cancelled(env: &Env, caller: &Address, lock_id: LockId, amount_in: u128) {
    env.events().publish(
        (Symbol::new(env, "lock_cancelled"), lock_id, caller.clone()),
        amount_in,
    );
}
