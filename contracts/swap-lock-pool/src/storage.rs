use soroban_sdk::{contracttype, Address, Env};
use swap_types::{LockRegistry, PoolConfig, PoolError, TokenBalance};

// ============================================================================
// SOROBAN RESOURCE LIMITS - Constraints shaping the pool's storage layout:
// ============================================================================
// - Ledger entry size: 128 KiB max per entry
// - Read entries per tx: 100 entries / 200 KB
// - Write entries per tx: 50 entries / 132 KB
//
// Storage design considerations:
// - Config, lock registry and locked collateral live in Instance storage.
//   They are touched by nearly every call and stay small.
// - The registry holds at most MAX_OUTSTANDING_LOCKS locks (~100 bytes each),
//   which keeps the instance entry far below the entry size limit.
// - Each account ledger entry (~60 bytes) is a separate Persistent entry.
// - Empty ledger entries are removed rather than stored as zeros.
//
// Operation footprints:
// - A swap or lock settlement writes at most two ledger entries (pool and
//   account) plus the instance entry.
// ============================================================================

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool configuration (Instance storage)
    Config,
    /// Outstanding locks and the lock id counter (Instance storage)
    Registry,
    /// Collateral escrowed by outstanding locks (Instance storage)
    Collateral,
    /// Ledger entry: account -> TokenBalance (Persistent storage)
    Balance(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<PoolConfig, PoolError> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(PoolError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Lock Registry ===

pub fn get_registry(env: &Env) -> LockRegistry {
    env.storage()
        .instance()
        .get(&DataKey::Registry)
        .unwrap_or_else(|| LockRegistry::new(env))
}

pub fn set_registry(env: &Env, registry: &LockRegistry) {
    env.storage().instance().set(&DataKey::Registry, registry);
    extend_instance_ttl(env);
}

// === Locked Collateral ===

pub fn get_collateral(env: &Env) -> TokenBalance {
    env.storage()
        .instance()
        .get(&DataKey::Collateral)
        .unwrap_or_default()
}

pub fn set_collateral(env: &Env, collateral: &TokenBalance) {
    if collateral.is_empty() {
        env.storage().instance().remove(&DataKey::Collateral);
    } else {
        env.storage().instance().set(&DataKey::Collateral, collateral);
    }
    extend_instance_ttl(env);
}

// === Ledger ===

pub fn has_balance(env: &Env, account: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Balance(account.clone()))
}

pub fn get_balance(env: &Env, account: &Address) -> TokenBalance {
    let key = DataKey::Balance(account.clone());
    let balance: Option<TokenBalance> = env.storage().persistent().get(&key);
    if balance.is_some() {
        extend_persistent_ttl(env, &key);
    }
    balance.unwrap_or_default()
}

pub fn set_balance(env: &Env, account: &Address, balance: &TokenBalance) {
    let key = DataKey::Balance(account.clone());
    if balance.is_empty() {
        // Remove empty entry
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, balance);
        extend_persistent_ttl(env, &key);
    }
}

/// The pool's own ledger entry, whose fields are the actual reserves
pub fn get_pool_balance(env: &Env) -> TokenBalance {
    get_balance(env, &env.current_contract_address())
}

pub fn set_pool_balance(env: &Env, pool: &TokenBalance) {
    set_balance(env, &env.current_contract_address(), pool);
}
