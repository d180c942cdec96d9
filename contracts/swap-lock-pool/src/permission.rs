use soroban_sdk::{log, Address, Env, String};
use swap_types::{PoolConfig, PoolError, SwapOperation};

/// Check `caller` against the pool's permission policy for `operation`.
/// Must run before any state is touched.
pub fn require_permission(
    env: &Env,
    config: &PoolConfig,
    caller: &Address,
    operation: SwapOperation,
) -> Result<(), PoolError> {
    if config.permission.allows(caller) {
        return Ok(());
    }

    log!(
        env,
        "permission denied",
        caller.clone(),
        String::from_str(env, operation.tag())
    );
    Err(operation.unauthorized())
}
