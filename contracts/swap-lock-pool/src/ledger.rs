use crate::events;
use crate::storage::{get_balance, get_config, set_balance};
use soroban_sdk::{log, token, Address, Env};
use swap_types::PoolError;

/// Convert a ledger amount to the backing token's signed amount
fn token_amount(amount: u128) -> Result<i128, PoolError> {
    i128::try_from(amount).map_err(|_| PoolError::InvalidAmount)
}

/// Pull `amount` of `token` from `account` into the pool's custody and
/// credit the account's ledger entry.
///
/// The account must have approved the pool as spender beforehand.
pub fn deposit(env: &Env, account: &Address, token: &Address, amount: u128) -> Result<(), PoolError> {
    let config = get_config(env)?;
    let field = config.deposit_token_for(token)?;
    if amount == 0 {
        return Err(PoolError::InvalidAmount);
    }
    let value = token_amount(amount)?;

    let pool = env.current_contract_address();
    let token_client = token::Client::new(env, token);
    let allowance = token_client.allowance(account, &pool);
    if allowance < value {
        log!(env, "insufficient allowance", token_client.symbol(), value, allowance);
        return Err(PoolError::InsufficientAllowance);
    }
    let available = token_client.balance(account);
    if available < value {
        log!(env, "insufficient balance", token_client.symbol(), value, available);
        return Err(PoolError::InsufficientBalance);
    }

    let mut balance = get_balance(env, account);
    balance.credit(field, amount)?;

    token_client.transfer_from(&pool, account, &pool, &value);
    set_balance(env, account, &balance);

    events::deposit(env, account, token, amount);
    Ok(())
}

/// Debit the account's ledger entry and send `amount` of `token` back.
///
/// `unwrap_to_native` is carried in the withdraw event. Stellar asset
/// contracts already settle in the native asset, so no unwrap call follows.
pub fn withdraw(
    env: &Env,
    account: &Address,
    token: &Address,
    amount: u128,
    unwrap_to_native: bool,
) -> Result<(), PoolError> {
    let config = get_config(env)?;
    let field = config.deposit_token_for(token)?;
    if amount == 0 {
        return Err(PoolError::InvalidAmount);
    }
    let value = token_amount(amount)?;

    let mut balance = get_balance(env, account);
    balance.debit(field, amount)?;
    set_balance(env, account, &balance);

    token::Client::new(env, token).transfer(&env.current_contract_address(), account, &value);

    events::withdraw(env, account, token, amount, unwrap_to_native);
    Ok(())
}
