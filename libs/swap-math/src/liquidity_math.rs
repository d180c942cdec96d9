use crate::mul_div;
use soroban_sdk::Env;

/// Shares minted for adding `amount` to a reserve of `reserve`
/// when `total_shares` are outstanding (rounds down)
pub fn shares_for_amount(env: &Env, amount: u128, total_shares: u128, reserve: u128) -> Option<u128> {
    mul_div(env, amount, total_shares, reserve)
}

/// Amount of the other token that must accompany `amount` to keep the
/// reserve ratio. Rounded down and then bumped by one so the provider
/// never underpays.
pub fn paired_amount(env: &Env, amount: u128, reserve_in: u128, reserve_other: u128) -> Option<u128> {
    mul_div(env, amount, reserve_other, reserve_in)?.checked_add(1)
}

/// Pro-rata share of `reserve` released by burning `shares` (rounds down)
pub fn reclaim_amount(env: &Env, shares: u128, reserve: u128, total_shares: u128) -> Option<u128> {
    mul_div(env, reserve, shares, total_shares)
}
