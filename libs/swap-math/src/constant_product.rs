use soroban_sdk::{Env, U256};
use swap_types::FEE_DENOMINATOR;

/// Output of a constant-product swap with a per-mille fee
///
/// amount_out = floor(amount_in * (1000 - fee) * reserve_out
///                    / (1000 * reserve_in + amount_in * (1000 - fee)))
///
/// The output is rounded down so rounding always favors the pool.
/// Returns None when either reserve is empty or the fee is out of range.
pub fn get_amount_out(
    env: &Env,
    amount_in: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_per_mille: u32,
) -> Option<u128> {
    if reserve_in == 0 || reserve_out == 0 || fee_per_mille > FEE_DENOMINATOR {
        return None;
    }

    let amount_in_with_fee =
        U256::from_u128(env, amount_in).mul(&U256::from_u32(env, FEE_DENOMINATOR - fee_per_mille));
    let numerator = amount_in_with_fee.mul(&U256::from_u128(env, reserve_out));
    let denominator = U256::from_u128(env, reserve_in)
        .mul(&U256::from_u32(env, FEE_DENOMINATOR))
        .add(&amount_in_with_fee);

    numerator.div(&denominator).to_u128()
}

/// Smallest input whose [`get_amount_out`] quote reaches `amount_out`
///
/// amount_in = ceil(1000 * reserve_in * amount_out
///                  / ((1000 - fee) * (reserve_out - amount_out)))
///
/// The input is rounded up. Returns None when the output cannot be bought:
/// it drains the reserve, the fee takes everything, or the pool is empty.
pub fn get_amount_in(
    env: &Env,
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
    fee_per_mille: u32,
) -> Option<u128> {
    if reserve_in == 0
        || reserve_out == 0
        || amount_out >= reserve_out
        || fee_per_mille >= FEE_DENOMINATOR
    {
        return None;
    }

    let numerator = U256::from_u128(env, reserve_in)
        .mul(&U256::from_u32(env, FEE_DENOMINATOR))
        .mul(&U256::from_u128(env, amount_out));
    let denominator = U256::from_u32(env, FEE_DENOMINATOR - fee_per_mille)
        .mul(&U256::from_u128(env, reserve_out - amount_out));

    let quotient = numerator.div(&denominator).to_u128()?;
    if numerator.rem_euclid(&denominator) > U256::from_u32(env, 0) {
        quotient.checked_add(1)
    } else {
        Some(quotient)
    }
}
