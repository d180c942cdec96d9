use crate::PoolError;
use soroban_sdk::contracttype;

/// Field selector for a [`TokenBalance`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DepositToken {
    A,
    B,
    Liquidity,
}

/// Ledger entry held by the pool for one account
///
/// The entry stored under the pool's own address is the pool state:
/// its token fields are the reserves and its liquidity field is the
/// total share supply.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenBalance {
    pub a_tokens: u128,
    pub b_tokens: u128,
    pub liquidity_tokens: u128,
}

impl TokenBalance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount_of(&self, token: DepositToken) -> u128 {
        match token {
            DepositToken::A => self.a_tokens,
            DepositToken::B => self.b_tokens,
            DepositToken::Liquidity => self.liquidity_tokens,
        }
    }

    fn amount_mut(&mut self, token: DepositToken) -> &mut u128 {
        match token {
            DepositToken::A => &mut self.a_tokens,
            DepositToken::B => &mut self.b_tokens,
            DepositToken::Liquidity => &mut self.liquidity_tokens,
        }
    }

    /// Add `amount` to the selected field
    pub fn credit(&mut self, token: DepositToken, amount: u128) -> Result<(), PoolError> {
        let field = self.amount_mut(token);
        *field = field
            .checked_add(amount)
            .ok_or(PoolError::InvariantViolation)?;
        Ok(())
    }

    /// Remove `amount` from the selected field
    ///
    /// Fails with `InsufficientShares` for the liquidity field and
    /// `InsufficientBalance` for the token fields.
    pub fn debit(&mut self, token: DepositToken, amount: u128) -> Result<(), PoolError> {
        let field = self.amount_mut(token);
        *field = field.checked_sub(amount).ok_or(match token {
            DepositToken::Liquidity => PoolError::InsufficientShares,
            _ => PoolError::InsufficientBalance,
        })?;
        Ok(())
    }

    /// True when the entry holds nothing and should be dropped from storage
    pub fn is_empty(&self) -> bool {
        self.a_tokens == 0 && self.b_tokens == 0 && self.liquidity_tokens == 0
    }
}

/// Move `amount` of one field from `from` to `to`.
/// On failure neither entry is changed.
pub fn move_tokens(
    from: &mut TokenBalance,
    to: &mut TokenBalance,
    token: DepositToken,
    amount: u128,
) -> Result<(), PoolError> {
    let mut credited = to.clone();
    credited.credit(token, amount)?;
    from.debit(token, amount)?;
    *to = credited;
    Ok(())
}
