use soroban_sdk::contracterror;

/// Errors returned by the swap-lock pool.
///
/// Codes are part of the contract interface and must stay stable.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    /// Fee outside [0, 1000] per mille
    InvalidFee = 3,
    IdenticalTokens = 4,
    /// Token is neither token A nor token B of the pool
    UnknownToken = 5,
    /// Zero amount, or an amount the backing token cannot represent
    InvalidAmount = 6,
    InsufficientBalance = 7,
    InsufficientAllowance = 8,
    /// Slippage guard: quoted output below the caller's minimum
    InsufficientOutput = 9,
    NoLiquidity = 10,
    ZeroMintedLiquidity = 11,
    InsufficientShares = 12,
    LockNotFound = 13,
    /// An older lock in the same direction has not been settled yet
    LockOutOfOrder = 14,
    LocksOutstanding = 15,
    TooManyLocks = 16,
    /// Caller lacks the "lock swap" permission
    UnauthorizedLockSwap = 17,
    /// Caller lacks the "instant swap" permission
    UnauthorizedInstantSwap = 18,
    /// Internal accounting defect. Never caused by user input.
    InvariantViolation = 19,
}
