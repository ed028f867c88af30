use anchor_lang::prelude::*;

/// Custom error codes for the fee-vesting program.
#[error_code]
pub enum VestingError {
    #[msg("Invalid unlock schedule")]
    InvalidSchedule,

    #[msg("Access denied: caller does not hold the required role")]
    AccessDenied,

    #[msg("Invalid public key")]
    InvalidPubkey,

    #[msg("Invalid configuration")]
    InvalidConfig,

    #[msg("Vesting has not started yet")]
    TooEarly,

    #[msg("No unlock period has passed yet")]
    NothingUnlockedYet,

    #[msg("Requested amount exceeds allocation")]
    AmountExceedsAllocation,

    #[msg("Nothing to claim")]
    NothingToClaim,

    #[msg("No fees to collect")]
    NoFeesToCollect,

    #[msg("Account is already whitelisted")]
    AlreadyWhitelisted,

    #[msg("Whitelisting is closed once the vault is funded")]
    WhitelistingClosed,

    #[msg("Input arrays differ in length")]
    ArrayLengthMismatch,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Invalid allocation (must be > 0)")]
    InvalidAllocation,

    #[msg("User record address does not match the expected PDA")]
    InvalidUserRecord,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Insufficient vault balance")]
    InsufficientVaultBalance,

    #[msg("Deposit would exceed total allocation")]
    OverDeposit,

    #[msg("Reentrant call rejected")]
    ReentrantCall,

    #[msg("Math overflow")]
    MathOverflow,
}
