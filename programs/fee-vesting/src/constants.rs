//! Program-wide constants.

/// Fixed-point denominator for every percentage (1_000_000 = 100%).
pub const PERCENTAGE_DENOMINATOR: u32 = 1_000_000;

/// Max number of unlock periods in a schedule.
pub const MAX_UNLOCKS_COUNT: usize = 200;

/// Max accounts whitelisted per `whitelist` call.
pub const MAX_WHITELIST_BATCH: usize = 20;

pub const VESTING_STATE_SEED: &[u8] = b"vesting_state";
pub const VAULT_SEED: &[u8] = b"vault";
pub const USER_RECORD_SEED: &[u8] = b"user_record";
