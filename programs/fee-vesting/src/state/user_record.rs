use anchor_lang::prelude::*;

/// Per-account claim progress PDA.
///
/// Derivation: ["user_record", vesting_state, wallet]. Created once at
/// whitelisting and mutated only by the owner's own claims.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct UserRecord {
    pub wallet: Pubkey,
    /// Total entitlement, fixed at whitelisting.
    pub allocation: u64,
    /// Periods through which unlocked tokens have been credited.
    pub claimed_unlocks_count: u16,
    /// Fee applied to the most recently unlocked tranche.
    pub fee_percentage_current_unlock: u32,
    /// Fee committed for the next tranche to unlock.
    pub fee_percentage_next_unlock: u32,
    /// Net tokens credited after fee deduction.
    pub total_unlocked: u64,
    /// Tokens paid out.
    pub total_claimed: u64,
    pub bump: u8,
}

impl UserRecord {
    pub const SIZE: usize =
        32 + // wallet
        8 +  // allocation
        2 +  // claimed_unlocks_count
        4 +  // fee_percentage_current_unlock
        4 +  // fee_percentage_next_unlock
        8 +  // total_unlocked
        8 +  // total_claimed
        1;   // bump

    pub const fn space() -> usize {
        8 + Self::SIZE
    }

    pub fn new(wallet: Pubkey, allocation: u64, initial_fee_percentage: u32, bump: u8) -> Self {
        Self {
            wallet,
            allocation,
            claimed_unlocks_count: 0,
            fee_percentage_current_unlock: initial_fee_percentage,
            fee_percentage_next_unlock: initial_fee_percentage,
            total_unlocked: 0,
            total_claimed: 0,
            bump,
        }
    }

    /// Unlocked tokens not yet paid out.
    pub fn available(&self) -> u64 {
        self.total_unlocked.saturating_sub(self.total_claimed)
    }
}
