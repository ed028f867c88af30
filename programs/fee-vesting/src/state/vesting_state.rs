use anchor_lang::prelude::*;

/// Global ledger PDA: schedule, unlock counters and the extra-fee table.
#[account]
#[derive(Debug)]
pub struct VestingState {
    /// Authority allowed to whitelist, fund and rotate the fee collector.
    pub owner: Pubkey,
    /// Designated fee collector.
    pub fee_collector: Pubkey,
    /// Token mint held by the vault.
    pub mint: Pubkey,
    /// Unix seconds before which no unlock can pass.
    pub start_time: i64,
    /// Baseline fee applied to every unlocked tranche.
    pub initial_fee_percentage: u32,
    /// Schedule periods elapsed as of the last sync.
    pub passed_unlocks_count: u16,
    /// Periods through which the fee collector has been paid.
    pub collected_unlocks_count: u16,
    /// Sum of every whitelisted allocation.
    pub total_allocation: u64,
    pub whitelisted_count: u32,
    /// Extra fees already paid out to the fee collector.
    pub collected_extra_fees: u64,
    /// Set while a claim or fee collection is transferring tokens.
    pub locked: bool,
    pub bump: u8,
    /// Share of the pool unlocked by period `i`, scaled to `PERCENTAGE_DENOMINATOR`.
    pub cumulative_percentages: Vec<u32>,
    /// Seconds from `start_time` at which period `i` becomes claimable.
    pub cumulative_time_offsets: Vec<u64>,
    /// Cumulative extra fee owed through period `i`.
    pub extra_fees: Vec<u64>,
}

impl VestingState {
    pub const BASE_SIZE: usize =
        32 + // owner
        32 + // fee_collector
        32 + // mint
        8 +  // start_time
        4 +  // initial_fee_percentage
        2 +  // passed_unlocks_count
        2 +  // collected_unlocks_count
        8 +  // total_allocation
        4 +  // whitelisted_count
        8 +  // collected_extra_fees
        1 +  // locked
        1;   // bump

    /// Discriminator + fixed fields + the three per-period vecs.
    pub const fn space(unlocks_count: usize) -> usize {
        8 + Self::BASE_SIZE
            + (4 + 4 * unlocks_count) // cumulative_percentages
            + (4 + 8 * unlocks_count) // cumulative_time_offsets
            + (4 + 8 * unlocks_count) // extra_fees
    }

    pub fn unlocks_count(&self) -> usize {
        self.cumulative_percentages.len()
    }
}
