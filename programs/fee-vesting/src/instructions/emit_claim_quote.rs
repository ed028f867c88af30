use anchor_lang::prelude::*;

use crate::constants::{USER_RECORD_SEED, VESTING_STATE_SEED};
use crate::state::{UserRecord, VestingState};
use crate::utils::{claim, sync};

/// Emits what a claim by `wallet` would unlock right now. Read-only: the
/// synced unlock count is computed but not stored.
pub fn emit_claim_quote(ctx: Context<EmitClaimQuote>, wallet: Pubkey) -> Result<()> {
    let st = &ctx.accounts.vesting_state;
    let now = Clock::get()?.unix_timestamp;
    let passed = sync::passed_unlocks(
        now,
        st.start_time,
        &st.cumulative_time_offsets,
        st.passed_unlocks_count,
    )?;

    let record = &ctx.accounts.user_record;
    let quote = claim::quote_claim(record, &st.cumulative_percentages, passed)?;

    emit!(ClaimQuote {
        wallet,
        passed_unlocks_count: passed,
        unlocked_gross: quote.unlocked_gross,
        unlocked_fee: quote.unlocked_fee,
        unlocked_net: quote.unlocked_net,
        claimable: quote.claimable,
        total_claimed: record.total_claimed,
        fee_percentage_next_unlock: record.fee_percentage_next_unlock,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(wallet: Pubkey)]
pub struct EmitClaimQuote<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Box<Account<'info, VestingState>>,

    #[account(
        seeds = [USER_RECORD_SEED, vesting_state.key().as_ref(), wallet.as_ref()],
        bump = user_record.bump,
    )]
    pub user_record: Account<'info, UserRecord>,
}

#[event]
pub struct ClaimQuote {
    pub wallet: Pubkey,
    pub passed_unlocks_count: u16,
    pub unlocked_gross: u64,
    pub unlocked_fee: u64,
    pub unlocked_net: u64,
    pub claimable: u64,
    pub total_claimed: u64,
    pub fee_percentage_next_unlock: u32,
}
