use anchor_lang::prelude::*;

use crate::constants::VESTING_STATE_SEED;
use crate::state::VestingState;
use crate::utils::{fees, sync};

pub fn sync_unlocks(ctx: Context<SyncUnlocks>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    advance_unlocks(&mut ctx.accounts.vesting_state, now)?;
    Ok(())
}

/// Advances `passed_unlocks_count` to `now` and carries the extra-fee ledger
/// through the newly reached periods. Every entry point that depends on the
/// unlocked amount calls this first.
///
/// Returns whether the pointer moved; `UnlocksSynced` is emitted only then.
pub fn advance_unlocks(st: &mut VestingState, now: i64) -> Result<bool> {
    let previous = st.passed_unlocks_count;
    let passed = sync::passed_unlocks(
        now,
        st.start_time,
        &st.cumulative_time_offsets,
        previous,
    )?;
    if passed == previous {
        return Ok(false);
    }

    fees::carry_extra_fees(
        &mut st.extra_fees,
        &st.cumulative_percentages,
        previous,
        passed,
    )?;
    st.passed_unlocks_count = passed;

    msg!("unlocks passed: {} -> {}", previous, passed);
    emit!(UnlocksSynced {
        previous_unlocks_count: previous,
        passed_unlocks_count: passed,
    });
    Ok(true)
}

#[derive(Accounts)]
pub struct SyncUnlocks<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Box<Account<'info, VestingState>>,
}

#[event]
pub struct UnlocksSynced {
    pub previous_unlocks_count: u16,
    pub passed_unlocks_count: u16,
}
