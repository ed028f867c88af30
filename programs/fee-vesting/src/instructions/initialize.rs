use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{
    MAX_UNLOCKS_COUNT, PERCENTAGE_DENOMINATOR, VAULT_SEED, VESTING_STATE_SEED,
};
use crate::error::VestingError;
use crate::state::VestingState;
use crate::utils::schedule;

pub fn initialize(
    ctx: Context<Initialize>,
    percent_diffs: Vec<u32>,
    time_diffs: Vec<u64>,
    start_time: i64,
    initial_fee_percentage: u32,
    fee_collector: Pubkey,
) -> Result<()> {
    let schedule = schedule::build_schedule(&percent_diffs, &time_diffs)?;

    require!(start_time > 0, VestingError::InvalidConfig);
    require!(
        initial_fee_percentage <= PERCENTAGE_DENOMINATOR,
        VestingError::InvalidConfig
    );
    require!(fee_collector != Pubkey::default(), VestingError::InvalidPubkey);
    require!(
        fee_collector != ctx.accounts.vesting_state.key(),
        VestingError::InvalidConfig
    );

    let unlocks_count = schedule.cumulative_percentages.len();
    let st = &mut ctx.accounts.vesting_state;
    st.owner = ctx.accounts.owner.key();
    st.fee_collector = fee_collector;
    st.mint = ctx.accounts.mint.key();
    st.start_time = start_time;
    st.initial_fee_percentage = initial_fee_percentage;
    st.passed_unlocks_count = 0;
    st.collected_unlocks_count = 0;
    st.total_allocation = 0;
    st.whitelisted_count = 0;
    st.collected_extra_fees = 0;
    st.locked = false;
    st.bump = ctx.bumps.vesting_state;
    st.cumulative_percentages = schedule.cumulative_percentages;
    st.cumulative_time_offsets = schedule.cumulative_time_offsets;
    st.extra_fees = vec![0; unlocks_count];

    msg!(
        "fee-vesting initialized: {} unlocks, start {}",
        unlocks_count,
        start_time
    );

    emit!(VestingInitialized {
        owner: st.owner,
        fee_collector: st.fee_collector,
        mint: st.mint,
        start_time,
        initial_fee_percentage,
        unlocks_count: unlocks_count as u16,
    });

    Ok(())
}

#[derive(Accounts)]
#[instruction(percent_diffs: Vec<u32>)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = owner,
        space = VestingState::space(percent_diffs.len().min(MAX_UNLOCKS_COUNT)),
        seeds = [VESTING_STATE_SEED],
        bump
    )]
    pub vesting_state: Box<Account<'info, VestingState>>,

    #[account(
        init,
        payer = owner,
        token::mint = mint,
        token::authority = vesting_state,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VestingInitialized {
    pub owner: Pubkey,
    pub fee_collector: Pubkey,
    pub mint: Pubkey,
    pub start_time: i64,
    pub initial_fee_percentage: u32,
    pub unlocks_count: u16,
}
