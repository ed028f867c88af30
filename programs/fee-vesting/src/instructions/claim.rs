use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{USER_RECORD_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::instructions::sync_unlocks::advance_unlocks;
use crate::state::{UserRecord, VestingState};
use crate::utils::claim::{self, ClaimResult};
use crate::utils::{access, guard};

pub fn claim(ctx: Context<Claim>, amount: u64) -> Result<ClaimResult> {
    // Avoid borrow checker conflicts: capture AccountInfos/keys before taking mutable borrows.
    let vesting_state_ai = ctx.accounts.vesting_state.to_account_info();
    let vesting_state_bump = ctx.accounts.vesting_state.bump;
    let claimant = ctx.accounts.claimant.key();

    access::require_whitelisted(&ctx.accounts.user_record, &claimant)?;

    let st = &mut ctx.accounts.vesting_state;
    guard::enter(st)?;

    let now = Clock::get()?.unix_timestamp;
    advance_unlocks(st, now)?;

    require_keys_eq!(
        ctx.accounts.claimant_token_account.mint,
        st.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.claimant_token_account.owner,
        claimant,
        VestingError::InvalidTokenAccount
    );

    // Work on copies; commit only once the whole claim has succeeded.
    let mut record: UserRecord = (*ctx.accounts.user_record).clone();
    let mut extra_fees = st.extra_fees.clone();
    let result = claim::process_claim(
        &mut record,
        &st.cumulative_percentages,
        &mut extra_fees,
        st.passed_unlocks_count,
        amount,
    )?;

    require!(
        ctx.accounts.vault.amount >= result.paid,
        VestingError::InsufficientVaultBalance
    );

    ctx.accounts.user_record.set_inner(record);
    st.extra_fees = extra_fees;

    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_STATE_SEED, &[vesting_state_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault.to_account_info(),
                to: ctx.accounts.claimant_token_account.to_account_info(),
                authority: vesting_state_ai,
            },
            signer_seeds,
        ),
        result.paid,
    )?;

    guard::exit(st);

    emit!(Claimed {
        wallet: claimant,
        unlock_index: result.unlock_index,
        fee_increase: result.fee_increase,
        paid: result.paid,
        unlocked_gross: result.unlocked_gross,
    });

    Ok(result)
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Box<Account<'info, VestingState>>,

    #[account(
        mut,
        seeds = [USER_RECORD_SEED, vesting_state.key().as_ref(), claimant.key().as_ref()],
        bump = user_record.bump,
    )]
    pub user_record: Account<'info, UserRecord>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub claimant_token_account: Account<'info, TokenAccount>,

    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct Claimed {
    pub wallet: Pubkey,
    pub unlock_index: u16,
    pub fee_increase: u32,
    pub paid: u64,
    pub unlocked_gross: u64,
}
