use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::instructions::sync_unlocks::advance_unlocks;
use crate::state::VestingState;
use crate::utils::fees::{self, FeeCollection};
use crate::utils::{access, guard};

pub fn collect_fees(ctx: Context<CollectFees>) -> Result<FeeCollection> {
    let vesting_state_ai = ctx.accounts.vesting_state.to_account_info();
    let vesting_state_bump = ctx.accounts.vesting_state.bump;
    let collector = ctx.accounts.fee_collector.key();

    let st = &mut ctx.accounts.vesting_state;
    access::require_fee_collector(st, &collector)?;
    guard::enter(st)?;

    let now = Clock::get()?.unix_timestamp;
    advance_unlocks(st, now)?;

    require_keys_eq!(
        ctx.accounts.destination.mint,
        st.mint,
        VestingError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.destination.owner,
        collector,
        VestingError::InvalidTokenAccount
    );

    let collection = fees::compute_fee_collection(
        st.total_allocation,
        st.initial_fee_percentage,
        &st.cumulative_percentages,
        &st.extra_fees,
        st.passed_unlocks_count,
        st.collected_unlocks_count,
        st.collected_extra_fees,
    )?;
    let total = collection.total()?;
    require!(
        ctx.accounts.vault.amount >= total,
        VestingError::InsufficientVaultBalance
    );

    st.collected_unlocks_count = st.passed_unlocks_count;
    st.collected_extra_fees = st
        .collected_extra_fees
        .checked_add(collection.extra_fee)
        .ok_or(VestingError::MathOverflow)?;

    if total > 0 {
        let signer_seeds: &[&[&[u8]]] = &[&[VESTING_STATE_SEED, &[vesting_state_bump]]];
        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.vault.to_account_info(),
                    to: ctx.accounts.destination.to_account_info(),
                    authority: vesting_state_ai,
                },
                signer_seeds,
            ),
            total,
        )?;
    }

    guard::exit(st);

    emit!(FeesCollected {
        fee_collector: collector,
        unlock_index: collection.unlock_index,
        base_fee: collection.base_fee,
        extra_fee: collection.extra_fee,
    });

    Ok(collection)
}

#[derive(Accounts)]
pub struct CollectFees<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Box<Account<'info, VestingState>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub destination: Account<'info, TokenAccount>,

    pub fee_collector: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct FeesCollected {
    pub fee_collector: Pubkey,
    pub unlock_index: u16,
    pub base_fee: u64,
    pub extra_fee: u64,
}
