use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::VestingState;
use crate::utils::access;

pub fn fund_vault(ctx: Context<FundVault>, amount: u64) -> Result<()> {
    require!(amount > 0, VestingError::InvalidConfig);

    let st = &ctx.accounts.vesting_state;
    access::require_owner(st, &ctx.accounts.owner.key())?;
    require!(st.total_allocation > 0, VestingError::InvalidConfig);

    require_keys_eq!(ctx.accounts.vault.mint, st.mint, VestingError::InvalidTokenMint);
    require_keys_eq!(ctx.accounts.owner_token_account.mint, st.mint, VestingError::InvalidTokenMint);
    require_keys_eq!(
        ctx.accounts.owner_token_account.owner,
        ctx.accounts.owner.key(),
        VestingError::InvalidTokenAccount
    );

    // Over-deposit protection: the vault never needs more than the pool.
    let post = (ctx.accounts.vault.amount as u128)
        .checked_add(amount as u128)
        .ok_or(VestingError::MathOverflow)?;
    require!(post <= st.total_allocation as u128, VestingError::OverDeposit);

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.owner_token_account.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
                authority: ctx.accounts.owner.to_account_info(),
            },
        ),
        amount,
    )?;

    ctx.accounts.vault.reload()?;

    emit!(VaultFunded {
        owner: st.owner,
        amount,
        vault_balance: ctx.accounts.vault.amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct FundVault<'info> {
    #[account(seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Box<Account<'info, VestingState>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub owner_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct VaultFunded {
    pub owner: Pubkey,
    pub amount: u64,
    pub vault_balance: u64,
}
