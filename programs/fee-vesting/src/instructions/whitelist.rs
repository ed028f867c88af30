use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Allocate, Assign, CreateAccount, Transfer};
use anchor_spl::token::TokenAccount;

use crate::constants::{USER_RECORD_SEED, VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::{UserRecord, VestingState};
use crate::utils::access;
use crate::utils::whitelist::validate_batch;

/// Creates one `UserRecord` per (wallet, allocation) pair. The record PDAs are
/// passed as remaining accounts, writable, in input order.
pub fn whitelist<'info>(
    ctx: Context<'_, '_, 'info, 'info, Whitelist<'info>>,
    wallets: Vec<Pubkey>,
    allocations: Vec<u64>,
) -> Result<()> {
    let state_key = ctx.accounts.vesting_state.key();
    let st = &mut ctx.accounts.vesting_state;
    access::require_owner(st, &ctx.accounts.owner.key())?;
    let added = validate_batch(
        &wallets,
        &allocations,
        ctx.remaining_accounts.len(),
        ctx.accounts.vault.amount,
    )?;

    for (i, (wallet, allocation)) in wallets.iter().zip(allocations.iter()).enumerate() {
        let record_ai = &ctx.remaining_accounts[i];
        let (expected, bump) = Pubkey::find_program_address(
            &[USER_RECORD_SEED, state_key.as_ref(), wallet.as_ref()],
            ctx.program_id,
        );
        require_keys_eq!(record_ai.key(), expected, VestingError::InvalidUserRecord);
        require!(record_ai.is_writable, VestingError::InvalidUserRecord);
        require!(
            record_ai.owner != ctx.program_id && record_ai.data_is_empty(),
            VestingError::AlreadyWhitelisted
        );

        let bump_seed = [bump];
        let signer_seeds: &[&[u8]] = &[
            USER_RECORD_SEED,
            state_key.as_ref(),
            wallet.as_ref(),
            &bump_seed,
        ];
        create_record_account(
            &ctx.accounts.owner,
            record_ai,
            &ctx.accounts.system_program,
            ctx.program_id,
            signer_seeds,
        )?;

        let record = UserRecord::new(*wallet, *allocation, st.initial_fee_percentage, bump);
        let mut data = record_ai.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data[..];
        record.try_serialize(&mut writer)?;
    }

    st.total_allocation = st
        .total_allocation
        .checked_add(added)
        .ok_or(VestingError::MathOverflow)?;
    st.whitelisted_count = st
        .whitelisted_count
        .checked_add(wallets.len() as u32)
        .ok_or(VestingError::MathOverflow)?;

    emit!(AccountsWhitelisted {
        count_added: wallets.len() as u32,
        allocation_added: added,
        total_allocation: st.total_allocation,
        whitelisted_count: st.whitelisted_count,
    });

    Ok(())
}

/// Allocates a rent-exempt `UserRecord` PDA, tolerating lamports sent to the
/// address ahead of time.
fn create_record_account<'info>(
    payer: &Signer<'info>,
    record: &AccountInfo<'info>,
    system: &Program<'info, System>,
    program_id: &Pubkey,
    signer_seeds: &[&[u8]],
) -> Result<()> {
    let space = UserRecord::space();
    let rent = Rent::get()?.minimum_balance(space);
    let seeds = &[signer_seeds];

    if record.lamports() == 0 {
        system_program::create_account(
            CpiContext::new_with_signer(
                system.to_account_info(),
                CreateAccount {
                    from: payer.to_account_info(),
                    to: record.clone(),
                },
                seeds,
            ),
            rent,
            space as u64,
            program_id,
        )?;
        return Ok(());
    }

    let top_up = rent.saturating_sub(record.lamports());
    if top_up > 0 {
        system_program::transfer(
            CpiContext::new(
                system.to_account_info(),
                Transfer {
                    from: payer.to_account_info(),
                    to: record.clone(),
                },
            ),
            top_up,
        )?;
    }
    system_program::allocate(
        CpiContext::new_with_signer(
            system.to_account_info(),
            Allocate {
                account_to_allocate: record.clone(),
            },
            seeds,
        ),
        space as u64,
    )?;
    system_program::assign(
        CpiContext::new_with_signer(
            system.to_account_info(),
            Assign {
                account_to_assign: record.clone(),
            },
            seeds,
        ),
        program_id,
    )?;
    Ok(())
}

#[derive(Accounts)]
pub struct Whitelist<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Box<Account<'info, VestingState>>,

    #[account(
        seeds = [VAULT_SEED, vesting_state.key().as_ref()],
        bump,
        constraint = vault.mint == vesting_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct AccountsWhitelisted {
    pub count_added: u32,
    pub allocation_added: u64,
    pub total_allocation: u64,
    pub whitelisted_count: u32,
}
