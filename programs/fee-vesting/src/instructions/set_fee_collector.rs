use anchor_lang::prelude::*;

use crate::constants::{VAULT_SEED, VESTING_STATE_SEED};
use crate::error::VestingError;
use crate::state::VestingState;
use crate::utils::access;

pub fn set_fee_collector(ctx: Context<SetFeeCollector>, new_fee_collector: Pubkey) -> Result<()> {
    require!(new_fee_collector != Pubkey::default(), VestingError::InvalidPubkey);

    let vesting_state_key = ctx.accounts.vesting_state.key();
    let st = &mut ctx.accounts.vesting_state;
    access::require_owner(st, &ctx.accounts.owner.key())?;

    require!(
        new_fee_collector != vesting_state_key,
        VestingError::InvalidConfig
    );
    require!(new_fee_collector != crate::ID, VestingError::InvalidConfig);

    // Program PDAs cannot sign, so a collector set to one could never collect.
    let (vault_pda, _) =
        Pubkey::find_program_address(&[VAULT_SEED, vesting_state_key.as_ref()], &crate::ID);
    require!(new_fee_collector != vault_pda, VestingError::InvalidConfig);

    let old = st.fee_collector;
    st.fee_collector = new_fee_collector;

    emit!(FeeCollectorSet {
        owner: st.owner,
        old_fee_collector: old,
        new_fee_collector,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetFeeCollector<'info> {
    #[account(mut, seeds = [VESTING_STATE_SEED], bump = vesting_state.bump)]
    pub vesting_state: Box<Account<'info, VestingState>>,

    pub owner: Signer<'info>,
}

#[event]
pub struct FeeCollectorSet {
    pub owner: Pubkey,
    pub old_fee_collector: Pubkey,
    pub new_fee_collector: Pubkey,
}
