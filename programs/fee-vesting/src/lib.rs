#![allow(unexpected_cfgs)]

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

pub use instructions::*;
pub use utils::claim::ClaimResult;
pub use utils::fees::FeeCollection;

declare_id!("AveWUfJGAPKukVBRsbG7hXc5s5GdvevKGFPL6zg9ci2e");

#[program]
pub mod fee_vesting {
    use super::*;

    /// Builds the unlock schedule from per-period differentials and creates
    /// the state and vault PDAs.
    pub fn initialize(
        ctx: Context<Initialize>,
        percent_diffs: Vec<u32>,
        time_diffs: Vec<u64>,
        start_time: i64,
        initial_fee_percentage: u32,
        fee_collector: Pubkey,
    ) -> Result<()> {
        instructions::initialize::initialize(
            ctx,
            percent_diffs,
            time_diffs,
            start_time,
            initial_fee_percentage,
            fee_collector,
        )
    }

    /// Owner-only bulk registration; closes once the vault holds any tokens.
    pub fn whitelist<'info>(
        ctx: Context<'_, '_, 'info, 'info, Whitelist<'info>>,
        wallets: Vec<Pubkey>,
        allocations: Vec<u64>,
    ) -> Result<()> {
        instructions::whitelist::whitelist(ctx, wallets, allocations)
    }

    pub fn fund_vault(ctx: Context<FundVault>, amount: u64) -> Result<()> {
        instructions::fund_vault::fund_vault(ctx, amount)
    }

    /// Advances the passed-unlocks pointer. Callable by anyone.
    pub fn sync_unlocks(ctx: Context<SyncUnlocks>) -> Result<()> {
        instructions::sync_unlocks::sync_unlocks(ctx)
    }

    pub fn claim(ctx: Context<Claim>, amount: u64) -> Result<ClaimResult> {
        instructions::claim::claim(ctx, amount)
    }

    pub fn collect_fees(ctx: Context<CollectFees>) -> Result<FeeCollection> {
        instructions::collect_fees::collect_fees(ctx)
    }

    pub fn set_fee_collector(ctx: Context<SetFeeCollector>, new_fee_collector: Pubkey) -> Result<()> {
        instructions::set_fee_collector::set_fee_collector(ctx, new_fee_collector)
    }

    pub fn emit_claim_quote(ctx: Context<EmitClaimQuote>, wallet: Pubkey) -> Result<()> {
        instructions::emit_claim_quote::emit_claim_quote(ctx, wallet)
    }
}
