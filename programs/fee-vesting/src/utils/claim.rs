//! Per-user unlock, payout and fee escalation.
//!
//! Callers work on a copy of the `UserRecord` and the extra-fee table and
//! write both back only when `process_claim` succeeds.

use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize};

use crate::constants::PERCENTAGE_DENOMINATOR;
use crate::error::VestingError;
use crate::state::UserRecord;
use crate::utils::fees::record_extra_fee;
use crate::utils::schedule::{apply_percentage, percent_after};

/// Outcome of a successful claim, returned to the caller.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimResult {
    pub unlock_index: u16,
    pub fee_increase: u32,
    pub available: u64,
    pub paid: u64,
    pub unlocked_gross: u64,
}

/// What a claim would unlock right now, without committing anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClaimPreview {
    pub unlocked_gross: u64,
    pub unlocked_fee: u64,
    pub unlocked_net: u64,
    pub claimable: u64,
}

/// Credits the tranche between the user's last credited period and
/// `current_unlock`, net of fee. Returns the gross amount (0 if already
/// credited).
///
/// The escalated rate committed on an earlier claim takes effect here.
pub fn unlock(
    record: &mut UserRecord,
    cumulative_percentages: &[u32],
    current_unlock: usize,
) -> Result<u64, VestingError> {
    let credited = record.claimed_unlocks_count as usize;
    if credited > current_unlock {
        return Ok(0);
    }

    let delta = cumulative_percentages[current_unlock]
        .checked_sub(percent_after(cumulative_percentages, credited))
        .ok_or(VestingError::MathOverflow)?;
    let gross = apply_percentage(record.allocation, delta)?;

    record.fee_percentage_current_unlock = record.fee_percentage_next_unlock;
    let fee = apply_percentage(gross, record.fee_percentage_current_unlock)?;
    let net = gross.checked_sub(fee).ok_or(VestingError::MathOverflow)?;
    record.total_unlocked = record
        .total_unlocked
        .checked_add(net)
        .ok_or(VestingError::MathOverflow)?;

    Ok(gross)
}

/// Raises the next-period fee to the user's claimed ratio when they claim
/// faster than their committed pace, and books the retroactive difference on
/// their next tranche into `extra_fees`. Returns the fee increase.
pub fn escalate_fee(
    record: &mut UserRecord,
    cumulative_percentages: &[u32],
    extra_fees: &mut [u64],
    current_unlock: usize,
) -> Result<u32, VestingError> {
    if current_unlock + 1 >= cumulative_percentages.len() || record.total_unlocked == 0 {
        return Ok(0);
    }

    let ratio = (record.total_claimed as u128)
        .checked_mul(PERCENTAGE_DENOMINATOR as u128)
        .ok_or(VestingError::MathOverflow)?
        / record.total_unlocked as u128;
    let ratio = u32::try_from(ratio).map_err(|_| VestingError::MathOverflow)?;
    if ratio <= record.fee_percentage_next_unlock {
        return Ok(0);
    }

    let increase = ratio - record.fee_percentage_next_unlock;
    record.fee_percentage_next_unlock = ratio;

    let next = current_unlock + 1;
    let next_share = cumulative_percentages[next]
        .checked_sub(cumulative_percentages[current_unlock])
        .ok_or(VestingError::MathOverflow)?;
    let next_tranche = apply_percentage(record.allocation, next_share)?;
    let extra_fee = apply_percentage(next_tranche, increase)?;
    record_extra_fee(extra_fees, cumulative_percentages, current_unlock, extra_fee)?;

    Ok(increase)
}

/// Unlock, pay out up to `amount`, then escalate.
///
/// `passed_unlocks_count` must already be synced.
pub fn process_claim(
    record: &mut UserRecord,
    cumulative_percentages: &[u32],
    extra_fees: &mut [u64],
    passed_unlocks_count: u16,
    amount: u64,
) -> Result<ClaimResult, VestingError> {
    if record.allocation == 0 {
        return Err(VestingError::AccessDenied);
    }
    if passed_unlocks_count == 0 {
        return Err(VestingError::NothingUnlockedYet);
    }
    if amount > record.allocation {
        return Err(VestingError::AmountExceedsAllocation);
    }
    let current_unlock = passed_unlocks_count as usize - 1;

    let unlocked_gross = unlock(record, cumulative_percentages, current_unlock)?;

    let available = record.available();
    if available == 0 {
        return Err(VestingError::NothingToClaim);
    }

    let paid = amount.min(available);
    record.total_claimed = record
        .total_claimed
        .checked_add(paid)
        .ok_or(VestingError::MathOverflow)?;
    record.claimed_unlocks_count = passed_unlocks_count;

    let fee_increase = escalate_fee(record, cumulative_percentages, extra_fees, current_unlock)?;

    Ok(ClaimResult {
        unlock_index: current_unlock as u16,
        fee_increase,
        available,
        paid,
        unlocked_gross,
    })
}

pub fn quote_claim(
    record: &UserRecord,
    cumulative_percentages: &[u32],
    passed_unlocks_count: u16,
) -> Result<ClaimPreview, VestingError> {
    let mut preview = record.clone();
    let (unlocked_gross, unlocked_net) = match passed_unlocks_count {
        0 => (0, 0),
        passed => {
            let before = preview.total_unlocked;
            let gross = unlock(&mut preview, cumulative_percentages, passed as usize - 1)?;
            (gross, preview.total_unlocked - before)
        }
    };

    Ok(ClaimPreview {
        unlocked_gross,
        unlocked_fee: unlocked_gross - unlocked_net,
        unlocked_net,
        claimable: preview.available(),
    })
}
