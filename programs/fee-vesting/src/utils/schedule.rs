//! Unlock schedule construction and percentage arithmetic.
//!
//! The schedule is supplied as per-period differentials and stored as prefix
//! sums. Percentages are fixed-point with `PERCENTAGE_DENOMINATOR` = 100%.

use crate::constants::{MAX_UNLOCKS_COUNT, PERCENTAGE_DENOMINATOR};
use crate::error::VestingError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub cumulative_percentages: Vec<u32>,
    pub cumulative_time_offsets: Vec<u64>,
}

/// Prefix-sums the differential inputs into a schedule.
///
/// Fails unless `1 <= N <= MAX_UNLOCKS_COUNT`, both inputs have length N and
/// the percentages add up to exactly 100%. Zero differentials are allowed, so
/// successive periods may share a boundary.
pub fn build_schedule(percent_diffs: &[u32], time_diffs: &[u64]) -> Result<Schedule, VestingError> {
    let n = percent_diffs.len();
    if n == 0 || n > MAX_UNLOCKS_COUNT || time_diffs.len() != n {
        return Err(VestingError::InvalidSchedule);
    }

    let mut cumulative_percentages = Vec::with_capacity(n);
    let mut cumulative_time_offsets = Vec::with_capacity(n);
    let mut percent: u32 = 0;
    let mut offset: u64 = 0;
    for (p, t) in percent_diffs.iter().zip(time_diffs.iter()) {
        percent = percent.checked_add(*p).ok_or(VestingError::InvalidSchedule)?;
        offset = offset.checked_add(*t).ok_or(VestingError::InvalidSchedule)?;
        cumulative_percentages.push(percent);
        cumulative_time_offsets.push(offset);
    }

    if percent != PERCENTAGE_DENOMINATOR {
        return Err(VestingError::InvalidSchedule);
    }

    Ok(Schedule {
        cumulative_percentages,
        cumulative_time_offsets,
    })
}

/// Cumulative percentage unlocked once `count` periods have passed.
pub fn percent_after(cumulative_percentages: &[u32], count: usize) -> u32 {
    match count {
        0 => 0,
        c => cumulative_percentages[c - 1],
    }
}

/// `amount * percentage / 100%`, rounded down.
pub fn apply_percentage(amount: u64, percentage: u32) -> Result<u64, VestingError> {
    let v = (amount as u128)
        .checked_mul(percentage as u128)
        .ok_or(VestingError::MathOverflow)?
        / PERCENTAGE_DENOMINATOR as u128;
    u64::try_from(v).map_err(|_| VestingError::MathOverflow)
}
