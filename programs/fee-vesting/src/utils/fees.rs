//! Global fee ledger: base-fee formula, extra-fee accrual and collection.
//!
//! Both components are derived from cumulative figures only, so collection
//! never has to look at individual users.

use anchor_lang::prelude::{borsh, AnchorDeserialize, AnchorSerialize};

use crate::error::VestingError;
use crate::utils::schedule::{apply_percentage, percent_after};

/// Base and extra fee released by one `collect_fees` call.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeCollection {
    pub unlock_index: u16,
    pub base_fee: u64,
    pub extra_fee: u64,
}

impl FeeCollection {
    pub fn total(&self) -> Result<u64, VestingError> {
        self.base_fee
            .checked_add(self.extra_fee)
            .ok_or(VestingError::MathOverflow)
    }
}

/// Base fee owed on the whole pool once `cumulative_percent` has unlocked.
pub fn base_fee_owed(
    total_allocation: u64,
    cumulative_percent: u32,
    initial_fee_percentage: u32,
) -> Result<u64, VestingError> {
    let unlocked = apply_percentage(total_allocation, cumulative_percent)?;
    apply_percentage(unlocked, initial_fee_percentage)
}

/// Seeds an unwritten `slot` from the one before it, scaled by percentage
/// growth: `extra[slot] = extra[prev] + cum[slot] * extra[prev] / cum[prev]`.
/// No-op when `slot` already holds a value or `prev` holds none.
fn seed_extra_fee(
    extra_fees: &mut [u64],
    cumulative_percentages: &[u32],
    slot: usize,
) -> Result<(), VestingError> {
    let prev = slot - 1;
    let prev_fee = extra_fees[prev];
    if prev_fee == 0 || extra_fees[slot] != 0 {
        return Ok(());
    }

    let scaled = (cumulative_percentages[slot] as u128)
        .checked_mul(prev_fee as u128)
        .ok_or(VestingError::MathOverflow)?
        .checked_div(cumulative_percentages[prev] as u128)
        .ok_or(VestingError::MathOverflow)?;
    let seeded = (prev_fee as u128)
        .checked_add(scaled)
        .ok_or(VestingError::MathOverflow)?;
    extra_fees[slot] = u64::try_from(seeded).map_err(|_| VestingError::MathOverflow)?;
    Ok(())
}

/// Adds `amount` to the extra fee owed at `current_unlock + 1`, seeding the
/// slot from `current_unlock` first if nothing was written there yet.
pub fn record_extra_fee(
    extra_fees: &mut [u64],
    cumulative_percentages: &[u32],
    current_unlock: usize,
    amount: u64,
) -> Result<(), VestingError> {
    let next = current_unlock + 1;
    seed_extra_fee(extra_fees, cumulative_percentages, next)?;
    extra_fees[next] = extra_fees[next]
        .checked_add(amount)
        .ok_or(VestingError::MathOverflow)?;
    Ok(())
}

/// Carries the extra-fee ledger through every slot the unlock pointer has
/// reached, so periods without an escalation still inherit the fee owed by
/// earlier escalations. Slots `1..=min(passed, N - 1)` from `previous` on are
/// seeded in order.
pub fn carry_extra_fees(
    extra_fees: &mut [u64],
    cumulative_percentages: &[u32],
    previous_unlocks_count: u16,
    passed_unlocks_count: u16,
) -> Result<(), VestingError> {
    let last = extra_fees.len().saturating_sub(1);
    let from = (previous_unlocks_count as usize).max(1);
    let to = (passed_unlocks_count as usize).min(last);
    for slot in from..=to {
        seed_extra_fee(extra_fees, cumulative_percentages, slot)?;
    }
    Ok(())
}

/// Fees newly collectible for periods `collected_unlocks_count..passed_unlocks_count`.
///
/// Base fee is the difference of the cumulative owed amount between the two
/// counters. Extra fee is whatever `extra_fees[current]` holds beyond the
/// extra fees already paid out.
pub fn compute_fee_collection(
    total_allocation: u64,
    initial_fee_percentage: u32,
    cumulative_percentages: &[u32],
    extra_fees: &[u64],
    passed_unlocks_count: u16,
    collected_unlocks_count: u16,
    collected_extra_fees: u64,
) -> Result<FeeCollection, VestingError> {
    if collected_unlocks_count >= passed_unlocks_count {
        return Err(VestingError::NoFeesToCollect);
    }
    let current_unlock = passed_unlocks_count as usize - 1;

    let owed_now = base_fee_owed(
        total_allocation,
        cumulative_percentages[current_unlock],
        initial_fee_percentage,
    )?;
    let owed_before = base_fee_owed(
        total_allocation,
        percent_after(cumulative_percentages, collected_unlocks_count as usize),
        initial_fee_percentage,
    )?;
    let base_fee = owed_now
        .checked_sub(owed_before)
        .ok_or(VestingError::MathOverflow)?;
    let extra_fee = extra_fees[current_unlock].saturating_sub(collected_extra_fees);

    Ok(FeeCollection {
        unlock_index: current_unlock as u16,
        base_fee,
        extra_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PERCENTAGE_DENOMINATOR;
    use proptest::prelude::*;

    const TEN_PERCENT: u32 = PERCENTAGE_DENOMINATOR / 10;

    #[test]
    fn nothing_to_collect_when_caught_up() {
        let cum = [500_000, PERCENTAGE_DENOMINATOR];
        assert!(matches!(
            compute_fee_collection(1000, TEN_PERCENT, &cum, &[0, 0], 0, 0, 0),
            Err(VestingError::NoFeesToCollect)
        ));
        assert!(matches!(
            compute_fee_collection(1000, TEN_PERCENT, &cum, &[0, 0], 1, 1, 0),
            Err(VestingError::NoFeesToCollect)
        ));
    }

    #[test]
    fn base_fee_follows_unlocked_share() {
        let cum = [500_000, PERCENTAGE_DENOMINATOR];
        let c = compute_fee_collection(1000, TEN_PERCENT, &cum, &[0, 0], 1, 0, 0).unwrap();
        assert_eq!(c.unlock_index, 0);
        assert_eq!(c.base_fee, 50);
        assert_eq!(c.extra_fee, 0);
    }

    #[test]
    fn collection_does_not_depend_on_claims() {
        // No user ever claimed: the base fee for every passed period is still owed.
        let cum = [250_000, 600_000, PERCENTAGE_DENOMINATOR];
        let c = compute_fee_collection(2_000, TEN_PERCENT, &cum, &[0, 0, 0], 3, 0, 0).unwrap();
        assert_eq!(c.base_fee, 200);
    }

    #[test]
    fn split_collection_matches_single_collection() {
        let cum = [500_000, PERCENTAGE_DENOMINATOR];
        let extra = [0, 450];

        let single = compute_fee_collection(1000, TEN_PERCENT, &cum, &extra, 2, 0, 0).unwrap();

        let first = compute_fee_collection(1000, TEN_PERCENT, &cum, &extra, 1, 0, 0).unwrap();
        let second =
            compute_fee_collection(1000, TEN_PERCENT, &cum, &extra, 2, 1, first.extra_fee).unwrap();

        assert_eq!(single.base_fee, 100);
        assert_eq!(single.extra_fee, 450);
        assert_eq!(
            first.total().unwrap() + second.total().unwrap(),
            single.total().unwrap()
        );
    }

    #[test]
    fn unseeded_slot_does_not_underflow() {
        let cum = [300_000, 600_000, PERCENTAGE_DENOMINATOR];
        let c = compute_fee_collection(1000, TEN_PERCENT, &cum, &[0, 90, 0], 3, 2, 90).unwrap();
        assert_eq!(c.extra_fee, 0);
    }

    #[test]
    fn record_extra_fee_adds_to_next_slot() {
        let cum = [500_000, PERCENTAGE_DENOMINATOR];
        let mut extra = [0u64, 0];
        record_extra_fee(&mut extra, &cum, 0, 450).unwrap();
        assert_eq!(extra, [0, 450]);
        record_extra_fee(&mut extra, &cum, 0, 10).unwrap();
        assert_eq!(extra, [0, 460]);
    }

    #[test]
    fn record_extra_fee_carries_forward_scaled() {
        let cum = [250_000, 500_000, PERCENTAGE_DENOMINATOR];
        let mut extra = [0u64, 100, 0];
        record_extra_fee(&mut extra, &cum, 1, 7).unwrap();
        // 100 + 1_000_000 * 100 / 500_000 = 300, then + 7.
        assert_eq!(extra[2], 307);
    }

    #[test]
    fn record_extra_fee_skips_carry_when_already_seeded() {
        let cum = [250_000, 500_000, PERCENTAGE_DENOMINATOR];
        let mut extra = [0u64, 100, 40];
        record_extra_fee(&mut extra, &cum, 1, 7).unwrap();
        assert_eq!(extra[2], 47);
    }

    #[test]
    fn carry_fills_periods_without_escalation() {
        let cum = [250_000, 500_000, PERCENTAGE_DENOMINATOR];
        let mut extra = [0u64, 225, 0];
        carry_extra_fees(&mut extra, &cum, 2, 3).unwrap();
        // 225 + 1_000_000 * 225 / 500_000.
        assert_eq!(extra, [0, 225, 675]);

        // A second pass over the same range changes nothing.
        carry_extra_fees(&mut extra, &cum, 2, 3).unwrap();
        assert_eq!(extra, [0, 225, 675]);
    }

    #[test]
    fn carry_chains_across_several_slots() {
        let cum = [200_000, 400_000, 600_000, 800_000, PERCENTAGE_DENOMINATOR];
        let mut extra = [0u64, 10, 0, 0, 0];
        carry_extra_fees(&mut extra, &cum, 1, 5).unwrap();
        // 10 + 600k*10/400k = 25; 25 + 800k*25/600k = 58; 58 + 1m*58/800k = 130.
        assert_eq!(extra, [0, 10, 25, 58, 130]);
    }

    #[test]
    fn carry_leaves_written_slots_alone() {
        let cum = [250_000, 500_000, PERCENTAGE_DENOMINATOR];
        let mut extra = [0u64, 100, 40];
        carry_extra_fees(&mut extra, &cum, 0, 3).unwrap();
        assert_eq!(extra, [0, 100, 40]);
    }

    proptest! {
        #[test]
        fn extra_fee_batching_independent(
            written in prop::collection::vec(0u64..=1_000_000, 3),
            split in 1u16..4,
        ) {
            let cum = [100_000u32, 333_333, 777_777, PERCENTAGE_DENOMINATOR];
            // Replay the ledger: advance one period at a time and, in some
            // periods, book an escalation against the next slot.
            let mut extra = [0u64; 4];
            let mut passed = 0u16;
            for (current, add) in written.iter().enumerate() {
                carry_extra_fees(&mut extra, &cum, passed, current as u16 + 1).unwrap();
                passed = current as u16 + 1;
                if *add % 3 != 0 {
                    record_extra_fee(&mut extra, &cum, current, *add).unwrap();
                }
            }
            carry_extra_fees(&mut extra, &cum, passed, 4).unwrap();
            prop_assert!(extra.windows(2).all(|w| w[0] <= w[1]));

            let single = compute_fee_collection(1_000, 0, &cum, &extra, 4, 0, 0).unwrap();
            let a = compute_fee_collection(1_000, 0, &cum, &extra, split, 0, 0).unwrap();
            let b = compute_fee_collection(1_000, 0, &cum, &extra, 4, split, a.extra_fee).unwrap();
            prop_assert_eq!(a.extra_fee + b.extra_fee, single.extra_fee);
            prop_assert_eq!(single.extra_fee, extra[3]);
        }

        #[test]
        fn base_fee_batching_independent(
            total in 1u64..=1_000_000_000_000,
            fee in 0u32..=PERCENTAGE_DENOMINATOR,
            split in 1u16..4,
        ) {
            let cum = [100_000u32, 333_333, 777_777, PERCENTAGE_DENOMINATOR];
            let extra = [0u64; 4];
            let single = compute_fee_collection(total, fee, &cum, &extra, 4, 0, 0).unwrap();
            let a = compute_fee_collection(total, fee, &cum, &extra, split, 0, 0).unwrap();
            let b = compute_fee_collection(total, fee, &cum, &extra, 4, split, 0).unwrap();
            prop_assert_eq!(a.base_fee + b.base_fee, single.base_fee);
            prop_assert!(single.base_fee <= apply_percentage(total, fee).unwrap());
        }
    }
}
