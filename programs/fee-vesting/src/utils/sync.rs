//! Unlock-pointer synchronisation against wall-clock time.

use crate::error::VestingError;

/// Number of periods passed at `now_ts`, never less than `current`.
///
/// Walks forward from `current` while the elapsed time reaches the next
/// boundary; boundaries are inclusive.
pub fn passed_unlocks(
    now_ts: i64,
    start_ts: i64,
    cumulative_time_offsets: &[u64],
    current: u16,
) -> Result<u16, VestingError> {
    if now_ts < start_ts {
        return Err(VestingError::TooEarly);
    }
    let elapsed = now_ts
        .checked_sub(start_ts)
        .ok_or(VestingError::MathOverflow)? as u64;

    let mut passed = current as usize;
    while passed < cumulative_time_offsets.len() && elapsed >= cumulative_time_offsets[passed] {
        passed += 1;
    }
    u16::try_from(passed).map_err(|_| VestingError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const START: i64 = 1_700_000_000;

    #[test]
    fn before_start_is_too_early() {
        assert!(matches!(
            passed_unlocks(START - 1, START, &[0, 100], 0),
            Err(VestingError::TooEarly)
        ));
    }

    #[test]
    fn boundary_is_inclusive() {
        let offsets = [0, 100];
        assert_eq!(passed_unlocks(START, START, &offsets, 0).unwrap(), 1);
        assert_eq!(passed_unlocks(START + 99, START, &offsets, 1).unwrap(), 1);
        assert_eq!(passed_unlocks(START + 100, START, &offsets, 1).unwrap(), 2);
    }

    #[test]
    fn equal_offsets_pass_together() {
        let offsets = [10, 10, 10, 20];
        assert_eq!(passed_unlocks(START + 10, START, &offsets, 0).unwrap(), 3);
    }

    #[test]
    fn first_offset_in_future_passes_nothing() {
        assert_eq!(passed_unlocks(START + 5, START, &[10], 0).unwrap(), 0);
    }

    #[test]
    fn saturates_at_schedule_length() {
        assert_eq!(passed_unlocks(i64::MAX, START, &[0, 100], 0).unwrap(), 2);
    }

    #[test]
    fn idempotent_at_same_time() {
        let offsets = [0, 50, 100];
        let first = passed_unlocks(START + 60, START, &offsets, 0).unwrap();
        let second = passed_unlocks(START + 60, START, &offsets, first).unwrap();
        assert_eq!(first, 2);
        assert_eq!(first, second);
    }

    #[test]
    fn never_moves_backwards() {
        // An earlier effective time leaves an already advanced pointer alone.
        assert_eq!(passed_unlocks(START, START, &[0, 50, 100], 3).unwrap(), 3);
    }

    proptest! {
        #[test]
        fn monotonic_in_time(a in 0i64..1_000, b in 0i64..1_000) {
            let offsets = [0u64, 100, 250, 250, 600, 999];
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let p_lo = passed_unlocks(START + lo, START, &offsets, 0).unwrap();
            let p_hi = passed_unlocks(START + hi, START, &offsets, p_lo).unwrap();
            prop_assert!(p_lo <= p_hi);
            prop_assert_eq!(p_hi, passed_unlocks(START + hi, START, &offsets, 0).unwrap());
        }
    }
}
