//! Reentrancy lock held in `VestingState` across token transfers.

use crate::error::VestingError;
use crate::state::VestingState;

pub fn enter(state: &mut VestingState) -> Result<(), VestingError> {
    if state.locked {
        return Err(VestingError::ReentrantCall);
    }
    state.locked = true;
    Ok(())
}

pub fn exit(state: &mut VestingState) {
    state.locked = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::prelude::Pubkey;

    fn state() -> VestingState {
        VestingState {
            owner: Pubkey::new_unique(),
            fee_collector: Pubkey::new_unique(),
            mint: Pubkey::new_unique(),
            start_time: 0,
            initial_fee_percentage: 0,
            passed_unlocks_count: 0,
            collected_unlocks_count: 0,
            total_allocation: 0,
            whitelisted_count: 0,
            collected_extra_fees: 0,
            locked: false,
            bump: 255,
            cumulative_percentages: vec![1_000_000],
            cumulative_time_offsets: vec![0],
            extra_fees: vec![0],
        }
    }

    #[test]
    fn second_entry_is_rejected_until_exit() {
        let mut st = state();
        enter(&mut st).unwrap();
        assert!(matches!(enter(&mut st), Err(VestingError::ReentrantCall)));
        exit(&mut st);
        assert!(enter(&mut st).is_ok());
    }
}
