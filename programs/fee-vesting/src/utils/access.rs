//! Role checks for the owner, the fee collector and whitelisted callers.

use anchor_lang::prelude::Pubkey;

use crate::error::VestingError;
use crate::state::{UserRecord, VestingState};

pub fn require_owner(state: &VestingState, caller: &Pubkey) -> Result<(), VestingError> {
    if state.owner != *caller {
        return Err(VestingError::AccessDenied);
    }
    Ok(())
}

pub fn require_fee_collector(state: &VestingState, caller: &Pubkey) -> Result<(), VestingError> {
    if state.fee_collector != *caller {
        return Err(VestingError::AccessDenied);
    }
    Ok(())
}

/// Caller must own the record and hold a non-zero allocation.
pub fn require_whitelisted(record: &UserRecord, caller: &Pubkey) -> Result<(), VestingError> {
    if record.wallet != *caller || record.allocation == 0 {
        return Err(VestingError::AccessDenied);
    }
    Ok(())
}
