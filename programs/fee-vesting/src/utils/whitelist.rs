//! Batch checks for loading wallets into the whitelist.

use anchor_lang::prelude::Pubkey;

use crate::constants::MAX_WHITELIST_BATCH;
use crate::error::VestingError;

/// Validates one whitelist batch and returns the allocation it adds.
///
/// `record_accounts` is the number of record PDAs passed alongside the batch.
/// Whitelisting closes once the vault holds any tokens.
pub fn validate_batch(
    wallets: &[Pubkey],
    allocations: &[u64],
    record_accounts: usize,
    vault_balance: u64,
) -> Result<u64, VestingError> {
    if wallets.is_empty() {
        return Err(VestingError::EmptyBatch);
    }
    if wallets.len() != allocations.len() || record_accounts != wallets.len() {
        return Err(VestingError::ArrayLengthMismatch);
    }
    if wallets.len() > MAX_WHITELIST_BATCH {
        return Err(VestingError::BatchTooLarge);
    }
    if vault_balance != 0 {
        return Err(VestingError::WhitelistingClosed);
    }

    let mut added: u64 = 0;
    for (i, (wallet, allocation)) in wallets.iter().zip(allocations).enumerate() {
        if *wallet == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        if *allocation == 0 {
            return Err(VestingError::InvalidAllocation);
        }
        if wallets[..i].contains(wallet) {
            return Err(VestingError::AlreadyWhitelisted);
        }
        added = added
            .checked_add(*allocation)
            .ok_or(VestingError::MathOverflow)?;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallets(n: usize) -> Vec<Pubkey> {
        (0..n).map(|_| Pubkey::new_unique()).collect()
    }

    #[test]
    fn sums_a_valid_batch() {
        let w = wallets(3);
        assert_eq!(validate_batch(&w, &[100, 250, 650], 3, 0).unwrap(), 1000);
    }

    #[test]
    fn rejects_empty_batch() {
        assert!(matches!(
            validate_batch(&[], &[], 0, 0),
            Err(VestingError::EmptyBatch)
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let w = wallets(2);
        assert!(matches!(
            validate_batch(&w, &[1], 2, 0),
            Err(VestingError::ArrayLengthMismatch)
        ));
        assert!(matches!(
            validate_batch(&w, &[1, 2], 1, 0),
            Err(VestingError::ArrayLengthMismatch)
        ));
    }

    #[test]
    fn rejects_oversized_batch() {
        let n = MAX_WHITELIST_BATCH + 1;
        let w = wallets(n);
        assert!(matches!(
            validate_batch(&w, &vec![1; n], n, 0),
            Err(VestingError::BatchTooLarge)
        ));
    }

    #[test]
    fn closed_once_vault_is_funded() {
        let w = wallets(1);
        assert!(matches!(
            validate_batch(&w, &[10], 1, 1),
            Err(VestingError::WhitelistingClosed)
        ));
    }

    #[test]
    fn rejects_bad_entries() {
        let mut w = wallets(2);
        assert!(matches!(
            validate_batch(&w, &[10, 0], 2, 0),
            Err(VestingError::InvalidAllocation)
        ));

        w[1] = w[0];
        assert!(matches!(
            validate_batch(&w, &[10, 20], 2, 0),
            Err(VestingError::AlreadyWhitelisted)
        ));

        w[1] = Pubkey::default();
        assert!(matches!(
            validate_batch(&w, &[10, 20], 2, 0),
            Err(VestingError::InvalidPubkey)
        ));
    }

    #[test]
    fn allocation_sum_overflows() {
        let w = wallets(2);
        assert!(matches!(
            validate_batch(&w, &[u64::MAX, 1], 2, 0),
            Err(VestingError::MathOverflow)
        ));
    }
}
