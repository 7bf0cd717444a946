//! Bounded nonce search (multi-threaded CPU).

use rayon::prelude::*;

use crate::{WorkError, WorkNonce};
use poh_types::{blake2b_256, BlockHash};

/// Searches for a nonce whose block hash clears the difficulty predicate.
///
/// The search runs from nonce 0 upward so the result is deterministic for a
/// given root and difficulty; rayon's ordered `find_first` keeps that
/// property while using all cores. The attempt cap is a liveness bound, not
/// an expected outcome at difficulties 1 through 4.
pub struct BlockMiner {
    attempt_cap: u64,
}

impl BlockMiner {
    pub fn new(attempt_cap: u64) -> Self {
        Self { attempt_cap }
    }

    /// Find the lowest nonce below the cap such that
    /// `Blake2b(root || nonce_le)` has at least `difficulty` leading zero
    /// hex characters. Returns the nonce and the winning hash.
    pub fn mine(
        &self,
        root: &[u8; 32],
        difficulty: u32,
    ) -> Result<(WorkNonce, BlockHash), WorkError> {
        let found = (0..self.attempt_cap)
            .into_par_iter()
            .find_first(|&nonce| work_hash(root, nonce).meets_difficulty(difficulty));

        match found {
            Some(nonce) => Ok((WorkNonce(nonce), work_hash(root, nonce))),
            None => Err(WorkError::MiningExhausted {
                attempts: self.attempt_cap,
                difficulty,
            }),
        }
    }
}

/// The hash a given nonce produces for a block root. Used by mining and by
/// chain verification, which recomputes it from stored fields.
pub fn work_hash(root: &[u8; 32], nonce: u64) -> BlockHash {
    let mut input = [0u8; 40];
    input[0..32].copy_from_slice(root);
    input[32..40].copy_from_slice(&nonce.to_le_bytes());
    BlockHash::new(blake2b_256(&input))
}
