//! Block validation records.

use crate::StoreError;
use poh_types::{BlockHash, Timestamp, UserId, ValidationDecision};
use serde::{Deserialize, Serialize};

/// A validator's vote on a pending block, keyed by `(block, validator)`.
///
/// `stake` is computed from the validator's profile at vote time and frozen
/// here; it is never recomputed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockValidation {
    pub block: BlockHash,
    pub validator: UserId,
    pub decision: ValidationDecision,
    pub reason: Option<String>,
    pub stake: u64,
    pub created_at: Timestamp,
}

/// Trait for validation vote storage.
pub trait ValidationStore: Send + Sync {
    /// Record a validation. `Duplicate` when this validator already voted
    /// on this block; the record is immutable once written.
    fn record_validation(&self, validation: &BlockValidation) -> Result<(), StoreError>;

    fn validations_for(&self, block: &BlockHash) -> Result<Vec<BlockValidation>, StoreError>;
}
