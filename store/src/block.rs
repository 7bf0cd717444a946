//! Trust block record and chain storage trait.

use crate::StoreError;
use poh_types::{BlockHash, BlockKind, BlockStatus, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// One entry in the append-only trust ledger.
///
/// Identified by its hash. `height` increases by exactly one per block and
/// `previous` is the hash at `height - 1` (`BlockHash::ZERO` for the first
/// block). `status` moves Pending to Approved or Rejected exactly once,
/// through [`BlockStore::finalize`] only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrustBlock {
    pub height: u64,
    pub hash: BlockHash,
    pub previous: BlockHash,
    pub kind: BlockKind,
    pub actor: UserId,
    /// Opaque action payload supplied by the creating subsystem.
    pub content: serde_json::Value,
    /// The mined nonce satisfying the difficulty predicate.
    pub nonce: u64,
    /// Difficulty in effect when the block was mined (leading zero nibbles).
    pub difficulty: u32,
    pub created_at: Timestamp,
    pub status: BlockStatus,
}

/// Trait for the append-only block chain.
///
/// `append_block` is the serializable single-writer path: it must reject a block
/// whose height is already taken or whose `previous` does not match the
/// current head, so exactly one of two racing writers wins.
pub trait BlockStore: Send + Sync {
    /// Append a new block. `Duplicate` when the height is taken or the
    /// previous hash no longer matches the head.
    fn append_block(&self, block: &TrustBlock) -> Result<(), StoreError>;

    fn get_block(&self, hash: &BlockHash) -> Result<Option<TrustBlock>, StoreError>;

    /// Current head as `(height, hash)`; `None` for an empty chain.
    fn head(&self) -> Result<Option<(u64, BlockHash)>, StoreError>;

    /// Number of blocks created at or after the given instant. Feeds the
    /// demand-adaptive difficulty; always queried live, never cached.
    fn count_created_since(&self, since: Timestamp) -> Result<u64, StoreError>;

    /// Conditionally finalize: set `new_status` if and only if the block is
    /// still Pending. Returns whether this call performed the transition;
    /// a `false` return means another writer finalized first.
    fn finalize(&self, hash: &BlockHash, new_status: BlockStatus) -> Result<bool, StoreError>;

    /// The full chain in ascending height order, for audit passes.
    fn iter_chain(&self) -> Result<Vec<TrustBlock>, StoreError>;

    fn block_count(&self) -> Result<u64, StoreError> {
        Ok(self.iter_chain()?.len() as u64)
    }
}
