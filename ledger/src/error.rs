use poh_store::StoreError;
use poh_work::WorkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Work(#[from] WorkError),

    #[error("another block was appended concurrently; retry")]
    ChainConflict,

    #[error("chain fault at height {height}: expected height {expected}")]
    HeightGap { height: u64, expected: u64 },

    #[error("chain fault at height {height}: previous hash does not match")]
    BrokenLink { height: u64 },

    #[error("chain fault at height {height}: stored hash does not match contents")]
    HashMismatch { height: u64 },

    #[error("chain fault at height {height}: hash misses difficulty {difficulty}")]
    DifficultyNotMet { height: u64, difficulty: u32 },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
