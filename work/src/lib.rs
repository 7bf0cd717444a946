//! Work gating and anti-spam mining.
//!
//! Not currency mining: a lightweight computational cost on trust-block
//! creation that makes flooding the ledger expensive while keeping ordinary
//! use effectively free. The nonce search is CPU-bound, synchronous, and
//! hard-capped, so block creation can never stall indefinitely.

pub mod difficulty;
pub mod error;
pub mod miner;
pub mod requirements;

pub use difficulty::demand_difficulty;
pub use error::WorkError;
pub use miner::{work_hash, BlockMiner};
pub use requirements::WorkRequirements;

/// The result of a successful nonce search.
#[derive(Clone, Copy, Debug)]
pub struct WorkNonce(pub u64);
