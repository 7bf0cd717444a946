//! Validation consensus for trust blocks.
//!
//! Witnesses cast APPROVE/REJECT votes carrying a stake frozen from their
//! profile at vote time. Once a block has enough votes, the side holding a
//! strict stake supermajority finalizes it; the transition is guarded by
//! the store so exactly one of several racing voters performs it.

pub mod engine;
pub mod error;
pub mod outcomes;
pub mod params;

pub use engine::ValidationConsensus;
pub use error::ConsensusError;
pub use outcomes::{compute_outcome, ActorEffect, FinalizationOutcome, ValidatorReward};
pub use params::ConsensusThresholds;
