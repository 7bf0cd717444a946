//! Per-block-kind consensus thresholds.
//!
//! Heavier block kinds demand more votes and more experienced validators:
//! a dispute needs five level-3 validators, a routine help claim three
//! level-1 ones.

use poh_types::BlockKind;

/// Vote counts and validator levels required per block kind.
#[derive(Clone, Copy, Debug)]
pub struct ConsensusThresholds {
    required_validations: [u32; 4],
    required_level: [u8; 4],
}

impl ConsensusThresholds {
    pub fn standard() -> Self {
        Self {
            // Help, Proposal, Validation, Dispute
            required_validations: [3, 7, 1, 5],
            required_level: [1, 2, 1, 3],
        }
    }

    fn index(kind: BlockKind) -> usize {
        match kind {
            BlockKind::Help => 0,
            BlockKind::Proposal => 1,
            BlockKind::Validation => 2,
            BlockKind::Dispute => 3,
        }
    }

    /// Number of validations needed before the consensus check runs.
    pub fn required_validations_for(&self, kind: BlockKind) -> u32 {
        self.required_validations[Self::index(kind)]
    }

    /// Minimum validator level to vote on this block kind.
    pub fn required_level_for(&self, kind: BlockKind) -> u8 {
        self.required_level[Self::index(kind)]
    }
}

impl Default for ConsensusThresholds {
    fn default() -> Self {
        Self::standard()
    }
}
