//! Per-block-kind work requirements.
//!
//! Creating a block costs accumulated work (completed help hours plus
//! badges). Help claims are free; disputes demand a substantial record.

use crate::WorkError;
use poh_types::BlockKind;

const HELP_REQUIRED: u64 = 0;
const PROPOSAL_REQUIRED: u64 = 20;
const VALIDATION_REQUIRED: u64 = 5;
const DISPUTE_REQUIRED: u64 = 50;

/// The work required to create each block kind.
#[derive(Clone, Copy, Debug)]
pub struct WorkRequirements {
    pub help: u64,
    pub proposal: u64,
    pub validation: u64,
    pub dispute: u64,
}

impl WorkRequirements {
    pub fn standard() -> Self {
        Self {
            help: HELP_REQUIRED,
            proposal: PROPOSAL_REQUIRED,
            validation: VALIDATION_REQUIRED,
            dispute: DISPUTE_REQUIRED,
        }
    }

    /// The work required for a specific block kind.
    pub fn required_for(&self, kind: BlockKind) -> u64 {
        match kind {
            BlockKind::Help => self.help,
            BlockKind::Proposal => self.proposal,
            BlockKind::Validation => self.validation,
            BlockKind::Dispute => self.dispute,
        }
    }

    /// Check an actor's accumulated work against the requirement for `kind`,
    /// reporting the shortfall on failure.
    pub fn check(&self, kind: BlockKind, have: u64) -> Result<(), WorkError> {
        let required = self.required_for(kind);
        if have >= required {
            Ok(())
        } else {
            Err(WorkError::InsufficientWork { have, required })
        }
    }
}

impl Default for WorkRequirements {
    fn default() -> Self {
        Self::standard()
    }
}
