use poh_ledger::LedgerError;
use poh_store::StoreError;
use poh_types::{CommentId, ProposalId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("proposal {0} is not open for voting")]
    ProposalNotInVoting(ProposalId),

    #[error("voting on proposal {0} has closed")]
    VotingClosed(ProposalId),

    #[error("insufficient reputation: have {have}, required {required}")]
    InsufficientReputation { have: u64, required: u64 },

    #[error("insufficient vote credits: need {needed}, have {available}")]
    InsufficientVoteCredits { needed: u64, available: u64 },

    #[error("parent comment {0} not found")]
    CommentNotFound(CommentId),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
