use poh_store::StoreError;
use poh_types::{CaseId, UserId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("moderation case {0} not found")]
    CaseNotFound(CaseId),

    #[error("moderation case {0} is not accepting votes")]
    CaseNotInVoting(CaseId),

    #[error("voting on case {0} has closed")]
    VotingClosed(CaseId),

    #[error("juror {voter} already voted on case {case}")]
    AlreadyVoted { case: CaseId, voter: UserId },

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
