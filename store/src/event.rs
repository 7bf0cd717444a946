//! Engine event emission for other subsystems to react to.

use poh_types::{
    BlockHash, BlockKind, BlockStatus, CaseId, ContentRef, ModerationDecision, ProposalId,
    UserId, ValidationDecision,
};
use serde::{Deserialize, Serialize};

/// Events the engine emits on its state transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Event {
    BlockCreated {
        hash: BlockHash,
        kind: BlockKind,
        actor: UserId,
    },
    BlockValidated {
        hash: BlockHash,
        validator: UserId,
        decision: ValidationDecision,
    },
    BlockFinalized {
        hash: BlockHash,
        status: BlockStatus,
    },
    ModerationStarted {
        case: CaseId,
        content: ContentRef,
    },
    ModerationExecuted {
        case: CaseId,
        decision: ModerationDecision,
    },
    ProposalCreated {
        proposal: ProposalId,
        author: UserId,
    },
    ProposalApproved {
        proposal: ProposalId,
    },
}

/// Fire-and-forget event delivery to interested subsystems.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: Event);
}
