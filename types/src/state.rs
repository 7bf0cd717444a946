//! Status enums and content references for the consensus engine.

use crate::id::ContentId;
use serde::{Deserialize, Serialize};

/// The kind of action a trust block claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Help given to another member.
    Help,
    /// Provenance record for a governance proposal.
    Proposal,
    /// A validation performed on someone else's block.
    Validation,
    /// A dispute raised against a prior action.
    Dispute,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [Self::Help, Self::Proposal, Self::Validation, Self::Dispute];

    /// Stable name used in digests and event payloads.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Proposal => "proposal",
            Self::Validation => "validation",
            Self::Dispute => "dispute",
        }
    }
}

/// Lifecycle of a trust block. Pending blocks are the only mutable ones,
/// and only the consensus finalization step may move them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockStatus {
    /// Awaiting validator votes.
    Pending,
    /// Finalized with a stake supermajority approving.
    Approved,
    /// Finalized with a stake supermajority rejecting.
    Rejected,
}

impl BlockStatus {
    /// Whether the block has been finalized (no further transitions).
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A validator's verdict on a pending block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationDecision {
    Approve,
    Reject,
}

/// A juror's verdict on reported content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModerationDecision {
    Keep,
    Remove,
    Warn,
}

impl ModerationDecision {
    /// Tally order: ties resolve in favor of the earlier entry, so Remove
    /// and Warn only win on strictly greater weight than Keep.
    pub const TALLY_ORDER: [ModerationDecision; 3] = [Self::Keep, Self::Remove, Self::Warn];
}

/// Lifecycle of a moderation case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Jury votes are being collected.
    Voting,
    /// The decision has been executed; the case is closed.
    Executed,
}

/// Lifecycle of a governance proposal. Status only moves forward through
/// this order; Rejected and Implemented are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Open for comments; voting has not started.
    Discussion,
    /// Quadratic voting is open.
    Voting,
    /// The dynamic approval threshold was reached.
    Approved,
    /// Voting closed without reaching the threshold.
    Rejected,
    /// The approved action was executed against the platform.
    Implemented,
}

impl ProposalStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Implemented)
    }
}

/// What a proposal asks the community to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProposalKind {
    /// Patch fields on a community.
    CommunityUpdate,
    /// Detach all members and delete a community.
    CommunityDissolution,
    /// Credit a recipient from community funds.
    FundAllocation,
    /// Patch a governance parameter.
    RuleChange,
    /// Feature request; approved proposals await manual follow-up.
    Feature,
    /// Partnership request; approved proposals await manual follow-up.
    Partnership,
}

impl ProposalKind {
    /// Whether approval of this kind triggers automatic execution.
    pub fn auto_executes(&self) -> bool {
        !matches!(self, Self::Feature | Self::Partnership)
    }
}

/// The kind of platform content a moderation case can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    Post,
    Offer,
    Event,
    Timebank,
    Community,
}

/// A typed reference to collaborator-owned content.
///
/// One capability set per kind (fetch summary, patch, remove, warn author)
/// lives on the content store, keyed by this reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef {
    pub kind: ContentKind,
    pub id: ContentId,
}

impl ContentRef {
    pub fn new(kind: ContentKind, id: ContentId) -> Self {
        Self { kind, id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_final() {
        assert!(!BlockStatus::Pending.is_final());
        assert!(BlockStatus::Approved.is_final());
        assert!(BlockStatus::Rejected.is_final());
    }

    #[test]
    fn tally_order_starts_with_keep() {
        assert_eq!(ModerationDecision::TALLY_ORDER[0], ModerationDecision::Keep);
    }

    #[test]
    fn terminal_proposal_statuses() {
        assert!(ProposalStatus::Rejected.is_terminal());
        assert!(ProposalStatus::Implemented.is_terminal());
        assert!(!ProposalStatus::Approved.is_terminal());
    }

    #[test]
    fn feature_kinds_do_not_auto_execute() {
        assert!(!ProposalKind::Feature.auto_executes());
        assert!(!ProposalKind::Partnership.auto_executes());
        assert!(ProposalKind::RuleChange.auto_executes());
    }
}
