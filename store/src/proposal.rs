//! Governance proposal, quadratic vote, and comment records.

use crate::StoreError;
use poh_types::{
    BlockHash, CommentId, ContentId, GovernableRule, ProposalId, ProposalKind, ProposalStatus,
    Timestamp, UserId,
};
use serde::{Deserialize, Serialize};

/// A community-improvement proposal.
///
/// Every proposal references the PROPOSAL-kind trust block created as its
/// provenance record. Status is monotonic: Discussion, Voting, then
/// Approved/Rejected, with Implemented terminal after successful execution.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Provenance trust block of kind Proposal.
    pub block: BlockHash,
    pub author: UserId,
    pub kind: ProposalKind,
    pub title: String,
    pub description: String,
    /// The typed payload executed on approval.
    pub action: ProposalAction,
    pub status: ProposalStatus,
    pub created_at: Timestamp,
    pub discussion_deadline: Timestamp,
    pub voting_deadline: Timestamp,
}

/// What an approved proposal does, by kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ProposalAction {
    /// Apply a field-level patch to the target community.
    CommunityUpdate {
        community: ContentId,
        patch: serde_json::Value,
    },
    /// Detach all members and delete the community.
    CommunityDissolution { community: ContentId },
    /// Credit a recipient from community funds.
    FundAllocation { recipient: UserId, amount: u64 },
    /// Patch one governance parameter.
    RuleChange {
        rule: GovernableRule,
        new_value: u64,
    },
    /// Feature request, approved for manual follow-up.
    Feature { summary: String },
    /// Partnership request, approved for manual follow-up.
    Partnership { partner: String },
}

impl ProposalAction {
    pub fn kind(&self) -> ProposalKind {
        match self {
            Self::CommunityUpdate { .. } => ProposalKind::CommunityUpdate,
            Self::CommunityDissolution { .. } => ProposalKind::CommunityDissolution,
            Self::FundAllocation { .. } => ProposalKind::FundAllocation,
            Self::RuleChange { .. } => ProposalKind::RuleChange,
            Self::Feature { .. } => ProposalKind::Feature,
            Self::Partnership { .. } => ProposalKind::Partnership,
        }
    }
}

/// A quadratic vote, keyed by `(proposal, voter)`. Re-voting replaces the
/// prior record; `cost` is always `points * points`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalVote {
    pub proposal: ProposalId,
    pub voter: UserId,
    /// Signed point magnitude chosen by the voter.
    pub points: i64,
    pub cost: u64,
    pub created_at: Timestamp,
}

/// A comment on a proposal; replies nest one level via `parent`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalComment {
    pub id: CommentId,
    pub proposal: ProposalId,
    pub author: UserId,
    pub body: String,
    pub parent: Option<CommentId>,
    pub created_at: Timestamp,
}

/// Trait for proposal state.
pub trait ProposalStore: Send + Sync {
    /// Persist a new proposal, ignoring `proposal.id`; returns the assigned id.
    fn insert_proposal(&self, proposal: &Proposal) -> Result<ProposalId, StoreError>;

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError>;

    /// Conditionally move `from` to `to`. Returns whether this call
    /// performed the transition; `false` means the status was not `from`.
    fn transition(
        &self,
        id: ProposalId,
        from: ProposalStatus,
        to: ProposalStatus,
    ) -> Result<bool, StoreError>;

    /// Record a vote, replacing any prior vote by the same voter.
    /// Returns the replaced vote so its cost can be refunded.
    fn upsert_vote(&self, vote: &ProposalVote) -> Result<Option<ProposalVote>, StoreError>;

    fn votes_for_proposal(&self, id: ProposalId) -> Result<Vec<ProposalVote>, StoreError>;

    /// Persist a comment, ignoring `comment.id`; returns the assigned id.
    fn add_comment(&self, comment: &ProposalComment) -> Result<CommentId, StoreError>;

    fn comments_for(&self, id: ProposalId) -> Result<Vec<ProposalComment>, StoreError>;

    fn get_comment(&self, id: CommentId) -> Result<Option<ProposalComment>, StoreError>;
}
