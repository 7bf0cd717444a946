//! Moderation case and jury vote records.

use crate::StoreError;
use poh_types::{CaseId, CaseStatus, ContentRef, ModerationDecision, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A content report under jury review.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModerationCase {
    pub id: CaseId,
    pub content: ContentRef,
    pub report_reason: String,
    /// Anonymous reports carry no reporter.
    pub reporter: Option<UserId>,
    pub status: CaseStatus,
    /// Vote count required to execute, fixed at creation.
    pub quorum: u32,
    pub opened_at: Timestamp,
    pub deadline: Timestamp,
    pub final_decision: Option<ModerationDecision>,
    pub executed_at: Option<Timestamp>,
}

/// A juror's weighted vote, keyed by `(case, voter)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModerationVote {
    pub case: CaseId,
    pub voter: UserId,
    pub decision: ModerationDecision,
    pub reason: Option<String>,
    /// Reputation-derived weight frozen at vote time.
    pub weight: u64,
    pub created_at: Timestamp,
}

/// Trait for moderation state.
pub trait ModerationStore: Send + Sync {
    /// Persist a new case, ignoring `case.id`; returns the assigned id.
    fn open_case(&self, case: &ModerationCase) -> Result<CaseId, StoreError>;

    fn get_case(&self, id: CaseId) -> Result<Option<ModerationCase>, StoreError>;

    /// Record a vote. `Duplicate` when this juror already voted on the case.
    fn record_vote(&self, vote: &ModerationVote) -> Result<(), StoreError>;

    fn votes_for_case(&self, id: CaseId) -> Result<Vec<ModerationVote>, StoreError>;

    /// Conditionally execute: set the final decision and executed-at if and
    /// only if the case is still Voting. Returns whether this call performed
    /// the transition.
    fn execute_case(
        &self,
        id: CaseId,
        decision: ModerationDecision,
        now: Timestamp,
    ) -> Result<bool, StoreError>;

    /// Cases still Voting whose deadline has passed, for the expiry sweep.
    fn expired_open_cases(&self, now: Timestamp) -> Result<Vec<ModerationCase>, StoreError>;
}
