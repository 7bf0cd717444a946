//! Protocol parameters and the set of rules governance can change.
//!
//! Per-block-kind tables (required work, required validations, validator
//! levels) live next to the code that consumes them; this struct holds the
//! cross-cutting scalars, every one of which is patchable by an approved
//! RULE_CHANGE proposal.

use serde::{Deserialize, Serialize};

/// Cross-cutting engine parameters with their production defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolParams {
    // ── Validation consensus ─────────────────────────────────────────────
    /// Stake share (basis points) a side must strictly exceed to finalize
    /// a block. Default 6600 (two thirds).
    pub supermajority_bps: u32,

    /// Number of witnesses auto-selected when a block creator names none.
    pub witness_count: u32,

    /// Credits awarded to each validator on the winning side.
    pub validator_reward_credits: u64,

    /// Vote-credit bonus awarded to each validator on the winning side.
    pub validator_reward_vote_credits: u64,

    /// Credits deducted from an actor whose block is rejected.
    pub rejection_penalty_credits: u64,

    // ── Mining ───────────────────────────────────────────────────────────
    /// Upper bound on nonce attempts before mining fails. Liveness bound,
    /// not expected to trigger at difficulties 1 through 4.
    pub mining_attempt_cap: u64,

    // ── Moderation ───────────────────────────────────────────────────────
    /// Votes required before a moderation case executes.
    pub moderation_quorum: u32,

    /// Voting window for a moderation case, in seconds. Default 24 hours.
    pub moderation_window_secs: u64,

    /// Upper bound on a single juror's vote weight.
    pub jury_weight_cap: u64,

    /// Credits awarded to each juror who voted with the final decision.
    pub juror_reward_credits: u64,

    // ── Governance ───────────────────────────────────────────────────────
    /// Minimum reputation to author a proposal.
    pub min_author_reputation: u64,

    /// Discussion window before voting opens, in seconds. Default 3 days.
    pub discussion_window_secs: u64,

    /// Voting window measured from proposal creation, in seconds.
    /// Default 7 days.
    pub voting_window_secs: u64,

    /// Floor of the dynamic approval threshold.
    pub min_approval_threshold: i64,

    /// Share of active users (basis points) that sets the dynamic approval
    /// threshold. Default 1000 (10%).
    pub active_share_bps: u32,

    /// How far back a user's last activity may lie to count as active,
    /// in seconds. Default 30 days.
    pub activity_window_secs: u64,
}

impl ProtocolParams {
    /// Production defaults.
    pub fn standard() -> Self {
        Self {
            supermajority_bps: 6600,
            witness_count: 7,
            validator_reward_credits: 5,
            validator_reward_vote_credits: 2,
            rejection_penalty_credits: 10,

            mining_attempt_cap: 10_000,

            moderation_quorum: 5,
            moderation_window_secs: 24 * 3600,
            jury_weight_cap: 10,
            juror_reward_credits: 3,

            min_author_reputation: 20,
            discussion_window_secs: 3 * 24 * 3600,
            voting_window_secs: 7 * 24 * 3600,
            min_approval_threshold: 10,
            active_share_bps: 1000,
            activity_window_secs: 30 * 24 * 3600,
        }
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self::standard()
    }
}

/// Enum of the parameters a RULE_CHANGE proposal can patch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernableRule {
    SupermajorityBps,
    WitnessCount,
    ValidatorRewardCredits,
    ValidatorRewardVoteCredits,
    RejectionPenaltyCredits,
    MiningAttemptCap,
    ModerationQuorum,
    ModerationWindowSecs,
    JuryWeightCap,
    JurorRewardCredits,
    MinAuthorReputation,
    DiscussionWindowSecs,
    VotingWindowSecs,
    MinApprovalThreshold,
    ActiveShareBps,
    ActivityWindowSecs,
}

impl GovernableRule {
    /// Human-readable name of this parameter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SupermajorityBps => "supermajority_bps",
            Self::WitnessCount => "witness_count",
            Self::ValidatorRewardCredits => "validator_reward_credits",
            Self::ValidatorRewardVoteCredits => "validator_reward_vote_credits",
            Self::RejectionPenaltyCredits => "rejection_penalty_credits",
            Self::MiningAttemptCap => "mining_attempt_cap",
            Self::ModerationQuorum => "moderation_quorum",
            Self::ModerationWindowSecs => "moderation_window_secs",
            Self::JuryWeightCap => "jury_weight_cap",
            Self::JurorRewardCredits => "juror_reward_credits",
            Self::MinAuthorReputation => "min_author_reputation",
            Self::DiscussionWindowSecs => "discussion_window_secs",
            Self::VotingWindowSecs => "voting_window_secs",
            Self::MinApprovalThreshold => "min_approval_threshold",
            Self::ActiveShareBps => "active_share_bps",
            Self::ActivityWindowSecs => "activity_window_secs",
        }
    }
}

impl ProtocolParams {
    /// Read the current value of a governable rule.
    pub fn value_of(&self, rule: GovernableRule) -> u64 {
        match rule {
            GovernableRule::SupermajorityBps => self.supermajority_bps as u64,
            GovernableRule::WitnessCount => self.witness_count as u64,
            GovernableRule::ValidatorRewardCredits => self.validator_reward_credits,
            GovernableRule::ValidatorRewardVoteCredits => self.validator_reward_vote_credits,
            GovernableRule::RejectionPenaltyCredits => self.rejection_penalty_credits,
            GovernableRule::MiningAttemptCap => self.mining_attempt_cap,
            GovernableRule::ModerationQuorum => self.moderation_quorum as u64,
            GovernableRule::ModerationWindowSecs => self.moderation_window_secs,
            GovernableRule::JuryWeightCap => self.jury_weight_cap,
            GovernableRule::JurorRewardCredits => self.juror_reward_credits,
            GovernableRule::MinAuthorReputation => self.min_author_reputation,
            GovernableRule::DiscussionWindowSecs => self.discussion_window_secs,
            GovernableRule::VotingWindowSecs => self.voting_window_secs,
            GovernableRule::MinApprovalThreshold => self.min_approval_threshold.max(0) as u64,
            GovernableRule::ActiveShareBps => self.active_share_bps as u64,
            GovernableRule::ActivityWindowSecs => self.activity_window_secs,
        }
    }

    /// Apply a governance-approved change to a single rule.
    pub fn apply(&mut self, rule: GovernableRule, new_value: u64) {
        match rule {
            GovernableRule::SupermajorityBps => self.supermajority_bps = new_value as u32,
            GovernableRule::WitnessCount => self.witness_count = new_value as u32,
            GovernableRule::ValidatorRewardCredits => self.validator_reward_credits = new_value,
            GovernableRule::ValidatorRewardVoteCredits => {
                self.validator_reward_vote_credits = new_value
            }
            GovernableRule::RejectionPenaltyCredits => self.rejection_penalty_credits = new_value,
            GovernableRule::MiningAttemptCap => self.mining_attempt_cap = new_value,
            GovernableRule::ModerationQuorum => self.moderation_quorum = new_value as u32,
            GovernableRule::ModerationWindowSecs => self.moderation_window_secs = new_value,
            GovernableRule::JuryWeightCap => self.jury_weight_cap = new_value,
            GovernableRule::JurorRewardCredits => self.juror_reward_credits = new_value,
            GovernableRule::MinAuthorReputation => self.min_author_reputation = new_value,
            GovernableRule::DiscussionWindowSecs => self.discussion_window_secs = new_value,
            GovernableRule::VotingWindowSecs => self.voting_window_secs = new_value,
            GovernableRule::MinApprovalThreshold => self.min_approval_threshold = new_value as i64,
            GovernableRule::ActiveShareBps => self.active_share_bps = new_value as u32,
            GovernableRule::ActivityWindowSecs => self.activity_window_secs = new_value,
        }
    }
}
