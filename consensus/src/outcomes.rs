//! Finalization outcome computation.
//!
//! Once a block finalizes, the winning-side validators are rewarded, an
//! approved HELP claim lands on the actor's help counters, and a rejected
//! claim costs the actor credits. This module only computes the outcome;
//! the engine applies it through the profile store.

use poh_store::{BlockValidation, TrustBlock};
use poh_types::{BlockHash, BlockStatus, ProtocolParams, UserId, ValidationDecision};

/// What finalization does to the block's actor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActorEffect {
    /// Approved HELP: count the help and its hours on the actor's profile.
    HelpCounted { hours: u64 },
    /// Rejected block of any kind: a credit penalty.
    Penalized { credits: u64 },
    /// Approved non-HELP block: the claim stands on its own.
    None,
}

/// Reward for one validator on the winning side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatorReward {
    pub validator: UserId,
    pub credits: u64,
    pub vote_credits: u64,
}

/// The complete effect of finalizing one block.
#[derive(Clone, Debug)]
pub struct FinalizationOutcome {
    pub block: BlockHash,
    pub status: BlockStatus,
    pub actor: UserId,
    pub actor_effect: ActorEffect,
    pub validator_rewards: Vec<ValidatorReward>,
}

/// Compute the outcome of finalizing `block` as `status`.
///
/// Validators whose decision matches the final status are the winning side;
/// each gets the configured credit and vote-credit reward. For an approved
/// HELP block the hours come from the block's content payload (`hours`
/// field, 0 when absent).
pub fn compute_outcome(
    block: &TrustBlock,
    status: BlockStatus,
    validations: &[BlockValidation],
    params: &ProtocolParams,
) -> FinalizationOutcome {
    let winning_decision = match status {
        BlockStatus::Approved => ValidationDecision::Approve,
        BlockStatus::Rejected => ValidationDecision::Reject,
        BlockStatus::Pending => unreachable!("outcome computed only for finalized blocks"),
    };

    let validator_rewards = validations
        .iter()
        .filter(|v| v.decision == winning_decision)
        .map(|v| ValidatorReward {
            validator: v.validator.clone(),
            credits: params.validator_reward_credits,
            vote_credits: params.validator_reward_vote_credits,
        })
        .collect();

    let actor_effect = match (status, block.kind) {
        (BlockStatus::Approved, poh_types::BlockKind::Help) => ActorEffect::HelpCounted {
            hours: block
                .content
                .get("hours")
                .and_then(|h| h.as_u64())
                .unwrap_or(0),
        },
        (BlockStatus::Rejected, _) => ActorEffect::Penalized {
            credits: params.rejection_penalty_credits,
        },
        _ => ActorEffect::None,
    };

    FinalizationOutcome {
        block: block.hash,
        status,
        actor: block.actor.clone(),
        actor_effect,
        validator_rewards,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poh_types::{BlockKind, Timestamp};

    fn test_user(n: u8) -> UserId {
        UserId::new(format!("user-{n}"))
    }

    fn help_block(actor: UserId) -> TrustBlock {
        TrustBlock {
            height: 1,
            hash: BlockHash::new([1u8; 32]),
            previous: BlockHash::ZERO,
            kind: BlockKind::Help,
            actor,
            content: serde_json::json!({ "hours": 3 }),
            nonce: 0,
            difficulty: 1,
            created_at: Timestamp::new(100),
            status: BlockStatus::Pending,
        }
    }

    fn validation(n: u8, decision: ValidationDecision, stake: u64) -> BlockValidation {
        BlockValidation {
            block: BlockHash::new([1u8; 32]),
            validator: test_user(n),
            decision,
            reason: None,
            stake,
            created_at: Timestamp::new(200),
        }
    }

    #[test]
    fn approved_help_counts_hours() {
        let params = ProtocolParams::standard();
        let block = help_block(test_user(1));
        let validations = vec![
            validation(2, ValidationDecision::Approve, 20),
            validation(3, ValidationDecision::Approve, 25),
            validation(4, ValidationDecision::Reject, 10),
        ];

        let outcome = compute_outcome(&block, BlockStatus::Approved, &validations, &params);

        assert_eq!(outcome.actor_effect, ActorEffect::HelpCounted { hours: 3 });
        assert_eq!(outcome.validator_rewards.len(), 2);
        assert!(outcome
            .validator_rewards
            .iter()
            .all(|r| r.credits == params.validator_reward_credits));
        assert!(!outcome
            .validator_rewards
            .iter()
            .any(|r| r.validator == test_user(4)));
    }

    #[test]
    fn rejection_penalizes_actor_and_rewards_rejecters() {
        let params = ProtocolParams::standard();
        let block = help_block(test_user(1));
        let validations = vec![
            validation(2, ValidationDecision::Reject, 30),
            validation(3, ValidationDecision::Approve, 5),
        ];

        let outcome = compute_outcome(&block, BlockStatus::Rejected, &validations, &params);

        assert_eq!(
            outcome.actor_effect,
            ActorEffect::Penalized {
                credits: params.rejection_penalty_credits
            }
        );
        assert_eq!(outcome.validator_rewards.len(), 1);
        assert_eq!(outcome.validator_rewards[0].validator, test_user(2));
    }

    #[test]
    fn missing_hours_defaults_to_zero() {
        let params = ProtocolParams::standard();
        let mut block = help_block(test_user(1));
        block.content = serde_json::json!({});

        let outcome = compute_outcome(&block, BlockStatus::Approved, &[], &params);
        assert_eq!(outcome.actor_effect, ActorEffect::HelpCounted { hours: 0 });
    }

    #[test]
    fn approved_non_help_has_no_actor_effect() {
        let params = ProtocolParams::standard();
        let mut block = help_block(test_user(1));
        block.kind = BlockKind::Dispute;

        let outcome = compute_outcome(&block, BlockStatus::Approved, &[], &params);
        assert_eq!(outcome.actor_effect, ActorEffect::None);
    }
}
