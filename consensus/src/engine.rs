//! The validation consensus engine.

use std::sync::Arc;

use crate::error::ConsensusError;
use crate::outcomes::{compute_outcome, ActorEffect};
use crate::params::ConsensusThresholds;
use poh_reputation::{validation_stake, validator_level};
use poh_store::{
    BlockStore, BlockValidation, Event, EventSink, ProfileStore, RuleStore, StoreError,
    ValidationStore,
};
use poh_types::{BlockHash, BlockStatus, Timestamp, UserId, ValidationDecision};

/// Collects stake-weighted validations and finalizes blocks exactly once.
pub struct ValidationConsensus {
    blocks: Arc<dyn BlockStore>,
    validations: Arc<dyn ValidationStore>,
    profiles: Arc<dyn ProfileStore>,
    rules: Arc<dyn RuleStore>,
    events: Arc<dyn EventSink>,
    thresholds: ConsensusThresholds,
}

impl ValidationConsensus {
    pub fn new(
        blocks: Arc<dyn BlockStore>,
        validations: Arc<dyn ValidationStore>,
        profiles: Arc<dyn ProfileStore>,
        rules: Arc<dyn RuleStore>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            blocks,
            validations,
            profiles,
            rules,
            events,
            thresholds: ConsensusThresholds::standard(),
        }
    }

    /// Record a validator's vote on a pending block, then run the
    /// consensus check.
    ///
    /// The stake is computed from the validator's profile here and frozen
    /// into the record. When the vote count reaches the block kind's
    /// threshold and one side holds a strict stake supermajority, the block
    /// finalizes; the store-guarded transition makes sure concurrent voters
    /// finalize it exactly once.
    pub fn validate_block(
        &self,
        block_hash: &BlockHash,
        validator: &UserId,
        decision: ValidationDecision,
        reason: Option<String>,
        now: Timestamp,
    ) -> Result<BlockValidation, ConsensusError> {
        let profile = self
            .profiles
            .get_profile(validator)?
            .ok_or_else(|| ConsensusError::ValidatorNotFound(validator.clone()))?;

        let block = self
            .blocks
            .get_block(block_hash)?
            .ok_or_else(|| ConsensusError::BlockNotFound(*block_hash))?;
        if block.status.is_final() {
            return Err(ConsensusError::BlockAlreadyFinalized(*block_hash));
        }

        let have = validator_level(&profile);
        let required = self.thresholds.required_level_for(block.kind);
        if have < required {
            return Err(ConsensusError::InsufficientValidatorLevel { have, required });
        }

        let validation = BlockValidation {
            block: *block_hash,
            validator: validator.clone(),
            decision,
            reason,
            stake: validation_stake(&profile),
            created_at: now,
        };
        self.validations.record_validation(&validation).map_err(|e| match e {
            StoreError::Duplicate(_) => ConsensusError::AlreadyValidated {
                block: *block_hash,
                validator: validator.clone(),
            },
            other => ConsensusError::Store(other),
        })?;

        self.events.emit(Event::BlockValidated {
            hash: *block_hash,
            validator: validator.clone(),
            decision,
        });
        tracing::debug!(
            block = %block_hash,
            validator = %validator,
            ?decision,
            stake = validation.stake,
            "validation recorded"
        );

        self.run_consensus_check(block_hash)?;
        Ok(validation)
    }

    /// Tally recorded validations and finalize if one side holds a strict
    /// stake supermajority.
    fn run_consensus_check(&self, block_hash: &BlockHash) -> Result<(), ConsensusError> {
        let block = self
            .blocks
            .get_block(block_hash)?
            .ok_or_else(|| ConsensusError::BlockNotFound(*block_hash))?;
        if block.status.is_final() {
            return Ok(());
        }

        let validations = self.validations.validations_for(block_hash)?;
        let required = self.thresholds.required_validations_for(block.kind);
        if (validations.len() as u32) < required {
            return Ok(());
        }

        let total: u64 = validations.iter().map(|v| v.stake).sum();
        let approval: u64 = validations
            .iter()
            .filter(|v| v.decision == ValidationDecision::Approve)
            .map(|v| v.stake)
            .sum();
        let rejection = total - approval;

        let params = self.rules.params()?;
        let bps = params.supermajority_bps as u128;
        let status = if approval as u128 * 10_000 > total as u128 * bps {
            BlockStatus::Approved
        } else if rejection as u128 * 10_000 > total as u128 * bps {
            BlockStatus::Rejected
        } else {
            // No supermajority yet; wait for more validators.
            return Ok(());
        };

        if !self.blocks.finalize(block_hash, status)? {
            // Another voter crossed the threshold concurrently and won.
            tracing::debug!(block = %block_hash, "lost finalization race");
            return Ok(());
        }

        let outcome = compute_outcome(&block, status, &validations, &params);
        match outcome.actor_effect {
            ActorEffect::HelpCounted { hours } => {
                self.profiles.add_help_given(&outcome.actor, 1)?;
                if hours > 0 {
                    self.profiles.add_hours_shared(&outcome.actor, hours)?;
                }
            }
            ActorEffect::Penalized { credits } => {
                self.profiles.add_credits(&outcome.actor, -(credits as i64))?;
            }
            ActorEffect::None => {}
        }
        for reward in &outcome.validator_rewards {
            self.profiles.add_credits(&reward.validator, reward.credits as i64)?;
            self.profiles
                .add_vote_credits(&reward.validator, reward.vote_credits)?;
            self.profiles
                .add_successful_validations(&reward.validator, 1)?;
        }

        self.events.emit(Event::BlockFinalized {
            hash: *block_hash,
            status,
        });
        tracing::info!(
            block = %block_hash,
            ?status,
            approval_stake = approval,
            total_stake = total,
            "block finalized"
        );
        Ok(())
    }
}
