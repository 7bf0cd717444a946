//! The governance engine: proposal lifecycle and quadratic voting.

use std::sync::Arc;

use crate::error::GovernanceError;
use crate::execution;
use poh_ledger::TrustLedger;
use poh_reputation::reputation;
use poh_store::{
    AuditLog, ContentStore, CreditDebit, Event, EventSink, Notification, NotificationSink,
    ProfileStore, Proposal, ProposalAction, ProposalStore, ProposalVote, RuleStore,
};
use poh_types::{BlockKind, ProposalId, ProposalStatus, Timestamp, UserId};

/// Coordinates proposals from authoring through execution.
pub struct GovernanceEngine {
    ledger: Arc<TrustLedger>,
    pub(crate) proposals: Arc<dyn ProposalStore>,
    profiles: Arc<dyn ProfileStore>,
    content: Arc<dyn ContentStore>,
    rules: Arc<dyn RuleStore>,
    audit: Arc<dyn AuditLog>,
    pub(crate) notifier: Arc<dyn NotificationSink>,
    events: Arc<dyn EventSink>,
}

impl GovernanceEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        ledger: Arc<TrustLedger>,
        proposals: Arc<dyn ProposalStore>,
        profiles: Arc<dyn ProfileStore>,
        content: Arc<dyn ContentStore>,
        rules: Arc<dyn RuleStore>,
        audit: Arc<dyn AuditLog>,
        notifier: Arc<dyn NotificationSink>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            ledger,
            proposals,
            profiles,
            content,
            rules,
            audit,
            notifier,
            events,
        }
    }

    /// Author a proposal.
    ///
    /// Requires the configured minimum reputation, then writes the
    /// provenance trust block, which applies its own work and mining gates.
    /// The proposal opens in Discussion with both deadlines fixed now.
    pub fn create_proposal(
        &self,
        author: &UserId,
        title: &str,
        description: &str,
        action: ProposalAction,
        now: Timestamp,
    ) -> Result<Proposal, GovernanceError> {
        let params = self.rules.params()?;
        let profile = self.profiles.get_profile(author)?;
        let have = reputation(profile.as_ref(), now);
        if have < params.min_author_reputation {
            return Err(GovernanceError::InsufficientReputation {
                have,
                required: params.min_author_reputation,
            });
        }

        let block = self.ledger.create_block(
            BlockKind::Proposal,
            author,
            serde_json::json!({
                "title": title,
                "proposal_kind": format!("{:?}", action.kind()),
            }),
            None,
            now,
        )?;

        let mut proposal = Proposal {
            id: ProposalId::new(0),
            block: block.hash,
            author: author.clone(),
            kind: action.kind(),
            title: title.to_string(),
            description: description.to_string(),
            action,
            status: ProposalStatus::Discussion,
            created_at: now,
            discussion_deadline: now.plus(params.discussion_window_secs),
            voting_deadline: now.plus(params.voting_window_secs),
        };
        proposal.id = self.proposals.insert_proposal(&proposal)?;

        self.events.emit(Event::ProposalCreated {
            proposal: proposal.id,
            author: author.clone(),
        });
        tracing::info!(
            proposal = %proposal.id,
            author = %author,
            kind = ?proposal.kind,
            "proposal created"
        );
        Ok(proposal)
    }

    /// Advance deadline-driven status transitions for a proposal.
    ///
    /// Deadlines are enforced lazily, on the next write that looks at the
    /// proposal: Discussion rolls into Voting after the discussion deadline,
    /// and Voting into Rejected after the voting deadline. Returns the
    /// status after any transition.
    pub fn advance(
        &self,
        id: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalStatus, GovernanceError> {
        let proposal = self
            .proposals
            .get_proposal(id)?
            .ok_or(GovernanceError::ProposalNotFound(id))?;

        if proposal.status == ProposalStatus::Discussion && now > proposal.discussion_deadline {
            self.proposals
                .transition(id, ProposalStatus::Discussion, ProposalStatus::Voting)?;
        }
        // Both deadlines may have passed since the last write; the voting
        // window closes in the same pass it opened.
        let current = self
            .proposals
            .get_proposal(id)?
            .ok_or(GovernanceError::ProposalNotFound(id))?
            .status;
        if current == ProposalStatus::Voting && now > proposal.voting_deadline {
            if self
                .proposals
                .transition(id, ProposalStatus::Voting, ProposalStatus::Rejected)?
            {
                tracing::info!(proposal = %id, "proposal rejected at deadline");
            }
        }
        Ok(self
            .proposals
            .get_proposal(id)?
            .ok_or(GovernanceError::ProposalNotFound(id))?
            .status)
    }

    /// Cast a quadratic vote: `points` costs `points * points` credits.
    ///
    /// Re-voting replaces the prior vote; only the cost difference moves on
    /// the voter's budget, so the prior cost is effectively refunded. After
    /// recording, the dynamic approval threshold is checked against the
    /// live active-user count.
    pub fn vote(
        &self,
        id: ProposalId,
        voter: &UserId,
        points: i64,
        now: Timestamp,
    ) -> Result<ProposalVote, GovernanceError> {
        let status = self.advance(id, now)?;
        let proposal = self
            .proposals
            .get_proposal(id)?
            .ok_or(GovernanceError::ProposalNotFound(id))?;
        if status != ProposalStatus::Voting {
            // A proposal the deadline just rejected reports VotingClosed,
            // anything else (Discussion, Approved, ...) NotInVoting.
            if status == ProposalStatus::Rejected && now > proposal.voting_deadline {
                return Err(GovernanceError::VotingClosed(id));
            }
            return Err(GovernanceError::ProposalNotInVoting(id));
        }

        let magnitude = points.unsigned_abs();
        let cost = magnitude.saturating_mul(magnitude);

        let prior_cost = self
            .proposals
            .votes_for_proposal(id)?
            .into_iter()
            .find(|v| &v.voter == voter)
            .map(|v| v.cost)
            .unwrap_or(0);
        if cost > prior_cost {
            match self.profiles.debit_vote_credits(voter, cost - prior_cost)? {
                CreditDebit::Applied { .. } => {}
                CreditDebit::Insufficient { available } => {
                    return Err(GovernanceError::InsufficientVoteCredits {
                        needed: cost,
                        available: available + prior_cost,
                    });
                }
            }
        } else if prior_cost > cost {
            self.profiles.add_vote_credits(voter, prior_cost - cost)?;
        }

        let vote = ProposalVote {
            proposal: id,
            voter: voter.clone(),
            points,
            cost,
            created_at: now,
        };
        self.proposals.upsert_vote(&vote)?;
        tracing::debug!(proposal = %id, voter = %voter, points, cost, "proposal vote recorded");

        self.check_approval(&proposal, now)?;
        Ok(vote)
    }

    /// Approve and execute once the summed points reach the dynamic
    /// threshold: `max(floor, 10% of users active in the trailing window)`.
    fn check_approval(&self, proposal: &Proposal, now: Timestamp) -> Result<(), GovernanceError> {
        let params = self.rules.params()?;
        let total_points: i64 = self
            .proposals
            .votes_for_proposal(proposal.id)?
            .iter()
            .map(|v| v.points)
            .sum();

        let active = self
            .profiles
            .active_user_count(Timestamp::new(
                now.as_secs().saturating_sub(params.activity_window_secs),
            ))?;
        let threshold = params
            .min_approval_threshold
            .max((active as i64 * params.active_share_bps as i64) / 10_000);
        if total_points < threshold {
            return Ok(());
        }

        if !self
            .proposals
            .transition(proposal.id, ProposalStatus::Voting, ProposalStatus::Approved)?
        {
            // A concurrent vote crossed the threshold first.
            tracing::debug!(proposal = %proposal.id, "lost approval race");
            return Ok(());
        }
        self.events.emit(Event::ProposalApproved {
            proposal: proposal.id,
        });
        tracing::info!(proposal = %proposal.id, total_points, threshold, "proposal approved");

        if !proposal.kind.auto_executes() {
            self.notify_author(
                proposal,
                "proposal_approved",
                "Your proposal was approved and awaits manual follow-up",
            );
            return Ok(());
        }

        match execution::execute(
            proposal,
            self.content.as_ref(),
            self.profiles.as_ref(),
            self.rules.as_ref(),
            self.audit.as_ref(),
            now,
        ) {
            Ok(()) => {
                self.proposals.transition(
                    proposal.id,
                    ProposalStatus::Approved,
                    ProposalStatus::Implemented,
                )?;
                self.notify_author(
                    proposal,
                    "proposal_implemented",
                    "Your proposal was approved and implemented",
                );
            }
            Err(err) => {
                // The approval stands; only the execution is reported failed.
                tracing::warn!(proposal = %proposal.id, error = %err, "proposal execution failed");
                self.notify_author(
                    proposal,
                    "proposal_execution_failed",
                    &format!("Your proposal was approved but execution failed: {err}"),
                );
            }
        }
        Ok(())
    }

    fn notify_author(&self, proposal: &Proposal, kind: &str, body: &str) {
        self.notifier.notify(Notification {
            recipient: proposal.author.clone(),
            kind: kind.into(),
            title: proposal.title.clone(),
            body: body.into(),
            data: serde_json::json!({ "proposal": proposal.id.value() }),
        });
    }
}
