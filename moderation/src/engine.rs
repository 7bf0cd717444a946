//! The moderation engine: cases, weighted votes, execution.

use std::sync::Arc;

use crate::error::ModerationError;
use crate::jury::select_jury;
use poh_reputation::{jury_weight, reputation};
use poh_store::{
    ContentStore, Event, EventSink, ModerationCase, ModerationStore, ModerationVote,
    Notification, NotificationSink, ProfileStore, RuleStore, StoreError,
};
use poh_types::{
    blake2b_256_multi, CaseId, CaseStatus, ContentRef, ModerationDecision, Timestamp, UserId,
};

/// Weighted tally of a case's votes.
///
/// Sums the frozen weights per decision and picks the heaviest, checking
/// KEEP, REMOVE, WARN in that order: a later decision only wins on strictly
/// greater weight. No votes at all tallies as KEEP.
pub fn tally(votes: &[ModerationVote]) -> ModerationDecision {
    let weight_of = |decision: ModerationDecision| -> u64 {
        votes
            .iter()
            .filter(|v| v.decision == decision)
            .map(|v| v.weight)
            .sum()
    };

    let mut winner = ModerationDecision::Keep;
    let mut winner_weight = weight_of(winner);
    for decision in &ModerationDecision::TALLY_ORDER[1..] {
        let weight = weight_of(*decision);
        if weight > winner_weight {
            winner = *decision;
            winner_weight = weight;
        }
    }
    winner
}

/// Coordinates moderation cases from report to executed decision.
pub struct ModerationEngine {
    cases: Arc<dyn ModerationStore>,
    profiles: Arc<dyn ProfileStore>,
    content: Arc<dyn ContentStore>,
    rules: Arc<dyn RuleStore>,
    notifier: Arc<dyn NotificationSink>,
    events: Arc<dyn EventSink>,
}

impl ModerationEngine {
    pub fn new(
        cases: Arc<dyn ModerationStore>,
        profiles: Arc<dyn ProfileStore>,
        content: Arc<dyn ContentStore>,
        rules: Arc<dyn RuleStore>,
        notifier: Arc<dyn NotificationSink>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            cases,
            profiles,
            content,
            rules,
            notifier,
            events,
        }
    }

    /// Open a case for reported content and summon its jury.
    pub fn open_case(
        &self,
        content: ContentRef,
        reason: &str,
        reporter: Option<UserId>,
        now: Timestamp,
    ) -> Result<ModerationCase, ModerationError> {
        let params = self.rules.params()?;
        let mut case = ModerationCase {
            id: CaseId::new(0),
            content: content.clone(),
            report_reason: reason.to_string(),
            reporter,
            status: CaseStatus::Voting,
            quorum: params.moderation_quorum,
            opened_at: now,
            deadline: now.plus(params.moderation_window_secs),
            final_decision: None,
            executed_at: None,
        };
        case.id = self.cases.open_case(&case)?;

        let seed = blake2b_256_multi(&[
            &case.id.value().to_le_bytes(),
            content.id.as_str().as_bytes(),
        ]);
        let jury = select_jury(self.profiles.as_ref(), &seed, now)?;
        for juror in &jury {
            self.notifier.notify(Notification {
                recipient: juror.clone(),
                kind: "jury_duty".into(),
                title: "Moderation case needs your vote".into(),
                body: format!("Reported content: {reason}"),
                data: serde_json::json!({
                    "case": case.id.value(),
                    "deadline": case.deadline.as_secs(),
                }),
            });
        }

        self.events.emit(Event::ModerationStarted {
            case: case.id,
            content,
        });
        tracing::info!(case = %case.id, jurors = jury.len(), "moderation case opened");
        Ok(case)
    }

    /// Record a juror's weighted vote; executes the case at quorum.
    ///
    /// The weight is the juror's reputation over ten, capped, frozen into
    /// the vote. The deadline is checked lazily here, not by a timer.
    pub fn vote(
        &self,
        case_id: CaseId,
        voter: &UserId,
        decision: ModerationDecision,
        reason: Option<String>,
        now: Timestamp,
    ) -> Result<ModerationVote, ModerationError> {
        let case = self
            .cases
            .get_case(case_id)?
            .ok_or(ModerationError::CaseNotFound(case_id))?;
        if now > case.deadline {
            return Err(ModerationError::VotingClosed(case_id));
        }
        if case.status != CaseStatus::Voting {
            return Err(ModerationError::CaseNotInVoting(case_id));
        }

        let params = self.rules.params()?;
        let profile = self.profiles.get_profile(voter)?;
        let vote = ModerationVote {
            case: case_id,
            voter: voter.clone(),
            decision,
            reason,
            weight: jury_weight(reputation(profile.as_ref(), now), params.jury_weight_cap),
            created_at: now,
        };
        self.cases.record_vote(&vote).map_err(|e| match e {
            StoreError::Duplicate(_) => ModerationError::AlreadyVoted {
                case: case_id,
                voter: voter.clone(),
            },
            other => ModerationError::Store(other),
        })?;
        tracing::debug!(case = %case_id, voter = %voter, ?decision, weight = vote.weight, "moderation vote recorded");

        let votes = self.cases.votes_for_case(case_id)?;
        if votes.len() as u32 >= case.quorum {
            self.execute(&case, &votes, now)?;
        }
        Ok(vote)
    }

    /// Force-execute expired cases that never reached quorum.
    ///
    /// Runs the same tally over whatever votes were collected; a case with
    /// no votes closes as KEEP. Returns the decisions taken.
    pub fn sweep_expired(
        &self,
        now: Timestamp,
    ) -> Result<Vec<(CaseId, ModerationDecision)>, ModerationError> {
        let mut executed = Vec::new();
        for case in self.cases.expired_open_cases(now)? {
            let votes = self.cases.votes_for_case(case.id)?;
            if self.execute(&case, &votes, now)? {
                let decision = tally(&votes);
                tracing::info!(case = %case.id, ?decision, votes = votes.len(), "expired case force-executed");
                executed.push((case.id, decision));
            }
        }
        Ok(executed)
    }

    /// Tally, transition, apply the decision, reward the winning jurors.
    /// Returns whether this call performed the execution.
    fn execute(
        &self,
        case: &ModerationCase,
        votes: &[ModerationVote],
        now: Timestamp,
    ) -> Result<bool, ModerationError> {
        let decision = tally(votes);
        if !self.cases.execute_case(case.id, decision, now)? {
            // A concurrent voter crossed quorum first.
            tracing::debug!(case = %case.id, "lost execution race");
            return Ok(false);
        }

        match decision {
            ModerationDecision::Remove => self.content.remove(&case.content)?,
            ModerationDecision::Warn => self
                .content
                .warn_author(&case.content, &case.report_reason)?,
            ModerationDecision::Keep => {}
        }

        let params = self.rules.params()?;
        for vote in votes.iter().filter(|v| v.decision == decision) {
            self.profiles
                .add_credits(&vote.voter, params.juror_reward_credits as i64)?;
        }

        self.events.emit(Event::ModerationExecuted {
            case: case.id,
            decision,
        });
        tracing::info!(case = %case.id, ?decision, "moderation case executed");
        Ok(true)
    }
}
