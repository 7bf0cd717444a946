//! Nullable store: thread-safe in-memory storage for testing.
//!
//! One `NullStore` implements every persistence trait, standing in for the
//! single authoritative data store. Each conditional operation takes the
//! relevant collection's lock for its whole check-and-mutate, which is the
//! in-memory equivalent of the transactional conditional updates the
//! engines require.

use poh_store::{
    BlockStore, BlockValidation, CreditDebit, ModerationCase, ModerationStore, ModerationVote,
    ProfileStore, Proposal, ProposalComment, ProposalStore, ProposalVote, RuleStore, StoreError,
    TrustBlock, UserProfile, ValidationStore,
};
use poh_types::{
    BlockHash, BlockStatus, CaseId, CaseStatus, CommentId, ModerationDecision, ProposalId,
    ProposalStatus, ProtocolParams, Timestamp, UserId,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory implementation of all engine storage traits.
/// Thread-safe so finalization races can be exercised from real threads.
pub struct NullStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    chain: Mutex<Vec<TrustBlock>>,
    validations: Mutex<Vec<BlockValidation>>,
    cases: Mutex<Vec<ModerationCase>>,
    case_votes: Mutex<Vec<ModerationVote>>,
    proposals: Mutex<Vec<Proposal>>,
    proposal_votes: Mutex<Vec<ProposalVote>>,
    comments: Mutex<Vec<ProposalComment>>,
    params: Mutex<ProtocolParams>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(HashMap::new()),
            chain: Mutex::new(Vec::new()),
            validations: Mutex::new(Vec::new()),
            cases: Mutex::new(Vec::new()),
            case_votes: Mutex::new(Vec::new()),
            proposals: Mutex::new(Vec::new()),
            proposal_votes: Mutex::new(Vec::new()),
            comments: Mutex::new(Vec::new()),
            params: Mutex::new(ProtocolParams::standard()),
        }
    }

    /// Mutate a stored block in place, bypassing every integrity rule.
    /// Exists so chain-verification tests can manufacture corruption.
    pub fn tamper_block(&self, height: u64, tamper: impl FnOnce(&mut TrustBlock)) {
        let mut chain = self.chain.lock().unwrap();
        let block = chain
            .iter_mut()
            .find(|b| b.height == height)
            .expect("tamper_block: no block at that height");
        tamper(block);
    }

    fn with_profile<T>(
        &self,
        user: &UserId,
        apply: impl FnOnce(&mut UserProfile) -> T,
    ) -> Result<T, StoreError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(user)
            .ok_or_else(|| StoreError::NotFound(user.to_string()))?;
        Ok(apply(profile))
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileStore for NullStore {
    fn get_profile(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(user).cloned())
    }

    fn put_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user.clone(), profile.clone());
        Ok(())
    }

    fn iter_profiles(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.profiles.lock().unwrap().values().cloned().collect())
    }

    fn add_help_given(&self, user: &UserId, amount: u64) -> Result<(), StoreError> {
        self.with_profile(user, |p| p.help_given += amount)
    }

    fn add_hours_shared(&self, user: &UserId, amount: u64) -> Result<(), StoreError> {
        self.with_profile(user, |p| p.hours_shared += amount)
    }

    fn add_credits(&self, user: &UserId, delta: i64) -> Result<(), StoreError> {
        self.with_profile(user, |p| p.credits += delta)
    }

    fn add_vote_credits(&self, user: &UserId, amount: u64) -> Result<(), StoreError> {
        self.with_profile(user, |p| p.vote_credits += amount)
    }

    fn add_successful_validations(&self, user: &UserId, amount: u64) -> Result<(), StoreError> {
        self.with_profile(user, |p| p.successful_validations += amount)
    }

    fn debit_vote_credits(&self, user: &UserId, cost: u64) -> Result<CreditDebit, StoreError> {
        self.with_profile(user, |p| {
            if p.vote_credits < cost {
                CreditDebit::Insufficient {
                    available: p.vote_credits,
                }
            } else {
                p.vote_credits -= cost;
                CreditDebit::Applied {
                    remaining: p.vote_credits,
                }
            }
        })
    }
}

impl BlockStore for NullStore {
    fn append_block(&self, block: &TrustBlock) -> Result<(), StoreError> {
        let mut chain = self.chain.lock().unwrap();
        let (expected_height, expected_previous) = match chain.last() {
            Some(head) => (head.height + 1, head.hash),
            None => (1, BlockHash::ZERO),
        };
        if block.height != expected_height || block.previous != expected_previous {
            return Err(StoreError::Duplicate(format!(
                "height {} is not the next append slot",
                block.height
            )));
        }
        chain.push(block.clone());
        Ok(())
    }

    fn get_block(&self, hash: &BlockHash) -> Result<Option<TrustBlock>, StoreError> {
        Ok(self
            .chain
            .lock()
            .unwrap()
            .iter()
            .find(|b| &b.hash == hash)
            .cloned())
    }

    fn head(&self) -> Result<Option<(u64, BlockHash)>, StoreError> {
        Ok(self
            .chain
            .lock()
            .unwrap()
            .last()
            .map(|b| (b.height, b.hash)))
    }

    fn count_created_since(&self, since: Timestamp) -> Result<u64, StoreError> {
        Ok(self
            .chain
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.created_at >= since)
            .count() as u64)
    }

    fn finalize(&self, hash: &BlockHash, new_status: BlockStatus) -> Result<bool, StoreError> {
        let mut chain = self.chain.lock().unwrap();
        let block = chain
            .iter_mut()
            .find(|b| &b.hash == hash)
            .ok_or_else(|| StoreError::NotFound(hash.to_string()))?;
        if block.status != BlockStatus::Pending {
            return Ok(false);
        }
        block.status = new_status;
        Ok(true)
    }

    fn iter_chain(&self) -> Result<Vec<TrustBlock>, StoreError> {
        Ok(self.chain.lock().unwrap().clone())
    }
}

impl ValidationStore for NullStore {
    fn record_validation(&self, validation: &BlockValidation) -> Result<(), StoreError> {
        let mut validations = self.validations.lock().unwrap();
        if validations
            .iter()
            .any(|v| v.block == validation.block && v.validator == validation.validator)
        {
            return Err(StoreError::Duplicate(format!(
                "validation by {} on {}",
                validation.validator, validation.block
            )));
        }
        validations.push(validation.clone());
        Ok(())
    }

    fn validations_for(&self, block: &BlockHash) -> Result<Vec<BlockValidation>, StoreError> {
        Ok(self
            .validations
            .lock()
            .unwrap()
            .iter()
            .filter(|v| &v.block == block)
            .cloned()
            .collect())
    }
}

impl ModerationStore for NullStore {
    fn open_case(&self, case: &ModerationCase) -> Result<CaseId, StoreError> {
        let mut cases = self.cases.lock().unwrap();
        let id = CaseId::new(cases.len() as u64 + 1);
        let mut stored = case.clone();
        stored.id = id;
        cases.push(stored);
        Ok(id)
    }

    fn get_case(&self, id: CaseId) -> Result<Option<ModerationCase>, StoreError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn record_vote(&self, vote: &ModerationVote) -> Result<(), StoreError> {
        let mut votes = self.case_votes.lock().unwrap();
        if votes
            .iter()
            .any(|v| v.case == vote.case && v.voter == vote.voter)
        {
            return Err(StoreError::Duplicate(format!(
                "vote by {} on case {}",
                vote.voter, vote.case
            )));
        }
        votes.push(vote.clone());
        Ok(())
    }

    fn votes_for_case(&self, id: CaseId) -> Result<Vec<ModerationVote>, StoreError> {
        Ok(self
            .case_votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.case == id)
            .cloned()
            .collect())
    }

    fn execute_case(
        &self,
        id: CaseId,
        decision: ModerationDecision,
        now: Timestamp,
    ) -> Result<bool, StoreError> {
        let mut cases = self.cases.lock().unwrap();
        let case = cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if case.status != CaseStatus::Voting {
            return Ok(false);
        }
        case.status = CaseStatus::Executed;
        case.final_decision = Some(decision);
        case.executed_at = Some(now);
        Ok(true)
    }

    fn expired_open_cases(&self, now: Timestamp) -> Result<Vec<ModerationCase>, StoreError> {
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.status == CaseStatus::Voting && now > c.deadline)
            .cloned()
            .collect())
    }
}

impl ProposalStore for NullStore {
    fn insert_proposal(&self, proposal: &Proposal) -> Result<ProposalId, StoreError> {
        let mut proposals = self.proposals.lock().unwrap();
        let id = ProposalId::new(proposals.len() as u64 + 1);
        let mut stored = proposal.clone();
        stored.id = id;
        proposals.push(stored);
        Ok(id)
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Proposal>, StoreError> {
        Ok(self
            .proposals
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    fn transition(
        &self,
        id: ProposalId,
        from: ProposalStatus,
        to: ProposalStatus,
    ) -> Result<bool, StoreError> {
        let mut proposals = self.proposals.lock().unwrap();
        let proposal = proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if proposal.status != from {
            return Ok(false);
        }
        proposal.status = to;
        Ok(true)
    }

    fn upsert_vote(&self, vote: &ProposalVote) -> Result<Option<ProposalVote>, StoreError> {
        let mut votes = self.proposal_votes.lock().unwrap();
        let prior = votes
            .iter()
            .position(|v| v.proposal == vote.proposal && v.voter == vote.voter);
        match prior {
            Some(index) => {
                let replaced = votes[index].clone();
                votes[index] = vote.clone();
                Ok(Some(replaced))
            }
            None => {
                votes.push(vote.clone());
                Ok(None)
            }
        }
    }

    fn votes_for_proposal(&self, id: ProposalId) -> Result<Vec<ProposalVote>, StoreError> {
        Ok(self
            .proposal_votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.proposal == id)
            .cloned()
            .collect())
    }

    fn add_comment(&self, comment: &ProposalComment) -> Result<CommentId, StoreError> {
        let mut comments = self.comments.lock().unwrap();
        let id = CommentId::new(comments.len() as u64 + 1);
        let mut stored = comment.clone();
        stored.id = id;
        comments.push(stored);
        Ok(id)
    }

    fn comments_for(&self, id: ProposalId) -> Result<Vec<ProposalComment>, StoreError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.proposal == id)
            .cloned()
            .collect())
    }

    fn get_comment(&self, id: CommentId) -> Result<Option<ProposalComment>, StoreError> {
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }
}

impl RuleStore for NullStore {
    fn params(&self) -> Result<ProtocolParams, StoreError> {
        Ok(self.params.lock().unwrap().clone())
    }

    fn put_params(&self, params: &ProtocolParams) -> Result<(), StoreError> {
        *self.params.lock().unwrap() = params.clone();
        Ok(())
    }
}
