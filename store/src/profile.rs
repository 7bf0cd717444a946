//! User profile storage trait.
//!
//! Profiles are owned by the identity collaborator. The engine reads them to
//! score reputation and mutates the counters it is responsible for, always
//! through the named increment operations below, never read-modify-write.

use crate::StoreError;
use poh_types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// The profile attributes the engine reads and the counters it maintains.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: UserId,
    /// Completed help actions given to others.
    pub help_given: u64,
    /// Completed help actions received.
    pub help_received: u64,
    /// Total hours of completed help shared.
    pub hours_shared: u64,
    pub badge_count: u64,
    pub connection_count: u64,
    pub joined_at: Timestamp,
    pub last_active_at: Timestamp,
    /// Neighborhood tag used for witness selection; not every user has one.
    pub neighborhood: Option<String>,
    /// Platform credit balance. Signed: penalties may drive it negative.
    pub credits: i64,
    /// Remaining quadratic-voting budget.
    pub vote_credits: u64,
    /// Validations this user cast on blocks that finalized their way.
    pub successful_validations: u64,
}

impl UserProfile {
    /// A fresh profile with all counters at zero.
    pub fn new(user: UserId, joined_at: Timestamp) -> Self {
        Self {
            user,
            help_given: 0,
            help_received: 0,
            hours_shared: 0,
            badge_count: 0,
            connection_count: 0,
            joined_at,
            last_active_at: joined_at,
            neighborhood: None,
            credits: 0,
            vote_credits: 0,
            successful_validations: 0,
        }
    }

    /// Whether the user was active within the trailing window.
    pub fn active_within(&self, window_secs: u64, now: Timestamp) -> bool {
        self.last_active_at.elapsed_since(now) < window_secs
    }
}

/// Outcome of a conditional vote-credit debit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreditDebit {
    /// The debit applied; `remaining` is the balance afterwards.
    Applied { remaining: u64 },
    /// The balance was too low; nothing changed.
    Insufficient { available: u64 },
}

/// Trait for profile reads and counter mutations.
pub trait ProfileStore: Send + Sync {
    fn get_profile(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError>;
    fn put_profile(&self, profile: &UserProfile) -> Result<(), StoreError>;
    fn iter_profiles(&self) -> Result<Vec<UserProfile>, StoreError>;

    fn add_help_given(&self, user: &UserId, amount: u64) -> Result<(), StoreError>;
    fn add_hours_shared(&self, user: &UserId, amount: u64) -> Result<(), StoreError>;
    fn add_credits(&self, user: &UserId, delta: i64) -> Result<(), StoreError>;
    fn add_vote_credits(&self, user: &UserId, amount: u64) -> Result<(), StoreError>;
    fn add_successful_validations(&self, user: &UserId, amount: u64) -> Result<(), StoreError>;

    /// Debit the quadratic-voting budget, conditionally: the debit applies
    /// only when the balance covers `cost`, as a single atomic operation.
    fn debit_vote_credits(&self, user: &UserId, cost: u64) -> Result<CreditDebit, StoreError>;

    /// Count users active since the given instant.
    fn active_user_count(&self, active_since: Timestamp) -> Result<u64, StoreError> {
        Ok(self
            .iter_profiles()?
            .into_iter()
            .filter(|p| p.last_active_at >= active_since)
            .count() as u64)
    }
}
