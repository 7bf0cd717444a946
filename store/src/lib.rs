//! Data-model records and abstract storage traits for the Proof-of-Help engine.
//!
//! There is one authoritative data store; these traits are its surface. All
//! mutual exclusion goes through the conditional operations defined here
//! (status-guarded transitions, per-actor vote uniqueness, conditional
//! credit debits) rather than in-memory locks. Collaborator subsystems the
//! engine consumes but does not own (profiles, content, notifications,
//! audit, events) get narrow traits of their own.

pub mod audit;
pub mod block;
pub mod content;
pub mod error;
pub mod event;
pub mod moderation;
pub mod notify;
pub mod profile;
pub mod proposal;
pub mod rules;
pub mod validation;

pub use audit::{AuditEntry, AuditLog};
pub use block::{BlockStore, TrustBlock};
pub use content::{ContentStore, ContentSummary};
pub use error::StoreError;
pub use event::{Event, EventSink};
pub use moderation::{ModerationCase, ModerationStore, ModerationVote};
pub use notify::{Notification, NotificationSink};
pub use profile::{CreditDebit, ProfileStore, UserProfile};
pub use proposal::{Proposal, ProposalAction, ProposalComment, ProposalStore, ProposalVote};
pub use rules::RuleStore;
pub use validation::{BlockValidation, ValidationStore};
