//! Fundamental types for the Proof-of-Help engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: user and record identifiers, block hashes and digest helpers,
//! timestamps, status enums, content references, and protocol parameters.

pub mod hash;
pub mod id;
pub mod params;
pub mod state;
pub mod time;

pub use hash::{blake2b_256, blake2b_256_multi, BlockHash};
pub use id::{CaseId, CommentId, ContentId, ProposalId, UserId};
pub use params::{GovernableRule, ProtocolParams};
pub use state::{
    BlockKind, BlockStatus, CaseStatus, ContentKind, ContentRef, ModerationDecision,
    ProposalKind, ProposalStatus, ValidationDecision,
};
pub use time::Timestamp;
