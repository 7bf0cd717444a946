//! Proposal governance with quadratic voting.
//!
//! Authoring is reputation-gated and leaves a provenance block in the trust
//! ledger. Voting is quadratic: casting n points costs n squared from a
//! bounded per-user budget. Approval uses a dynamic threshold derived from
//! the live active-user count; approved proposals execute automatically
//! against the collaborator subsystems, and an execution failure never
//! silently loses the approval.

pub mod comments;
pub mod engine;
pub mod error;
pub mod execution;

pub use engine::GovernanceEngine;
pub use error::GovernanceError;
