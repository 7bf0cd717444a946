//! The append-only trust ledger.
//!
//! Every claimed action (help given, proposal, validation, dispute) enters
//! the platform as a trust block: work-gated, mined against the current
//! demand difficulty, chained to the previous block by hash, and persisted
//! Pending until validation consensus finalizes it.

pub mod engine;
pub mod error;
pub mod verify;
pub mod witnesses;

pub use engine::{signing_root, TrustLedger};
pub use error::LedgerError;
pub use verify::verify_chain;
pub use witnesses::select_witnesses;
