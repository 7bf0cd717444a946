//! Reputation scoring for the Proof-of-Help engine.
//!
//! Everything here is a pure function of a profile snapshot and the current
//! time. Scores are recomputed on demand by every gated operation; nothing
//! is cached across requests, because the inputs are mutable counters.

pub mod score;

pub use score::{jury_weight, reputation, user_work, validation_stake, validator_level};
