//! Jury moderation for reported content.
//!
//! A report opens a case with a fixed quorum and a 24-hour deadline. A
//! reputation-selected jury casts weighted KEEP/REMOVE/WARN votes; at
//! quorum the heaviest decision executes against the content store. Cases
//! that outlive their deadline under quorum are closed by the expiry sweep
//! on the plurality of the votes they did collect.

pub mod engine;
pub mod error;
pub mod jury;

pub use engine::{tally, ModerationEngine};
pub use error::ModerationError;
pub use jury::select_jury;
