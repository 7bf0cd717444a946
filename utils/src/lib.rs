//! Shared utilities for the Proof-of-Help engine.

pub mod logging;

pub use logging::init_tracing;
