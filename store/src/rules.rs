//! Governance parameter storage.
//!
//! RULE_CHANGE proposals patch the live [`ProtocolParams`] through this
//! trait, so every reader sees the amended values on its next query.

use crate::StoreError;
use poh_types::ProtocolParams;

/// Trait for the single authoritative parameter set.
pub trait RuleStore: Send + Sync {
    fn params(&self) -> Result<ProtocolParams, StoreError>;
    fn put_params(&self, params: &ProtocolParams) -> Result<(), StoreError>;
}
