//! Audit log collaborator interface.

use crate::StoreError;
use poh_types::{Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// An append-only record of a privileged mutation, with before/after
/// snapshots of whatever was changed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Machine-readable action, e.g. `"community_update"`.
    pub action: String,
    /// The user on whose behalf the mutation ran, where one exists.
    pub actor: Option<UserId>,
    /// What was mutated, e.g. a community id or a rule name.
    pub subject: String,
    pub before: serde_json::Value,
    pub after: serde_json::Value,
    pub at: Timestamp,
}

/// Trait for the append-only audit log. Unlike notifications, audit appends
/// are load-bearing: a failed append fails the surrounding execution step.
pub trait AuditLog: Send + Sync {
    fn append(&self, entry: AuditEntry) -> Result<(), StoreError>;
}
