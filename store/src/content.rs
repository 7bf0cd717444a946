//! Content collaborator interface.
//!
//! Moderation and proposal execution act on platform content they do not
//! own. One capability set covers every content kind, keyed by
//! [`ContentRef`], instead of a per-kind switch at each call site.

use crate::StoreError;
use poh_types::{ContentRef, UserId};
use serde::{Deserialize, Serialize};

/// A read-only snapshot of collaborator-owned content.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentSummary {
    pub content: ContentRef,
    pub author: Option<UserId>,
    pub title: Option<String>,
    /// Raw field snapshot, used for audit before-images.
    pub snapshot: serde_json::Value,
}

/// Trait for the content store.
pub trait ContentStore: Send + Sync {
    fn fetch_summary(&self, content: &ContentRef) -> Result<Option<ContentSummary>, StoreError>;

    /// Apply a field-level patch.
    fn patch(&self, content: &ContentRef, patch: &serde_json::Value) -> Result<(), StoreError>;

    /// Delete or cancel the content. For communities this includes
    /// detaching all members first.
    fn remove(&self, content: &ContentRef) -> Result<(), StoreError>;

    /// Notify the content's author of a moderation warning.
    fn warn_author(&self, content: &ContentRef, reason: &str) -> Result<(), StoreError>;
}
