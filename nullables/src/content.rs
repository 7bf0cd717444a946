//! Nullable content store: records actions, supports failure injection.

use poh_store::{ContentStore, ContentSummary, StoreError};
use poh_types::ContentRef;
use std::collections::HashMap;
use std::sync::Mutex;

/// An in-memory content collaborator that remembers what was done to it.
pub struct NullContentStore {
    summaries: Mutex<HashMap<ContentRef, ContentSummary>>,
    patched: Mutex<Vec<(ContentRef, serde_json::Value)>>,
    removed: Mutex<Vec<ContentRef>>,
    warned: Mutex<Vec<ContentRef>>,
    fail_next: Mutex<Option<String>>,
}

impl NullContentStore {
    pub fn new() -> Self {
        Self {
            summaries: Mutex::new(HashMap::new()),
            patched: Mutex::new(Vec::new()),
            removed: Mutex::new(Vec::new()),
            warned: Mutex::new(Vec::new()),
            fail_next: Mutex::new(None),
        }
    }

    /// Seed a summary for `fetch_summary` to return.
    pub fn insert_summary(&self, summary: ContentSummary) {
        self.summaries
            .lock()
            .unwrap()
            .insert(summary.content.clone(), summary);
    }

    /// Make the next call of the named operation (`"patch"`, `"remove"`,
    /// `"warn_author"`) fail with a backend error.
    pub fn fail_next(&self, operation: &str) {
        *self.fail_next.lock().unwrap() = Some(operation.to_string());
    }

    fn check_failure(&self, operation: &str) -> Result<(), StoreError> {
        let mut fail = self.fail_next.lock().unwrap();
        if fail.as_deref() == Some(operation) {
            *fail = None;
            return Err(StoreError::Backend(format!("injected {operation} failure")));
        }
        Ok(())
    }

    pub fn patched(&self) -> Vec<(ContentRef, serde_json::Value)> {
        self.patched.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<ContentRef> {
        self.removed.lock().unwrap().clone()
    }

    pub fn warned(&self) -> Vec<ContentRef> {
        self.warned.lock().unwrap().clone()
    }
}

impl Default for NullContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for NullContentStore {
    fn fetch_summary(&self, content: &ContentRef) -> Result<Option<ContentSummary>, StoreError> {
        Ok(self.summaries.lock().unwrap().get(content).cloned())
    }

    fn patch(&self, content: &ContentRef, patch: &serde_json::Value) -> Result<(), StoreError> {
        self.check_failure("patch")?;
        self.patched
            .lock()
            .unwrap()
            .push((content.clone(), patch.clone()));
        Ok(())
    }

    fn remove(&self, content: &ContentRef) -> Result<(), StoreError> {
        self.check_failure("remove")?;
        self.removed.lock().unwrap().push(content.clone());
        Ok(())
    }

    fn warn_author(&self, content: &ContentRef, _reason: &str) -> Result<(), StoreError> {
        self.check_failure("warn_author")?;
        self.warned.lock().unwrap().push(content.clone());
        Ok(())
    }
}
