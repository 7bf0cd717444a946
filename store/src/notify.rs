//! Notification collaborator interface.

use poh_types::UserId;
use serde::{Deserialize, Serialize};

/// A notification handed to the delivery collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: UserId,
    /// Machine-readable kind, e.g. `"validation_requested"`.
    pub kind: String,
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
}

/// Fire-and-forget delivery. Implementations swallow their own failures;
/// a lost notification never fails the triggering write.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}
