//! Nullable collaborator sinks: notifications, audit log, event bus.

use poh_store::{AuditEntry, AuditLog, Event, EventSink, Notification, NotificationSink, StoreError};
use std::sync::Mutex;

/// Captures notifications instead of delivering them.
pub struct NullNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl NullNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for NullNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

/// Captures audit entries in order.
pub struct NullAuditLog {
    entries: Mutex<Vec<AuditEntry>>,
}

impl NullAuditLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries.lock().unwrap().clone()
    }
}

impl Default for NullAuditLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditLog for NullAuditLog {
    fn append(&self, entry: AuditEntry) -> Result<(), StoreError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

/// Captures emitted events in order.
pub struct NullEventBus {
    events: Mutex<Vec<Event>>,
}

impl NullEventBus {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }
}

impl Default for NullEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullEventBus {
    fn emit(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}
