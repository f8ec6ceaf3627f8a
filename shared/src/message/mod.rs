//! Sync message payloads
//!
//! Every persisted change re-publishes the full current snapshot of the
//! affected collection to all subscribers (not a diff). Versions increase
//! monotonically per resource so clients can discard stale events and
//! reconcile against in-flight local edits.

use serde::{Deserialize, Serialize};

/// Full-snapshot change notification for one collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncEvent {
    /// Collection name: "menu", "orders", "categories", "announcements"
    pub resource: String,
    /// Monotonically increasing per resource
    pub version: u64,
    /// Mutation that triggered the publish: "created", "updated",
    /// "deleted", "cleared"; "snapshot" on initial subscription
    pub action: String,
    /// Full current snapshot of the collection
    pub data: serde_json::Value,
}

impl SyncEvent {
    pub fn new(
        resource: impl Into<String>,
        version: u64,
        action: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            resource: resource.into(),
            version,
            action: action.into(),
            data,
        }
    }
}
