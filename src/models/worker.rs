//! Worker model.
//!
//! Workers are the staff who perform inspections. Each worker carries the
//! set of tasks they are certified for; nothing outside that set may be
//! assigned to them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A worker with a capability set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique worker identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// IDs of the tasks this worker is certified to perform.
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
}

impl Worker {
    /// Creates a worker with no capabilities.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capabilities: BTreeSet::new(),
        }
    }

    /// Sets the worker name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a single capability.
    pub fn with_capability(mut self, task_id: impl Into<String>) -> Self {
        self.capabilities.insert(task_id.into());
        self
    }

    /// Adds several capabilities.
    pub fn with_capabilities<I, S>(mut self, task_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities
            .extend(task_ids.into_iter().map(Into::into));
        self
    }

    /// Whether this worker is certified for the given task.
    pub fn can_perform(&self, task_id: &str) -> bool {
        self.capabilities.contains(task_id)
    }
}
