//! Task (inspection) model.
//!
//! A task is a recurring inspection that must be performed once on every
//! day it is required, by a single certified worker.

use serde::{Deserialize, Serialize};

/// An inspection task with a fixed duration.
///
/// # Time Representation
/// Durations are whole minutes. Negative values are representable so that
/// malformed input can be reported by validation instead of by the type
/// system; the planner never sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Time needed to perform the inspection (minutes).
    pub duration_min: i64,
}

impl Task {
    /// Creates a new task with the given ID and duration.
    pub fn new(id: impl Into<String>, duration_min: i64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            duration_min,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Display label: the name if set, the ID otherwise.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
