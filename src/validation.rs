//! Input validation for rostering problems.
//!
//! Checks structural integrity of the task registry, worker registry and
//! week schedule before any day is planned. Detects:
//! - Duplicate IDs (tasks, workers, days)
//! - Negative durations and budgets
//! - Capabilities naming unknown tasks
//! - Day exclusions naming unknown tasks or workers
//!
//! The search and balancer assume validated input; nothing downstream
//! re-checks these conditions.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::Roster;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A task has a negative duration.
    NegativeDuration,
    /// A day has a negative budget.
    NegativeBudget,
    /// A worker is certified for a task that doesn't exist.
    UnknownCapability,
    /// A day excludes a task that doesn't exist.
    UnknownExcludedTask,
    /// A day excludes a worker that doesn't exist.
    UnknownExcludedWorker,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster.
///
/// Checks:
/// 1. No duplicate task, worker or day IDs
/// 2. No negative task durations
/// 3. No negative day budgets
/// 4. All capabilities reference existing tasks
/// 5. All excluded tasks and workers exist
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(roster: &Roster) -> ValidationResult {
    let mut errors = Vec::new();

    let mut task_ids = HashSet::new();
    for task in &roster.tasks {
        if !task_ids.insert(task.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }
        if task.duration_min < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!("Task '{}' has negative duration {}", task.id, task.duration_min),
            ));
        }
    }

    let mut worker_ids = HashSet::new();
    for worker in &roster.workers {
        if !worker_ids.insert(worker.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate worker ID: {}", worker.id),
            ));
        }
    }

    // Capability references
    for worker in &roster.workers {
        for cap in &worker.capabilities {
            if !task_ids.contains(cap.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownCapability,
                    format!("Worker '{}' is certified for unknown task '{}'", worker.id, cap),
                ));
            }
        }
    }

    let mut day_ids = HashSet::new();
    for day in &roster.week.days {
        if !day_ids.insert(day.day.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate day ID: {}", day.day),
            ));
        }
        if day.budget_min < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeBudget,
                format!("Day '{}' has negative budget {}", day.day, day.budget_min),
            ));
        }
        for task in &day.excluded_tasks {
            if !task_ids.contains(task.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownExcludedTask,
                    format!("Day '{}' excludes unknown task '{}'", day.day, task),
                ));
            }
        }
        for worker in &day.excluded_workers {
            if !worker_ids.contains(worker.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownExcludedWorker,
                    format!("Day '{}' excludes unknown worker '{}'", day.day, worker),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
