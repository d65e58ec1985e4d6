//! Error types.
//!
//! Per-day planning failures (infeasible or aborted days) are values in
//! [`crate::models::DayOutcome`], not errors. Errors here stop a run
//! before any day is planned.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that prevent planning from starting.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The roster failed validation.
    #[error("invalid roster: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    /// The planner configuration could not be parsed.
    #[error("invalid planner config: {0}")]
    Config(#[from] toml::de::Error),
}

impl PlanError {
    /// Validation problems, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            Self::Config(_) => &[],
        }
    }
}

impl From<Vec<ValidationError>> for PlanError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for planning entry points.
pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Roster, Task};
    use crate::validation::validate_roster;

    #[test]
    fn test_invalid_display_lists_problems() {
        let roster = Roster::new()
            .with_task(Task::new("a", -1))
            .with_task(Task::new("a", 2));
        let err = PlanError::from(validate_roster(&roster).unwrap_err());

        assert_eq!(err.validation_errors().len(), 2);
        assert_eq!(
            err.to_string(),
            "invalid roster: Task 'a' has negative duration -1; Duplicate task ID: a"
        );
    }

    #[test]
    fn test_config_error_has_no_validation_errors() {
        let toml_err = toml::from_str::<toml::Table>("= nope").unwrap_err();
        let err = PlanError::from(toml_err);
        assert!(err.validation_errors().is_empty());
        assert!(err.to_string().starts_with("invalid planner config"));
    }
}
