//! Week-level aggregation.

use rand::RngCore;
use tracing::{info, info_span};

use super::DayPlanner;
use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{Roster, WeekPlan};
use crate::search::{AssignmentSearch, BacktrackingSearch};
use crate::validation::validate_roster;

/// Plans every day of a roster's week, in schedule order.
///
/// The roster is validated once up front. Days are independent: a failed
/// day is recorded and planning continues with the next one.
#[derive(Debug, Clone)]
pub struct WeekAggregator<S = BacktrackingSearch> {
    planner: DayPlanner<S>,
}

impl WeekAggregator {
    /// Creates an aggregator with the default day planner.
    pub fn new() -> Self {
        Self {
            planner: DayPlanner::new(),
        }
    }

    /// Creates an aggregator from a configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self {
            planner: DayPlanner::from_config(config),
        }
    }
}

impl Default for WeekAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AssignmentSearch> WeekAggregator<S> {
    /// Wraps a configured day planner.
    pub fn with_day_planner(planner: DayPlanner<S>) -> Self {
        Self { planner }
    }

    /// The day planner in use.
    pub fn day_planner(&self) -> &DayPlanner<S> {
        &self.planner
    }

    /// Validates the roster, then plans each day in order.
    ///
    /// # Errors
    /// [`crate::error::PlanError::Invalid`] if the roster fails validation.
    /// No day is planned in that case.
    pub fn plan(&self, roster: &Roster, rng: &mut dyn RngCore) -> Result<WeekPlan> {
        validate_roster(roster)?;

        let _span = info_span!("plan_week", days = roster.week.len()).entered();
        let mut plan = WeekPlan::new();
        for day in &roster.week.days {
            let outcome = self.planner.plan_day(roster, day, rng);
            info!(day = %day.day, status = %outcome.describe());
            plan.push(day.day.clone(), outcome);
        }

        info!(
            assigned = plan.assigned_days().len(),
            closed = plan.closed_days().len(),
            failed = plan.failed_days().len(),
            "week planned"
        );
        Ok(plan)
    }
}
