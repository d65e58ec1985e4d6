//! Single-day planning.
//!
//! # Algorithm
//!
//! 1. Budget 0 → `Closed`, nothing else runs.
//! 2. Build the day's [`CapabilityModel`] from the roster and exclusions.
//! 3. Run the feasibility search with the uniform budget.
//! 4. Balance the found allocation (unless disabled).
//! 5. Classify: `Assigned`, `Infeasible` or `SearchAborted`.

use rand::RngCore;
use tracing::{debug, debug_span, warn};

use crate::balance::Balancer;
use crate::config::PlannerConfig;
use crate::models::{CapabilityModel, DayOutcome, DayRoster, DaySchedule, Roster};
use crate::search::{AssignmentSearch, BacktrackingSearch, SearchLimits, SearchOutcome};

/// Plans one day: search, then balance.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_roster::models::{DaySchedule, Roster, Task, Worker};
/// use u_roster::planner::DayPlanner;
///
/// let roster = Roster::new()
///     .with_task(Task::new("A", 10))
///     .with_task(Task::new("B", 5))
///     .with_worker(Worker::new("w1").with_capabilities(["A", "B"]))
///     .with_worker(Worker::new("w2").with_capability("B"));
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let outcome = DayPlanner::new().plan_day(&roster, &DaySchedule::new("mon", 12), &mut rng);
/// let assignment = outcome.assignment().unwrap();
/// assert_eq!(assignment.worker_for("A"), Some("w1"));
/// assert_eq!(assignment.worker_for("B"), Some("w2"));
/// ```
#[derive(Debug, Clone)]
pub struct DayPlanner<S = BacktrackingSearch> {
    search: S,
    balancer: Balancer,
    limits: SearchLimits,
    balance: bool,
}

impl DayPlanner {
    /// Creates a planner with backtracking search and default limits.
    pub fn new() -> Self {
        Self {
            search: BacktrackingSearch::new(),
            balancer: Balancer::new(),
            limits: SearchLimits::default(),
            balance: true,
        }
    }

    /// Creates a planner from a configuration.
    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new()
            .with_limits(config.search)
            .with_balance(config.balance)
    }
}

impl Default for DayPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AssignmentSearch> DayPlanner<S> {
    /// Replaces the search strategy.
    pub fn with_search<T: AssignmentSearch>(self, search: T) -> DayPlanner<T> {
        DayPlanner {
            search,
            balancer: self.balancer,
            limits: self.limits,
            balance: self.balance,
        }
    }

    /// Sets the search limits.
    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Enables or disables balancing.
    pub fn with_balance(mut self, balance: bool) -> Self {
        self.balance = balance;
        self
    }

    /// The search strategy in use.
    pub fn search(&self) -> &S {
        &self.search
    }

    /// Plans one day of a roster.
    pub fn plan_day(
        &self,
        roster: &Roster,
        day: &DaySchedule,
        rng: &mut dyn RngCore,
    ) -> DayOutcome {
        let _span = debug_span!("plan_day", day = %day.day).entered();

        if day.is_closed() {
            debug!("closed");
            return DayOutcome::Closed;
        }

        let model = CapabilityModel::for_day(roster, day);
        self.plan_model(&model, day.budget_min, rng)
    }

    /// Plans a prepared capability model with a uniform budget.
    ///
    /// A zero budget still counts as closed here.
    pub fn plan_model(
        &self,
        model: &CapabilityModel,
        budget_min: i64,
        rng: &mut dyn RngCore,
    ) -> DayOutcome {
        if budget_min == 0 {
            return DayOutcome::Closed;
        }

        debug!(
            tasks = model.task_count(),
            workers = model.worker_count(),
            budget_min,
            "searching"
        );
        let report = self.search.search(model, budget_min, &self.limits, rng);
        debug!(
            search = self.search.name(),
            nodes = report.nodes_visited,
            "search finished"
        );

        let mut alloc = match report.outcome {
            SearchOutcome::Found(alloc) => alloc,
            SearchOutcome::NotFound => {
                warn!(nodes = report.nodes_visited, "no feasible assignment");
                return DayOutcome::Infeasible;
            }
            SearchOutcome::Aborted => {
                warn!(nodes = report.nodes_visited, "search limits exhausted");
                return DayOutcome::SearchAborted {
                    nodes_visited: report.nodes_visited,
                };
            }
        };

        let balance_moves = if self.balance {
            self.balancer.balance(model, &mut alloc, rng).move_count()
        } else {
            0
        };

        DayOutcome::Assigned(DayRoster {
            assignment: alloc.to_assignment(model),
            remaining: alloc.remaining_budget(model),
            budget_min,
            balance_moves,
        })
    }
}
