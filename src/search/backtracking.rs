//! Randomized backtracking search.
//!
//! # Algorithm
//!
//! 1. Shuffle the task order once.
//! 2. Take the next unassigned task; collect certified workers whose
//!    remaining time covers it, in random order.
//! 3. Tentatively assign, recurse; undo and try the next worker on failure.
//! 4. Backtrack when no worker leads to a complete allocation.
//!
//! Two pre-checks reject trivially infeasible days before any node is
//! visited: a task nobody can take within the budget, and total work
//! exceeding the pooled budget.
//!
//! # Reference
//! Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6.3

use rand::seq::SliceRandom;
use rand::RngCore;
use std::time::{Duration, Instant};
use tracing::trace;

use super::{AssignmentSearch, SearchLimits, SearchOutcome, SearchReport};
use crate::models::{Allocation, CapabilityModel};

/// How many nodes pass between wall-clock checks.
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Exhaustive randomized depth-first search.
///
/// No memoization and no pruning beyond budget feasibility, so proving
/// infeasibility walks the whole tree unless a pre-check catches it.
#[derive(Debug, Clone, Copy, Default)]
pub struct BacktrackingSearch;

impl BacktrackingSearch {
    /// Creates the search.
    pub fn new() -> Self {
        Self
    }

    /// Explains why the day is trivially infeasible, if it is.
    fn precheck(model: &CapabilityModel, budget_min: i64) -> Result<(), String> {
        for task in 0..model.task_count() {
            let duration = model.duration(task);
            if duration > budget_min || model.candidates(task).is_empty() {
                return Err(format!(
                    "task '{}' has no certified worker within budget",
                    model.task_id(task)
                ));
            }
        }

        let pooled = budget_min.saturating_mul(model.worker_count() as i64);
        if model.total_duration() > pooled {
            return Err(format!(
                "total work {} exceeds pooled budget {pooled}",
                model.total_duration()
            ));
        }
        Ok(())
    }
}

impl AssignmentSearch for BacktrackingSearch {
    fn name(&self) -> &'static str {
        "backtracking"
    }

    fn search(
        &self,
        model: &CapabilityModel,
        budget_min: i64,
        limits: &SearchLimits,
        rng: &mut dyn RngCore,
    ) -> SearchReport {
        if let Err(reason) = Self::precheck(model, budget_min) {
            trace!(%reason, "rejected before search");
            return SearchReport {
                outcome: SearchOutcome::NotFound,
                nodes_visited: 0,
            };
        }

        let mut order: Vec<usize> = (0..model.task_count()).collect();
        order.shuffle(rng);

        let mut dfs = Dfs {
            model,
            order,
            alloc: Allocation::new(model, budget_min),
            nodes: 0,
            max_nodes: limits.max_nodes.unwrap_or(u64::MAX),
            deadline: limits
                .timeout_ms
                .map(|ms| Instant::now() + Duration::from_millis(ms)),
            rng,
        };

        let outcome = match dfs.run(0) {
            Step::Found => SearchOutcome::Found(dfs.alloc),
            Step::Exhausted => SearchOutcome::NotFound,
            Step::Aborted => SearchOutcome::Aborted,
        };

        SearchReport {
            outcome,
            nodes_visited: dfs.nodes,
        }
    }
}

enum Step {
    Found,
    Exhausted,
    Aborted,
}

struct Dfs<'a> {
    model: &'a CapabilityModel,
    order: Vec<usize>,
    alloc: Allocation,
    nodes: u64,
    max_nodes: u64,
    deadline: Option<Instant>,
    rng: &'a mut dyn RngCore,
}

impl Dfs<'_> {
    fn run(&mut self, depth: usize) -> Step {
        if self.nodes >= self.max_nodes {
            return Step::Aborted;
        }
        self.nodes += 1;
        if self.nodes % CLOCK_CHECK_INTERVAL == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Step::Aborted;
                }
            }
        }

        let Some(&task) = self.order.get(depth) else {
            return Step::Found;
        };

        let duration = self.model.duration(task);
        let mut eligible: Vec<usize> = self
            .model
            .candidates(task)
            .iter()
            .copied()
            .filter(|&w| self.alloc.remaining(w) >= duration)
            .collect();
        eligible.shuffle(&mut *self.rng);

        for worker in eligible {
            self.alloc.assign(self.model, task, worker);
            match self.run(depth + 1) {
                Step::Exhausted => self.alloc.unassign(self.model, task),
                step => return step,
            }
        }
        Step::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Task, Worker};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn scenario_a() -> CapabilityModel {
        let workers = [
            Worker::new("w1").with_capabilities(["A", "B", "C"]),
            Worker::new("w2").with_capabilities(["B", "C"]),
        ];
        CapabilityModel::new(
            vec![Task::new("A", 10), Task::new("B", 5), Task::new("C", 1)],
            workers.iter(),
        )
    }

    /// Three 6-minute tasks, two workers with 10 minutes each: passes the
    /// pre-checks but nobody can hold two tasks.
    fn pigeonhole() -> CapabilityModel {
        let workers = [
            Worker::new("w1").with_capabilities(["A", "B", "C"]),
            Worker::new("w2").with_capabilities(["A", "B", "C"]),
        ];
        CapabilityModel::new(
            vec![Task::new("A", 6), Task::new("B", 6), Task::new("C", 6)],
            workers.iter(),
        )
    }

    fn search(
        model: &CapabilityModel,
        budget: i64,
        limits: SearchLimits,
        seed: u64,
    ) -> SearchReport {
        let mut rng = SmallRng::seed_from_u64(seed);
        BacktrackingSearch::new().search(model, budget, &limits, &mut rng)
    }

    #[test]
    fn test_scenario_a_feasible() {
        let model = scenario_a();
        for seed in 0..20 {
            let report = search(&model, 16, SearchLimits::default(), seed);
            let SearchOutcome::Found(alloc) = report.outcome else {
                panic!("seed {seed}: expected a feasible allocation");
            };
            assert!(alloc.is_complete());
            assert!(alloc.is_valid(&model));
            assert_eq!(alloc.assignee(0), Some(0)); // only w1 can do A
        }
    }

    #[test]
    fn test_nobody_certified() {
        let workers = [Worker::new("w1")];
        let model = CapabilityModel::new(vec![Task::new("A", 10)], workers.iter());
        let report = search(&model, 100, SearchLimits::default(), 0);
        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.nodes_visited, 0);
    }

    #[test]
    fn test_task_longer_than_budget() {
        let workers = [Worker::new("w1").with_capability("A")];
        let model = CapabilityModel::new(vec![Task::new("A", 10)], workers.iter());
        assert_eq!(search(&model, 9, SearchLimits::default(), 0).outcome, SearchOutcome::NotFound);
        assert!(search(&model, 10, SearchLimits::default(), 0).outcome.is_found());
    }

    #[test]
    fn test_pooled_budget_precheck() {
        let workers = [Worker::new("w1").with_capabilities(["A", "B"])];
        let model =
            CapabilityModel::new(vec![Task::new("A", 6), Task::new("B", 6)], workers.iter());
        let report = search(&model, 10, SearchLimits::default(), 0);
        assert_eq!(report.outcome, SearchOutcome::NotFound);
        assert_eq!(report.nodes_visited, 0);
    }

    #[test]
    fn test_exhaustive_infeasibility() {
        let model = pigeonhole();
        for seed in 0..10 {
            let report = search(&model, 10, SearchLimits::unbounded(), seed);
            assert_eq!(report.outcome, SearchOutcome::NotFound);
            assert!(report.nodes_visited > 1);
        }
    }

    #[test]
    fn test_node_limit_aborts() {
        let model = pigeonhole();
        let report = search(&model, 10, SearchLimits::unbounded().with_max_nodes(2), 0);
        assert_eq!(report.outcome, SearchOutcome::Aborted);
        assert_eq!(report.nodes_visited, 2);
    }

    #[test]
    fn test_timeout_aborts() {
        // 17 five-minute tasks, 8 workers holding at most two each: passes
        // the pre-checks but the tree is far too large to exhaust.
        let workers: Vec<Worker> = (0..8)
            .map(|w| {
                Worker::new(format!("w{w}")).with_capabilities((0..17).map(|t| format!("t{t}")))
            })
            .collect();
        let tasks = (0..17).map(|t| Task::new(format!("t{t}"), 5)).collect();
        let model = CapabilityModel::new(tasks, workers.iter());

        let started = Instant::now();
        let report = search(&model, 14, SearchLimits::unbounded().with_timeout_ms(200), 0);
        let elapsed = started.elapsed();

        assert_eq!(report.outcome, SearchOutcome::Aborted);
        assert!(report.nodes_visited >= CLOCK_CHECK_INTERVAL);
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");
    }

    #[test]
    fn test_node_limit_not_hit_when_feasible() {
        let model = scenario_a();
        let report = search(&model, 16, SearchLimits::unbounded().with_max_nodes(100), 3);
        assert!(report.outcome.is_found());
        assert!(report.nodes_visited <= 100);
    }

    #[test]
    fn test_empty_day() {
        let model = CapabilityModel::new(Vec::new(), std::iter::empty::<&Worker>());
        let report = search(&model, 10, SearchLimits::default(), 0);
        let SearchOutcome::Found(alloc) = report.outcome else {
            panic!("empty day must be trivially feasible");
        };
        assert!(alloc.is_complete());
        assert_eq!(report.nodes_visited, 1);
    }

    #[test]
    fn test_seed_reproducible() {
        let model = pigeonhole();
        let a = search(&model, 12, SearchLimits::default(), 42);
        let b = search(&model, 12, SearchLimits::default(), 42);
        assert_eq!(a, b);
    }

    #[test]
    fn test_randomized_worker_choice() {
        let workers = [
            Worker::new("w1").with_capability("A"),
            Worker::new("w2").with_capability("A"),
        ];
        let model = CapabilityModel::new(vec![Task::new("A", 1)], workers.iter());

        let mut seen = [false; 2];
        for seed in 0..64 {
            let report = search(&model, 5, SearchLimits::default(), seed);
            if let SearchOutcome::Found(alloc) = report.outcome {
                seen[alloc.assignee(0).unwrap()] = true;
            }
        }
        assert_eq!(seen, [true, true]);
    }

    #[test]
    fn test_name() {
        assert_eq!(BacktrackingSearch::new().name(), "backtracking");
    }
}
