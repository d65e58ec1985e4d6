//! Workload balancing.
//!
//! Refines a complete allocation by moving single tasks from a busier
//! worker to an idler one until no such move narrows the gap between the
//! two. The result is a local optimum; which one depends on the visiting
//! order (busiest givers first, ties broken at random).
//!
//! # Move Rule
//!
//! With remaining times `a` (accepting worker) and `t` (transferring
//! worker) and task duration `d`, the move is taken only if
//!
//! ```text
//! a > t  and  |a - t - 2d| < |a - t|
//! ```
//!
//! which implies `0 < d < a - t`: the accepting worker never overdraws and
//! both workers end strictly between their old remaining times.
//!
//! # Termination
//! Every move lowers the sum of squared remaining times, a non-negative
//! integer, by `2d(a - t - d) > 0`.

mod workload;

pub use workload::WorkloadStats;

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::debug;

use crate::models::{Allocation, CapabilityModel};

/// Whether moving a task of `duration` from a worker with `transferring`
/// minutes left to one with `accepting` minutes left narrows their gap.
#[inline]
pub fn should_transfer(accepting: i64, transferring: i64, duration: i64) -> bool {
    let gap = accepting - transferring;
    gap > 0 && (gap - 2 * duration).abs() < gap
}

/// A single applied move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Task moved.
    pub task_id: String,
    /// Worker who gave up the task.
    pub from: String,
    /// Worker who took the task.
    pub to: String,
    /// Task duration (minutes).
    pub duration_min: i64,
    /// `remaining[to] - remaining[from]` before the move.
    pub gap_before: i64,
    /// `|remaining[to] - remaining[from]|` after the move.
    pub gap_after: i64,
}

/// Moves applied by one balancing run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Applied transfers.
    pub moves: Vec<Transfer>,
}

impl BalanceReport {
    /// Number of applied transfers.
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Whether the input was already a local optimum.
    pub fn is_unchanged(&self) -> bool {
        self.moves.is_empty()
    }
}

/// First-improvement hill climber over single-task transfers.
///
/// # Search Policy
/// Each pass visits transferring workers by number of held tasks,
/// descending, with ties in random order. Each worker's tasks are visited
/// in random order; accepting workers are tried in model order. The first
/// improving transfer is applied and the pass restarts. A pass without an
/// improving transfer ends the run.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_roster::balance::Balancer;
/// use u_roster::models::{Allocation, CapabilityModel, Task, Worker};
///
/// let workers = [
///     Worker::new("w1").with_capabilities(["A", "B"]),
///     Worker::new("w2").with_capabilities(["A", "B"]),
/// ];
/// let model = CapabilityModel::new(vec![Task::new("A", 4), Task::new("B", 4)], workers.iter());
/// let mut alloc = Allocation::new(&model, 10);
/// alloc.assign(&model, 0, 0);
/// alloc.assign(&model, 1, 0);
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let report = Balancer::new().balance(&model, &mut alloc, &mut rng);
/// assert_eq!(report.move_count(), 1);
/// assert_eq!(alloc.remaining_times(), &[6, 6]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Balancer;

impl Balancer {
    /// Creates a balancer.
    pub fn new() -> Self {
        Self
    }

    /// Applies improving transfers until none is left.
    ///
    /// The allocation should be complete; unassigned tasks are left alone.
    pub fn balance(
        &self,
        model: &CapabilityModel,
        alloc: &mut Allocation,
        rng: &mut dyn RngCore,
    ) -> BalanceReport {
        let mut report = BalanceReport::default();

        while let Some((task, to)) = self.find_transfer(model, alloc, rng) {
            let Some(from) = alloc.assignee(task) else {
                break;
            };
            let gap_before = alloc.remaining(to) - alloc.remaining(from);
            alloc.transfer(model, task, to);
            report.moves.push(Transfer {
                task_id: model.task_id(task).to_string(),
                from: model.worker_id(from).to_string(),
                to: model.worker_id(to).to_string(),
                duration_min: model.duration(task),
                gap_before,
                gap_after: (alloc.remaining(to) - alloc.remaining(from)).abs(),
            });
        }

        debug!(moves = report.move_count(), "balancing converged");
        report
    }

    /// Whether no improving transfer exists.
    pub fn is_local_optimum(&self, model: &CapabilityModel, alloc: &Allocation) -> bool {
        (0..model.worker_count()).all(|giver| {
            alloc
                .tasks_of(giver)
                .into_iter()
                .all(|task| Self::improving_taker(model, alloc, giver, task).is_none())
        })
    }

    /// One pass; returns (task, accepting worker) of the first improving
    /// transfer.
    ///
    /// Givers holding the most tasks are visited first; ties and each
    /// giver's task order are random.
    fn find_transfer(
        &self,
        model: &CapabilityModel,
        alloc: &Allocation,
        rng: &mut dyn RngCore,
    ) -> Option<(usize, usize)> {
        let mut givers: Vec<usize> = (0..model.worker_count()).collect();
        givers.shuffle(rng);
        givers.sort_by_key(|&w| Reverse(alloc.tasks_of(w).len()));

        for giver in givers {
            let mut held = alloc.tasks_of(giver);
            held.shuffle(rng);
            for task in held {
                if let Some(taker) = Self::improving_taker(model, alloc, giver, task) {
                    return Some((task, taker));
                }
            }
        }
        None
    }

    fn improving_taker(
        model: &CapabilityModel,
        alloc: &Allocation,
        giver: usize,
        task: usize,
    ) -> Option<usize> {
        let t = alloc.remaining(giver);
        let d = model.duration(task);
        model
            .candidates(task)
            .iter()
            .copied()
            .find(|&taker| taker != giver && should_transfer(alloc.remaining(taker), t, d))
    }
}
