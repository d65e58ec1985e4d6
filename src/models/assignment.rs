//! Task-to-worker assignments.
//!
//! Two representations:
//! - [`Allocation`]: index-based working state mutated in place by the
//!   feasibility search and the balancer.
//! - [`Assignment`] / [`RemainingBudget`]: ID-keyed results handed to
//!   callers once a day is settled.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::CapabilityModel;

/// Settled mapping of task ID → worker ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    tasks: BTreeMap<String, String>,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a task, returning the previous worker if any.
    pub fn insert(
        &mut self,
        task_id: impl Into<String>,
        worker_id: impl Into<String>,
    ) -> Option<String> {
        self.tasks.insert(task_id.into(), worker_id.into())
    }

    /// Worker assigned to a task.
    pub fn worker_for(&self, task_id: &str) -> Option<&str> {
        self.tasks.get(task_id).map(|w| w.as_str())
    }

    /// Whether the task is covered.
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.tasks.contains_key(task_id)
    }

    /// Tasks assigned to a worker, ordered by task ID.
    pub fn tasks_for(&self, worker_id: &str) -> Vec<&str> {
        self.tasks
            .iter()
            .filter(|(_, w)| *w == worker_id)
            .map(|(t, _)| t.as_str())
            .collect()
    }

    /// Distinct workers with at least one task.
    pub fn workers(&self) -> BTreeSet<&str> {
        self.tasks.values().map(|w| w.as_str()).collect()
    }

    /// (task ID, worker ID) pairs ordered by task ID.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tasks.iter().map(|(t, w)| (t.as_str(), w.as_str()))
    }

    /// Number of covered tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether no task is covered.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl<T: Into<String>, W: Into<String>> FromIterator<(T, W)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (T, W)>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().map(|(t, w)| (t.into(), w.into())).collect(),
        }
    }
}

/// Remaining minutes per worker after their tasks are deducted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemainingBudget {
    workers: BTreeMap<String, i64>,
}

impl RemainingBudget {
    /// Remaining minutes for a worker.
    pub fn get(&self, worker_id: &str) -> Option<i64> {
        self.workers.get(worker_id).copied()
    }

    /// (worker ID, remaining minutes) pairs ordered by worker ID.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.workers.iter().map(|(w, r)| (w.as_str(), *r))
    }

    /// Smallest remaining time.
    pub fn min(&self) -> Option<i64> {
        self.workers.values().copied().min()
    }

    /// Largest remaining time.
    pub fn max(&self) -> Option<i64> {
        self.workers.values().copied().max()
    }

    /// Difference between the most and least idle worker (0 if empty).
    pub fn spread(&self) -> i64 {
        match (self.max(), self.min()) {
            (Some(max), Some(min)) => max - min,
            _ => 0,
        }
    }

    /// Number of workers.
    pub fn len(&self) -> usize {
        self.workers.len()
    }

    /// Whether no worker is tracked.
    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

impl<W: Into<String>> FromIterator<(W, i64)> for RemainingBudget {
    fn from_iter<I: IntoIterator<Item = (W, i64)>>(iter: I) -> Self {
        Self {
            workers: iter.into_iter().map(|(w, r)| (w.into(), r)).collect(),
        }
    }
}

/// Working state of a day: who holds each task and how much time is left.
///
/// Indices refer to the [`CapabilityModel`] the allocation was created
/// for. Every mutation keeps `remaining[w] == budget - sum(durations of
/// tasks held by w)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    assignee: Vec<Option<usize>>,
    remaining: Vec<i64>,
    budget_min: i64,
    assigned: usize,
}

impl Allocation {
    /// Creates an empty allocation where every worker has the full budget.
    pub fn new(model: &CapabilityModel, budget_min: i64) -> Self {
        Self {
            assignee: vec![None; model.task_count()],
            remaining: vec![budget_min; model.worker_count()],
            budget_min,
            assigned: 0,
        }
    }

    /// Rebuilds working state from a settled assignment.
    ///
    /// Returns `None` if the assignment names a task or worker outside the
    /// model, pairs a task with an uncertified worker, or overdraws a
    /// worker's budget. Tasks missing from the assignment stay unassigned.
    pub fn from_assignment(
        model: &CapabilityModel,
        budget_min: i64,
        assignment: &Assignment,
    ) -> Option<Self> {
        let mut alloc = Self::new(model, budget_min);
        for (task_id, worker_id) in assignment.iter() {
            let task = model.task_index(task_id)?;
            let worker = model.worker_index(worker_id)?;
            if !model.can_perform(worker, task) || alloc.remaining[worker] < model.duration(task) {
                return None;
            }
            alloc.assign(model, task, worker);
        }
        Some(alloc)
    }

    /// Per-worker budget this allocation was created with.
    pub fn budget_min(&self) -> i64 {
        self.budget_min
    }

    /// Worker holding a task.
    #[inline]
    pub fn assignee(&self, task: usize) -> Option<usize> {
        self.assignee[task]
    }

    /// Remaining minutes for a worker.
    #[inline]
    pub fn remaining(&self, worker: usize) -> i64 {
        self.remaining[worker]
    }

    /// Remaining minutes for all workers, by index.
    pub fn remaining_times(&self) -> &[i64] {
        &self.remaining
    }

    /// Number of tasks with an assignee.
    pub fn assigned_count(&self) -> usize {
        self.assigned
    }

    /// Whether every task has an assignee.
    pub fn is_complete(&self) -> bool {
        self.assigned == self.assignee.len()
    }

    /// Tasks held by a worker, ascending.
    pub fn tasks_of(&self, worker: usize) -> Vec<usize> {
        self.assignee
            .iter()
            .enumerate()
            .filter(|(_, w)| **w == Some(worker))
            .map(|(t, _)| t)
            .collect()
    }

    /// Gives an unassigned task to a worker.
    pub fn assign(&mut self, model: &CapabilityModel, task: usize, worker: usize) {
        debug_assert!(self.assignee[task].is_none(), "task {task} already assigned");
        self.assignee[task] = Some(worker);
        self.remaining[worker] -= model.duration(task);
        self.assigned += 1;
    }

    /// Takes a task back from its worker.
    pub fn unassign(&mut self, model: &CapabilityModel, task: usize) {
        if let Some(worker) = self.assignee[task].take() {
            self.remaining[worker] += model.duration(task);
            self.assigned -= 1;
        }
    }

    /// Moves an assigned task to another worker.
    pub fn transfer(&mut self, model: &CapabilityModel, task: usize, to: usize) {
        if let Some(from) = self.assignee[task] {
            let d = model.duration(task);
            self.remaining[from] += d;
            self.remaining[to] -= d;
            self.assignee[task] = Some(to);
        }
    }

    /// Checks capability and budget for every assigned task, and that the
    /// remaining times agree with the assignments.
    pub fn is_valid(&self, model: &CapabilityModel) -> bool {
        let mut used = vec![0i64; self.remaining.len()];
        for (task, worker) in self.assignee.iter().enumerate() {
            if let Some(w) = *worker {
                if !model.can_perform(w, task) {
                    return false;
                }
                used[w] += model.duration(task);
            }
        }
        used.iter()
            .zip(&self.remaining)
            .all(|(u, r)| *r >= 0 && self.budget_min - u == *r)
    }

    /// Converts to an ID-keyed assignment (assigned tasks only).
    pub fn to_assignment(&self, model: &CapabilityModel) -> Assignment {
        let mut assignment = Assignment::new();
        for (task, worker) in self.assignee.iter().enumerate() {
            if let Some(w) = *worker {
                assignment.insert(model.task_id(task), model.worker_id(w));
            }
        }
        assignment
    }

    /// Converts remaining times to an ID-keyed map.
    pub fn remaining_budget(&self, model: &CapabilityModel) -> RemainingBudget {
        RemainingBudget {
            workers: self
                .remaining
                .iter()
                .enumerate()
                .map(|(w, r)| (model.worker_id(w).to_string(), *r))
                .collect(),
        }
    }
}
