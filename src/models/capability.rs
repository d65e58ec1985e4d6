//! Capability model: the planning universe of a single day.
//!
//! Flattens the task and worker registries into index space after day
//! exclusions are applied. Tasks and workers keep registry order, which is
//! the order every algorithm falls back to when it does not randomize.

use super::{DaySchedule, Roster, Task, Worker};

/// Read-only view of effective tasks, workers and who can do what.
///
/// Task indices run over `0..task_count()`, worker indices over
/// `0..worker_count()`.
#[derive(Debug, Clone)]
pub struct CapabilityModel {
    tasks: Vec<Task>,
    worker_ids: Vec<String>,
    /// Row-major `[worker][task]` capability matrix.
    matrix: Vec<bool>,
    /// Capable worker indices per task (ascending).
    candidates: Vec<Vec<usize>>,
}

impl CapabilityModel {
    /// Builds a model from explicit task and worker lists.
    ///
    /// Capabilities naming tasks outside `tasks` are ignored.
    pub fn new<'a, I>(tasks: Vec<Task>, workers: I) -> Self
    where
        I: IntoIterator<Item = &'a Worker>,
    {
        let workers: Vec<&Worker> = workers.into_iter().collect();
        let n_tasks = tasks.len();
        let mut matrix = vec![false; workers.len() * n_tasks];
        let mut candidates = vec![Vec::new(); n_tasks];

        for (w, worker) in workers.iter().enumerate() {
            for (t, task) in tasks.iter().enumerate() {
                if worker.can_perform(&task.id) {
                    matrix[w * n_tasks + t] = true;
                    candidates[t].push(w);
                }
            }
        }

        Self {
            tasks,
            worker_ids: workers.iter().map(|w| w.id.clone()).collect(),
            matrix,
            candidates,
        }
    }

    /// Builds the model for one day of a roster.
    ///
    /// Excluded tasks drop out of the task set; excluded workers drop out
    /// of the pool. Remaining workers keep their full capability sets,
    /// restricted implicitly to the remaining tasks.
    pub fn for_day(roster: &Roster, day: &DaySchedule) -> Self {
        let tasks = roster
            .tasks
            .iter()
            .filter(|t| day.requires_task(&t.id))
            .cloned()
            .collect();
        let workers = roster.workers.iter().filter(|w| day.has_worker(&w.id));
        Self::new(tasks, workers)
    }

    /// Number of effective tasks.
    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Number of effective workers.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_ids.len()
    }

    /// Task at an index.
    pub fn task(&self, task: usize) -> &Task {
        &self.tasks[task]
    }

    /// All effective tasks in registry order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Duration of the task at an index (minutes).
    #[inline]
    pub fn duration(&self, task: usize) -> i64 {
        self.tasks[task].duration_min
    }

    /// Sum of all effective task durations (minutes).
    pub fn total_duration(&self) -> i64 {
        self.tasks.iter().map(|t| t.duration_min).sum()
    }

    /// Task ID at an index.
    pub fn task_id(&self, task: usize) -> &str {
        &self.tasks[task].id
    }

    /// Worker ID at an index.
    pub fn worker_id(&self, worker: usize) -> &str {
        &self.worker_ids[worker]
    }

    /// Effective worker IDs in registry order.
    pub fn worker_ids(&self) -> &[String] {
        &self.worker_ids
    }

    /// Index of a task ID, if it is part of this day.
    pub fn task_index(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Index of a worker ID, if they are available this day.
    pub fn worker_index(&self, id: &str) -> Option<usize> {
        self.worker_ids.iter().position(|w| w == id)
    }

    /// Whether a worker is certified for a task.
    #[inline]
    pub fn can_perform(&self, worker: usize, task: usize) -> bool {
        self.matrix[worker * self.tasks.len() + task]
    }

    /// Workers certified for a task, ascending.
    pub fn candidates(&self, task: usize) -> &[usize] {
        &self.candidates[task]
    }
}
