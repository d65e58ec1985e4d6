//! Roster: the complete planning input.
//!
//! Bundles the task registry, worker registry and week schedule. Editing
//! operations cascade the way an editor front-end expects: removing a task
//! also drops it from every capability set and every day's exclusions, and
//! removing a worker drops it from every day's absences.

use serde::{Deserialize, Serialize};

use super::{DaySchedule, Task, WeekSchedule, Worker};

/// Tasks, workers and per-day availability for one planning run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    /// Task registry.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Worker registry.
    #[serde(default)]
    pub workers: Vec<Worker>,
    /// Days to plan, in order.
    #[serde(default)]
    pub week: WeekSchedule,
}

impl Roster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a task (builder form, no duplicate check).
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Adds a worker (builder form, no duplicate check).
    pub fn with_worker(mut self, worker: Worker) -> Self {
        self.workers.push(worker);
        self
    }

    /// Appends a day (builder form, no duplicate check).
    pub fn with_day(mut self, day: DaySchedule) -> Self {
        self.week.days.push(day);
        self
    }

    /// Finds a task by ID.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Finds a worker by ID.
    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    /// Task IDs in registry order.
    pub fn task_ids(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.id.as_str()).collect()
    }

    /// Worker IDs in registry order.
    pub fn worker_ids(&self) -> Vec<&str> {
        self.workers.iter().map(|w| w.id.as_str()).collect()
    }

    /// Registers a task. Returns `false` if the ID is already taken.
    pub fn add_task(&mut self, task: Task) -> bool {
        if self.task(&task.id).is_some() {
            return false;
        }
        self.tasks.push(task);
        true
    }

    /// Removes a task and every reference to it.
    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        let removed = self.tasks.remove(pos);
        for worker in &mut self.workers {
            worker.capabilities.remove(id);
        }
        for day in &mut self.week.days {
            day.excluded_tasks.remove(id);
        }
        Some(removed)
    }

    /// Changes a task's duration. Returns `false` if the task is unknown.
    pub fn set_task_duration(&mut self, id: &str, duration_min: i64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.duration_min = duration_min;
                true
            }
            None => false,
        }
    }

    /// Registers a worker. Returns `false` if the ID is already taken.
    pub fn add_worker(&mut self, worker: Worker) -> bool {
        if self.worker(&worker.id).is_some() {
            return false;
        }
        self.workers.push(worker);
        true
    }

    /// Removes a worker and every absence recorded for them.
    pub fn remove_worker(&mut self, id: &str) -> Option<Worker> {
        let pos = self.workers.iter().position(|w| w.id == id)?;
        let removed = self.workers.remove(pos);
        for day in &mut self.week.days {
            day.excluded_workers.remove(id);
        }
        Some(removed)
    }

    /// Certifies a worker for a task.
    ///
    /// Returns `false` if either ID is unknown or the capability already
    /// existed.
    pub fn grant(&mut self, worker_id: &str, task_id: &str) -> bool {
        if self.task(task_id).is_none() {
            return false;
        }
        match self.workers.iter_mut().find(|w| w.id == worker_id) {
            Some(worker) => worker.capabilities.insert(task_id.to_string()),
            None => false,
        }
    }

    /// Withdraws a worker's certification for a task.
    pub fn revoke(&mut self, worker_id: &str, task_id: &str) -> bool {
        match self.workers.iter_mut().find(|w| w.id == worker_id) {
            Some(worker) => worker.capabilities.remove(task_id),
            None => false,
        }
    }

    /// Appends a day. Returns `false` if a day with the same ID exists.
    pub fn add_day(&mut self, day: DaySchedule) -> bool {
        if self.week.day(&day.day).is_some() {
            return false;
        }
        self.week.days.push(day);
        true
    }

    /// Finds a day for modification.
    pub fn day_mut(&mut self, day: &str) -> Option<&mut DaySchedule> {
        self.week.day_mut(day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_roster() -> Roster {
        Roster::new()
            .with_task(Task::new("wooden", 10))
            .with_task(Task::new("scary", 1))
            .with_worker(Worker::new("john").with_capabilities(["wooden", "scary"]))
            .with_worker(Worker::new("bob").with_capability("scary"))
            .with_day(
                DaySchedule::new("mon", 20)
                    .with_excluded_task("wooden")
                    .with_excluded_worker("bob"),
            )
    }

    #[test]
    fn test_lookup() {
        let r = sample_roster();
        assert_eq!(r.task("wooden").unwrap().duration_min, 10);
        assert!(r.worker("bob").is_some());
        assert!(r.task("fast").is_none());
        assert_eq!(r.task_ids(), vec!["wooden", "scary"]);
        assert_eq!(r.worker_ids(), vec!["john", "bob"]);
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut r = sample_roster();
        assert!(!r.add_task(Task::new("wooden", 3)));
        assert!(r.add_task(Task::new("fast", 5)));
        assert!(!r.add_worker(Worker::new("john")));
        assert!(r.add_worker(Worker::new("alice")));
        assert!(!r.add_day(DaySchedule::new("mon", 5)));
        assert!(r.add_day(DaySchedule::new("tue", 5)));
    }

    #[test]
    fn test_remove_task_cascades() {
        let mut r = sample_roster();
        let removed = r.remove_task("wooden").unwrap();
        assert_eq!(removed.id, "wooden");
        assert!(!r.worker("john").unwrap().can_perform("wooden"));
        assert!(r.week.day("mon").unwrap().excluded_tasks.is_empty());
        assert!(r.remove_task("wooden").is_none());
    }

    #[test]
    fn test_remove_worker_cascades() {
        let mut r = sample_roster();
        assert!(r.remove_worker("bob").is_some());
        assert!(r.week.day("mon").unwrap().excluded_workers.is_empty());
        assert!(r.remove_worker("bob").is_none());
    }

    #[test]
    fn test_grant_and_revoke() {
        let mut r = sample_roster();
        assert!(r.grant("bob", "wooden"));
        assert!(!r.grant("bob", "wooden"));
        assert!(!r.grant("bob", "unknown"));
        assert!(!r.grant("nobody", "wooden"));
        assert!(r.worker("bob").unwrap().can_perform("wooden"));

        assert!(r.revoke("bob", "wooden"));
        assert!(!r.revoke("bob", "wooden"));
        assert!(!r.worker("bob").unwrap().can_perform("wooden"));
    }

    #[test]
    fn test_set_task_duration() {
        let mut r = sample_roster();
        assert!(r.set_task_duration("scary", 4));
        assert_eq!(r.task("scary").unwrap().duration_min, 4);
        assert!(!r.set_task_duration("unknown", 4));
    }

    #[test]
    fn test_day_mut() {
        let mut r = sample_roster();
        r.day_mut("mon").unwrap().budget_min = 0;
        assert!(r.week.day("mon").unwrap().is_closed());
        assert!(r.day_mut("sun").is_none());
    }

    #[test]
    fn test_roster_serde_roundtrip() {
        let r = sample_roster();
        let json = serde_json::to_string(&r).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
