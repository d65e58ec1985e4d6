//! Planning results.
//!
//! A [`WeekPlan`] records one [`DayOutcome`] per planned day, in planning
//! order. Every day's outcome is kept regardless of how other days fared;
//! week-level success is derived, not stored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Assignment, RemainingBudget, Roster};

/// A settled, balanced roster for one open day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRoster {
    /// Task ID → worker ID.
    pub assignment: Assignment,
    /// Worker ID → remaining minutes.
    pub remaining: RemainingBudget,
    /// Per-worker budget the day was planned with (minutes).
    pub budget_min: i64,
    /// Number of balancing transfers applied after the search.
    pub balance_moves: usize,
}

impl DayRoster {
    /// Minutes of work assigned to a worker.
    pub fn load_of(&self, worker_id: &str) -> Option<i64> {
        self.remaining.get(worker_id).map(|r| self.budget_min - r)
    }

    /// One-line summary, e.g. "assigned 3 tasks to 2 workers".
    pub fn summary(&self) -> String {
        format!(
            "assigned {} tasks to {} workers",
            self.assignment.len(),
            self.assignment.workers().len()
        )
    }
}

/// Result of planning a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DayOutcome {
    /// Budget was 0; nothing to assign and no search was run.
    Closed,
    /// A complete, balanced assignment was found.
    Assigned(DayRoster),
    /// No assignment satisfies capability and budget constraints.
    Infeasible,
    /// The search ran out of its node or time allowance before deciding.
    SearchAborted {
        /// Search nodes visited before giving up.
        nodes_visited: u64,
    },
}

impl DayOutcome {
    /// Whether the day counts as planned (closed or assigned).
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Closed | Self::Assigned(_))
    }

    /// Whether the facility was closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// The day roster, if one was produced.
    pub fn roster(&self) -> Option<&DayRoster> {
        match self {
            Self::Assigned(r) => Some(r),
            _ => None,
        }
    }

    /// The assignment, if one was produced.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.roster().map(|r| &r.assignment)
    }

    /// Short status, e.g. "closed" or "assigned 3 tasks to 2 workers".
    pub fn describe(&self) -> String {
        match self {
            Self::Closed => "closed".to_string(),
            Self::Assigned(r) => r.summary(),
            Self::Infeasible => "infeasible".to_string(),
            Self::SearchAborted { nodes_visited } => {
                format!("search aborted after {nodes_visited} nodes")
            }
        }
    }
}

/// Outcome for one named day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    /// Day identifier.
    pub day: String,
    /// What happened on that day.
    pub outcome: DayOutcome,
}

/// Per-day outcomes for a whole week, in planning order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    /// Outcomes in planning order.
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a day's outcome.
    pub fn push(&mut self, day: impl Into<String>, outcome: DayOutcome) {
        self.days.push(DayPlan {
            day: day.into(),
            outcome,
        });
    }

    /// Whether every day is closed or assigned.
    pub fn is_success(&self) -> bool {
        self.days.iter().all(|d| d.outcome.is_success())
    }

    /// Outcome for a day.
    pub fn outcome(&self, day: &str) -> Option<&DayOutcome> {
        self.days.iter().find(|d| d.day == day).map(|d| &d.outcome)
    }

    /// Days that received an assignment.
    pub fn assigned_days(&self) -> Vec<&str> {
        self.days
            .iter()
            .filter(|d| matches!(d.outcome, DayOutcome::Assigned(_)))
            .map(|d| d.day.as_str())
            .collect()
    }

    /// Days that were closed.
    pub fn closed_days(&self) -> Vec<&str> {
        self.days
            .iter()
            .filter(|d| d.outcome.is_closed())
            .map(|d| d.day.as_str())
            .collect()
    }

    /// Days that could not be planned (infeasible or aborted).
    pub fn failed_days(&self) -> Vec<&str> {
        self.days
            .iter()
            .filter(|d| !d.outcome.is_success())
            .map(|d| d.day.as_str())
            .collect()
    }

    /// Human-readable status: a headline, then one line per day.
    pub fn narrative(&self) -> StatusNarrative {
        let headline = if self.is_success() {
            let assigned = self.assigned_days();
            if assigned.is_empty() {
                "No open days to schedule".to_string()
            } else {
                format!("Generated worker schedule for {}", assigned.join(", "))
            }
        } else {
            format!(
                "Could not find a worker schedule for {}",
                self.failed_days().join(", ")
            )
        };

        let mut lines = Vec::with_capacity(self.days.len() + 1);
        lines.push(headline);
        lines.extend(
            self.days
                .iter()
                .map(|d| format!("{}: {}", d.day, d.outcome.describe())),
        );
        StatusNarrative { lines }
    }

    /// Task × day grid for report rendering.
    ///
    /// Rows follow the roster's task registry, columns follow plan order.
    pub fn table(&self, roster: &Roster) -> RosterTable {
        let rows = roster
            .tasks
            .iter()
            .map(|task| RosterRow {
                task_id: task.id.clone(),
                cells: self
                    .days
                    .iter()
                    .map(|d| {
                        let required = roster
                            .week
                            .day(&d.day)
                            .map_or(true, |s| s.requires_task(&task.id));
                        match &d.outcome {
                            DayOutcome::Closed => RosterCell::Closed,
                            _ if !required => RosterCell::NotRequired,
                            DayOutcome::Assigned(r) => r
                                .assignment
                                .worker_for(&task.id)
                                .map_or(RosterCell::NotRequired, |w| {
                                    RosterCell::Worker(w.to_string())
                                }),
                            _ => RosterCell::Unplanned,
                        }
                    })
                    .collect(),
            })
            .collect();

        RosterTable {
            days: self.days.iter().map(|d| d.day.clone()).collect(),
            rows,
        }
    }
}

/// Ordered status lines describing a week run.
///
/// The first line is a headline; the rest describe each day in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNarrative {
    /// Lines in display order.
    pub lines: Vec<String>,
}

impl StatusNarrative {
    /// The headline.
    pub fn headline(&self) -> &str {
        self.lines.first().map(|s| s.as_str()).unwrap_or("")
    }
}

impl fmt::Display for StatusNarrative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Task × day grid of a week plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterTable {
    /// Column headers (day IDs).
    pub days: Vec<String>,
    /// One row per task.
    pub rows: Vec<RosterRow>,
}

/// One task's assignments across the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRow {
    /// Task ID.
    pub task_id: String,
    /// One cell per day column.
    pub cells: Vec<RosterCell>,
}

/// A single cell of a [`RosterTable`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterCell {
    /// Worker assigned to the task.
    Worker(String),
    /// Task excluded that day.
    NotRequired,
    /// Facility closed that day.
    Closed,
    /// Day could not be planned.
    Unplanned,
}

impl fmt::Display for RosterCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Worker(w) => f.write_str(w),
            Self::NotRequired => f.write_str("-"),
            Self::Closed => f.write_str("closed"),
            Self::Unplanned => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySchedule, Task, Worker};

    fn roster_for(pairs: &[(&str, &str)], budget_min: i64) -> DayRoster {
        let mut assignment = Assignment::new();
        for (t, w) in pairs {
            assignment.insert(*t, *w);
        }
        DayRoster {
            assignment,
            remaining: RemainingBudget::default(),
            budget_min,
            balance_moves: 0,
        }
    }

    fn sample_plan() -> WeekPlan {
        let mut plan = WeekPlan::new();
        plan.push("mon", DayOutcome::Infeasible);
        plan.push("tue", DayOutcome::Assigned(roster_for(&[("A", "w1"), ("B", "w2")], 16)));
        plan.push("wed", DayOutcome::Closed);
        plan.push("thu", DayOutcome::SearchAborted { nodes_visited: 100 });
        plan
    }

    #[test]
    fn test_outcome_flags() {
        assert!(DayOutcome::Closed.is_success());
        assert!(DayOutcome::Closed.assignment().is_none());
        assert!(!DayOutcome::Infeasible.is_success());
        assert!(!DayOutcome::SearchAborted { nodes_visited: 1 }.is_success());
        let assigned = DayOutcome::Assigned(roster_for(&[("A", "w1")], 10));
        assert!(assigned.is_success());
        assert_eq!(assigned.assignment().unwrap().len(), 1);
    }

    #[test]
    fn test_plan_keeps_every_day() {
        let plan = sample_plan();
        assert!(!plan.is_success());
        assert_eq!(plan.days.len(), 4);
        assert_eq!(plan.assigned_days(), vec!["tue"]);
        assert_eq!(plan.closed_days(), vec!["wed"]);
        assert_eq!(plan.failed_days(), vec!["mon", "thu"]);
        assert!(plan.outcome("tue").unwrap().assignment().is_some());
    }

    #[test]
    fn test_failure_narrative() {
        let narrative = sample_plan().narrative();
        assert_eq!(narrative.headline(), "Could not find a worker schedule for mon, thu");
        assert_eq!(
            narrative.lines[1..],
            [
                "mon: infeasible",
                "tue: assigned 2 tasks to 2 workers",
                "wed: closed",
                "thu: search aborted after 100 nodes",
            ]
        );
    }

    #[test]
    fn test_success_narrative() {
        let mut plan = WeekPlan::new();
        plan.push("mon", DayOutcome::Assigned(roster_for(&[("A", "w1")], 10)));
        plan.push("tue", DayOutcome::Closed);
        plan.push("wed", DayOutcome::Assigned(roster_for(&[("A", "w1")], 10)));

        let narrative = plan.narrative();
        assert!(plan.is_success());
        assert_eq!(narrative.headline(), "Generated worker schedule for mon, wed");
        assert_eq!(
            narrative.to_string(),
            "Generated worker schedule for mon, wed\n\
             mon: assigned 1 tasks to 1 workers\n\
             tue: closed\n\
             wed: assigned 1 tasks to 1 workers"
        );
    }

    #[test]
    fn test_all_closed_narrative() {
        let mut plan = WeekPlan::new();
        plan.push("sun", DayOutcome::Closed);
        assert_eq!(plan.narrative().headline(), "No open days to schedule");
    }

    #[test]
    fn test_table() {
        let roster = Roster::new()
            .with_task(Task::new("A", 10))
            .with_task(Task::new("B", 5))
            .with_worker(Worker::new("w1").with_capability("A"))
            .with_day(DaySchedule::new("mon", 16).with_excluded_task("B"))
            .with_day(DaySchedule::new("tue", 16))
            .with_day(DaySchedule::closed("wed"))
            .with_day(DaySchedule::new("thu", 16));

        let table = sample_plan().table(&roster);
        assert_eq!(table.days, vec!["mon", "tue", "wed", "thu"]);
        assert_eq!(table.rows[0].task_id, "A");
        assert_eq!(
            table.rows[0].cells,
            vec![
                RosterCell::Unplanned,
                RosterCell::Worker("w1".into()),
                RosterCell::Closed,
                RosterCell::Unplanned,
            ]
        );
        assert_eq!(table.rows[1].cells[0], RosterCell::NotRequired);
        assert_eq!(table.rows[1].cells[1].to_string(), "w2");
    }

    #[test]
    fn test_outcome_serde_tagging() {
        let json = serde_json::to_string(&DayOutcome::SearchAborted { nodes_visited: 7 }).unwrap();
        assert_eq!(json, r#"{"status":"search_aborted","nodes_visited":7}"#);
        assert_eq!(
            serde_json::to_string(&DayOutcome::Closed).unwrap(),
            r#"{"status":"closed"}"#
        );
    }

    #[test]
    fn test_load_of() {
        let r = DayRoster {
            assignment: [("A", "w1")].into_iter().collect(),
            remaining: [("w1", 6), ("w2", 16)].into_iter().collect(),
            budget_min: 16,
            balance_moves: 0,
        };
        assert_eq!(r.load_of("w1"), Some(10));
        assert_eq!(r.load_of("w2"), Some(0));
        assert_eq!(r.load_of("w3"), None);
    }
}
