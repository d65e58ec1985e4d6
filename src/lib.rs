//! Capability-constrained daily rostering.
//!
//! Assigns a set of timed tasks (ride checks, inspection rounds) to
//! certified workers for each day of a week, so that every task is covered
//! by someone certified for it and nobody exceeds the day's time budget.
//! Found assignments are then rebalanced so workloads come out even.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `Worker`, `DaySchedule`,
//!   `WeekSchedule`, `Roster`, `Assignment`, `DayOutcome`, `WeekPlan`
//! - **`search`**: Feasibility search (`AssignmentSearch`, `BacktrackingSearch`)
//! - **`balance`**: Workload balancing and workload statistics
//! - **`planner`**: Day planning and week aggregation
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling references)
//! - **`config`**: Planner settings (seed, search limits, balancing), TOML-loadable
//! - **`error`**: Errors that stop a run before planning
//!
//! # Quick Start
//!
//! ```
//! use u_roster::{plan_week, DaySchedule, PlannerConfig, Roster, Task, Worker};
//!
//! let roster = Roster::new()
//!     .with_task(Task::new("A", 10))
//!     .with_task(Task::new("B", 5))
//!     .with_task(Task::new("C", 1))
//!     .with_worker(Worker::new("w1").with_capabilities(["A", "B", "C"]))
//!     .with_worker(Worker::new("w2").with_capabilities(["B", "C"]))
//!     .with_day(DaySchedule::new("mon", 16))
//!     .with_day(DaySchedule::closed("tue"));
//!
//! let plan = plan_week(&roster, &PlannerConfig::new().with_seed(7)).unwrap();
//! println!("{}", plan.narrative());
//! ```
//!
//! # Logging
//!
//! Emits `tracing` events and spans; install a subscriber to see them.
//!
//! # References
//!
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 6
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod balance;
pub mod config;
pub mod error;
pub mod models;
pub mod planner;
pub mod search;
pub mod validation;

pub use config::PlannerConfig;
pub use error::{PlanError, Result};
pub use models::{DayOutcome, DaySchedule, Roster, Task, WeekPlan, Worker};
pub use planner::{plan_week, DayPlanner, WeekAggregator};
