//! Day and week planning.
//!
//! [`DayPlanner`] turns one day of a roster into a [`DayOutcome`]:
//! capability model, feasibility search, then workload balancing.
//! [`WeekAggregator`] validates the roster and runs the day planner over
//! every day of the week, keeping each outcome.
//!
//! # Example
//!
//! ```
//! use u_roster::config::PlannerConfig;
//! use u_roster::models::{DaySchedule, Roster, Task, Worker};
//! use u_roster::planner::plan_week;
//!
//! let roster = Roster::new()
//!     .with_task(Task::new("coaster", 10))
//!     .with_task(Task::new("wheel", 5))
//!     .with_worker(Worker::new("ana").with_capabilities(["coaster", "wheel"]))
//!     .with_worker(Worker::new("ben").with_capability("wheel"))
//!     .with_day(DaySchedule::new("sat", 12))
//!     .with_day(DaySchedule::closed("sun"));
//!
//! let plan = plan_week(&roster, &PlannerConfig::new().with_seed(1)).unwrap();
//! assert!(plan.is_success());
//! assert_eq!(plan.narrative().headline(), "Generated worker schedule for sat");
//! ```
//!
//! [`DayOutcome`]: crate::models::DayOutcome

mod day;
mod week;

pub use day::DayPlanner;
pub use week::WeekAggregator;

use crate::config::PlannerConfig;
use crate::error::Result;
use crate::models::{Roster, WeekPlan};

/// Plans a whole week with the default search, configured by `config`.
///
/// Uses the seed from `config` if set.
pub fn plan_week(roster: &Roster, config: &PlannerConfig) -> Result<WeekPlan> {
    let mut rng = config.rng();
    WeekAggregator::from_config(config).plan(roster, &mut rng)
}
