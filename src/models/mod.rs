//! Rostering domain models.
//!
//! Provides the data types for describing a week of inspection work and
//! the results of planning it.
//!
//! # Domain Mappings
//!
//! | u-roster | Amusement park | Facility maintenance | Clinic |
//! |----------|----------------|----------------------|--------|
//! | Task | Ride check | Inspection round | Procedure |
//! | Worker | Ride operator | Technician | Nurse |
//! | DaySchedule | Opening day | Shift | Clinic day |
//! | WeekPlan | Check roster | Duty rota | Weekly rota |

mod assignment;
mod capability;
mod day;
mod plan;
mod roster;
mod task;
mod worker;

pub use assignment::{Allocation, Assignment, RemainingBudget};
pub use capability::CapabilityModel;
pub use day::{DaySchedule, WeekSchedule};
pub use plan::{
    DayOutcome, DayPlan, DayRoster, RosterCell, RosterRow, RosterTable, StatusNarrative, WeekPlan,
};
pub use roster::Roster;
pub use task::Task;
pub use worker::Worker;
