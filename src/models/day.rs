//! Per-day availability and the week schedule.
//!
//! A day carries a uniform per-worker time budget plus the tasks and
//! workers that are excluded from that day's planning universe.
//!
//! # Exclusion Semantics
//! - Excluding a task removes the obligation to cover it that day.
//! - Excluding a worker removes them from the pool; the obligation stays.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Availability for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// Day identifier (e.g. "mon").
    pub day: String,
    /// Time each worker has available (minutes). `0` = facility closed.
    pub budget_min: i64,
    /// Tasks not required on this day.
    #[serde(default)]
    pub excluded_tasks: BTreeSet<String>,
    /// Workers absent on this day.
    #[serde(default)]
    pub excluded_workers: BTreeSet<String>,
}

impl DaySchedule {
    /// Creates an open day with the given per-worker budget.
    pub fn new(day: impl Into<String>, budget_min: i64) -> Self {
        Self {
            day: day.into(),
            budget_min,
            excluded_tasks: BTreeSet::new(),
            excluded_workers: BTreeSet::new(),
        }
    }

    /// Creates a closed day (budget 0).
    pub fn closed(day: impl Into<String>) -> Self {
        Self::new(day, 0)
    }

    /// Marks a task as not required on this day.
    pub fn with_excluded_task(mut self, task_id: impl Into<String>) -> Self {
        self.excluded_tasks.insert(task_id.into());
        self
    }

    /// Marks a worker as absent on this day.
    pub fn with_excluded_worker(mut self, worker_id: impl Into<String>) -> Self {
        self.excluded_workers.insert(worker_id.into());
        self
    }

    /// Whether the facility is closed (no planning happens).
    pub fn is_closed(&self) -> bool {
        self.budget_min == 0
    }

    /// Whether the task must be covered on this day.
    pub fn requires_task(&self, task_id: &str) -> bool {
        !self.excluded_tasks.contains(task_id)
    }

    /// Whether the worker is available on this day.
    pub fn has_worker(&self, worker_id: &str) -> bool {
        !self.excluded_workers.contains(worker_id)
    }
}

/// Ordered list of days to plan.
///
/// Serialized as a map of day ID to day data. Entry order is preserved in
/// both directions, so the order days appear in a document is the order
/// they are planned and reported in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeekSchedule {
    /// Days in planning order.
    pub days: Vec<DaySchedule>,
}

impl WeekSchedule {
    /// Creates an empty week.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a day.
    pub fn with_day(mut self, day: DaySchedule) -> Self {
        self.days.push(day);
        self
    }

    /// Finds a day by ID.
    pub fn day(&self, day: &str) -> Option<&DaySchedule> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Finds a day by ID for modification.
    pub fn day_mut(&mut self, day: &str) -> Option<&mut DaySchedule> {
        self.days.iter_mut().find(|d| d.day == day)
    }

    /// Day IDs in planning order.
    pub fn day_ids(&self) -> Vec<&str> {
        self.days.iter().map(|d| d.day.as_str()).collect()
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the week has no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Map value form of a day (the key carries the day ID).
#[derive(Serialize)]
struct DayEntryRef<'a> {
    budget_min: i64,
    excluded_tasks: &'a BTreeSet<String>,
    excluded_workers: &'a BTreeSet<String>,
}

#[derive(Deserialize)]
struct DayEntry {
    budget_min: i64,
    #[serde(default)]
    excluded_tasks: BTreeSet<String>,
    #[serde(default)]
    excluded_workers: BTreeSet<String>,
}

impl Serialize for WeekSchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for d in &self.days {
            map.serialize_entry(
                &d.day,
                &DayEntryRef {
                    budget_min: d.budget_min,
                    excluded_tasks: &d.excluded_tasks,
                    excluded_workers: &d.excluded_workers,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeekSchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeekVisitor;

        impl<'de> Visitor<'de> for WeekVisitor {
            type Value = WeekSchedule;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of day id to day schedule")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut days = Vec::with_capacity(map.size_hint().unwrap_or(0));
                // Repeated keys are kept; validation reports them.
                while let Some((day, entry)) = map.next_entry::<String, DayEntry>()? {
                    days.push(DaySchedule {
                        day,
                        budget_min: entry.budget_min,
                        excluded_tasks: entry.excluded_tasks,
                        excluded_workers: entry.excluded_workers,
                    });
                }
                Ok(WeekSchedule { days })
            }
        }

        deserializer.deserialize_map(WeekVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_builder() {
        let d = DaySchedule::new("mon", 240)
            .with_excluded_task("wooden")
            .with_excluded_worker("bob");

        assert_eq!(d.day, "mon");
        assert!(!d.is_closed());
        assert!(!d.requires_task("wooden"));
        assert!(d.requires_task("fast"));
        assert!(!d.has_worker("bob"));
        assert!(d.has_worker("john"));
    }

    #[test]
    fn test_closed_day() {
        assert!(DaySchedule::closed("sun").is_closed());
        assert_eq!(DaySchedule::closed("sun").budget_min, 0);
    }

    #[test]
    fn test_week_lookup() {
        let mut week = WeekSchedule::new()
            .with_day(DaySchedule::new("mon", 20))
            .with_day(DaySchedule::closed("tue"));

        assert_eq!(week.len(), 2);
        assert_eq!(week.day_ids(), vec!["mon", "tue"]);
        assert!(week.day("tue").unwrap().is_closed());
        assert!(week.day("wed").is_none());

        week.day_mut("mon").unwrap().budget_min = 30;
        assert_eq!(week.day("mon").unwrap().budget_min, 30);
    }

    #[test]
    fn test_week_deserialize_preserves_document_order() {
        let json = r#"{
            "wed": {"budget_min": 20},
            "mon": {"budget_min": 0},
            "fri": {"budget_min": 30, "excluded_tasks": ["wooden"], "excluded_workers": ["bob"]}
        }"#;
        let week: WeekSchedule = serde_json::from_str(json).unwrap();

        assert_eq!(week.day_ids(), vec!["wed", "mon", "fri"]);
        let fri = week.day("fri").unwrap();
        assert!(!fri.requires_task("wooden"));
        assert!(!fri.has_worker("bob"));
    }

    #[test]
    fn test_week_serialize_as_map() {
        let week = WeekSchedule::new()
            .with_day(DaySchedule::new("tue", 20).with_excluded_worker("bob"))
            .with_day(DaySchedule::closed("mon"));

        let json = serde_json::to_string(&week).unwrap();
        assert_eq!(
            json,
            r#"{"tue":{"budget_min":20,"excluded_tasks":[],"excluded_workers":["bob"]},"mon":{"budget_min":0,"excluded_tasks":[],"excluded_workers":[]}}"#
        );

        let back: WeekSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, week);
    }

    #[test]
    fn test_week_keeps_repeated_days() {
        let json = r#"{"mon": {"budget_min": 10}, "mon": {"budget_min": 20}}"#;
        let week: WeekSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(week.len(), 2);
    }
}
