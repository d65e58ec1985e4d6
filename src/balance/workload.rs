//! Workload metrics for a day roster.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Load | Minutes of work assigned to a worker |
//! | Spread | max(remaining) - min(remaining) |
//! | Mean load | Average load over available workers |
//! | Idle workers | Workers with no task |
//! | Utilization | Total load / (budget × workers) |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::DayRoster;

/// Workload distribution indicators for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadStats {
    /// Minutes assigned per worker.
    pub load_by_worker: BTreeMap<String, i64>,
    /// Smallest remaining time (minutes).
    pub min_remaining: i64,
    /// Largest remaining time (minutes).
    pub max_remaining: i64,
    /// Difference between the idlest and busiest worker (minutes).
    pub spread: i64,
    /// Average assigned minutes per worker.
    pub mean_load: f64,
    /// Workers with nothing assigned.
    pub idle_workers: usize,
    /// Fraction of pooled budget in use (0.0..1.0).
    pub utilization: f64,
}

impl WorkloadStats {
    /// Computes workload indicators for a day roster.
    pub fn calculate(roster: &DayRoster) -> Self {
        let load_by_worker: BTreeMap<String, i64> = roster
            .remaining
            .iter()
            .map(|(w, r)| (w.to_string(), roster.budget_min - r))
            .collect();

        let workers = load_by_worker.len();
        let total_load: i64 = load_by_worker.values().sum();
        let idle_workers = load_by_worker.values().filter(|l| **l == 0).count();

        let mean_load = if workers == 0 {
            0.0
        } else {
            total_load as f64 / workers as f64
        };

        let pooled = roster.budget_min * workers as i64;
        let utilization = if pooled <= 0 {
            0.0
        } else {
            total_load as f64 / pooled as f64
        };

        Self {
            load_by_worker,
            min_remaining: roster.remaining.min().unwrap_or(0),
            max_remaining: roster.remaining.max().unwrap_or(0),
            spread: roster.remaining.spread(),
            mean_load,
            idle_workers,
            utilization,
        }
    }

    /// Whether the spread is within the given tolerance (minutes).
    pub fn is_balanced_within(&self, max_spread: i64) -> bool {
        self.spread <= max_spread
    }
}
