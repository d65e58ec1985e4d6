//! Feasibility search.
//!
//! Finds *one* complete assignment of a day's tasks to certified workers
//! such that no worker exceeds the per-worker budget, or proves that none
//! exists. The result is not balanced; see [`crate::balance`].
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use u_roster::models::{CapabilityModel, Task, Worker};
//! use u_roster::search::{AssignmentSearch, BacktrackingSearch, SearchLimits};
//!
//! let workers = [Worker::new("w1").with_capabilities(["A", "B"])];
//! let model = CapabilityModel::new(vec![Task::new("A", 3), Task::new("B", 4)], workers.iter());
//!
//! let mut rng = SmallRng::seed_from_u64(1);
//! let report = BacktrackingSearch::new().search(&model, 10, &SearchLimits::default(), &mut rng);
//! assert!(report.outcome.is_found());
//! ```
//!
//! # Complexity
//! Worst case exponential in the number of tasks, reached when no complete
//! assignment exists. [`SearchLimits`] bounds the effort.

mod backtracking;

pub use backtracking::BacktrackingSearch;

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::models::{Allocation, CapabilityModel};

/// Default cap on visited search nodes.
pub const DEFAULT_MAX_NODES: u64 = 5_000_000;

/// Effort bounds for a single search call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchLimits {
    /// Maximum number of search nodes to visit. `None` = unbounded.
    pub max_nodes: Option<u64>,
    /// Wall-clock allowance (ms). `None` = unbounded.
    pub timeout_ms: Option<u64>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_nodes: Some(DEFAULT_MAX_NODES),
            timeout_ms: None,
        }
    }
}

impl SearchLimits {
    /// No node or time bound. Infeasible instances may take exponential time.
    pub fn unbounded() -> Self {
        Self {
            max_nodes: None,
            timeout_ms: None,
        }
    }

    /// Sets the node bound.
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    /// Sets the wall-clock bound.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}

/// What a search call concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A complete, valid allocation.
    Found(Allocation),
    /// No complete allocation exists.
    NotFound,
    /// Limits ran out before the search could decide.
    Aborted,
}

impl SearchOutcome {
    /// Whether an allocation was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Outcome plus effort statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    /// What the search concluded.
    pub outcome: SearchOutcome,
    /// Search nodes visited (one per tentative assignment, plus the root).
    pub nodes_visited: u64,
}

/// A strategy for finding a feasible assignment.
///
/// Implementations must return only allocations that cover every task of
/// the model with a certified worker and keep each worker within
/// `budget_min`. Feasibility must not depend on `rng`; only which feasible
/// allocation is returned may.
pub trait AssignmentSearch: Send + Sync + Debug {
    /// Strategy name (e.g. "backtracking").
    fn name(&self) -> &'static str;

    /// Searches for a complete allocation.
    fn search(
        &self,
        model: &CapabilityModel,
        budget_min: i64,
        limits: &SearchLimits,
        rng: &mut dyn RngCore,
    ) -> SearchReport;
}
