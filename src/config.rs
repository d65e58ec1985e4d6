//! Planner configuration.
//!
//! All fields have defaults, so an empty document is a valid config.
//!
//! ```toml
//! seed = 42
//! balance = true
//!
//! [search]
//! max_nodes = 1000000
//! timeout_ms = 2000
//! ```

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::SearchLimits;

/// Settings for a planning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Seed for reproducible runs. `None` = fresh entropy each run.
    pub seed: Option<u64>,
    /// Effort bounds for each day's feasibility search.
    pub search: SearchLimits,
    /// Whether to balance workloads after the search.
    pub balance: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            search: SearchLimits::default(),
            balance: true,
        }
    }
}

impl PlannerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Fixes the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the search limits.
    pub fn with_search_limits(mut self, limits: SearchLimits) -> Self {
        self.search = limits;
        self
    }

    /// Enables or disables balancing.
    pub fn with_balance(mut self, balance: bool) -> Self {
        self.balance = balance;
        self
    }

    /// Random source for a run: seeded if a seed is set.
    pub fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}
