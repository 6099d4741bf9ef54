//! Planner configuration.
//!
//! Every field has a default, so a config file only lists what it changes:
//!
//! ```json
//! { "time_limit_ms": 5000, "construction": ["nearest_arc"] }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::deadline::Deadline;
use crate::error::ConfigError;
use crate::matrix::{MatrixOptions, UNREACHABLE_COST, check_unreachable_cost};
use crate::solver::{Construction, SolveOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Cost used for POI pairs with no connecting road.
    pub unreachable_cost: f64,
    /// Maximum iterations for local search improvement.
    pub local_search_iterations: usize,
    /// Wall-clock budget per request. `None` means unlimited.
    pub time_limit_ms: Option<u64>,
    /// Construction heuristics to try.
    pub construction: Vec<Construction>,
    /// Use the rayon pool for matrix rows, restarts and path expansion.
    pub parallel: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            unreachable_cost: UNREACHABLE_COST,
            local_search_iterations: 1_000,
            time_limit_ms: None,
            construction: vec![Construction::CheapestInsertion, Construction::NearestArc],
            parallel: true,
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject settings no request could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unreachable_cost(self.unreachable_cost)?;
        Ok(())
    }

    /// Deadline for a request starting now.
    pub fn deadline(&self) -> Deadline {
        self.time_limit_ms
            .map_or(Deadline::none(), |ms| Deadline::after(Duration::from_millis(ms)))
    }

    pub fn matrix_options(&self, deadline: Deadline) -> MatrixOptions {
        MatrixOptions {
            unreachable_cost: self.unreachable_cost,
            parallel: self.parallel,
            deadline,
        }
    }

    pub fn solve_options(&self, deadline: Deadline) -> SolveOptions {
        SolveOptions {
            local_search_iterations: self.local_search_iterations,
            construction: self.construction.clone(),
            parallel: self.parallel,
            deadline,
        }
    }
}
