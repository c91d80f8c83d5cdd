//! The solve pipeline: feasibility check, model construction, backend runs
//! with lazy subtour cuts, and reconstruction of ordered routes.

#[cfg(test)]
#[path = "../../tests/unit/solver/solver_test.rs"]
mod solver_test;

mod extraction;
pub use self::extraction::*;

use crate::construction::{CvrpModel, SubtourMode};
use crate::models::{FeasibilityError, Network};
use crate::utils::{create_stderr_logger, InfoLogger};
use milp::{BackendKind, Float, IpConstraint, SolverMetadata, TerminationCondition};
use serde::Serialize;
use std::fmt;

/// A configuration of a solve run.
#[derive(Clone)]
pub struct SolveConfig {
    /// Backend preference order; the first one available in the build is used.
    pub backends: Vec<BackendKind>,
    /// An upper bound of lazy subtour cut rounds before giving up.
    pub max_cut_rounds: usize,
    /// A logger which receives progress information.
    pub logger: InfoLogger,
}

impl Default for SolveConfig {
    fn default() -> Self {
        SolveConfigBuilder::default().build()
    }
}

/// Provides a way to build a solve configuration with sensible defaults.
pub struct SolveConfigBuilder {
    config: SolveConfig,
}

impl Default for SolveConfigBuilder {
    fn default() -> Self {
        Self {
            config: SolveConfig {
                backends: BackendKind::DEFAULT_PRIORITY.to_vec(),
                max_cut_rounds: 100,
                logger: create_stderr_logger(),
            },
        }
    }
}

impl SolveConfigBuilder {
    /// Sets the backend preference order.
    pub fn with_backends(mut self, backends: Vec<BackendKind>) -> Self {
        self.config.backends = backends;
        self
    }

    /// Sets an upper bound of lazy subtour cut rounds.
    pub fn with_max_cut_rounds(mut self, rounds: usize) -> Self {
        self.config.max_cut_rounds = rounds;
        self
    }

    /// Sets a logger which receives progress information.
    pub fn with_logger(mut self, logger: InfoLogger) -> Self {
        self.config.logger = logger;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> SolveConfig {
        self.config
    }
}

/// An error of the solve pipeline.
#[derive(Clone, Debug)]
pub enum SolveError {
    /// The network failed the feasibility pre-check; no model was built.
    Infeasible(FeasibilityError),
    /// No usable solver backend is present in this build.
    NoSolverAvailable,
    /// A backend ran but did not reach a proven optimal solution.
    NonOptimal {
        /// How the backend finished.
        termination: TerminationCondition,
        /// Raw metadata of the failed run.
        metadata: SolverMetadata,
    },
    /// The lazy cut loop did not converge within the configured rounds.
    CutRoundLimit {
        /// An amount of performed solve rounds.
        rounds: usize,
    },
    /// A solved assignment failed the route decomposition assertions.
    InvalidSolution(ExtractionError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Infeasible(err) => write!(f, "{err}"),
            SolveError::NoSolverAvailable => write!(f, "no solver backends available"),
            SolveError::NonOptimal { termination, .. } => {
                write!(f, "solver did not find an optimal solution: {termination}")
            }
            SolveError::CutRoundLimit { rounds } => {
                write!(f, "subtour cut generation did not converge within {rounds} round(s)")
            }
            SolveError::InvalidSolution(err) => {
                write!(f, "solved assignment is not a valid set of routes: {err}")
            }
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::Infeasible(err) => Some(err),
            SolveError::InvalidSolution(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FeasibilityError> for SolveError {
    fn from(err: FeasibilityError) -> Self {
        SolveError::Infeasible(err)
    }
}

/// A solved network: ordered per-vehicle routes together with the objective
/// value and raw backend metadata, exposed verbatim for downstream rendering.
#[derive(Clone, Debug, Serialize)]
pub struct CvrpSolution {
    /// Ordered (from, to) identifier pairs per vehicle identifier.
    pub routes: VehicleRoutes,
    /// A total distance of all routes, the objective value.
    pub total_distance: Float,
    /// Raw metadata of the final backend run.
    pub metadata: SolverMetadata,
}

/// Solves the network: feasibility check, a fresh model, backend run(s) and
/// route extraction, as a strict sequential pipeline.
///
/// The feasibility check runs eagerly so expected input problems surface
/// before any expensive model construction; backend and extraction errors are
/// only knowable after the potentially slow solve step. The network stays
/// read-only for the whole call and the model is never reused.
pub fn solve_network(network: &Network, config: &SolveConfig) -> Result<CvrpSolution, SolveError> {
    network.check_solvability()?;

    let backend = milp::select_backend(&config.backends).ok_or(SolveError::NoSolverAvailable)?;
    let model = CvrpModel::new(network);
    (config.logger)(&format!(
        "solving {} client(s) with {} vehicle(s) using '{}' backend",
        network.clients().len(),
        network.vehicles().len(),
        backend
    ));

    let mut cuts: Vec<IpConstraint> = Vec::default();
    let mut rounds = 0;

    loop {
        rounds += 1;
        let problem = model.problem().extended(cuts.iter().cloned());
        let outcome = milp::solve(&problem, backend).map_err(|_| SolveError::NoSolverAvailable)?;

        let values = match (outcome.values, outcome.termination) {
            (Some(values), TerminationCondition::Optimal) => values,
            (_, termination) => return Err(SolveError::NonOptimal { termination, metadata: outcome.metadata }),
        };

        let subtours = match model.subtour_mode() {
            // the base model already forbids client-only cycles
            SubtourMode::Materialized => Vec::default(),
            SubtourMode::LazyCuts => detect_subtours(&model, &values),
        };

        if subtours.is_empty() {
            let routes = extract_routes(&model, &values).map_err(SolveError::InvalidSolution)?;
            let total_distance = problem.objective().evaluate(values.as_slice());
            (config.logger)(&format!(
                "optimal solution found in {}ms after {} round(s)",
                outcome.metadata.solve_time.as_millis(),
                rounds
            ));

            return Ok(CvrpSolution { routes, total_distance, metadata: outcome.metadata });
        }

        if rounds >= config.max_cut_rounds {
            return Err(SolveError::CutRoundLimit { rounds });
        }

        (config.logger)(&format!("round {}: {} violated subtour(s) found, cutting them off", rounds, subtours.len()));
        cuts.extend(subtours.iter().map(|subset| model.subtour_cut(subset)));
    }
}
