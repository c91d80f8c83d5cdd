//! This module reimports commonly used types.

pub use crate::models::{FeasibilityError, Network, Place, ValidationError, Vehicle};

pub use crate::construction::{CvrpModel, SubtourMode, SUBTOUR_ENUMERATION_LIMIT};

pub use crate::solver::{
    solve_network, CvrpSolution, ExtractionError, SolveConfig, SolveConfigBuilder, SolveError, VehicleRoutes,
};

pub use crate::utils::InfoLogger;

// Reimport the solver adapter contract types
pub use milp::{available_backends, select_backend, BackendKind, SolverMetadata, SolverStatus, TerminationCondition};
