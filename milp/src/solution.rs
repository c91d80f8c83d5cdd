use crate::{Float, VarId};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A coarse result category reported by a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    /// The backend finished normally with a usable result.
    Ok,
    /// The backend finished without a usable result.
    Error,
}

/// Describes how a backend finished the search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum TerminationCondition {
    /// A proven optimal solution was found.
    Optimal,
    /// The feasible region is empty.
    Infeasible,
    /// The objective can be improved without bound.
    Unbounded,
    /// Any other backend specific termination (limits, numerical issues).
    Other(String),
}

impl fmt::Display for TerminationCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationCondition::Optimal => write!(f, "optimal"),
            TerminationCondition::Infeasible => write!(f, "infeasible"),
            TerminationCondition::Unbounded => write!(f, "unbounded"),
            TerminationCondition::Other(reason) => write!(f, "other: {reason}"),
        }
    }
}

/// Raw metadata of a single backend run, exposed verbatim for downstream
/// rendering.
#[derive(Clone, Debug, Serialize)]
pub struct SolverMetadata {
    /// A name of the backend which performed the run.
    pub backend: String,
    /// Wall-clock duration of the run.
    pub solve_time: Duration,
    /// A process return code, if the backend runs out of process.
    pub return_code: Option<i32>,
    /// A backend specific message, if any.
    pub message: Option<String>,
}

/// A dense assignment of solved variable values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableValues(Vec<Float>);

impl VariableValues {
    /// Creates a new instance of `VariableValues`.
    pub fn new(values: Vec<Float>) -> Self {
        Self(values)
    }

    /// Returns a solved value of the given variable.
    pub fn value(&self, var: VarId) -> Float {
        self.0[var.index()]
    }

    /// Returns an amount of stored values.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Checks whether there are no values stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns all values as a slice indexed by variable position.
    pub fn as_slice(&self) -> &[Float] {
        self.0.as_slice()
    }
}

/// An outcome of a single solve call.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    /// A coarse result category.
    pub status: SolverStatus,
    /// How the backend finished the search.
    pub termination: TerminationCondition,
    /// Solved variable values, present only for an optimal termination.
    pub values: Option<VariableValues>,
    /// The objective value, present only for an optimal termination.
    pub objective: Option<Float>,
    /// Raw metadata of the run.
    pub metadata: SolverMetadata,
}

impl SolveOutcome {
    /// Checks whether the run terminated with a proven optimal solution.
    pub fn is_optimal(&self) -> bool {
        self.termination == TerminationCondition::Optimal
    }
}
