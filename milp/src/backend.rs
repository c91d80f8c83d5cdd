#[cfg(test)]
#[path = "../tests/unit/backend_test.rs"]
mod backend_test;

use crate::{IpProblem, SolveOutcome, SolverMetadata, SolverStatus, TerminationCondition, VariableValues};
use std::fmt;

/// Identifies a MILP engine the solve contract can delegate to.
///
/// All variants are always nameable so that preference lists can be built
/// independently of the compiled feature set; [`BackendKind::is_available`]
/// tells whether a given engine is actually present in the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum BackendKind {
    /// The HiGHS solver, linked natively.
    Highs,
    /// The COIN-OR CBC solver, linked natively.
    CoinCbc,
    /// The microlp solver, pure Rust.
    Microlp,
}

impl BackendKind {
    /// All known backends in the preferred order of use: strongest engine
    /// first, the pure Rust fallback last.
    pub const DEFAULT_PRIORITY: [BackendKind; 3] = [BackendKind::Highs, BackendKind::CoinCbc, BackendKind::Microlp];

    /// Returns a short stable name of the backend.
    pub fn name(&self) -> &'static str {
        match self {
            BackendKind::Highs => "highs",
            BackendKind::CoinCbc => "coin-cbc",
            BackendKind::Microlp => "microlp",
        }
    }

    /// Checks whether the backend was compiled into the current build.
    pub fn is_available(&self) -> bool {
        match self {
            BackendKind::Highs => cfg!(feature = "highs"),
            BackendKind::CoinCbc => cfg!(feature = "coin_cbc"),
            BackendKind::Microlp => cfg!(feature = "microlp"),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returns all backends usable in the current build, in default priority order.
pub fn available_backends() -> Vec<BackendKind> {
    BackendKind::DEFAULT_PRIORITY.iter().copied().filter(BackendKind::is_available).collect()
}

/// Returns the first backend from the given preference list which is present
/// in the current build.
pub fn select_backend(preference: &[BackendKind]) -> Option<BackendKind> {
    preference.iter().copied().find(BackendKind::is_available)
}

/// An error raised when the requested backend is not present in the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackendUnavailable(pub BackendKind);

impl fmt::Display for BackendUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "solver backend '{}' is not available in this build", self.0)
    }
}

impl std::error::Error for BackendUnavailable {}

/// Solves the given problem with the given backend.
///
/// A non-optimal termination (infeasible, unbounded, backend specific limits)
/// is not an error of the call itself: it is reported through the returned
/// [`SolveOutcome`]. The only failure here is asking for an engine which is
/// not compiled in.
#[cfg(any(feature = "microlp", feature = "highs", feature = "coin_cbc"))]
pub fn solve(problem: &IpProblem, backend: BackendKind) -> Result<SolveOutcome, BackendUnavailable> {
    let timer = std::time::Instant::now();
    let result = match backend {
        #[cfg(feature = "highs")]
        BackendKind::Highs => bridge::run_highs(problem),
        #[cfg(feature = "coin_cbc")]
        BackendKind::CoinCbc => bridge::run_coin_cbc(problem),
        #[cfg(feature = "microlp")]
        BackendKind::Microlp => bridge::run_microlp(problem),
        #[allow(unreachable_patterns)]
        other => return Err(BackendUnavailable(other)),
    };
    let solve_time = timer.elapsed();

    Ok(match result {
        Ok(values) => {
            let objective = problem.objective().evaluate(values.as_slice());
            SolveOutcome {
                status: SolverStatus::Ok,
                termination: TerminationCondition::Optimal,
                values: Some(VariableValues::new(values)),
                objective: Some(objective),
                metadata: SolverMetadata {
                    backend: backend.name().to_string(),
                    solve_time,
                    return_code: None,
                    message: None,
                },
            }
        }
        Err(err) => {
            let message = err.to_string();
            let termination = match err {
                good_lp::ResolutionError::Infeasible => TerminationCondition::Infeasible,
                good_lp::ResolutionError::Unbounded => TerminationCondition::Unbounded,
                _ => TerminationCondition::Other(message.clone()),
            };
            SolveOutcome {
                status: SolverStatus::Error,
                termination,
                values: None,
                objective: None,
                metadata: SolverMetadata {
                    backend: backend.name().to_string(),
                    solve_time,
                    return_code: None,
                    message: Some(message),
                },
            }
        }
    })
}

/// Solves the given problem with the given backend.
///
/// This build carries no backend at all, so the call always reports the
/// backend as unavailable.
#[cfg(not(any(feature = "microlp", feature = "highs", feature = "coin_cbc")))]
pub fn solve(problem: &IpProblem, backend: BackendKind) -> Result<SolveOutcome, BackendUnavailable> {
    let _ = problem;

    Err(BackendUnavailable(backend))
}

#[cfg(any(feature = "microlp", feature = "highs", feature = "coin_cbc"))]
mod bridge {
    //! Translates the immutable problem record to the `good_lp` model types
    //! right before a run: the record itself stays backend agnostic.

    use crate::{Float, IpProblem, RelOp};
    use good_lp::{constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable};

    #[cfg(feature = "highs")]
    pub(super) fn run_highs(problem: &IpProblem) -> Result<Vec<Float>, ResolutionError> {
        let (vars, xs) = register_variables(problem);
        let objective = expression(problem.objective().terms(), &xs);
        let model = vars.minimise(objective).using(good_lp::solvers::highs::highs);

        attach_and_solve(model, problem, &xs)
    }

    #[cfg(feature = "coin_cbc")]
    pub(super) fn run_coin_cbc(problem: &IpProblem) -> Result<Vec<Float>, ResolutionError> {
        let (vars, xs) = register_variables(problem);
        let objective = expression(problem.objective().terms(), &xs);
        let model = vars.minimise(objective).using(good_lp::solvers::coin_cbc::coin_cbc);

        attach_and_solve(model, problem, &xs)
    }

    #[cfg(feature = "microlp")]
    pub(super) fn run_microlp(problem: &IpProblem) -> Result<Vec<Float>, ResolutionError> {
        let (vars, xs) = register_variables(problem);
        let objective = expression(problem.objective().terms(), &xs);
        let model = vars.minimise(objective).using(good_lp::solvers::microlp::microlp);

        attach_and_solve(model, problem, &xs)
    }

    fn register_variables(problem: &IpProblem) -> (ProblemVariables, Vec<Variable>) {
        let mut vars = ProblemVariables::new();
        let xs = (0..problem.variable_count()).map(|_| vars.add(variable().binary())).collect();

        (vars, xs)
    }

    fn expression(terms: &[(Float, crate::VarId)], xs: &[Variable]) -> Expression {
        terms.iter().map(|&(coefficient, var)| coefficient * xs[var.index()]).sum()
    }

    fn attach_and_solve<M>(mut model: M, problem: &IpProblem, xs: &[Variable]) -> Result<Vec<Float>, ResolutionError>
    where
        M: SolverModel<Error = ResolutionError>,
    {
        for item in problem.constraints() {
            let lhs = expression(item.expr.terms(), xs);
            let constraint = match item.op {
                RelOp::Eq => constraint::eq(lhs, item.rhs),
                RelOp::Le => constraint::leq(lhs, item.rhs),
                RelOp::Ge => constraint::geq(lhs, item.rhs),
            };
            model = model.with(constraint);
        }

        let solution = model.solve()?;

        Ok(xs.iter().map(|&x| solution.value(x)).collect())
    }
}
