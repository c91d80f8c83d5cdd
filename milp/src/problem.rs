#[cfg(test)]
#[path = "../tests/unit/problem_test.rs"]
mod problem_test;

use crate::Float;

/// A handle of a single decision variable within [`IpProblem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VarId(usize);

impl VarId {
    /// Returns a position of the variable in the problem's variable space.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A sum of weighted decision variables.
#[derive(Clone, Debug, Default)]
pub struct LinearExpr {
    terms: Vec<(Float, VarId)>,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a weighted variable to the expression.
    pub fn push(&mut self, coefficient: Float, var: VarId) {
        self.terms.push((coefficient, var));
    }

    /// Returns expression terms as (coefficient, variable) pairs.
    pub fn terms(&self) -> &[(Float, VarId)] {
        self.terms.as_slice()
    }

    /// Evaluates the expression against a dense assignment of variable values.
    pub fn evaluate(&self, values: &[Float]) -> Float {
        self.terms.iter().map(|&(coefficient, var)| coefficient * values[var.index()]).sum()
    }
}

impl FromIterator<(Float, VarId)> for LinearExpr {
    fn from_iter<T: IntoIterator<Item = (Float, VarId)>>(iter: T) -> Self {
        Self { terms: iter.into_iter().collect() }
    }
}

/// A relational operator of a linear constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelOp {
    /// Left and right sides must be equal.
    Eq,
    /// Left side must be less than or equal to right side.
    Le,
    /// Left side must be greater than or equal to right side.
    Ge,
}

/// A labelled linear constraint in the form `expr <op> rhs`.
#[derive(Clone, Debug)]
pub struct IpConstraint {
    /// A label used to group constraints of the same family.
    pub label: String,
    /// Left hand side of the constraint.
    pub expr: LinearExpr,
    /// Relational operator between the sides.
    pub op: RelOp,
    /// Right hand side constant.
    pub rhs: Float,
}

/// An immutable integer programming problem over binary decision variables.
///
/// The objective is always in minimization form: callers which want to
/// maximize are expected to negate their coefficients. The record is built
/// once via [`IpProblemBuilder`], consumed by a backend and read back by
/// whoever interprets the solved values; it is never mutated in place.
#[derive(Clone, Debug, Default)]
pub struct IpProblem {
    variable_names: Vec<String>,
    objective: LinearExpr,
    constraints: Vec<IpConstraint>,
}

impl IpProblem {
    /// Returns an amount of decision variables.
    pub fn variable_count(&self) -> usize {
        self.variable_names.len()
    }

    /// Returns a name assigned to the given variable.
    pub fn variable_name(&self, var: VarId) -> &str {
        self.variable_names[var.index()].as_str()
    }

    /// Returns the minimization objective.
    pub fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Returns all constraints in insertion order.
    pub fn constraints(&self) -> &[IpConstraint] {
        self.constraints.as_slice()
    }

    /// Returns a copy of the problem with extra constraints appended.
    ///
    /// Used by cut generation loops which tighten the feasible region between
    /// solve rounds without touching the base record.
    pub fn extended(&self, cuts: impl IntoIterator<Item = IpConstraint>) -> IpProblem {
        let mut extended = self.clone();
        extended.constraints.extend(cuts);

        extended
    }
}

/// Assembles an [`IpProblem`] incrementally.
#[derive(Debug, Default)]
pub struct IpProblemBuilder {
    problem: IpProblem,
}

impl IpProblemBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new binary decision variable and returns its handle.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        let var = VarId(self.problem.variable_names.len());
        self.problem.variable_names.push(name.into());

        var
    }

    /// Sets the minimization objective.
    pub fn minimize(&mut self, objective: LinearExpr) {
        self.problem.objective = objective;
    }

    /// Adds a labelled constraint.
    pub fn constraint(&mut self, label: impl Into<String>, expr: LinearExpr, op: RelOp, rhs: Float) {
        self.problem.constraints.push(IpConstraint { label: label.into(), expr, op, rhs });
    }

    /// Finalizes the problem record.
    pub fn build(self) -> IpProblem {
        self.problem
    }
}
