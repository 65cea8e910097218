//! Generic 0/1 program representation.
//!
//! The constraint builder emits this plain linear form: a minimize
//! objective and `{≤, =, ≥}` rows over binary decision variables. Any
//! [`Solver`] that understands the form can consume it — the core never
//! assumes which concrete algorithm runs.
//!
//! # Reference
//! Wolsey (1998), "Integer Programming", Ch. 1

mod builder;
mod solver;

pub use builder::ProgramBuilder;
pub use solver::{MicrolpSolver, SolveOutcome, Solver, SolverConfig};

use serde::{Deserialize, Serialize};

/// Index of a decision variable within a [`Program`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VarId(pub u32);

impl VarId {
    /// Index into variable-ordered storage.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A linear expression: weighted sum of decision variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearExpr {
    /// `(variable, coefficient)` terms.
    pub terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    /// Creates an empty expression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-term expression.
    pub fn term(var: VarId, coefficient: f64) -> Self {
        Self {
            terms: vec![(var, coefficient)],
        }
    }

    /// Unit-coefficient sum over variables.
    pub fn sum_of<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = VarId>,
    {
        Self {
            terms: vars.into_iter().map(|v| (v, 1.0)).collect(),
        }
    }

    /// Appends a term.
    pub fn push(&mut self, var: VarId, coefficient: f64) {
        self.terms.push((var, coefficient));
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the expression has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Relational operator of a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    /// Less than or equal.
    Le,
    /// Equal.
    Eq,
    /// Greater than or equal.
    Ge,
}

/// One constraint row: `expr (≤|=|≥) rhs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearConstraint {
    /// Diagnostic label, e.g. `"round_quota:Ann"`.
    pub name: String,
    /// Left-hand side.
    pub expr: LinearExpr,
    /// Relational operator.
    pub cmp: Comparison,
    /// Right-hand side bound.
    pub rhs: f64,
}

impl LinearConstraint {
    /// Creates a `expr ≤ rhs` row.
    pub fn leq(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            cmp: Comparison::Le,
            rhs,
        }
    }

    /// Creates a `expr = rhs` row.
    pub fn eq(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            cmp: Comparison::Eq,
            rhs,
        }
    }

    /// Creates a `expr ≥ rhs` row.
    pub fn geq(name: impl Into<String>, expr: LinearExpr, rhs: f64) -> Self {
        Self {
            name: name.into(),
            expr,
            cmp: Comparison::Ge,
            rhs,
        }
    }
}

/// An assembled 0/1 minimization problem.
///
/// Every variable is binary; the objective is minimized. The structure is
/// opaque to the core once built — it is handed to a [`Solver`] unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Number of decision variables.
    pub num_vars: u32,
    /// Objective to minimize.
    pub objective: LinearExpr,
    /// Constraint rows.
    pub constraints: Vec<LinearConstraint>,
}

impl Program {
    /// Number of decision variables.
    pub fn var_count(&self) -> usize {
        self.num_vars as usize
    }

    /// Number of constraint rows.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

/// The solver's selection: one flag per decision variable.
///
/// Produced once by the solve step and not mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    selected: Vec<bool>,
}

impl Assignment {
    /// Wraps per-variable selection flags.
    pub fn new(selected: Vec<bool>) -> Self {
        Self { selected }
    }

    /// Whether a variable was selected. Out-of-range ids read as
    /// unselected.
    pub fn is_selected(&self, var: VarId) -> bool {
        self.selected.get(var.index()).copied().unwrap_or(false)
    }

    /// Selected variables in ascending order.
    pub fn selected_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.selected
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| VarId(i as u32))
    }

    /// Number of selected variables.
    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Total number of variables.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether there are no variables at all.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_builders() {
        let single = LinearExpr::term(VarId(3), 0.5);
        assert_eq!(single.terms, vec![(VarId(3), 0.5)]);

        let sum = LinearExpr::sum_of([VarId(0), VarId(2)]);
        assert_eq!(sum.terms, vec![(VarId(0), 1.0), (VarId(2), 1.0)]);

        let mut expr = LinearExpr::new();
        assert!(expr.is_empty());
        expr.push(VarId(1), 2.0);
        assert_eq!(expr.len(), 1);
    }

    #[test]
    fn test_constraint_builders() {
        let c = LinearConstraint::eq("round_quota:Ann", LinearExpr::sum_of([VarId(0)]), 3.0);
        assert_eq!(c.name, "round_quota:Ann");
        assert_eq!(c.cmp, Comparison::Eq);
        assert!((c.rhs - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_assignment_queries() {
        let a = Assignment::new(vec![true, false, true, false]);
        assert!(a.is_selected(VarId(0)));
        assert!(!a.is_selected(VarId(1)));
        assert!(!a.is_selected(VarId(9))); // out of range
        assert_eq!(a.selected_count(), 2);
        let vars: Vec<VarId> = a.selected_vars().collect();
        assert_eq!(vars, vec![VarId(0), VarId(2)]);
    }

    #[test]
    fn test_program_counts() {
        let program = Program {
            num_vars: 4,
            objective: LinearExpr::sum_of([VarId(0), VarId(1)]),
            constraints: vec![LinearConstraint::leq(
                "cap",
                LinearExpr::sum_of([VarId(2), VarId(3)]),
                1.0,
            )],
        };
        assert_eq!(program.var_count(), 4);
        assert_eq!(program.constraint_count(), 1);
    }
}
