//! SAT solver interface.
//!
//! The synthesizer talks to a SAT solver only through the [`SatSolver`] trait:
//! it adds plain clauses and XOR-parity constraints over 1-based variables,
//! and asks for a model. A solver instance is used incrementally, i.e. clauses
//! may be added after a successful [`SatSolver::solve`] call.
//!
//! [`VarisatSolver`] is the bundled backend.

use crate::error::Result;
use crate::types::{Lit, Var};

mod varisat_solver;

pub use varisat_solver::VarisatSolver;

pub trait SatSolver {
    /// Adds the disjunction of `lits`.
    fn add_clause(&mut self, lits: &[Lit]);

    /// Adds the constraint `vars[0] ^ vars[1] ^ ... == parity`.
    fn add_xor_clause(&mut self, vars: &[Var], parity: bool);

    /// Solves the current formula.
    ///
    /// Returns `Ok(Some(model))` if it is satisfiable, `Ok(None)` if it is not.
    fn solve(&mut self) -> Result<Option<Model>>;
}

impl<S: SatSolver + ?Sized> SatSolver for Box<S> {
    fn add_clause(&mut self, lits: &[Lit]) {
        (**self).add_clause(lits)
    }

    fn add_xor_clause(&mut self, vars: &[Var], parity: bool) {
        (**self).add_xor_clause(vars, parity)
    }

    fn solve(&mut self) -> Result<Option<Model>> {
        (**self).solve()
    }
}

/// A satisfying assignment, indexed by variable.
///
/// Variables the solver never saw read as false.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Model {
    data: Vec<bool>,
}

impl Model {
    /// Creates a model where `data[i]` is the value of variable `i + 1`.
    pub fn new(data: Vec<bool>) -> Self {
        Self { data }
    }

    /// Creates a model from the literals true in it, in DIMACS form.
    pub fn from_dimacs(lits: impl IntoIterator<Item = i32>) -> Self {
        let mut data = Vec::new();
        for lit in lits {
            let lit = Lit::from_dimacs(lit);
            let index = lit.var().index();
            if index >= data.len() {
                data.resize(index + 1, false);
            }
            data[index] = lit.is_positive();
        }
        Self { data }
    }

    pub fn num_vars(&self) -> usize {
        self.data.len()
    }

    pub fn value(&self, var: Var) -> bool {
        self.data.get(var.index()).copied().unwrap_or(false)
    }

    pub fn lit_value(&self, lit: Lit) -> bool {
        self.value(lit.var()) == lit.is_positive()
    }
}
