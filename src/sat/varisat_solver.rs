use log::trace;
use varisat::ExtendFormula;

use crate::error::{Error, Result};
use crate::sat::{Model, SatSolver};
use crate::types::{Lit, Var};

/// [`SatSolver`] backed by [varisat](https://docs.rs/varisat).
///
/// External variables are mapped to varisat variables on first use. XOR
/// constraints are encoded into CNF as a chain of 2-input XOR gates, whose
/// intermediate variables are internal and never show up in a [`Model`].
pub struct VarisatSolver {
    solver: varisat::Solver<'static>,
    vars: Vec<varisat::Var>,
    num_clauses: usize,
    num_xor_clauses: usize,
}

impl VarisatSolver {
    pub fn new() -> Self {
        Self {
            solver: varisat::Solver::new(),
            vars: Vec::new(),
            num_clauses: 0,
            num_xor_clauses: 0,
        }
    }

    /// Number of external variables seen so far.
    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    /// Number of clauses added, counting the CNF expansion of XOR constraints.
    pub fn num_clauses(&self) -> usize {
        self.num_clauses
    }

    pub fn num_xor_clauses(&self) -> usize {
        self.num_xor_clauses
    }

    fn var(&mut self, var: Var) -> varisat::Var {
        while self.vars.len() <= var.index() {
            let v = self.solver.new_var();
            self.vars.push(v);
        }
        self.vars[var.index()]
    }

    fn lit(&mut self, lit: Lit) -> varisat::Lit {
        let v = self.var(lit.var());
        if lit.is_positive() {
            v.positive()
        } else {
            v.negative()
        }
    }

    fn add_internal_clause(&mut self, clause: &[varisat::Lit]) {
        self.solver.add_clause(clause);
        self.num_clauses += 1;
    }
}

impl Default for VarisatSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SatSolver for VarisatSolver {
    fn add_clause(&mut self, lits: &[Lit]) {
        trace!("add_clause({:?})", lits.iter().map(|l| l.to_dimacs()).collect::<Vec<_>>());
        let clause: Vec<varisat::Lit> = lits.iter().map(|&l| self.lit(l)).collect();
        self.add_internal_clause(&clause);
    }

    fn add_xor_clause(&mut self, vars: &[Var], parity: bool) {
        trace!(
            "add_xor_clause({:?}, {})",
            vars.iter().map(|v| v.id()).collect::<Vec<_>>(),
            parity
        );
        self.num_xor_clauses += 1;

        let mut iter = vars.iter();
        let Some(&first) = iter.next() else {
            // The empty XOR is false.
            if parity {
                self.add_internal_clause(&[]);
            }
            return;
        };

        // acc <-> first ^ ... ^ (current var)
        let mut acc = self.var(first).positive();
        for &var in iter {
            let x = self.var(var).positive();
            let t = self.solver.new_lit();
            self.add_internal_clause(&[!t, acc, x]);
            self.add_internal_clause(&[!t, !acc, !x]);
            self.add_internal_clause(&[t, !acc, x]);
            self.add_internal_clause(&[t, acc, !x]);
            acc = t;
        }

        self.add_internal_clause(&[if parity { acc } else { !acc }]);
    }

    fn solve(&mut self) -> Result<Option<Model>> {
        if !self.solver.solve()? {
            return Ok(None);
        }

        let lits = self
            .solver
            .model()
            .ok_or_else(|| Error::Solver("solver reported SAT without a model".to_string()))?;

        let mut values = Vec::new();
        for lit in lits {
            let index = lit.var().index();
            if index >= values.len() {
                values.resize(index + 1, false);
            }
            values[index] = lit.is_positive();
        }

        let data = self
            .vars
            .iter()
            .map(|v| values.get(v.index()).copied().unwrap_or(false))
            .collect();
        Ok(Some(Model::new(data)))
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn lits(ls: &[i32]) -> Vec<Lit> {
        ls.iter().map(|&l| Lit::from_dimacs(l)).collect()
    }

    fn vars(vs: &[u32]) -> Vec<Var> {
        vs.iter().map(|&v| Var::new(v)).collect()
    }

    /// Counts all models over variables `1..=n` by blocking each one.
    fn count_models(solver: &mut VarisatSolver, n: u32) -> usize {
        let mut count = 0;
        while let Some(model) = solver.solve().unwrap() {
            count += 1;
            let blocking: Vec<Lit> = (1..=n).map(|v| Var::new(v).lit(!model.value(Var::new(v)))).collect();
            solver.add_clause(&blocking);
        }
        count
    }

    #[test]
    fn test_simple_sat() {
        let mut solver = VarisatSolver::new();
        solver.add_clause(&lits(&[1, 2]));
        solver.add_clause(&lits(&[-1]));
        let model = solver.solve().unwrap().unwrap();
        assert!(!model.value(Var::new(1)));
        assert!(model.value(Var::new(2)));
    }

    #[test]
    fn test_simple_unsat() {
        let mut solver = VarisatSolver::new();
        solver.add_clause(&lits(&[1]));
        solver.add_clause(&lits(&[-1]));
        assert!(solver.solve().unwrap().is_none());
    }

    #[test]
    fn test_xor_models() {
        for parity in [false, true] {
            let mut solver = VarisatSolver::new();
            solver.add_xor_clause(&vars(&[1, 2, 3]), parity);
            let model = solver.solve().unwrap().unwrap();
            let actual = (1..=3).filter(|&v| model.value(Var::new(v))).count() % 2 == 1;
            assert_eq!(actual, parity);
            // Auxiliary variables are not part of the model.
            assert_eq!(model.num_vars(), 3);
            // Half of all assignments have the required parity.
            assert_eq!(count_models(&mut solver, 3), 4);
        }
    }

    #[test]
    fn test_xor_single_var() {
        let mut solver = VarisatSolver::new();
        solver.add_xor_clause(&vars(&[5]), false);
        let model = solver.solve().unwrap().unwrap();
        assert!(!model.value(Var::new(5)));
    }

    #[test]
    fn test_xor_empty() {
        let mut solver = VarisatSolver::new();
        solver.add_xor_clause(&[], false);
        assert!(solver.solve().unwrap().is_some());

        let mut solver = VarisatSolver::new();
        solver.add_xor_clause(&[], true);
        assert!(solver.solve().unwrap().is_none());
    }

    #[test]
    fn test_sparse_variables() {
        let mut solver = VarisatSolver::new();
        solver.add_clause(&lits(&[10]));
        assert_eq!(solver.num_vars(), 10);
        let model = solver.solve().unwrap().unwrap();
        assert!(model.value(Var::new(10)));
        assert_eq!(model.num_vars(), 10);
    }

    #[test]
    fn test_incremental_enumeration() {
        let mut solver = VarisatSolver::new();
        solver.add_clause(&lits(&[1, 2]));
        assert_eq!(count_models(&mut solver, 2), 3);
    }
}
