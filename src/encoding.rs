//! SAT encoding of bounded ESOP synthesis.
//!
//! For `k` cubes over `n` variables, cube `j` is described by two blocks of
//! selector variables:
//!
//! - `p(j, l)`: cube `j` contains the positive literal `x_l`,
//! - `q(j, l)`: cube `j` contains the negative literal `!x_l`.
//!
//! Setting both `p(j, l)` and `q(j, l)` makes cube `j` empty (it covers no
//! minterm), and the cube is dropped when decoding.
//!
//! For the `s`-th care row of the truth table, `z(s, j)` holds iff cube `j`
//! covers that row, and the XOR of `z(s, 0..k)` must equal the row's output.
//!
//! All variables are numbered by fixed affine formulas, see [`VarLayout`].

use log::debug;

use crate::cube::Cube;
use crate::esop::Esop;
use crate::sat::{Model, SatSolver};
use crate::truth_table::TruthTable;
use crate::types::{Lit, Var};

/// Variable numbering for `num_cubes` cubes over `num_vars` variables.
///
/// ```text
/// p(j, l) = 1 + n*j + l
/// q(j, l) = 1 + n*k + n*j + l
/// z(s, j) = 1 + 2*n*k + s*k + j
/// ```
///
/// The three blocks are disjoint and laid out in this order.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VarLayout {
    num_vars: u32,
    num_cubes: u32,
}

impl VarLayout {
    pub fn new(num_vars: u32, num_cubes: u32) -> Self {
        assert!(
            num_vars <= Cube::MAX_VARS,
            "cube data structure cannot store more than {} variables",
            Cube::MAX_VARS
        );
        assert!(num_cubes > 0, "number of cubes must be positive");
        Self { num_vars, num_cubes }
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_cubes(&self) -> u32 {
        self.num_cubes
    }

    fn mk_var(id: u64) -> Var {
        assert!(id <= i32::MAX as u64, "variable id {} overflows the literal range", id);
        Var::new(id as u32)
    }

    fn check(&self, j: u32, l: u32) {
        assert!(j < self.num_cubes, "cube index {} out of range", j);
        assert!(l < self.num_vars, "variable index {} out of range", l);
    }

    /// Selector for the positive literal `x_l` in cube `j`.
    pub fn p(&self, j: u32, l: u32) -> Var {
        self.check(j, l);
        let (n, j, l) = (self.num_vars as u64, j as u64, l as u64);
        Self::mk_var(1 + n * j + l)
    }

    /// Selector for the negative literal `!x_l` in cube `j`.
    pub fn q(&self, j: u32, l: u32) -> Var {
        self.check(j, l);
        let (n, k, j, l) = (self.num_vars as u64, self.num_cubes as u64, j as u64, l as u64);
        Self::mk_var(1 + n * k + n * j + l)
    }

    /// Indicator that cube `j` covers the `sample`-th care row.
    pub fn z(&self, sample: u32, j: u32) -> Var {
        assert!(j < self.num_cubes, "cube index {} out of range", j);
        let (n, k, s, j) = (self.num_vars as u64, self.num_cubes as u64, sample as u64, j as u64);
        Self::mk_var(1 + 2 * n * k + s * k + j)
    }

    /// Number of `p` and `q` variables together.
    pub fn num_selector_vars(&self) -> u32 {
        2 * self.num_vars * self.num_cubes
    }

    /// Total number of variables used for `num_samples` care rows.
    pub fn num_total_vars(&self, num_samples: u32) -> u64 {
        self.num_selector_vars() as u64 + num_samples as u64 * self.num_cubes as u64
    }
}

/// Adds the constraints "the XOR of the `k` cubes agrees with every care row of `tt`".
///
/// Don't-care rows add nothing. Returns the number of care rows encoded.
pub fn encode<S>(solver: &mut S, tt: &TruthTable, layout: &VarLayout) -> u32
where
    S: SatSolver + ?Sized,
{
    assert_eq!(
        tt.num_vars(),
        layout.num_vars(),
        "layout does not match the truth table"
    );

    let n = layout.num_vars();
    let k = layout.num_cubes();

    let mut num_samples = 0;
    for (sample, (minterm, value)) in tt.care_rows().enumerate() {
        let sample = sample as u32;
        let minterm = Cube::minterm(n, minterm);

        // The literal of cube j at position l that excludes this minterm.
        let conflicting = |j: u32, l: u32| {
            if minterm.bit(l) {
                layout.q(j, l)
            } else {
                layout.p(j, l)
            }
        };

        let mut xor_clause = Vec::with_capacity(k as usize);

        // z_j -> cube j covers the minterm
        for j in 0..k {
            let z = layout.z(sample, j);
            xor_clause.push(z);
            for l in 0..n {
                solver.add_clause(&[z.neg(), conflicting(j, l).neg()]);
            }
        }

        // cube j covers the minterm -> z_j
        for j in 0..k {
            let mut clause = Vec::with_capacity(n as usize + 1);
            clause.push(layout.z(sample, j).pos());
            clause.extend((0..n).map(|l| conflicting(j, l).pos()));
            solver.add_clause(&clause);
        }

        solver.add_xor_clause(&xor_clause, value);
        num_samples += 1;
    }

    debug!(
        "encoded {} care rows of {} for k = {}: {} variables",
        num_samples,
        tt.len(),
        k,
        layout.num_total_vars(num_samples)
    );
    num_samples
}

/// Decodes the cubes selected by `model`.
///
/// Returns the ESOP (without the cubes that have both polarities of some
/// variable) and the blocking clause excluding this exact `p`/`q` assignment.
pub fn decode(model: &Model, layout: &VarLayout) -> (Esop, Vec<Lit>) {
    let n = layout.num_vars();
    let k = layout.num_cubes();

    let mut esop = Esop::default();
    let mut blocking_clause = Vec::with_capacity(layout.num_selector_vars() as usize);

    for j in 0..k {
        let mut cube = Cube::default();
        let mut cancel_cube = false;
        for l in 0..n {
            let p = layout.p(j, l);
            let q = layout.q(j, l);
            let p_value = model.value(p);
            let q_value = model.value(q);

            blocking_clause.push(p.lit(!p_value));
            blocking_clause.push(q.lit(!q_value));

            if p_value && q_value {
                cancel_cube = true;
            } else if p_value {
                cube.add_literal(l, true);
            } else if q_value {
                cube.add_literal(l, false);
            }
        }

        if !cancel_cube {
            esop.push(cube);
        }
    }

    (esop, blocking_clause)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;
    use crate::error::Result;

    /// Solver that only records what is added to it.
    #[derive(Default)]
    struct Recorder {
        clauses: Vec<Vec<i32>>,
        xor_clauses: Vec<(Vec<u32>, bool)>,
    }

    impl SatSolver for Recorder {
        fn add_clause(&mut self, lits: &[Lit]) {
            self.clauses.push(lits.iter().map(|l| l.to_dimacs()).collect());
        }

        fn add_xor_clause(&mut self, vars: &[Var], parity: bool) {
            self.xor_clauses.push((vars.iter().map(|v| v.id()).collect(), parity));
        }

        fn solve(&mut self) -> Result<Option<Model>> {
            Ok(None)
        }
    }

    #[test]
    fn test_layout_formulas() {
        let layout = VarLayout::new(3, 2);
        assert_eq!(layout.p(0, 0).id(), 1);
        assert_eq!(layout.p(1, 2).id(), 6);
        assert_eq!(layout.q(0, 0).id(), 7);
        assert_eq!(layout.q(1, 2).id(), 12);
        assert_eq!(layout.z(0, 0).id(), 13);
        assert_eq!(layout.z(0, 1).id(), 14);
        assert_eq!(layout.z(3, 1).id(), 20);
        assert_eq!(layout.num_selector_vars(), 12);
        assert_eq!(layout.num_total_vars(4), 20);
    }

    #[test]
    fn test_layout_blocks_are_disjoint() {
        for n in 0..=4 {
            for k in 1..=4 {
                let layout = VarLayout::new(n, k);
                let samples = 1u32 << n;
                let mut seen = HashSet::new();
                for j in 0..k {
                    for l in 0..n {
                        assert!(seen.insert(layout.p(j, l)));
                        assert!(seen.insert(layout.q(j, l)));
                    }
                    for s in 0..samples {
                        assert!(seen.insert(layout.z(s, j)));
                    }
                }
                // Dense numbering starting at 1.
                let max = seen.iter().map(|v| v.id()).max().unwrap_or(0);
                assert_eq!(max as usize, seen.len());
                assert_eq!(max as u64, layout.num_total_vars(samples));
            }
        }
    }

    #[test]
    #[should_panic(expected = "cube index 2 out of range")]
    fn test_layout_out_of_range() {
        VarLayout::new(2, 2).p(2, 0);
    }

    #[test]
    fn test_encode_single_row() {
        // n = 1, k = 1, only minterm 1 is a care row with output 1.
        let tt = TruthTable::from_binary_str("-1");
        let layout = VarLayout::new(1, 1);
        let mut rec = Recorder::default();
        let samples = encode(&mut rec, &tt, &layout);
        assert_eq!(samples, 1);

        // p = 1, q = 2, z = 3
        assert_eq!(rec.clauses, vec![vec![-3, -2], vec![3, 2]]);
        assert_eq!(rec.xor_clauses, vec![(vec![3], true)]);
    }

    #[test]
    fn test_encode_counts() {
        let tt = TruthTable::from_binary_str("0110");
        let layout = VarLayout::new(2, 3);
        let mut rec = Recorder::default();
        let samples = encode(&mut rec, &tt, &layout);
        assert_eq!(samples, 4);
        // Per row: k*n binary clauses plus k covering clauses.
        assert_eq!(rec.clauses.len(), 4 * (3 * 2 + 3));
        assert_eq!(rec.xor_clauses.len(), 4);
        let parities: Vec<bool> = rec.xor_clauses.iter().map(|(_, p)| *p).collect();
        assert_eq!(parities, vec![false, true, true, false]);
        for (vars, _) in &rec.xor_clauses {
            assert_eq!(vars.len(), 3);
        }
    }

    #[test]
    fn test_encode_skips_trailing_dont_cares() {
        let tt = TruthTable::from_binary_str("1-------");
        let layout = VarLayout::new(3, 2);
        let mut rec = Recorder::default();
        assert_eq!(encode(&mut rec, &tt, &layout), 1);
        assert_eq!(rec.xor_clauses.len(), 1);

        let tt = TruthTable::from_binary_str("--------");
        let mut rec = Recorder::default();
        assert_eq!(encode(&mut rec, &tt, &layout), 0);
        assert!(rec.clauses.is_empty());
        assert!(rec.xor_clauses.is_empty());
    }

    #[test]
    fn test_encode_dont_care_markers_are_interchangeable() {
        let layout = VarLayout::new(3, 2);
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        encode(&mut a, &TruthTable::from_binary_str("1-0x1*?0"), &layout);
        encode(&mut b, &TruthTable::from_binary_str("1?0-1--0"), &layout);
        assert_eq!(a.clauses, b.clauses);
        assert_eq!(a.xor_clauses, b.xor_clauses);
    }

    #[test]
    fn test_decode() {
        let layout = VarLayout::new(2, 3);
        // cube 0: p(0,0) -> x0
        // cube 1: q(1,1) -> !x1
        // cube 2: p(2,0) & q(2,0) -> dead
        let model = Model::from_dimacs([
            layout.p(0, 0).pos().to_dimacs(),
            layout.q(1, 1).pos().to_dimacs(),
            layout.p(2, 0).pos().to_dimacs(),
            layout.q(2, 0).pos().to_dimacs(),
        ]);
        let (esop, blocking) = decode(&model, &layout);

        let mut x0 = Cube::default();
        x0.add_literal(0, true);
        let mut not_x1 = Cube::default();
        not_x1.add_literal(1, false);
        assert_eq!(esop, Esop::new(vec![x0, not_x1]));

        assert_eq!(blocking.len(), 12);
        // The blocking clause is falsified by the model it was built from.
        assert!(blocking.iter().all(|&lit| !model.lit_value(lit)));
    }

    #[test]
    fn test_decode_all_free() {
        let layout = VarLayout::new(3, 1);
        let (esop, blocking) = decode(&Model::default(), &layout);
        assert_eq!(esop, Esop::new(vec![Cube::default()]));
        assert!(blocking.iter().all(|lit| lit.is_positive()));
    }
}
