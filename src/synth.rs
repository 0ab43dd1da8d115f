//! Exact ESOP synthesis.
//!
//! The search tries `k = 1, 2, ...` cubes in turn. For every `k`, a fresh SAT
//! solver receives the constraints from [`encode`], and all of its models are
//! enumerated by adding a blocking clause after each one. The first `k` with at
//! least one model ends the search, so every returned ESOP has the minimum
//! number of cube slots.
//!
//! # Examples
//!
//! ```
//! use esop_rs::synth::synthesize;
//! use esop_rs::truth_table::TruthTable;
//!
//! let esops = synthesize("0110", 2).unwrap();
//! assert!(!esops.is_empty());
//!
//! let tt = TruthTable::from_binary_str("0110");
//! for esop in &esops {
//!     assert!(esop.implements(&tt));
//!     assert_eq!(esop.num_cubes(), 2);
//! }
//! ```

use log::{debug, info};

use crate::encoding::{decode, encode, VarLayout};
use crate::error::Result;
use crate::esop::Esop;
use crate::sat::{SatSolver, VarisatSolver};
use crate::truth_table::TruthTable;

/// Configuration of the bounded search.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Largest number of cubes to try (inclusive).
    pub max_cubes: u32,
    /// Number of cubes to start from. Values below 1 are treated as 1.
    pub min_cubes: u32,
    /// Stop enumerating after this many solutions.
    ///
    /// The search still stops at the first feasible `k`, and at least one
    /// solution is returned when one exists.
    pub solution_limit: Option<usize>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_cubes: 4,
            min_cubes: 1,
            solution_limit: None,
        }
    }
}

impl SynthesisConfig {
    pub fn with_max_cubes(max_cubes: u32) -> Self {
        Self {
            max_cubes,
            ..Self::default()
        }
    }
}

/// Outcome of a synthesis run.
#[derive(Debug, Clone, Default)]
pub struct Synthesis {
    /// All solutions found, in discovery order.
    pub esops: Vec<Esop>,
    /// Number of cube slots `k` at which the solutions were found.
    pub num_cubes: Option<u32>,
    /// Total number of `solve` calls over all `k`.
    pub num_solver_calls: usize,
}

impl Synthesis {
    pub fn is_empty(&self) -> bool {
        self.esops.is_empty()
    }
}

/// Synthesizes all minimum ESOPs of the truth table given as a binary string,
/// with at most `max_cubes` cubes.
///
/// Returns an empty vector if no ESOP with at most `max_cubes` cubes exists.
///
/// # Panics
///
/// Panics if the length of `binary` is not a power of two, or if it has more
/// than 32 variables.
pub fn synthesize(binary: &str, max_cubes: u32) -> Result<Vec<Esop>> {
    let tt = TruthTable::from_binary_str(binary);
    let synthesis = synthesize_with_config(&tt, &SynthesisConfig::with_max_cubes(max_cubes))?;
    Ok(synthesis.esops)
}

/// Runs the bounded search with the bundled [`VarisatSolver`].
pub fn synthesize_with_config(tt: &TruthTable, config: &SynthesisConfig) -> Result<Synthesis> {
    synthesize_with(tt, config, VarisatSolver::new)
}

/// Runs the bounded search, creating one solver per `k` with `make_solver`.
pub fn synthesize_with<S, F>(tt: &TruthTable, config: &SynthesisConfig, mut make_solver: F) -> Result<Synthesis>
where
    S: SatSolver,
    F: FnMut() -> S,
{
    let mut num_solver_calls = 0;

    for k in config.min_cubes.max(1)..=config.max_cubes {
        info!("bounded synthesis for k = {}", k);

        let layout = VarLayout::new(tt.num_vars(), k);
        let mut solver = make_solver();
        encode(&mut solver, tt, &layout);

        let mut esops = Vec::new();
        loop {
            num_solver_calls += 1;
            let Some(model) = solver.solve()? else {
                break;
            };

            let (esop, blocking_clause) = decode(&model, &layout);
            debug!("solution #{} for k = {}: {}", esops.len() + 1, k, esop);
            esops.push(esop);

            if config.solution_limit.is_some_and(|limit| esops.len() >= limit) {
                debug!("solution limit reached");
                break;
            }

            solver.add_clause(&blocking_clause);
        }

        if !esops.is_empty() {
            info!("found {} solutions for k = {}", esops.len(), k);
            return Ok(Synthesis {
                esops,
                num_cubes: Some(k),
                num_solver_calls,
            });
        }
    }

    info!("no ESOP with at most {} cubes", config.max_cubes);
    Ok(Synthesis {
        esops: Vec::new(),
        num_cubes: None,
        num_solver_calls,
    })
}
