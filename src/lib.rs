//! # esop-rs: exact ESOP synthesis in Rust
//!
//! **`esop-rs`** finds minimum **Exclusive-Sum-Of-Products (ESOP)** forms of Boolean functions
//! given as (incompletely specified) truth tables.
//!
//! ## What is an ESOP?
//!
//! An ESOP is the XOR of product terms (cubes), e.g. `x0 & !x1 ^ x2`.
//! A function can have many ESOPs; this crate computes those with the fewest cubes.
//!
//! ## How it works
//!
//! The question "is there an ESOP with `k` cubes?" is encoded into SAT:
//! every cube gets a positive and a negative selector variable per input variable,
//! and every care row of the truth table gets an XOR-parity constraint over the cubes covering it.
//! The synthesizer asks a SAT solver for `k = 1, 2, ...` in turn and, at the first satisfiable `k`,
//! enumerates all solutions with blocking clauses.
//!
//! ## Basic Usage
//!
//! ```rust
//! use esop_rs::synth::synthesize;
//!
//! // x0 XOR x1, rows are indexed by the assignment bits (x0 is the lowest bit).
//! let esops = synthesize("0110", 4).unwrap();
//!
//! for esop in &esops {
//!     println!("{}", esop);
//! }
//! assert!(esops.iter().all(|e| e.num_cubes() == 2));
//! ```
//!
//! Don't-care rows are written with any character other than `0` and `1`:
//!
//! ```rust
//! use esop_rs::synth::{synthesize_with_config, SynthesisConfig};
//! use esop_rs::truth_table::TruthTable;
//!
//! let tt = TruthTable::from_binary_str("01-1");
//! let config = SynthesisConfig { max_cubes: 3, ..SynthesisConfig::default() };
//! let synthesis = synthesize_with_config(&tt, &config).unwrap();
//! assert_eq!(synthesis.num_cubes, Some(1)); // x0
//! ```
//!
//! ## Core Components
//!
//! - **[`synth`]**: The bounded search loop.
//! - **[`encoding`]**: Variable layout, constraint generation and model decoding.
//! - **[`sat`]**: The [`SatSolver`][crate::sat::SatSolver] interface and the varisat backend.
//! - **[`cube`]**, **[`esop`]**, **[`truth_table`]**: The data types.
//!
//! The library reports progress through the [`log`](https://docs.rs/log) facade.

pub mod cube;
pub mod encoding;
pub mod error;
pub mod esop;
pub mod sat;
pub mod synth;
pub mod truth_table;
pub mod types;
