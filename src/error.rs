//! Error types.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The SAT backend failed to decide satisfiability.
    #[error("SAT solver error: {0}")]
    Solver(String),
}

impl From<varisat::solver::SolverError> for Error {
    fn from(e: varisat::solver::SolverError) -> Self {
        Error::Solver(e.to_string())
    }
}
