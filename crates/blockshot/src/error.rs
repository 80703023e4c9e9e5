//! Error taxonomy for problem ingestion and geometry.
//!
//! "No solution found" is deliberately not an error: solvers return `Option`
//! and callers branch on it. Only malformed input and degenerate geometry
//! abort processing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The decoded problem is malformed or inconsistent; raised before any
    /// graph construction starts.
    #[error("invalid problem: {0}")]
    InvalidProblem(String),

    /// A zero-length vector was normalized. Signals degenerate goal or
    /// opponent geometry in the input data.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,
}

pub type Result<T> = std::result::Result<T, Error>;
