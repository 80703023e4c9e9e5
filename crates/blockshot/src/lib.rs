//! Defensive placement planning for robot soccer.
//!
//! Pipeline: decode a problem description, discretize it into a feasibility
//! graph (candidate defender positions against interceptable shots), then
//! run one of the dominating-set solvers to pick a small set of defenders
//! that blocks every shot on goal.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.

pub mod entities;
pub mod error;
pub mod geom;
pub mod graph;
pub mod problem;
pub mod solvers;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::entities::{collision, Defender, Goal, Opponent, Shot};
    pub use crate::error::{Error, Result};
    pub use crate::geom::{ConvexShape, LinearEquation, Point, Vector};
    pub use crate::graph::{build, by_degree_asc, by_degree_desc, BitRow, BuildCfg, Graph};
    pub use crate::problem::{Problem, ProblemKind};
    pub use crate::solvers::{BruteForceSolver, GreedySolver, RandomSolver, Solver, SolverCfg};
}
