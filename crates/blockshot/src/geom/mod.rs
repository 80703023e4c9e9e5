//! 2D geometry with deterministic rounding.
//!
//! Purpose
//! - Provide the value types (`Point`, `Vector`), line equations, and convex
//!   shapes the defense-planning pipeline is built on.
//! - All coordinates are rounded to a fixed decimal precision on construction
//!   and after every operation, so discretized values compare with `==`
//!   instead of accumulating drift across the scan loops.

mod line;
mod shape;
mod types;

pub use line::{LinearEquation, LINE_DIGITS};
pub use shape::ConvexShape;
pub use types::{round_coord, Point, Vector, COORD_DIGITS};

#[cfg(test)]
mod tests;
