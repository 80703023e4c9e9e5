//! Dominating-set solvers over the feasibility graph.
//!
//! Purpose
//! - Three interchangeable strategies behind one contract: exact
//!   branch-and-bound, greedy maximum-coverage, and randomized order-based
//!   search.
//! - "No solution" is an expected outcome, not an error: every solver
//!   returns `Option<Vec<Defender>>` and callers branch on it.
//!
//! All solvers read the canonical graph; anything that needs to strip bits
//! locally works on a private copy of the rows.

mod brute;
mod greedy;
mod random;

pub use brute::BruteForceSolver;
pub use greedy::GreedySolver;
pub use random::RandomSolver;

use std::time::Duration;

use crate::entities::Defender;
use crate::graph::{BitRow, CompareFn, Graph};

/// Knobs shared by all solvers. Each strategy reads the subset it cares
/// about and ignores the rest.
#[derive(Clone)]
pub struct SolverCfg {
    /// Pre-sort the candidate order before searching; `None` keeps the
    /// construction order.
    pub compare: Option<CompareFn>,
    /// Randomized search: iteration budget.
    pub tries: u32,
    /// Randomized search: non-improving iterations tolerated before a
    /// restart is considered.
    pub i_max: u32,
    /// Randomized search: probability of continuing from the current
    /// permutation instead of a fresh shuffle.
    pub prob: f64,
    /// Randomized search: wall-clock deadline, checked between scan steps.
    pub timeout: Duration,
    /// Randomized search: optional starting permutation of candidate
    /// indices.
    pub perm: Option<Vec<usize>>,
    /// Randomized search: fixed seed for reproducible runs; `None` draws
    /// from the OS.
    pub seed: Option<u64>,
    /// Greedy only: on failure, retry with the randomized solver under its
    /// fixed internal parameters.
    pub fallback_to_random: bool,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            compare: None,
            tries: 10_000,
            i_max: 100,
            prob: 0.2,
            timeout: Duration::from_millis(500),
            perm: None,
            seed: None,
            fallback_to_random: false,
        }
    }
}

/// One strategy for finding a small dominating set.
pub trait Solver {
    /// `None` means this solver found no dominating set under its budget;
    /// callers may retry with another strategy or relaxed constraints.
    fn solve(&self, graph: &Graph, cfg: &SolverCfg) -> Option<Vec<Defender>>;
}

/// Drop every member whose coverage is subsumed by the union of the others,
/// one at a time until a fixpoint. Removing members one by one keeps the
/// survivor set dominating even when two members are mutually redundant.
pub(crate) fn purge(graph: &Graph, selected: &[usize]) -> Vec<usize> {
    let mut kept: Vec<usize> = selected.to_vec();
    loop {
        let mut changed = false;
        let mut idx = 0;
        while idx < kept.len() {
            let others = union_excluding(graph, &kept, idx);
            if graph.candidates[kept[idx]].edges.is_subset_of(&others) {
                kept.remove(idx);
                changed = true;
            } else {
                idx += 1;
            }
        }
        if !changed {
            return kept;
        }
    }
}

/// OR of the rows of `members`, skipping position `skip`.
pub(crate) fn union_excluding(graph: &Graph, members: &[usize], skip: usize) -> BitRow {
    let mut out = BitRow::zeros(graph.dominant.len());
    for (j, &d) in members.iter().enumerate() {
        if j != skip {
            out.union_assign(&graph.candidates[d].edges);
        }
    }
    out
}
