//! The dominating-set substrate: candidate defenders against shot coverage.
//!
//! Purpose
//! - Hold the discretized problem as a bipartite relation: one bit-vector
//!   row per candidate defender, one bit per geometrically valid shot.
//! - A subset of candidates is a dominating set iff the OR of their rows
//!   equals the dominance target (`dominant`).
//!
//! The graph is built once per problem instance and never mutated afterward;
//! solvers read it, taking private copies of the rows when they need to
//! strip bits locally.

mod bits;
mod build;

pub use bits::BitRow;
pub use build::{build, BuildCfg};

use std::cmp::Ordering;

use crate::entities::{collision, Defender, Opponent, Shot};
use crate::geom::ConvexShape;

/// One candidate position with its coverage row and degree. Keeping the
/// three values in one record means reordering can never desynchronize them.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub defender: Defender,
    pub edges: BitRow,
    pub deg: usize,
}

/// Comparator used to bias solver branch order.
pub type CompareFn = fn(&Candidate, &Candidate) -> Ordering;

/// Immutable feasibility graph.
#[derive(Clone, Debug)]
pub struct Graph {
    pub candidates: Vec<Candidate>,
    pub opponents: Vec<Opponent>,
    /// One group per (goal, opponent) pair, in enumeration order. The outer
    /// ordering fixes each shot's bit position.
    pub shots: Vec<Vec<Shot>>,
    /// Inflated shot triangles, parallel to `shots`.
    pub triangles: Vec<ConvexShape>,
    pub nb_shots: usize,
    /// All-ones target over `nb_shots + 1` bits.
    pub dominant: BitRow,
    pub max_deg: usize,
    pub max_deg_index: usize,
    /// Minimum separation between two selected defenders.
    pub defender_clearance: f64,
}

impl Graph {
    /// True iff `cand` keeps clear of every defender already in `selected`.
    /// Members of `selected` are not re-checked against each other.
    pub fn valid_defender(&self, selected: &[usize], cand: usize) -> bool {
        let pos = self.candidates[cand].defender.pos;
        selected.iter().all(|&i| {
            !collision(
                self.candidates[i].defender.pos,
                pos,
                self.defender_clearance,
            )
        })
    }

    /// OR of the rows at `indices`.
    pub fn union_rows(&self, indices: &[usize]) -> BitRow {
        let mut out = BitRow::zeros(self.dominant.len());
        for &i in indices {
            out.union_assign(&self.candidates[i].edges);
        }
        out
    }

    /// Can the candidate set as a whole reach the target at all?
    pub fn has_cover(&self) -> bool {
        let mut all = BitRow::sentinel(self.dominant.len());
        for c in &self.candidates {
            all.union_assign(&c.edges);
        }
        all == self.dominant
    }

    /// Reordered copy for solvers that want a biased branch order; the
    /// canonical graph stays untouched. `sort_by` is stable, so equal keys
    /// keep their construction order.
    pub fn sorted_by(&self, cmp: CompareFn) -> Graph {
        let mut out = self.clone();
        out.candidates.sort_by(cmp);
        out.max_deg = 0;
        out.max_deg_index = 0;
        for (i, c) in out.candidates.iter().enumerate() {
            if c.deg > out.max_deg {
                out.max_deg = c.deg;
                out.max_deg_index = i;
            }
        }
        out
    }

    /// Translate solver indices back to defender values.
    pub fn defenders_for(&self, indices: &[usize]) -> Vec<Defender> {
        indices
            .iter()
            .map(|&i| self.candidates[i].defender)
            .collect()
    }
}

/// Sort candidates by descending degree (best blockers first).
pub fn by_degree_desc(a: &Candidate, b: &Candidate) -> Ordering {
    b.deg.cmp(&a.deg)
}

/// Sort candidates by ascending degree.
pub fn by_degree_asc(a: &Candidate, b: &Candidate) -> Ordering {
    a.deg.cmp(&b.deg)
}
