//! Exact branch-and-bound search.
//!
//! The outer loop tries set sizes k = 1, 2, … and exhausts each size before
//! moving on, so the first hit is minimum in cardinality. Within a size the
//! search is depth-first over candidate indices with three prunes: rows
//! already subsumed by the running coverage, collisions against the picked
//! set, and a degree bound proving the branch cannot reach `nb_shots`.

use tracing::debug;

use crate::entities::Defender;
use crate::graph::{BitRow, Graph};
use crate::solvers::{Solver, SolverCfg};

pub struct BruteForceSolver;

impl Solver for BruteForceSolver {
    fn solve(&self, graph: &Graph, cfg: &SolverCfg) -> Option<Vec<Defender>> {
        if graph.nb_shots == 0 {
            return Some(Vec::new());
        }
        match cfg.compare {
            Some(cmp) => {
                let sorted = graph.sorted_by(cmp);
                let indices = search(&sorted)?;
                Some(sorted.defenders_for(&indices))
            }
            None => {
                let indices = search(graph)?;
                Some(graph.defenders_for(&indices))
            }
        }
    }
}

fn search(graph: &Graph) -> Option<Vec<usize>> {
    let n = graph.candidates.len();
    if n == 0 {
        return None;
    }

    // max_deg_after[i] = best degree at any index >= i, for the bound prune.
    let mut max_deg_after = vec![0usize; n];
    let mut run = 0usize;
    for idx in (0..n).rev() {
        run = run.max(graph.candidates[idx].deg);
        max_deg_after[idx] = run;
    }

    for k in 1..=graph.opponents.len() + 10 {
        // Even the k best candidates cannot cover every shot.
        if graph.max_deg * k < graph.nb_shots {
            continue;
        }
        let mut chosen = Vec::with_capacity(k);
        let coverage = BitRow::zeros(graph.dominant.len());
        if descend(graph, &max_deg_after, k, 0, &coverage, 0, &mut chosen) {
            debug!(size = k, "exact solution found");
            return Some(chosen);
        }
    }
    None
}

/// Try to extend `chosen` to a dominating set using exactly `remaining`
/// more candidates taken from indices `start..`. `chosen` is restored on
/// backtrack, so the caller's buffer is reusable across branches.
fn descend(
    graph: &Graph,
    max_deg_after: &[usize],
    remaining: usize,
    start: usize,
    coverage: &BitRow,
    total_deg: usize,
    chosen: &mut Vec<usize>,
) -> bool {
    if remaining == 0 {
        return *coverage == graph.dominant;
    }
    for index in start..graph.candidates.len() {
        let cand = &graph.candidates[index];
        // Adds nothing the set does not already cover.
        if cand.edges.is_subset_of(coverage) {
            continue;
        }
        if !graph.valid_defender(chosen, index) {
            continue;
        }
        // Optimistic upper bound on the coverage this branch can reach.
        let branch_deg = total_deg + cand.deg;
        if branch_deg + (remaining - 1) * max_deg_after[index] < graph.nb_shots {
            continue;
        }
        let extended = coverage.union(&cand.edges);
        chosen.push(index);
        if descend(
            graph,
            max_deg_after,
            remaining - 1,
            index + 1,
            &extended,
            branch_deg,
            chosen,
        ) {
            return true;
        }
        chosen.pop();
    }
    false
}
