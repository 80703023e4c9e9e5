//! Greedy maximum-coverage heuristic.
//!
//! Repeatedly picks the admissible candidate blocking the most still-open
//! shots, clearing covered bits from a private copy of the rows after each
//! pick. The result is purged to irredundancy; it is not guaranteed
//! minimum. A greedy dead-end (collisions leave no admissible candidate)
//! can optionally fall back to the randomized solver.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::entities::Defender;
use crate::graph::{BitRow, Graph};
use crate::solvers::{purge, random, Solver, SolverCfg};

pub struct GreedySolver;

impl Solver for GreedySolver {
    fn solve(&self, graph: &Graph, cfg: &SolverCfg) -> Option<Vec<Defender>> {
        if graph.nb_shots == 0 {
            return Some(Vec::new());
        }
        let found = match cfg.compare {
            Some(cmp) => {
                let sorted = graph.sorted_by(cmp);
                pick_indices(&sorted).map(|idx| sorted.defenders_for(&idx))
            }
            None => pick_indices(graph).map(|idx| graph.defenders_for(&idx)),
        };
        if found.is_some() || !cfg.fallback_to_random {
            return found;
        }

        debug!("greedy dead-end, retrying with randomized search");
        let fb = random::fallback_cfg(cfg.seed);
        let mut rng = match fb.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let indices = random::solve_indices(graph, &fb, &mut rng)?;
        Some(graph.defenders_for(&indices))
    }
}

fn pick_indices(graph: &Graph) -> Option<Vec<usize>> {
    if !graph.has_cover() {
        return None;
    }
    let width = graph.dominant.len();
    // Private copy: covered bits get stripped as picks accumulate, and the
    // canonical graph must stay untouched.
    let mut rows: Vec<BitRow> = graph.candidates.iter().map(|c| c.edges.clone()).collect();
    let mut chosen: Vec<usize> = Vec::new();
    let mut coverage = BitRow::zeros(width);

    while coverage != graph.dominant {
        let mut best: Option<(usize, usize)> = None;
        for (idx, row) in rows.iter().enumerate() {
            let deg = row.degree();
            if deg == 0 || !graph.valid_defender(&chosen, idx) {
                continue;
            }
            // Strict comparison keeps the first-found winner on ties.
            if best.map_or(true, |(_, d)| deg > d) {
                best = Some((idx, deg));
            }
        }
        // No admissible candidate still blocks an open shot.
        let (pick, _) = best?;

        coverage.union_assign(&graph.candidates[pick].edges);
        let covered = rows[pick].clone();
        for (idx, row) in rows.iter_mut().enumerate() {
            if idx != pick {
                row.clear_covered(&covered);
            }
        }
        // A spent row has no remaining degree and cannot be re-picked.
        rows[pick] = BitRow::sentinel(width);
        chosen.push(pick);
    }

    Some(purge(graph, &chosen))
}
