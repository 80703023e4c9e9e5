//! Randomized order-based search, after Chalupa's incremental algorithm
//! for minimum dominating sets.
//!
//! A scan of a candidate permutation produces a dominating set and a
//! reusable follow-up permutation (set members first, shuffled remainder
//! after). The outer loop perturbs the permutation with single-element
//! jumps, restarts on stagnation, and relaxes its own restart parameters a
//! little after every improvement.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::entities::Defender;
use crate::graph::{BitRow, Graph};
use crate::solvers::{union_excluding, Solver, SolverCfg};

pub struct RandomSolver;

impl Solver for RandomSolver {
    fn solve(&self, graph: &Graph, cfg: &SolverCfg) -> Option<Vec<Defender>> {
        if graph.nb_shots == 0 {
            return Some(Vec::new());
        }
        let mut rng = rng_for(cfg);
        match cfg.compare {
            Some(cmp) => {
                let sorted = graph.sorted_by(cmp);
                let indices = solve_indices(&sorted, cfg, &mut rng)?;
                Some(sorted.defenders_for(&indices))
            }
            None => {
                let indices = solve_indices(graph, cfg, &mut rng)?;
                Some(graph.defenders_for(&indices))
            }
        }
    }
}

fn rng_for(cfg: &SolverCfg) -> StdRng {
    match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Outer search loop; also reused by the greedy solver's fallback.
pub(crate) fn solve_indices(
    graph: &Graph,
    cfg: &SolverCfg,
    rng: &mut StdRng,
) -> Option<Vec<usize>> {
    let n = graph.candidates.len();
    if n == 0 {
        return None;
    }
    let deadline = Instant::now() + cfg.timeout;

    // Identity-order scan seeds the incumbent; if even that fails under the
    // deadline there is nothing to return.
    let mut identity: Vec<usize> = (0..n).collect();
    let (mut s_best, _) = greedy_scan(graph, &mut identity, rng, deadline)?;
    debug!(size = s_best.len(), "seed dominating set");

    let mut tries = cfg.tries;
    let mut init_tries = cfg.tries;
    let mut prob = cfg.prob;
    let mut i_max = cfg.i_max as f64;
    let mut stale = 0u32;
    let mut ext = false;

    let mut s: Option<Vec<usize>> = None;
    let mut p: Option<Vec<usize>> = cfg.perm.clone();

    while tries > 0 {
        if s.is_none() || ext || f64::from(stale) > i_max {
            let scanned = if p.is_some() && rng.gen::<f64>() < prob {
                init_tries = tries;
                greedy_scan(graph, p.as_mut()?, rng, deadline)
            } else {
                let mut fresh: Vec<usize> = (0..n).collect();
                fresh.shuffle(rng);
                greedy_scan(graph, &mut fresh, rng, deadline)
            };
            match scanned {
                Some((s1, p1)) => {
                    s = Some(s1);
                    p = Some(p1);
                }
                None => break,
            }
        }
        let (cur, perm) = match (&mut s, &mut p) {
            (Some(cur), Some(perm)) => (cur, perm),
            _ => break,
        };

        jump(perm, rng);
        let (s2, p2) = match greedy_scan(graph, perm, rng, deadline) {
            Some(r) => r,
            None => break,
        };

        if s2.len() >= cur.len() {
            stale += 1;
        }
        if s2.len() <= cur.len() {
            *cur = s2;
            *perm = p2;
            if cur.len() < s_best.len() {
                s_best = cur.clone();
                debug!(size = s_best.len(), "improved dominating set");
                stale = 0;
                ext = true;
                tries = init_tries;
                prob /= 1.2;
                i_max *= 1.2;
            }
        }

        tries -= 1;
        if Instant::now() > deadline {
            break;
        }
    }
    Some(s_best)
}

/// Fixed parameters used when the greedy solver falls back to this one.
pub(crate) fn fallback_cfg(seed: Option<u64>) -> SolverCfg {
    SolverCfg {
        compare: None,
        tries: 10_000,
        i_max: 100,
        prob: 0.2,
        timeout: Duration::from_millis(500),
        perm: None,
        seed,
        fallback_to_random: false,
    }
}

/// Walk `perm` accumulating a dominating set `s` and a remainder `p`. A
/// candidate joins `s` only if it is collision-free against `s` and extends
/// the coverage; joining evicts any member it makes redundant. Exhausting
/// the permutation without dominating restarts the walk on a reshuffle.
/// `None` on deadline.
fn greedy_scan(
    graph: &Graph,
    perm: &mut Vec<usize>,
    rng: &mut StdRng,
    deadline: Instant,
) -> Option<(Vec<usize>, Vec<usize>)> {
    let width = graph.dominant.len();
    let mut s: Vec<usize> = Vec::new();
    let mut p: Vec<usize> = Vec::new();
    let mut coverage = BitRow::zeros(width);
    let mut index = 0usize;

    while coverage != graph.dominant {
        if Instant::now() > deadline {
            return None;
        }
        if index == perm.len() {
            perm.shuffle(rng);
            index = 0;
            s.clear();
            p.clear();
            coverage = BitRow::zeros(width);
        }
        let pi = perm[index];
        index += 1;

        if !graph.valid_defender(&s, pi) {
            p.push(pi);
            continue;
        }
        let extended = coverage.union(&graph.candidates[pi].edges);
        if extended == coverage {
            p.push(pi);
            continue;
        }
        evict_redundant(graph, &mut s, &mut p, pi);
        s.push(pi);
        coverage = extended;
    }

    p.extend_from_slice(&perm[index..]);
    p.shuffle(rng);
    let mut next = s.clone();
    next.extend_from_slice(&p);
    Some((s, next))
}

/// Move every member of `s` whose row is subsumed by the newcomer plus the
/// other survivors into `p`, one at a time.
fn evict_redundant(graph: &Graph, s: &mut Vec<usize>, p: &mut Vec<usize>, new_def: usize) {
    let mut idx = 0;
    while idx < s.len() {
        let mut rest = union_excluding(graph, s, idx);
        rest.union_assign(&graph.candidates[new_def].edges);
        if graph.candidates[s[idx]].edges.is_subset_of(&rest) {
            p.push(s.remove(idx));
        } else {
            idx += 1;
        }
    }
}

/// Perturbation: pull one random non-head element to the front.
fn jump(perm: &mut Vec<usize>, rng: &mut StdRng) {
    if perm.len() < 2 {
        return;
    }
    let at = rng.gen_range(1..perm.len());
    let el = perm.remove(at);
    perm.insert(0, el);
}
