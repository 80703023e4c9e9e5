//! Graph construction: discretize shots, prune positions, emit bit rows.
//!
//! Order matters here. Shot enumeration fixes every bit position and the
//! dominance target; only then can the position scan produce comparable
//! rows. The scan is the hot loop, so candidate positions are first tested
//! against the inflated shot triangles before any interception geometry
//! runs.

use std::f64::consts::PI;

use tracing::{debug, info};

use crate::entities::{collision, Defender, Goal, Shot};
use crate::error::Result;
use crate::geom::{round_coord, ConvexShape, LinearEquation, Point};
use crate::graph::{BitRow, Candidate, Graph};
use crate::problem::{Problem, ProblemKind};

/// Builder knobs.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildCfg {
    /// Evaluate true polygon containment for every (position, triangle)
    /// pair instead of the edge-proximity shortcut. Slower, but never
    /// discards a position the shortcut would miss.
    pub exhaustive_containment: bool,
}

/// Build the feasibility graph for `problem`.
///
/// An empty opponent list is a legal degenerate case: zero shots, a
/// dominance target of one bit, and an empty candidate list.
pub fn build(problem: &Problem, cfg: &BuildCfg) -> Result<Graph> {
    problem.validate()?;

    let radius = problem.robot_radius;

    // Shot enumeration, one group per (goal, opponent) pair. The nesting
    // order fixes each shot's bit position for the rest of the pipeline.
    let mut shots: Vec<Vec<Shot>> = Vec::new();
    let mut triangles: Vec<ConvexShape> = Vec::new();
    let mut nb_shots = 0usize;
    for goal in &problem.goals {
        for opponent in &problem.opponents {
            let mut group = Vec::new();
            let mut angle = -PI;
            while angle < PI {
                let shot = Shot::new(*opponent, angle);
                if goal.is_shot_valid(&shot) {
                    group.push(shot);
                    nb_shots += 1;
                }
                angle += problem.theta_step;
            }
            triangles
                .push(ConvexShape::triangle(opponent.pos, goal.post_a, goal.post_b).inflate(radius)?);
            shots.push(group);
        }
    }
    debug!(nb_shots, groups = shots.len(), "shot enumeration done");

    let dominant = BitRow::full(nb_shots + 1);
    let opponent_clearance = problem.opponent_clearance();

    let mut graph = Graph {
        candidates: Vec::new(),
        opponents: problem.opponents.clone(),
        shots,
        triangles,
        nb_shots,
        dominant,
        max_deg: 0,
        max_deg_index: 0,
        defender_clearance: problem.defender_clearance(),
    };

    // The goalkeeper variant only places candidates inside its area; the
    // scan bounds shrink to the intersection of area and field.
    let (scan_min, scan_max) = match &problem.kind {
        ProblemKind::Keeper { area_min, area_max } => (
            Point::new(
                area_min.x.max(problem.bottom_left.x),
                area_min.y.max(problem.bottom_left.y),
            ),
            Point::new(
                area_max.x.min(problem.top_right.x),
                area_max.y.min(problem.top_right.y),
            ),
        ),
        _ => (problem.bottom_left, problem.top_right),
    };

    let mut x = scan_min.x;
    while x <= scan_max.x {
        let mut y = scan_min.y;
        while y <= scan_max.y {
            let pos = Point::new(x, y);
            y = round_coord(y + problem.pos_step);

            let relevant = relevant_groups(&graph, pos, radius, cfg);
            if relevant.iter().all(|&r| !r) {
                continue;
            }
            if graph
                .opponents
                .iter()
                .any(|o| collision(pos, o.pos, opponent_clearance))
            {
                continue;
            }

            let defender = Defender::new(pos, radius);
            push_candidate(&mut graph, defender, &relevant, &problem.goals, &problem.kind);
        }
        x = round_coord(x + problem.pos_step);
    }

    // Known starting positions join the pool as extra candidates, evaluated
    // against every shot group (they were placed deliberately, not found by
    // the boundary scan).
    if let ProblemKind::InitialPos { defenders } = &problem.kind {
        let all = vec![true; graph.shots.len()];
        for &pos in defenders {
            if graph
                .opponents
                .iter()
                .any(|o| collision(pos, o.pos, opponent_clearance))
            {
                continue;
            }
            let defender = Defender::new(pos, radius);
            push_candidate(&mut graph, defender, &all, &problem.goals, &problem.kind);
        }
    }

    info!(
        candidates = graph.candidates.len(),
        nb_shots,
        max_deg = graph.max_deg,
        "graph built"
    );
    Ok(graph)
}

/// Which shot groups is `pos` worth testing against?
///
/// The fast path keeps a position only when a line through it, parallel to
/// one of the triangle's two side edges, passes within `radius` of the shot
/// origin. Near the opponent the two side directions pinch together, so the
/// narrow region every shot of the group crosses is kept; positions deep
/// inside the wide end of the cone are skipped. This can make a feasible
/// problem look infeasible in pathological layouts; the exhaustive mode
/// trades speed for true containment.
fn relevant_groups(graph: &Graph, pos: Point, radius: f64, cfg: &BuildCfg) -> Vec<bool> {
    let n_opp = graph.opponents.len();
    graph
        .triangles
        .iter()
        .enumerate()
        .map(|(gi, t)| {
            if cfg.exhaustive_containment {
                t.point_in(pos)
            } else {
                near_side_line(t, graph.opponents[gi % n_opp].pos, pos, radius)
            }
        })
        .collect()
}

fn near_side_line(triangle: &ConvexShape, origin: Point, pos: Point, radius: f64) -> bool {
    let apex = triangle.points[0];
    [triangle.points[1], triangle.points[2]].iter().any(|&b| {
        let angle = (b.y - apex.y).atan2(b.x - apex.x);
        LinearEquation::intersection_circle(pos, angle, origin, radius).is_some()
    })
}

/// Evaluate `defender` against the relevant groups and append it if it
/// blocks at least one shot.
fn push_candidate(
    graph: &mut Graph,
    defender: Defender,
    relevant: &[bool],
    goals: &[Goal],
    kind: &ProblemKind,
) {
    let mut edges = BitRow::sentinel(graph.nb_shots + 1);
    let mut deg = 0usize;
    let mut bit = 1usize;
    for (group, &keep) in graph.shots.iter().zip(relevant) {
        if !keep {
            // Treated as all-unblocked, equivalent to testing and failing.
            bit += group.len();
            continue;
        }
        for shot in group {
            if intercepts_any(goals, &defender, shot, kind) {
                edges.set(bit);
                deg += 1;
            }
            bit += 1;
        }
    }
    if deg == 0 {
        return;
    }
    if deg > graph.max_deg {
        graph.max_deg = deg;
        graph.max_deg_index = graph.candidates.len();
    }
    graph.candidates.push(Candidate {
        defender,
        edges,
        deg,
    });
}

fn intercepts_any(goals: &[Goal], defender: &Defender, shot: &Shot, kind: &ProblemKind) -> bool {
    goals.iter().any(|goal| match kind {
        ProblemKind::MaxSpeed {
            ball_max,
            robot_max,
        } => goal.shot_intercepted_timed(defender, shot, *ball_max, *robot_max),
        _ => goal.shot_intercepted(defender, shot),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Opponent;
    use crate::geom::Vector;

    fn ssl_problem(opponents: Vec<Opponent>, kind: ProblemKind) -> Problem {
        Problem {
            bottom_left: Point::new(-4.5, -3.0),
            top_right: Point::new(4.5, 3.0),
            goals: vec![Goal::new(
                Point::new(4.5, -0.5),
                Point::new(4.5, 0.5),
                Vector::new(-1.0, 0.0),
            )],
            opponents,
            robot_radius: 0.09,
            theta_step: 0.031416,
            pos_step: 0.1,
            kind,
        }
    }

    #[test]
    fn no_opponents_yields_trivial_graph() {
        let p = ssl_problem(vec![], ProblemKind::Basic);
        let g = build(&p, &BuildCfg::default()).unwrap();
        assert_eq!(g.nb_shots, 0);
        assert_eq!(g.dominant.to_u128(), Some(1));
        assert!(g.candidates.is_empty());
    }

    #[test]
    fn dominant_value_shape() {
        let p = ssl_problem(vec![Opponent::at(Point::new(0.0, 0.0))], ProblemKind::Basic);
        let g = build(&p, &BuildCfg::default()).unwrap();
        assert!(g.nb_shots > 0);
        if g.nb_shots + 1 <= 128 {
            let v = g.dominant.to_u128().unwrap();
            assert_eq!(v, (1u128 << (g.nb_shots + 1)) - 1);
            assert_eq!(v % 2, 1);
        }
    }

    #[test]
    fn every_candidate_blocks_something() {
        let p = ssl_problem(vec![Opponent::at(Point::new(0.0, 0.0))], ProblemKind::Basic);
        let g = build(&p, &BuildCfg::default()).unwrap();
        assert!(!g.candidates.is_empty());
        for c in &g.candidates {
            assert!(c.deg >= 1);
            assert!(!c.edges.is_sentinel_only());
            assert_eq!(c.edges.degree(), c.deg);
        }
        assert_eq!(g.candidates[g.max_deg_index].deg, g.max_deg);
    }

    #[test]
    fn single_opponent_has_blocker_on_shot_axis() {
        // One opponent at the origin facing the goal mouth: the pool must
        // contain a candidate sitting on the segment toward the goal center.
        let p = ssl_problem(vec![Opponent::at(Point::new(0.0, 0.0))], ProblemKind::Basic);
        let g = build(&p, &BuildCfg::default()).unwrap();
        let on_axis = g.candidates.iter().any(|c| {
            c.defender.pos.y.abs() < 1e-9
                && c.defender.pos.x > 0.0
                && c.defender.pos.x < 4.5
        });
        assert!(on_axis);
    }

    #[test]
    fn exhaustive_mode_keeps_at_least_the_fast_candidates() {
        let p = ssl_problem(vec![Opponent::at(Point::new(0.0, 0.0))], ProblemKind::Basic);
        let fast = build(&p, &BuildCfg::default()).unwrap();
        let full = build(
            &p,
            &BuildCfg {
                exhaustive_containment: true,
            },
        )
        .unwrap();
        assert_eq!(fast.nb_shots, full.nb_shots);
        assert!(!full.candidates.is_empty());
        // Every fast-path candidate sits inside its cone, so the exhaustive
        // scan must rediscover it with the same coverage.
        for c in &fast.candidates {
            let twin = full
                .candidates
                .iter()
                .find(|d| d.defender.pos == c.defender.pos);
            assert_eq!(twin.map(|d| &d.edges), Some(&c.edges));
        }
    }

    #[test]
    fn min_dist_clears_positions_near_opponents() {
        let opponents = vec![Opponent::at(Point::new(0.0, 0.0))];
        let basic = build(
            &ssl_problem(opponents.clone(), ProblemKind::Basic),
            &BuildCfg::default(),
        )
        .unwrap();
        let spaced = build(
            &ssl_problem(opponents, ProblemKind::MinDist { min_dist: 1.0 }),
            &BuildCfg::default(),
        )
        .unwrap();
        for c in &spaced.candidates {
            assert!(c.defender.pos.distance(Point::new(0.0, 0.0)) >= 1.0);
        }
        assert!(spaced.candidates.len() <= basic.candidates.len());
    }

    #[test]
    fn keeper_area_bounds_the_scan() {
        let p = ssl_problem(
            vec![Opponent::at(Point::new(0.0, 0.0))],
            ProblemKind::Keeper {
                area_min: Point::new(3.5, -1.0),
                area_max: Point::new(4.5, 1.0),
            },
        );
        let g = build(&p, &BuildCfg::default()).unwrap();
        assert!(!g.candidates.is_empty());
        for c in &g.candidates {
            assert!(c.defender.pos.x >= 3.5 && c.defender.pos.x <= 4.5);
            assert!(c.defender.pos.y >= -1.0 && c.defender.pos.y <= 1.0);
        }
    }

    #[test]
    fn initial_positions_join_the_pool() {
        let seed = Point::new(2.0, 0.0);
        let p = ssl_problem(
            vec![Opponent::at(Point::new(0.0, 0.0))],
            ProblemKind::InitialPos {
                defenders: vec![seed, Point::new(-4.0, -2.9)],
            },
        );
        let g = build(&p, &BuildCfg::default()).unwrap();
        // The blocker on the shot axis survives; the far corner seed blocks
        // nothing and is dropped.
        assert!(g.candidates.iter().any(|c| c.defender.pos == seed));
        assert!(!g
            .candidates
            .iter()
            .any(|c| c.defender.pos == Point::new(-4.0, -2.9)));
    }

    #[test]
    fn max_speed_widens_coverage() {
        let opponents = vec![Opponent::at(Point::new(0.0, 0.0))];
        let basic = build(
            &ssl_problem(opponents.clone(), ProblemKind::Basic),
            &BuildCfg::default(),
        )
        .unwrap();
        // A fast defender against a slow ball blocks from much further off
        // the shot line, so per-candidate degrees can only grow.
        let timed = build(
            &ssl_problem(
                opponents,
                ProblemKind::MaxSpeed {
                    ball_max: 0.5,
                    robot_max: 8.0,
                },
            ),
            &BuildCfg::default(),
        )
        .unwrap();
        assert!(timed.max_deg >= basic.max_deg);
    }
}
