//! Field entities: opponents, defenders, shots, goals.
//!
//! A `Shot` is a discretized (opponent, angle) pair. `Goal` carries the two
//! legality predicates that matter to the graph builder: `is_shot_valid`
//! (does this shot go into the goal at all) and `shot_intercepted` (does a
//! given defender block it on its way there).

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

use crate::geom::{LinearEquation, Point, Vector};

/// Opposing field player. Radius is zero unless the input says otherwise;
/// opponents are treated as shot origins, not obstacles with extent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Opponent {
    pub pos: Point,
    pub radius: f64,
}

impl Opponent {
    pub fn at(pos: Point) -> Self {
        Self { pos, radius: 0.0 }
    }
}

/// Candidate defending robot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Defender {
    pub pos: Point,
    pub radius: f64,
}

impl Defender {
    pub fn new(pos: Point, radius: f64) -> Self {
        Self { pos, radius }
    }
}

/// Two positions collide when strictly closer than `distance`.
#[inline]
pub fn collision(a: Point, b: Point, distance: f64) -> bool {
    a.distance(b) < distance
}

/// One possible straight-line attempt: an opponent and a shot angle in
/// [-π, π).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    pub opponent: Opponent,
    pub angle: f64,
}

impl Shot {
    pub fn new(opponent: Opponent, angle: f64) -> Self {
        Self { opponent, angle }
    }
}

/// A goal: two posts and the outward direction you can score from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub post_a: Point,
    pub post_b: Point,
    pub dir: Vector,
}

#[inline]
fn in_interval(low: f64, high: f64, value: f64) -> bool {
    low <= value && value <= high
}

impl Goal {
    pub fn new(post_a: Point, post_b: Point, dir: Vector) -> Self {
        Self { post_a, post_b, dir }
    }

    /// Is the player in front of the goal's half-plane (not behind it)?
    ///
    /// The angle between the goal's direction vector and the vector from the
    /// goal's midpoint to the player must lie in [-π/2, π/2]. A degenerate
    /// zero-length vector yields NaN and fails the interval test.
    pub fn check_position(&self, pos: Point) -> bool {
        let mid = Point::midpoint(self.post_a, self.post_b);
        let mid_prime = mid + self.dir;
        let v1 = Vector::between(mid, pos);
        let v2 = Vector::between(mid, mid_prime);
        let angle = v1.angle(v2);
        in_interval(-FRAC_PI_2, FRAC_PI_2, angle)
    }

    /// Does the shot travel toward the goal's half-plane? The shot direction
    /// and the goal's outward direction must oppose each other.
    pub fn check_shot_direction(&self, shot: &Shot) -> bool {
        Vector::from_angle(shot.angle).dot(self.dir) < 0.0
    }

    /// Does the shot's infinite line cross the finite goal segment?
    pub fn check_shot_on_target(&self, shot: &Shot) -> bool {
        let x_min = self.post_a.x.min(self.post_b.x);
        let x_max = self.post_a.x.max(self.post_b.x);
        let y_min = self.post_a.y.min(self.post_b.y);
        let y_max = self.post_a.y.max(self.post_b.y);
        let o = shot.opponent.pos;

        // Vertical shot: crosses iff the opponent's x is within the goal's
        // x interval.
        if shot.angle.abs() == FRAC_PI_2 {
            return in_interval(x_min, x_max, o.x);
        }
        // Horizontal shot: same with y.
        if shot.angle == 0.0 || shot.angle.abs() == PI {
            return in_interval(y_min, y_max, o.y);
        }

        let tan_theta = shot.angle.tan();
        let shot_le = LinearEquation::new(tan_theta, o.y - tan_theta * o.x);

        // Vertical goal: intersect at the goal's x, check the resulting y.
        if self.post_b.x - self.post_a.x == 0.0 {
            let y = shot_le.apply(self.post_b.x);
            return in_interval(y_min, y_max, y);
        }

        let ratio = (self.post_b.y - self.post_a.y) / (self.post_b.x - self.post_a.x);
        if tan_theta == ratio {
            return false;
        }
        let goal_le = LinearEquation::new(ratio, self.post_b.y - self.post_b.x * ratio);
        match shot_le.intersection(&goal_le) {
            Some(p) => in_interval(x_min, x_max, p.x),
            None => false,
        }
    }

    /// A shot is valid iff the opponent is in front of the goal, the shot
    /// travels toward the goal's plane, and its line crosses the segment.
    pub fn is_shot_valid(&self, shot: &Shot) -> bool {
        self.check_position(shot.opponent.pos)
            && self.check_shot_direction(shot)
            && self.check_shot_on_target(shot)
    }

    /// Does the defender's interception circle block the shot between the
    /// opponent and this goal?
    pub fn shot_intercepted(&self, defender: &Defender, shot: &Shot) -> bool {
        let o = shot.opponent.pos;
        let p = match LinearEquation::intersection_circle(
            o,
            shot.angle,
            defender.pos,
            defender.radius,
        ) {
            Some(p) => p,
            None => return false,
        };
        self.blocks_between(o, shot.angle, p)
    }

    /// Speed-aware interception: the defender may start outside intercept
    /// range as long as it can reach the shot line before the ball passes.
    /// Compares ball transit time to the blocking point against the
    /// defender's travel time at `robot_max`.
    pub fn shot_intercepted_timed(
        &self,
        defender: &Defender,
        shot: &Shot,
        ball_max: f64,
        robot_max: f64,
    ) -> bool {
        let o = shot.opponent.pos;
        // Infinite radius: always yields the projection onto the shot line.
        let p = match LinearEquation::intersection_circle(o, shot.angle, defender.pos, f64::INFINITY)
        {
            Some(p) => p,
            None => return false,
        };
        if !self.blocks_between(o, shot.angle, p) {
            return false;
        }
        let t_ball = o.distance(p) / ball_max;
        let travel = (defender.pos.distance(p) - defender.radius).max(0.0);
        travel / robot_max <= t_ball
    }

    /// Is the blocking point `p` between the opponent at `o` and this goal's
    /// line, along the shot at `angle`? Handles the degenerate slope pairs
    /// (vertical/horizontal shot, vertical goal) without dividing by zero.
    fn blocks_between(&self, o: Point, angle: f64, p: Point) -> bool {
        // Vertical goal: the goal-line crossing sits at the goal's x.
        if self.post_b.x - self.post_a.x == 0.0 {
            if angle.abs() == FRAC_PI_2 {
                // Shot parallel to the goal line; nothing to intercept.
                return false;
            }
            let qx = self.post_b.x;
            return in_interval(qx.min(o.x), qx.max(o.x), p.x);
        }

        let ratio = (self.post_b.y - self.post_a.y) / (self.post_b.x - self.post_a.x);
        let goal_le = LinearEquation::new(ratio, self.post_b.y - self.post_b.x * ratio);

        // Vertical shot: compare along y between opponent and goal line.
        if angle.abs() == FRAC_PI_2 {
            let qy = goal_le.apply(o.x);
            return in_interval(qy.min(o.y), qy.max(o.y), p.y);
        }
        // Horizontal shot: the crossing sits where the goal line reaches the
        // opponent's y; a horizontal goal line never does (parallel).
        if angle == 0.0 || angle.abs() == PI {
            let qx = match goal_le.reverse(o.y) {
                Some(x) => x,
                None => return false,
            };
            return in_interval(qx.min(o.x), qx.max(o.x), p.x);
        }

        let tan_theta = angle.tan();
        if tan_theta == ratio {
            return false;
        }
        let shot_le = LinearEquation::new(tan_theta, o.y - tan_theta * o.x);
        let q = match goal_le.intersection(&shot_le) {
            Some(q) => q,
            None => return false,
        };
        in_interval(q.x.min(o.x), q.x.max(o.x), p.x)
    }
}
