//! Problem description and variant dispatch.
//!
//! The problem variant is an explicit tagged enum decided once at decode
//! time; downstream code matches on it instead of probing which optional
//! fields happen to be present.

use serde::{Deserialize, Serialize};

use crate::entities::{Goal, Opponent};
use crate::error::{Error, Result};
use crate::geom::Point;

/// Problem variant, each carrying only its own parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ProblemKind {
    /// Plain placement problem (also covers multiple goals).
    Basic,
    /// Robots must stay at least `min_dist` apart (from opponents and from
    /// each other).
    MinDist { min_dist: f64 },
    /// Candidate positions are restricted to the goalkeeper area.
    Keeper { area_min: Point, area_max: Point },
    /// Known starting positions are offered as extra candidates.
    InitialPos { defenders: Vec<Point> },
    /// Interception is time-aware: ball and robot maximum speeds decide
    /// whether a defender can reach the shot line early enough.
    MaxSpeed { ball_max: f64, robot_max: f64 },
}

/// Decoded problem instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
    pub bottom_left: Point,
    pub top_right: Point,
    pub goals: Vec<Goal>,
    pub opponents: Vec<Opponent>,
    pub robot_radius: f64,
    pub theta_step: f64,
    pub pos_step: f64,
    pub kind: ProblemKind,
}

impl Problem {
    /// Fail fast on malformed input, before any scanning starts.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            self.bottom_left.x,
            self.bottom_left.y,
            self.top_right.x,
            self.top_right.y,
            self.robot_radius,
            self.theta_step,
            self.pos_step,
        ];
        if finite.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidProblem("non-finite field or step value".into()));
        }
        if self.bottom_left.x >= self.top_right.x || self.bottom_left.y >= self.top_right.y {
            return Err(Error::InvalidProblem("empty field bounding box".into()));
        }
        if self.theta_step <= 0.0 {
            return Err(Error::InvalidProblem("theta_step must be positive".into()));
        }
        if self.pos_step <= 0.0 {
            return Err(Error::InvalidProblem("pos_step must be positive".into()));
        }
        if self.robot_radius < 0.0 {
            return Err(Error::InvalidProblem("robot_radius must be non-negative".into()));
        }
        if self.goals.is_empty() {
            return Err(Error::InvalidProblem("at least one goal is required".into()));
        }
        for goal in &self.goals {
            if goal.post_a == goal.post_b {
                return Err(Error::InvalidProblem("goal posts coincide".into()));
            }
            if goal.dir.norm() == 0.0 {
                return Err(Error::InvalidProblem("goal direction is zero".into()));
            }
        }
        match &self.kind {
            ProblemKind::MinDist { min_dist } => {
                if !min_dist.is_finite() || *min_dist <= 0.0 {
                    return Err(Error::InvalidProblem("min_dist must be positive".into()));
                }
            }
            ProblemKind::Keeper { area_min, area_max } => {
                if area_min.x >= area_max.x || area_min.y >= area_max.y {
                    return Err(Error::InvalidProblem("empty goalkeeper area".into()));
                }
            }
            ProblemKind::MaxSpeed { ball_max, robot_max } => {
                if *ball_max <= 0.0 || *robot_max <= 0.0 {
                    return Err(Error::InvalidProblem("speeds must be positive".into()));
                }
            }
            ProblemKind::Basic | ProblemKind::InitialPos { .. } => {}
        }
        Ok(())
    }

    /// Minimum separation between a candidate and any opponent.
    pub fn opponent_clearance(&self) -> f64 {
        match &self.kind {
            ProblemKind::MinDist { min_dist } => *min_dist,
            _ => self.robot_radius,
        }
    }

    /// Minimum separation between two selected defenders.
    pub fn defender_clearance(&self) -> f64 {
        match &self.kind {
            ProblemKind::MinDist { min_dist } => *min_dist,
            _ => 2.0 * self.robot_radius,
        }
    }
}
