//! On-disk problem and solution formats.
//!
//! The problem file is plain JSON. The variant is decided once here, from
//! which optional fields are present, and becomes an explicit
//! `ProblemKind`; ambiguous combinations are rejected instead of guessed
//! at.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use blockshot::entities::{Defender, Goal, Opponent};
use blockshot::geom::{Point, Vector};
use blockshot::problem::{Problem, ProblemKind};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GoalFile {
    pub posts: [[f64; 2]; 2],
    pub direction: [f64; 2],
}

/// Problem file layout. `field_limits` and `goalkeeper_area` are
/// `[[x_min, x_max], [y_min, y_max]]`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProblemFile {
    pub field_limits: [[f64; 2]; 2],
    pub goals: Vec<GoalFile>,
    pub opponents: Vec<[f64; 2]>,
    pub robot_radius: f64,
    pub theta_step: f64,
    pub pos_step: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goalkeeper_area: Option<[[f64; 2]; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defenders: Option<Vec<[f64; 2]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball_max_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robot_max_speed: Option<f64>,
}

impl ProblemFile {
    pub fn to_problem(&self) -> Result<Problem> {
        let kind = self.classify()?;
        let [xs, ys] = self.field_limits;
        Ok(Problem {
            bottom_left: Point::new(xs[0], ys[0]),
            top_right: Point::new(xs[1], ys[1]),
            goals: self
                .goals
                .iter()
                .map(|g| {
                    Goal::new(
                        Point::new(g.posts[0][0], g.posts[0][1]),
                        Point::new(g.posts[1][0], g.posts[1][1]),
                        Vector::new(g.direction[0], g.direction[1]),
                    )
                })
                .collect(),
            opponents: self
                .opponents
                .iter()
                .map(|&[x, y]| Opponent::at(Point::new(x, y)))
                .collect(),
            robot_radius: self.robot_radius,
            theta_step: self.theta_step,
            pos_step: self.pos_step,
            kind,
        })
    }

    fn classify(&self) -> Result<ProblemKind> {
        let kind = match (
            self.min_dist,
            self.goalkeeper_area,
            &self.defenders,
            self.ball_max_speed,
            self.robot_max_speed,
        ) {
            (None, None, None, None, None) => ProblemKind::Basic,
            (Some(min_dist), None, None, None, None) => ProblemKind::MinDist { min_dist },
            (None, Some([xs, ys]), None, None, None) => ProblemKind::Keeper {
                area_min: Point::new(xs[0], ys[0]),
                area_max: Point::new(xs[1], ys[1]),
            },
            (None, None, Some(positions), None, None) => ProblemKind::InitialPos {
                defenders: positions
                    .iter()
                    .map(|&[x, y]| Point::new(x, y))
                    .collect(),
            },
            (None, None, None, Some(ball_max), Some(robot_max)) => ProblemKind::MaxSpeed {
                ball_max,
                robot_max,
            },
            _ => bail!("problem file mixes fields of several variants"),
        };
        Ok(kind)
    }
}

/// Solution file layout: one entry per placed defender.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolutionFile {
    pub defenders: Vec<[f64; 2]>,
    pub robot_radius: f64,
}

impl SolutionFile {
    pub fn from_defenders(defenders: &[Defender], robot_radius: f64) -> Self {
        Self {
            defenders: defenders.iter().map(|d| [d.pos.x, d.pos.y]).collect(),
            robot_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn base_json() -> serde_json::Value {
        serde_json::json!({
            "field_limits": [[-4.5, 4.5], [-3.0, 3.0]],
            "goals": [{"posts": [[4.5, -0.5], [4.5, 0.5]], "direction": [-1.0, 0.0]}],
            "opponents": [[0.0, 0.0], [1.0, 1.5]],
            "robot_radius": 0.09,
            "theta_step": 0.031416,
            "pos_step": 0.1
        })
    }

    #[test]
    fn classifies_basic() {
        let file: ProblemFile = serde_json::from_value(base_json()).unwrap();
        let problem = file.to_problem().unwrap();
        assert_eq!(problem.kind, ProblemKind::Basic);
        assert_eq!(problem.opponents.len(), 2);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn classifies_each_variant() {
        let mut v = base_json();
        v["min_dist"] = 0.15.into();
        let file: ProblemFile = serde_json::from_value(v).unwrap();
        assert!(matches!(
            file.to_problem().unwrap().kind,
            ProblemKind::MinDist { .. }
        ));

        let mut v = base_json();
        v["goalkeeper_area"] = serde_json::json!([[3.5, 4.5], [-1.0, 1.0]]);
        let file: ProblemFile = serde_json::from_value(v).unwrap();
        assert!(matches!(
            file.to_problem().unwrap().kind,
            ProblemKind::Keeper { .. }
        ));

        let mut v = base_json();
        v["defenders"] = serde_json::json!([[2.0, 0.0]]);
        let file: ProblemFile = serde_json::from_value(v).unwrap();
        assert!(matches!(
            file.to_problem().unwrap().kind,
            ProblemKind::InitialPos { .. }
        ));

        let mut v = base_json();
        v["ball_max_speed"] = 6.0.into();
        v["robot_max_speed"] = 2.0.into();
        let file: ProblemFile = serde_json::from_value(v).unwrap();
        assert!(matches!(
            file.to_problem().unwrap().kind,
            ProblemKind::MaxSpeed { .. }
        ));
    }

    #[test]
    fn rejects_mixed_variants() {
        let mut v = base_json();
        v["min_dist"] = 0.15.into();
        v["defenders"] = serde_json::json!([[2.0, 0.0]]);
        let file: ProblemFile = serde_json::from_value(v).unwrap();
        assert!(file.to_problem().is_err());

        // A lone speed field is incomplete, not basic.
        let mut v = base_json();
        v["ball_max_speed"] = 6.0.into();
        let file: ProblemFile = serde_json::from_value(v).unwrap();
        assert!(file.to_problem().is_err());
    }

    #[test]
    fn reads_a_problem_from_disk() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(base_json().to_string().as_bytes()).unwrap();
        let text = std::fs::read_to_string(tmp.path()).unwrap();
        let file: ProblemFile = serde_json::from_str(&text).unwrap();
        assert!(file.to_problem().is_ok());
    }
}
