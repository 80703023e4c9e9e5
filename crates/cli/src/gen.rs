//! Random problem generation for testing and benchmarking.
//!
//! Produces an SSL-sized field with one goal and randomly placed
//! opponents, plus the extra fields of the requested variant.

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::Rng;

use crate::format::{GoalFile, ProblemFile};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Variant {
    Basic,
    MinDist,
    Keeper,
    InitialPos,
    MaxSpeed,
}

const FIELD: [[f64; 2]; 2] = [[-4.5, 4.5], [-3.0, 3.0]];
const ROBOT_RADIUS: f64 = 0.09;

pub fn generate(variant: Variant, opponents: Option<usize>, rng: &mut StdRng) -> ProblemFile {
    let count = opponents.unwrap_or_else(|| rng.gen_range(3..=8));
    let mut file = ProblemFile {
        field_limits: FIELD,
        goals: vec![GoalFile {
            posts: [[4.5, -0.5], [4.5, 0.5]],
            direction: [-1.0, 0.0],
        }],
        opponents: (0..count).map(|_| field_point(rng)).collect(),
        robot_radius: ROBOT_RADIUS,
        theta_step: 0.031416,
        pos_step: 0.1,
        min_dist: None,
        goalkeeper_area: None,
        defenders: None,
        ball_max_speed: None,
        robot_max_speed: None,
    };
    match variant {
        Variant::Basic => {}
        Variant::MinDist => {
            file.min_dist = Some(rng.gen_range(ROBOT_RADIUS..ROBOT_RADIUS * 2.0));
        }
        Variant::Keeper => {
            // A box hanging off the goal mouth, reaching into the field.
            let depth = rng.gen_range(0.5..1.5);
            let half_height = rng.gen_range(0.5..1.5);
            file.goalkeeper_area = Some([[4.5 - depth, 4.5], [-half_height, half_height]]);
        }
        Variant::InitialPos => {
            file.defenders = Some((0..count).map(|_| field_point(rng)).collect());
        }
        Variant::MaxSpeed => {
            file.ball_max_speed = Some(rng.gen_range(4.0..8.0));
            file.robot_max_speed = Some(rng.gen_range(1.0..4.0));
        }
    }
    file
}

fn field_point(rng: &mut StdRng) -> [f64; 2] {
    [
        rng.gen_range(FIELD[0][0]..FIELD[0][1]),
        rng.gen_range(FIELD[1][0]..FIELD[1][1]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockshot::problem::ProblemKind;
    use rand::SeedableRng;

    #[test]
    fn generated_problems_decode_and_validate() {
        let mut rng = StdRng::seed_from_u64(11);
        for variant in [
            Variant::Basic,
            Variant::MinDist,
            Variant::Keeper,
            Variant::InitialPos,
            Variant::MaxSpeed,
        ] {
            let file = generate(variant, Some(4), &mut rng);
            let problem = file.to_problem().expect("classifiable");
            assert!(problem.validate().is_ok());
            assert_eq!(problem.opponents.len(), 4);
        }
    }

    #[test]
    fn variant_fields_match_the_request() {
        let mut rng = StdRng::seed_from_u64(12);
        let file = generate(Variant::MinDist, Some(3), &mut rng);
        let d = file.min_dist.expect("min_dist present");
        assert!(d >= ROBOT_RADIUS && d <= 2.0 * ROBOT_RADIUS);

        let file = generate(Variant::Keeper, Some(3), &mut rng);
        let problem = file.to_problem().unwrap();
        assert!(matches!(problem.kind, ProblemKind::Keeper { .. }));
    }
}
