use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use proptest::prelude::*;

use super::*;
use crate::error::Error;

#[test]
fn construction_rounds_to_fixed_decimals() {
    let p = Point::new(0.1 + 0.2, 1.0);
    assert_eq!(p.x, 0.3);
    let v = Vector::new(1.0 / 3.0, 0.0);
    assert_eq!(v.x, 0.3333333333);
}

#[test]
fn grid_accumulation_compares_exactly() {
    // Ten steps of 0.1 land exactly on 1.0 once each sum is rounded, which
    // is what the position scan relies on for grid dedup.
    let mut x = 0.0;
    for _ in 0..10 {
        x = round_coord(x + 0.1);
    }
    assert_eq!(x, 1.0);
}

#[test]
fn vector_arithmetic() {
    let a = Vector::new(1.0, 2.0);
    let b = Vector::new(3.0, -1.0);
    assert_eq!(a + b, Vector::new(4.0, 1.0));
    assert_eq!(a - b, Vector::new(-2.0, 3.0));
    assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
    assert_eq!(-a, Vector::new(-1.0, -2.0));
    assert_eq!(a.dot(b), 1.0);
    assert_eq!(Vector::new(3.0, 4.0).norm(), 5.0);
}

#[test]
fn normalize_rejects_zero_vector() {
    assert!(matches!(
        Vector::new(0.0, 0.0).normalize(),
        Err(Error::DegenerateVector)
    ));
    let u = Vector::new(0.0, -2.0).normalize().unwrap();
    assert_eq!(u, Vector::new(0.0, -1.0));
}

#[test]
fn angle_between_vectors() {
    let x = Vector::new(1.0, 0.0);
    let y = Vector::new(0.0, 3.0);
    assert_eq!(x.angle(y), round_coord(FRAC_PI_2));
    assert_eq!(x.angle(x), 0.0);
    assert_eq!(x.angle(-x), round_coord(PI));
    // Degenerate input propagates as NaN, failing any interval test.
    assert!(x.angle(Vector::new(0.0, 0.0)).is_nan());
}

#[test]
fn from_angle_special_cases() {
    assert_eq!(Vector::from_angle(FRAC_PI_2), Vector::new(0.0, 1.0));
    assert_eq!(Vector::from_angle(-FRAC_PI_2), Vector::new(0.0, -1.0));
    assert_eq!(Vector::from_angle(0.0), Vector::new(1.0, 0.0));
    // Past ±π/2 the x component flips into the left half-plane.
    let back = Vector::from_angle(PI - FRAC_PI_4);
    assert!(back.x < 0.0);
    assert!(back.y > 0.0);
}

#[test]
fn line_constructors_reject_verticals() {
    assert!(LinearEquation::from_point_angle(Point::new(0.0, 0.0), FRAC_PI_2).is_none());
    assert!(LinearEquation::from_points(Point::new(1.0, 0.0), Point::new(1.0, 5.0)).is_none());
    let le = LinearEquation::from_points(Point::new(0.0, 1.0), Point::new(2.0, 5.0))
        .expect("non-vertical");
    assert_eq!(le.a, 2.0);
    assert_eq!(le.b, 1.0);
    assert_eq!(le.apply(3.0), 7.0);
    assert_eq!(le.reverse(7.0), Some(3.0));
    assert!(LinearEquation::new(0.0, 2.0).reverse(5.0).is_none());
}

#[test]
fn line_intersection_and_parallels() {
    let a = LinearEquation::new(1.0, 0.0);
    let b = LinearEquation::new(-1.0, 2.0);
    assert_eq!(a.intersection(&b), Some(Point::new(1.0, 1.0)));
    assert!(a.intersection(&LinearEquation::new(1.0, 5.0)).is_none());
    assert!(a.intersection(&a).is_none());
}

#[test]
fn intersection_circle_vertical_branch() {
    let origin = Point::new(1.0, 3.0);
    let hit = LinearEquation::intersection_circle(Point::new(1.05, 0.0), FRAC_PI_2, origin, 0.1);
    assert_eq!(hit, Some(Point::new(1.05, 3.0)));
    assert!(
        LinearEquation::intersection_circle(Point::new(2.0, 0.0), -FRAC_PI_2, origin, 0.1)
            .is_none()
    );
}

#[test]
fn intersection_circle_horizontal_branch() {
    let origin = Point::new(4.0, 0.05);
    let hit = LinearEquation::intersection_circle(Point::new(0.0, 0.0), 0.0, origin, 0.1);
    assert_eq!(hit, Some(Point::new(4.0, 0.0)));
    assert!(LinearEquation::intersection_circle(Point::new(0.0, 2.0), PI, origin, 0.1).is_none());
}

#[test]
fn intersection_circle_generic_branch() {
    // 45° line through the origin against a circle at (2, 0): the
    // projection is (1, 1), at distance √2 ≈ 1.414.
    let origin = Point::new(2.0, 0.0);
    let p = Point::new(0.0, 0.0);
    let hit = LinearEquation::intersection_circle(p, FRAC_PI_4, origin, 1.5).expect("in range");
    assert!((hit.x - 1.0).abs() < 1e-9);
    assert!((hit.y - 1.0).abs() < 1e-9);
    assert!(LinearEquation::intersection_circle(p, FRAC_PI_4, origin, 1.0).is_none());
}

#[test]
fn point_in_convex_shape() {
    let tri = ConvexShape::triangle(
        Point::new(0.0, 0.0),
        Point::new(4.0, 1.0),
        Point::new(4.0, -1.0),
    );
    assert!(tri.point_in(Point::new(3.0, 0.0)));
    assert!(!tri.point_in(Point::new(3.0, 2.0)));
    assert!(!tri.point_in(Point::new(-0.5, 0.0)));
    // Exactly on a side counts as outside.
    assert!(!tri.point_in(Point::new(2.0, 0.5)));
    assert!(!tri.point_in(Point::new(0.0, 0.0)));
}

#[test]
fn inflate_widens_the_shot_triangle() {
    let tri = ConvexShape::triangle(
        Point::new(0.0, 0.0),
        Point::new(4.0, 1.0),
        Point::new(4.0, -1.0),
    );
    let big = tri.inflate(0.1).expect("well-formed triangle");

    // Base corners pushed outward along the base line.
    assert_eq!(big.points[1], Point::new(4.0, -1.1));
    assert_eq!(big.points[2], Point::new(4.0, 1.1));
    // Apex retreats away from the base; former boundary points are now
    // strictly interior.
    assert!(big.points[0].x < 0.0);
    assert!(big.point_in(Point::new(0.0, 0.0)));
    assert!(big.point_in(Point::new(2.0, 0.5)));
}

#[test]
fn inflate_rejects_degenerate_base() {
    let tri = ConvexShape::triangle(
        Point::new(0.0, 0.0),
        Point::new(4.0, 1.0),
        Point::new(4.0, 1.0),
    );
    assert!(matches!(tri.inflate(0.1), Err(Error::DegenerateVector)));
}

proptest! {
    #[test]
    fn point_translation_round_trips(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        dx in -10.0f64..10.0,
        dy in -10.0f64..10.0,
    ) {
        let p = Point::new(x, y);
        let v = Vector::new(dx, dy);
        let back = (p + v) - v;
        // One rounding step of slack: translation is applied on already
        // rounded coordinates.
        prop_assert!((back.x - p.x).abs() <= 2e-10);
        prop_assert!((back.y - p.y).abs() <= 2e-10);
    }

    #[test]
    fn norm_is_scale_invariant(x in -50.0f64..50.0, y in -50.0f64..50.0, k in 1.0f64..10.0) {
        let v = Vector::new(x, y);
        let scaled = v * k;
        prop_assert!((scaled.norm() - v.norm() * k).abs() < 1e-6);
    }
}
