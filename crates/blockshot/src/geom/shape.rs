//! Convex polygons and the shot-triangle construction.
//!
//! A shot triangle is the region swept by one opponent's legal shots toward
//! one goal: apex at the opponent, base on the goal posts. The inflated
//! variant widens it by the robot radius so a defender whose interception
//! circle merely grazes the region is still considered by the position scan.

use super::types::{Point, Vector};
use crate::error::Result;

/// Ordered polygon; consecutive points form the sides. All operations assume
/// convexity.
#[derive(Clone, Debug)]
pub struct ConvexShape {
    pub points: Vec<Point>,
}

impl ConvexShape {
    pub fn new(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 3, "polygon needs at least 3 points");
        Self { points }
    }

    /// Triangle from an apex and two base points, apex first.
    pub fn triangle(apex: Point, base_a: Point, base_b: Point) -> Self {
        Self::new(vec![apex, base_a, base_b])
    }

    /// Strict containment by consistent cross-product sign over all sides.
    /// A point exactly on a side (zero cross product) counts as outside.
    pub fn point_in(&self, point: Point) -> bool {
        let mut prev_side = 0i8;
        let n = self.points.len();
        for v in 0..n {
            let a = self.points[v];
            let b = self.points[(v + 1) % n];
            let seg = Vector::between(b, a);
            let rel = Vector::between(a, point);
            let side = cross_sign(seg, rel);
            if side == 0 {
                return false;
            }
            if prev_side == 0 {
                prev_side = side;
            } else if prev_side != side {
                return false;
            }
        }
        true
    }

    /// Widen a shot triangle by `size`: push the base points outward along
    /// the base line, then move the apex back along the bisector of the two
    /// side directions. The base itself is not pushed past the goal line
    /// since no shot travels there.
    ///
    /// Fails with `DegenerateVector` when the base points coincide or the
    /// apex sits on the widened base (degenerate input geometry).
    pub fn inflate(&self, size: f64) -> Result<ConvexShape> {
        debug_assert_eq!(self.points.len(), 3, "inflate expects a shot triangle");
        let apex = self.points[0];
        let base = Vector::between(self.points[1], self.points[2]).normalize()?;
        let p2 = self.points[2] + base * size;
        let p3 = self.points[1] - base * size;

        let v1 = Vector::between(p3, apex);
        let v2 = Vector::between(p2, apex);
        let back = (v1 + v2).normalize()?;
        let p1 = apex + back * 4.0;

        Ok(ConvexShape::new(vec![p1, p2, p3]))
    }
}

#[inline]
fn cross_sign(p1: Vector, p2: Vector) -> i8 {
    let c = p1.x * p2.y - p1.y * p2.x;
    if c == 0.0 {
        0
    } else if c > 0.0 {
        1
    } else {
        -1
    }
}
