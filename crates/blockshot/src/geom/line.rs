//! Line equations `y = a·x + b` and the circle-intersection predicate used
//! by the interception test.
//!
//! Vertical lines cannot be represented as a slope/intercept pair, so every
//! constructor taking an angle or two points returns `None` in the vertical
//! case and callers branch explicitly. Slopes and intercepts are rounded to
//! `LINE_DIGITS` decimals so parallel-slope comparisons behave like the
//! rounded coordinates they are derived from.

use super::types::Point;

/// Decimal digits kept on slope and intercept.
pub const LINE_DIGITS: i32 = 15;

#[inline]
fn round_line(x: f64) -> f64 {
    let f = 10f64.powi(LINE_DIGITS);
    (x * f).round() / f
}

/// `y = a·x + b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearEquation {
    pub a: f64,
    pub b: f64,
}

impl LinearEquation {
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            a: round_line(a),
            b: round_line(b),
        }
    }

    /// Line through `point` with direction angle `angle`; `None` if vertical.
    pub fn from_point_angle(point: Point, angle: f64) -> Option<Self> {
        if angle.abs() == std::f64::consts::FRAC_PI_2 {
            return None;
        }
        let t = angle.tan();
        Some(Self::new(t, point.y - t * point.x))
    }

    /// Line through two points; `None` if the segment is vertical.
    pub fn from_points(p1: Point, p2: Point) -> Option<Self> {
        if p1.x == p2.x {
            return None;
        }
        let a = (p2.y - p1.y) / (p2.x - p1.x);
        Some(Self::new(a, p1.y - a * p1.x))
    }

    /// f(x).
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        round_line(self.a * x + self.b)
    }

    /// f⁻¹(y); `None` for horizontal lines.
    pub fn reverse(&self, y: f64) -> Option<f64> {
        if self.a == 0.0 {
            return None;
        }
        Some(round_line((y - self.b) / self.a))
    }

    /// Intersection point with another line; `None` when slopes are equal
    /// (parallel or identical lines).
    pub fn intersection(&self, other: &LinearEquation) -> Option<Point> {
        if self.a == other.a {
            return None;
        }
        let x = (other.b - self.b) / (self.a - other.a);
        Some(Point::new(x, self.apply(x)))
    }

    /// Does the line through `point` at `angle` pass within `radius` of
    /// `origin`? Returns the projection of `origin` onto the line when it
    /// does.
    ///
    /// The three slope regimes are handled separately: vertical shots
    /// compare x coordinates, horizontal shots compare y coordinates, and
    /// the generic case projects `origin` via the perpendicular through it.
    pub fn intersection_circle(
        point: Point,
        angle: f64,
        origin: Point,
        radius: f64,
    ) -> Option<Point> {
        if angle.abs() == std::f64::consts::FRAC_PI_2 {
            if (point.x - origin.x).abs() <= radius {
                return Some(Point::new(point.x, origin.y));
            }
            return None;
        }
        if angle == 0.0 || angle.abs() == std::f64::consts::PI {
            if (point.y - origin.y).abs() <= radius {
                return Some(Point::new(origin.x, point.y));
            }
            return None;
        }

        let tan_angle = angle.tan();
        let cot_angle = 1.0 / tan_angle;

        // Perpendicular through the circle's origin, and the shot line itself.
        let perp = LinearEquation::new(-cot_angle, origin.y + cot_angle * origin.x);
        let shot = LinearEquation::new(tan_angle, point.y - tan_angle * point.x);

        // Slopes differ by construction (t and -1/t can never coincide).
        let proj = perp.intersection(&shot)?;
        if proj.distance(origin) <= radius {
            Some(proj)
        } else {
            None
        }
    }
}
