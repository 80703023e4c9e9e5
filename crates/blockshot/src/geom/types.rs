//! Points and vectors with fixed-decimal rounding.
//!
//! Every constructor and arithmetic result is rounded to `COORD_DIGITS`
//! decimal places. Discretized positions and angles then compare reliably
//! with `==` despite intermediate floating-point error, which the rest of
//! the crate depends on (grid dedup, special-cased slopes).

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Decimal digits kept on every stored coordinate.
pub const COORD_DIGITS: i32 = 10;

/// Round to `COORD_DIGITS` decimal places.
#[inline]
pub fn round_coord(x: f64) -> f64 {
    let f = 10f64.powi(COORD_DIGITS);
    (x * f).round() / f
}

/// A position on the field. Coordinates are rounded on construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: round_coord(x),
            y: round_coord(y),
        }
    }

    #[inline]
    pub fn coords(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Euclidean distance to `other` (not rounded; purely transient).
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (other.coords() - self.coords()).norm()
    }

    pub fn midpoint(a: Point, b: Point) -> Point {
        Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
    }
}

impl std::ops::Add<Vector> for Point {
    type Output = Point;
    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.x, self.y + v.y)
    }
}

impl std::ops::Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, v: Vector) -> Point {
        Point::new(self.x - v.x, self.y - v.y)
    }
}

/// A free 2D vector. Coordinates are rounded on construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: round_coord(x),
            y: round_coord(y),
        }
    }

    /// Vector going from `a` to `b`.
    pub fn between(a: Point, b: Point) -> Vector {
        Vector::new(b.x - a.x, b.y - a.y)
    }

    /// Direction vector of a shot at angle `theta` (radians, field frame).
    ///
    /// The verticals are special-cased because `tan` is undefined there; the
    /// x component flips sign past ±π/2 so the vector points into the correct
    /// half-plane.
    pub fn from_angle(theta: f64) -> Vector {
        if theta == std::f64::consts::FRAC_PI_2 {
            return Vector::new(0.0, 1.0);
        }
        if theta == -std::f64::consts::FRAC_PI_2 {
            return Vector::new(0.0, -1.0);
        }
        let t = round_coord(theta.tan());
        if theta.abs() > std::f64::consts::FRAC_PI_2 {
            Vector::new(-1.0, -t)
        } else {
            Vector::new(1.0, t)
        }
    }

    #[inline]
    pub fn coords(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn dot(&self, other: Vector) -> f64 {
        round_coord(self.coords().dot(&other.coords()))
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        round_coord(self.coords().norm())
    }

    /// Unit vector in the same direction, or `DegenerateVector` on zero norm.
    pub fn normalize(&self) -> Result<Vector> {
        let n = self.norm();
        if n == 0.0 {
            return Err(Error::DegenerateVector);
        }
        Ok(Vector::new(self.x / n, self.y / n))
    }

    /// Unsigned angle between two vectors sharing an origin, in [0, π].
    ///
    /// Derived from the scalar product: `acos(u·v / (|u||v|))`. NaN (and thus
    /// a failing interval test downstream) when either vector is degenerate.
    pub fn angle(&self, other: Vector) -> f64 {
        round_coord((self.dot(other) / (self.norm() * other.norm())).acos())
    }
}

impl std::ops::Add for Vector {
    type Output = Vector;
    fn add(self, o: Vector) -> Vector {
        Vector::new(self.x + o.x, self.y + o.y)
    }
}

impl std::ops::Sub for Vector {
    type Output = Vector;
    fn sub(self, o: Vector) -> Vector {
        Vector::new(self.x - o.x, self.y - o.y)
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, k: f64) -> Vector {
        Vector::new(self.x * k, self.y * k)
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}
