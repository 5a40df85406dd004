//! Rotated-ellipse chord intersections.
//!
//! The orbit is an ellipse with semi-axes `a` and `b`, rotated by
//! `rotation_deg` about its own center (which sits at the diagram
//! origin). All intersection queries reduce to one quadratic in a
//! single coordinate; a negative discriminant means the line misses
//! the ellipse and surfaces as NaN in both roots.
//!
//! A point `(x, y)` lies on the ellipse when
//!
//! ```text
//! ((x cos r + y sin r) / a)^2 + ((y cos r - x sin r) / b)^2 = 1
//! ```
//!
//! Substituting a vertical line `x = X`, a horizontal line `y = Y`, or
//! a sloped line `y = c x + d` into that equation gives the three
//! chord solvers below. Roots are always returned with the
//! `(-B + sqrt(D)) / 2A` branch first; since the leading coefficient is
//! positive, the first root is the numerically larger coordinate.

use serde::{Deserialize, Serialize};

use crate::geometry::angle::{cos_deg, sin_deg};
use crate::geometry::Point;

/// An origin-centered ellipse rotated about its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitEllipse {
    semi_major: f64,
    semi_minor: f64,
    rotation_deg: f64,
}

impl OrbitEllipse {
    /// Create an ellipse from semi-axes (canvas units) and a rotation
    /// in degrees.
    ///
    /// Axes are not validated here: the chord solvers answer a
    /// degenerate ellipse with NaN the same way they answer a missed
    /// chord.
    #[must_use]
    pub const fn new(semi_major: f64, semi_minor: f64, rotation_deg: f64) -> Self {
        Self {
            semi_major,
            semi_minor,
            rotation_deg,
        }
    }

    /// A circle of the given radius.
    #[must_use]
    pub const fn circle(radius: f64) -> Self {
        Self::new(radius, radius, 0.0)
    }

    /// Semi-major axis.
    #[must_use]
    pub const fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Semi-minor axis.
    #[must_use]
    pub const fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Rotation about the center, degrees.
    #[must_use]
    pub const fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// The ellipse shrunk by `inset` on both semi-axes, same rotation.
    ///
    /// This is the inner edge used for annular band fills. It is not
    /// the true parallel curve of the ellipse; for insets small against
    /// the axes the difference is below a pixel, and the band edges it
    /// produces are what keep the arc endpoints consistent with the
    /// radial edge segments.
    #[must_use]
    pub const fn reduced(&self, inset: f64) -> Self {
        Self::new(
            self.semi_major - inset,
            self.semi_minor - inset,
            self.rotation_deg,
        )
    }

    fn sin_r(&self) -> f64 {
        sin_deg(self.rotation_deg)
    }

    fn cos_r(&self) -> f64 {
        cos_deg(self.rotation_deg)
    }

    fn inv_a2(&self) -> f64 {
        1.0 / (self.semi_major * self.semi_major)
    }

    fn inv_b2(&self) -> f64 {
        1.0 / (self.semi_minor * self.semi_minor)
    }

    /// Both roots of `A t^2 + B t + C = 0`, plus branch first.
    ///
    /// NaN on a negative discriminant, from the square root itself.
    fn quadratic_roots(a: f64, b: f64, c: f64) -> [f64; 2] {
        let sqrt_d = (b * b - 4.0 * a * c).sqrt();
        [
            0.5 * (-b + sqrt_d) / a,
            0.5 * (-b - sqrt_d) / a,
        ]
    }

    /// Intersect the vertical line `x = x0` with the ellipse.
    ///
    /// Returns the two y roots, larger (lower on screen) first. Both
    /// are NaN when the line misses the ellipse.
    #[must_use]
    pub fn chord_y(&self, x0: f64) -> [f64; 2] {
        let (sin_r, cos_r) = (self.sin_r(), self.cos_r());
        let (sin_r2, cos_r2) = (sin_r * sin_r, cos_r * cos_r);
        let (inv_a2, inv_b2) = (self.inv_a2(), self.inv_b2());

        let a = sin_r2 * inv_a2 + cos_r2 * inv_b2;
        let b = 2.0 * x0 * cos_r * sin_r * (inv_a2 - inv_b2);
        let c = x0 * x0 * (cos_r2 * inv_a2 + sin_r2 * inv_b2) - 1.0;
        Self::quadratic_roots(a, b, c)
    }

    /// Intersect the horizontal line `y = y0` with the ellipse.
    ///
    /// Returns the two x roots, larger (rightward) first.
    #[must_use]
    pub fn chord_x(&self, y0: f64) -> [f64; 2] {
        let (sin_r, cos_r) = (self.sin_r(), self.cos_r());
        let (sin_r2, cos_r2) = (sin_r * sin_r, cos_r * cos_r);
        let (inv_a2, inv_b2) = (self.inv_a2(), self.inv_b2());

        let a = cos_r2 * inv_a2 + sin_r2 * inv_b2;
        let b = 2.0 * y0 * cos_r * sin_r * (inv_a2 - inv_b2);
        let c = y0 * y0 * (sin_r2 * inv_a2 + cos_r2 * inv_b2) - 1.0;
        Self::quadratic_roots(a, b, c)
    }

    /// Intersect the line `y = c x + d` with the ellipse.
    ///
    /// Returns the two x roots, plus branch first. Vertical lines have
    /// no finite slope; use [`Self::chord_y`] for those.
    #[must_use]
    pub fn chord_line(&self, slope: f64, intercept: f64) -> [f64; 2] {
        let (sin_r, cos_r) = (self.sin_r(), self.cos_r());
        let (sin_r2, cos_r2) = (sin_r * sin_r, cos_r * cos_r);
        let (inv_a2, inv_b2) = (self.inv_a2(), self.inv_b2());

        let ua = slope * sin_r + cos_r;
        let ub = slope * cos_r - sin_r;
        let a = ua * ua * inv_a2 + ub * ub * inv_b2;
        let b = 2.0
            * intercept
            * (cos_r * sin_r * (inv_a2 - inv_b2) + slope * (sin_r2 * inv_a2 + cos_r2 * inv_b2));
        let c = intercept * intercept * (sin_r2 * inv_a2 + cos_r2 * inv_b2) - 1.0;
        Self::quadratic_roots(a, b, c)
    }

    /// Value of the implicit ellipse equation at a point, zero on the
    /// boundary, negative inside, positive outside.
    #[must_use]
    pub fn residual(&self, point: Point) -> f64 {
        let (sin_r, cos_r) = (self.sin_r(), self.cos_r());
        let u = (point.x * cos_r + point.y * sin_r) / self.semi_major;
        let v = (point.y * cos_r - point.x * sin_r) / self.semi_minor;
        u * u + v * v - 1.0
    }

    /// Endpoints of the major axis in the ellipse's own frame,
    /// `(a, 0)` and `(-a, 0)`. Rendered inside the rotated group, so
    /// no rotation is applied here.
    #[must_use]
    pub const fn major_axis_endpoints(&self) -> (Point, Point) {
        (
            Point::new(self.semi_major, 0.0),
            Point::new(-self.semi_major, 0.0),
        )
    }
}
