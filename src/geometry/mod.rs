//! Pure diagram geometry.
//!
//! Everything in this module is side-effect free and infallible: a
//! degenerate query (a chord that misses the ellipse, a ray from a sun
//! placed outside the orbit) yields NaN coordinates instead of an
//! error, exactly like the square root of a negative discriminant.
//! Callers that need finite output filter at their own boundary; see
//! [`crate::scene`].
//!
//! Coordinates are SVG screen coordinates: x grows rightward, y grows
//! downward, the origin is the ellipse center. Solar longitude 0 points
//! up the screen (negative y), 90 points left, matching the convention
//! of a north-pole-up seasonal diagram.

pub mod angle;
pub mod ellipse;
pub mod metamorphic;
pub mod path;
pub mod solar;

pub use ellipse::OrbitEllipse;
pub use path::{LabelPlacement, PathCommand, PathData};
pub use solar::{CoverageBand, LegendEntry, SunAnchor, TickMark};

use serde::{Deserialize, Serialize};

/// A point in diagram coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate (rightward).
    pub x: f64,
    /// Vertical coordinate (downward, SVG convention).
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the diagram origin (the ellipse center).
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Distance to another point.
    #[must_use]
    pub fn distance_to(&self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// This point displaced by `scale` times the given direction.
    #[must_use]
    pub fn offset_by(&self, direction: Self, scale: f64) -> Self {
        Self {
            x: self.x + scale * direction.x,
            y: self.y + scale * direction.y,
        }
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}
