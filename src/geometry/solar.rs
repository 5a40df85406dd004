//! Solar-longitude geometry: the sun anchor and everything measured
//! from it.
//!
//! The sun sits off-center at `e * a` along the rotated major axis.
//! Solar longitude is the direction of the planet as seen from the
//! sun: Ls 0 is the northern vernal equinox (up the screen), 90 the
//! northern summer solstice (left), 180 the autumnal equinox (down),
//! 270 the winter solstice (right).
//!
//! [`SunAnchor::position_at`] casts the Ls ray from the sun and keeps
//! one of the two ellipse intersections: the minus branch of the
//! quadratic for `ls <= 180`, the plus branch above. Together with the
//! slope sign this walks the full orbit exactly once. Vertical rays
//! (Ls exactly 0 or 180) have no finite slope and use the vertical
//! chord through the sun instead.
//!
//! The direction `(sin ls, cos ls)` points from the orbit position
//! back toward the sun side of the curve, so positive tick lengths
//! draw inward ticks, negative lengths outward markers, and coverage
//! bands fill the annulus between the orbit and a reduced ellipse.

use serde::{Deserialize, Serialize};

use crate::geometry::angle::{arc_span, cos_deg, sin_deg};
use crate::geometry::ellipse::OrbitEllipse;
use crate::geometry::path::{LabelPlacement, PathData};
use crate::geometry::Point;

/// Default tick length, canvas units.
pub const DEFAULT_TICK_LENGTH: f64 = 10.0;

/// Default coverage band thickness, canvas units.
pub const DEFAULT_BAND_THICKNESS: f64 = 30.0;

/// Default annotation font size, canvas units.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Tick labels sit this many tick lengths from the orbit.
pub const TICK_LABEL_OFFSET: f64 = 2.5;

/// Band labels sit this fraction of the thickness past the inner edge.
pub const BAND_LABEL_INSET: f64 = 0.85;

/// Unit vector from an orbit position at `ls` toward the sun side.
#[must_use]
pub fn sunward_direction(ls: f64) -> Point {
    Point::new(sin_deg(ls), cos_deg(ls))
}

/// Rotation that lays a label along the local orbit tangent while
/// keeping its text upright on screen.
#[must_use]
pub fn tangent_label_rotation(ls: f64) -> f64 {
    if ls < 180.0 {
        90.0 - ls
    } else {
        -90.0 - ls
    }
}

/// The off-center sun on an orbit ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunAnchor {
    ellipse: OrbitEllipse,
    position: Point,
}

impl SunAnchor {
    /// Place the sun at `eccentricity * semi_major` from the center
    /// along the rotated major axis.
    #[must_use]
    pub fn new(ellipse: OrbitEllipse, eccentricity: f64) -> Self {
        let offset = eccentricity * ellipse.semi_major();
        let position = Point::new(
            offset * cos_deg(ellipse.rotation_deg()),
            offset * sin_deg(ellipse.rotation_deg()),
        );
        Self { ellipse, position }
    }

    /// The sun's position in diagram coordinates.
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// The orbit ellipse this sun is anchored to.
    #[must_use]
    pub const fn ellipse(&self) -> OrbitEllipse {
        self.ellipse
    }

    /// Orbit position at solar longitude `ls`, degrees.
    ///
    /// NaN coordinates when the ray misses the ellipse, which can only
    /// happen when the sun was placed outside it.
    #[must_use]
    pub fn position_at(&self, ls: f64) -> Point {
        // Exact 0 and 180 are the vertical ray through the sun; every
        // other Ls has a finite slope.
        if ls == 0.0 {
            let [_, north] = self.ellipse.chord_y(self.position.x);
            return Point::new(self.position.x, north);
        }
        if ls == 180.0 {
            let [south, _] = self.ellipse.chord_y(self.position.x);
            return Point::new(self.position.x, south);
        }

        let slope = cos_deg(ls) / sin_deg(ls);
        let intercept = self.position.y - self.position.x * slope;
        let [plus, minus] = self.ellipse.chord_line(slope, intercept);
        let x = if ls <= 180.0 { minus } else { plus };
        Point::new(x, slope * x + intercept)
    }

    /// Endpoints of the equinox line: the vertical chord through the
    /// sun, connecting Ls 180 (south) to Ls 0 (north).
    #[must_use]
    pub fn equinox_chord(&self) -> (Point, Point) {
        let [south, north] = self.ellipse.chord_y(self.position.x);
        (
            Point::new(self.position.x, south),
            Point::new(self.position.x, north),
        )
    }

    /// Endpoints of the solstice line: the horizontal chord through
    /// the sun, connecting Ls 270 (east) to Ls 90 (west).
    #[must_use]
    pub fn solstice_chord(&self) -> (Point, Point) {
        let [east, west] = self.ellipse.chord_x(self.position.y);
        (
            Point::new(east, self.position.y),
            Point::new(west, self.position.y),
        )
    }

    /// A tick mark crossing the orbit at `ls`.
    ///
    /// Positive lengths point inward (sunward), negative outward. A
    /// label, when given, sits [`TICK_LABEL_OFFSET`] tick lengths from
    /// the orbit on the same side.
    #[must_use]
    pub fn tick_at(&self, ls: f64, length: f64, label: Option<&str>) -> TickMark {
        let start = self.position_at(ls);
        let direction = sunward_direction(ls);
        let end = start.offset_by(direction, length);
        let label = label.map(|text| LabelPlacement {
            text: text.to_string(),
            position: start.offset_by(direction, TICK_LABEL_OFFSET * length),
            rotation_deg: 0.0,
            font_size: DEFAULT_FONT_SIZE,
        });
        TickMark {
            ls,
            length,
            start,
            end,
            label,
        }
    }

    /// An annular band hugging the inside of the orbit from `start_ls`
    /// to `end_ls` (walking in increasing Ls), `thickness` units deep.
    ///
    /// The outline runs along the orbit, steps inward at the end
    /// longitude, returns along the reduced ellipse and closes at the
    /// start. Arcs switch to the large sweep when the band spans more
    /// than half the orbit. A label, when given, lies along the tangent
    /// just inside the band at the end longitude.
    #[must_use]
    pub fn coverage_band(
        &self,
        start_ls: f64,
        end_ls: f64,
        thickness: f64,
        label: Option<&str>,
    ) -> CoverageBand {
        let outer_start = self.position_at(start_ls);
        let outer_end = self.position_at(end_ls);
        let start_dir = sunward_direction(start_ls);
        let end_dir = sunward_direction(end_ls);
        let inner_end = outer_end.offset_by(end_dir, thickness);
        let inner_start = outer_start.offset_by(start_dir, thickness);

        let inner = self.ellipse.reduced(thickness);
        let rotation = self.ellipse.rotation_deg();
        let large_arc = arc_span(start_ls, end_ls) > 180.0;

        let path = PathData::new()
            .move_to(outer_start)
            .arc_to(
                self.ellipse.semi_major(),
                self.ellipse.semi_minor(),
                rotation,
                large_arc,
                false,
                outer_end,
            )
            .line_to(inner_end)
            .arc_to(
                inner.semi_major(),
                inner.semi_minor(),
                rotation,
                large_arc,
                true,
                inner_start,
            )
            .close();

        let label = label.map(|text| LabelPlacement {
            text: text.to_string(),
            position: inner_end.offset_by(end_dir, BAND_LABEL_INSET * thickness),
            rotation_deg: tangent_label_rotation(end_ls),
            font_size: DEFAULT_FONT_SIZE,
        });

        CoverageBand {
            start_ls,
            end_ls,
            thickness,
            path,
            label,
        }
    }

    /// Place a free-floating legend label.
    ///
    /// The entry's Ls picks a direction; the label sits at
    /// `radius_fraction` of the center distance of the orbit point in
    /// that direction, measured from the sun. Rotation and size default
    /// to the tangent rotation and [`DEFAULT_FONT_SIZE`] unless the
    /// entry overrides them.
    #[must_use]
    pub fn legend_placement(&self, entry: &LegendEntry) -> LabelPlacement {
        let on_orbit = self.position_at(entry.ls);
        let center_distance = on_orbit.norm();
        let direction = sunward_direction(entry.ls);
        let position = self
            .position
            .offset_by(direction, -entry.radius_fraction * center_distance);
        LabelPlacement {
            text: entry.text.clone(),
            position,
            rotation_deg: entry
                .rotation_deg
                .unwrap_or_else(|| tangent_label_rotation(entry.ls)),
            font_size: entry.font_size.unwrap_or(DEFAULT_FONT_SIZE),
        }
    }
}

/// A tick mark on the orbit, with an optional label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    /// Solar longitude of the tick.
    pub ls: f64,
    /// Signed length; positive is sunward.
    pub length: f64,
    /// Point on the orbit.
    pub start: Point,
    /// Free end of the tick.
    pub end: Point,
    /// Optional label past the free end.
    pub label: Option<LabelPlacement>,
}

impl TickMark {
    /// The tick stroke as path data.
    #[must_use]
    pub fn path(&self) -> PathData {
        PathData::new().move_to(self.start).line_to(self.end)
    }

    /// All geometry in the tick is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.label.as_ref().is_none_or(LabelPlacement::is_finite)
    }
}

/// An annular coverage band between two solar longitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageBand {
    /// Band start, degrees Ls.
    pub start_ls: f64,
    /// Band end, degrees Ls.
    pub end_ls: f64,
    /// Radial depth, canvas units.
    pub thickness: f64,
    /// Closed outline of the band.
    pub path: PathData,
    /// Optional tangent label at the end longitude.
    pub label: Option<LabelPlacement>,
}

impl CoverageBand {
    /// All geometry in the band is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.path.is_finite() && self.label.as_ref().is_none_or(LabelPlacement::is_finite)
    }
}

/// A legend entry: text floated sunward of the orbit at a chosen
/// longitude and radius fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Direction of the label from the sun, degrees Ls.
    pub ls: f64,
    /// Fraction of the orbit point's center distance.
    pub radius_fraction: f64,
    /// Label text.
    pub text: String,
    /// Override for the default tangent rotation.
    #[serde(default)]
    pub rotation_deg: Option<f64>,
    /// Override for the default font size.
    #[serde(default)]
    pub font_size: Option<f64>,
}
