//! The moon figure: a small disc drawn at its orbit position with
//! pole markers, an equator hint and a day/night terminator.
//!
//! All geometry here is in the moon's local frame (origin at its
//! center); the scene assembler wraps it in a translate group at the
//! orbit position. The terminator is two arcs: half the disc outline,
//! then an ellipse of x radius `R |cos ls|` whose arc flags pick the
//! quadrant-correct lit side.

use serde::{Deserialize, Serialize};

use crate::geometry::angle::{cos_deg, sin_deg};
use crate::geometry::path::{LabelPlacement, PathData};
use crate::geometry::Point;

/// Font size of the pole letters.
const POLE_FONT_SIZE: f64 = 12.0;

/// A moon (or planet) rendered as a schematic disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonFigure {
    /// Display name, used as the group class in SVG output.
    pub name: String,
    /// Disc radius in canvas units.
    pub radius: f64,
    /// Axial tilt of the drawn pole line, degrees.
    pub obliquity_deg: f64,
    /// Disc fill color.
    pub color: String,
}

impl Default for MoonFigure {
    fn default() -> Self {
        Self {
            name: "planet".to_string(),
            radius: 15.0,
            obliquity_deg: 0.0,
            color: "blue".to_string(),
        }
    }
}

impl MoonFigure {
    /// Create a moon figure.
    #[must_use]
    pub fn new(name: &str, radius: f64, obliquity_deg: f64, color: &str) -> Self {
        Self {
            name: name.to_string(),
            radius,
            obliquity_deg,
            color: color.to_string(),
        }
    }

    /// Titan: 26.73 degree obliquity, gold disc.
    #[must_use]
    pub fn titan() -> Self {
        Self::new("Titan", 15.0, 26.73, "gold")
    }

    /// The night-side outline at solar longitude `ls`.
    ///
    /// Runs from the south point over one limb to the north point,
    /// then back along the terminator ellipse. The flag choices keep
    /// the shadow on the limb facing away from the sun and flip the
    /// terminator bulge as the moon crosses each quadrant boundary.
    #[must_use]
    pub fn shadow_path(&self, ls: f64) -> PathData {
        let r = self.radius;
        let terminator_rx = r * cos_deg(ls).abs();
        let (limb_large, limb_sweep) = if ls <= 180.0 {
            (true, true)
        } else {
            (false, false)
        };
        let lit_product = cos_deg(ls) * sin_deg(ls);
        let (term_large, term_sweep) = if lit_product < 0.0 {
            (false, true)
        } else if ls < 90.0 {
            (false, false)
        } else {
            (true, false)
        };

        PathData::new()
            .move_to(Point::new(0.0, r))
            .arc_to(r, r, 0.0, limb_large, limb_sweep, Point::new(0.0, -r))
            .arc_to(
                terminator_rx,
                r,
                0.0,
                term_large,
                term_sweep,
                Point::new(0.0, r),
            )
    }

    /// The equator hint: a shallow arc across the disc.
    #[must_use]
    pub fn equator_path(&self) -> PathData {
        let r = self.radius;
        PathData::new()
            .move_to(Point::new(r, 0.0))
            .arc_to(r, 0.3 * r, 0.0, false, true, Point::new(-r, 0.0))
    }

    /// Endpoints of the pole line, drawn inside a group rotated by the
    /// obliquity.
    #[must_use]
    pub fn pole_line(&self) -> (Point, Point) {
        (
            Point::new(0.0, 2.0 * self.radius),
            Point::new(0.0, -2.0 * self.radius),
        )
    }

    /// The `N` and `S` letters beside the pole line ends.
    #[must_use]
    pub fn pole_labels(&self) -> [LabelPlacement; 2] {
        let r = self.radius;
        [
            LabelPlacement {
                text: "N".to_string(),
                position: Point::new(r, -2.0 * r),
                rotation_deg: 0.0,
                font_size: POLE_FONT_SIZE,
            },
            LabelPlacement {
                text: "S".to_string(),
                position: Point::new(-r, 2.5 * r),
                rotation_deg: 0.0,
                font_size: POLE_FONT_SIZE,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::PathCommand;

    fn arc_flags(path: &PathData) -> Vec<(bool, bool)> {
        path.commands()
            .iter()
            .filter_map(|c| match c {
                PathCommand::Arc {
                    large_arc, sweep, ..
                } => Some((*large_arc, *sweep)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_titan_preset() {
        let titan = MoonFigure::titan();
        assert_eq!(titan.name, "Titan");
        assert!((titan.radius - 15.0).abs() < f64::EPSILON);
        assert!((titan.obliquity_deg - 26.73).abs() < f64::EPSILON);
        assert_eq!(titan.color, "gold");
    }

    #[test]
    fn test_shadow_structure() {
        let moon = MoonFigure::titan();
        let path = moon.shadow_path(45.0);
        let commands = path.commands();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], PathCommand::MoveTo { .. }));
        assert!(matches!(commands[1], PathCommand::Arc { .. }));
        assert!(matches!(commands[2], PathCommand::Arc { .. }));
        assert!(path.is_finite());
    }

    #[test]
    fn test_shadow_terminator_radius() {
        let moon = MoonFigure::new("m", 15.0, 0.0, "gray");
        for (ls, expected) in [(0.0, 15.0), (60.0, 7.5), (90.0, 0.0), (180.0, 15.0)] {
            let path = moon.shadow_path(ls);
            let PathCommand::Arc { rx, .. } = path.commands()[2] else {
                panic!("terminator arc missing at ls={ls}");
            };
            assert!(
                (rx - expected).abs() < 1e-9,
                "terminator rx at ls={ls}: {rx}"
            );
        }
    }

    #[test]
    fn test_shadow_limb_side_switches_at_autumn() {
        let moon = MoonFigure::titan();
        assert_eq!(arc_flags(&moon.shadow_path(90.0))[0], (true, true));
        assert_eq!(arc_flags(&moon.shadow_path(180.0))[0], (true, true));
        assert_eq!(arc_flags(&moon.shadow_path(180.1))[0], (false, false));
        assert_eq!(arc_flags(&moon.shadow_path(300.0))[0], (false, false));
    }

    #[test]
    fn test_shadow_terminator_flags_by_quadrant() {
        let moon = MoonFigure::titan();
        // First quadrant: lit product positive, before the solstice.
        assert_eq!(arc_flags(&moon.shadow_path(45.0))[1], (false, false));
        // Second quadrant: product negative.
        assert_eq!(arc_flags(&moon.shadow_path(135.0))[1], (false, true));
        // Third quadrant: product positive again, past the solstice.
        assert_eq!(arc_flags(&moon.shadow_path(225.0))[1], (true, false));
        // Fourth quadrant: product negative.
        assert_eq!(arc_flags(&moon.shadow_path(315.0))[1], (false, true));
    }

    #[test]
    fn test_shadow_runs_pole_to_pole() {
        let moon = MoonFigure::new("m", 15.0, 0.0, "gray");
        let path = moon.shadow_path(200.0);
        let PathCommand::MoveTo { to: start } = path.commands()[0] else {
            panic!("shadow must start with a move");
        };
        assert_eq!(start, Point::new(0.0, 15.0));
        assert_eq!(path.last_endpoint(), Some(Point::new(0.0, 15.0)));
    }

    #[test]
    fn test_equator_arc() {
        let moon = MoonFigure::new("m", 20.0, 0.0, "gray");
        let path = moon.equator_path();
        let PathCommand::Arc { rx, ry, sweep, .. } = path.commands()[1] else {
            panic!("equator must be an arc");
        };
        assert!((rx - 20.0).abs() < 1e-12);
        assert!((ry - 6.0).abs() < 1e-12);
        assert!(sweep);
        assert_eq!(path.last_endpoint(), Some(Point::new(-20.0, 0.0)));
    }

    #[test]
    fn test_pole_line_spans_two_radii() {
        let moon = MoonFigure::titan();
        let (south, north) = moon.pole_line();
        assert_eq!(south, Point::new(0.0, 30.0));
        assert_eq!(north, Point::new(0.0, -30.0));
    }

    #[test]
    fn test_pole_labels() {
        let moon = MoonFigure::titan();
        let [north, south] = moon.pole_labels();
        assert_eq!(north.text, "N");
        assert_eq!(north.position, Point::new(15.0, -30.0));
        assert_eq!(south.text, "S");
        assert_eq!(south.position, Point::new(-15.0, 37.5));
        assert!((north.font_size - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_serde_round_trip() {
        let moon = MoonFigure::titan();
        let yaml = serde_yaml::to_string(&moon).unwrap();
        let back: MoonFigure = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(moon, back);
    }
}
