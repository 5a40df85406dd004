//! Metamorphic checks for the diagram geometry.
//!
//! Exact expected coordinates are only known for a handful of inputs,
//! so these checks verify **relations** that must hold across whole
//! families of inputs instead:
//!
//! 1. **On-orbit**: every `position_at(ls)` satisfies the ellipse
//!    equation.
//! 2. **Circle reduction**: on a centered circle, `position_at`
//!    collapses to `(-R sin ls, -R cos ls)`.
//! 3. **Mirror symmetry**: with an axis-aligned ellipse the sun lies
//!    on the x axis, so reflecting across it maps Ls to `180 - ls`.
//! 4. **Rotation conjugation**: spinning the ellipse against an Ls
//!    offset and turning the answer back reproduces the original
//!    position.
//! 5. **Chord consistency**: chord roots land back on the boundary.
//! 6. **Band closure**: a coverage band's outline returns to the inner
//!    start point before closing.
//!
//! The same relations back the property suite in `tests/`; keeping
//! them here lets the CLI's verify command run them against an
//! arbitrary configuration.

use crate::geometry::angle::{cos_deg, sin_deg};
use crate::geometry::ellipse::OrbitEllipse;
use crate::geometry::solar::{sunward_direction, SunAnchor};
use crate::geometry::Point;

/// Result of one metamorphic relation check.
#[derive(Debug, Clone)]
pub struct MetamorphicResult {
    /// Name of the relation tested.
    pub relation: String,
    /// Whether the relation holds within tolerance.
    pub passed: bool,
    /// Largest deviation observed.
    pub error: f64,
    /// Tolerance used.
    pub tolerance: f64,
    /// Where the worst deviation occurred, empty on a clean pass.
    pub details: String,
}

impl MetamorphicResult {
    /// Create a passing result.
    #[must_use]
    pub fn pass(relation: &str, error: f64, tolerance: f64) -> Self {
        Self {
            relation: relation.to_string(),
            passed: true,
            error,
            tolerance,
            details: String::new(),
        }
    }

    /// Create a failing result.
    #[must_use]
    pub fn fail(relation: &str, error: f64, tolerance: f64, details: &str) -> Self {
        Self {
            relation: relation.to_string(),
            passed: false,
            error,
            tolerance,
            details: details.to_string(),
        }
    }

    fn from_worst(relation: &str, worst: f64, at: f64, tolerance: f64) -> Self {
        if worst <= tolerance {
            Self::pass(relation, worst, tolerance)
        } else {
            Self::fail(
                relation,
                worst,
                tolerance,
                &format!("worst deviation {worst:.3e} at ls={at}"),
            )
        }
    }
}

const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Relation 1: every sampled orbit position satisfies the ellipse
/// equation.
#[must_use]
pub fn check_on_orbit(sun: &SunAnchor, samples: usize) -> MetamorphicResult {
    let step = 360.0 / samples.max(1) as f64;
    let mut worst = 0.0_f64;
    let mut worst_ls = 0.0;
    for i in 0..samples {
        let ls = i as f64 * step;
        let deviation = sun.ellipse().residual(sun.position_at(ls)).abs();
        if !deviation.is_finite() {
            return MetamorphicResult::fail(
                "on-orbit",
                f64::INFINITY,
                DEFAULT_TOLERANCE,
                &format!("non-finite position at ls={ls}"),
            );
        }
        if deviation > worst {
            worst = deviation;
            worst_ls = ls;
        }
    }
    MetamorphicResult::from_worst("on-orbit", worst, worst_ls, DEFAULT_TOLERANCE)
}

/// Relation 2: a centered circle reduces to the parametric form
/// `(-R sin ls, -R cos ls)`.
#[must_use]
pub fn check_circle_reduction(radius: f64, samples: usize) -> MetamorphicResult {
    let sun = SunAnchor::new(OrbitEllipse::circle(radius), 0.0);
    let step = 360.0 / samples.max(1) as f64;
    let mut worst = 0.0_f64;
    let mut worst_ls = 0.0;
    for i in 0..samples {
        let ls = i as f64 * step;
        let expected = Point::new(-radius * sin_deg(ls), -radius * cos_deg(ls));
        let deviation = sun.position_at(ls).distance_to(expected);
        if deviation > worst {
            worst = deviation;
            worst_ls = ls;
        }
    }
    // The quadratic loses a few digits against the closed form.
    MetamorphicResult::from_worst("circle-reduction", worst, worst_ls, 1e-6 * radius.abs())
}

/// Relation 3: an axis-aligned configuration is symmetric across the
/// x axis, mapping `ls` to `180 - ls`.
#[must_use]
pub fn check_mirror_symmetry(
    semi_major: f64,
    semi_minor: f64,
    eccentricity: f64,
    samples: usize,
) -> MetamorphicResult {
    let sun = SunAnchor::new(OrbitEllipse::new(semi_major, semi_minor, 0.0), eccentricity);
    let mut worst = 0.0_f64;
    let mut worst_ls = 0.0;
    for i in 1..samples {
        let ls = 180.0 * i as f64 / samples as f64;
        let direct = sun.position_at(ls);
        let mirrored = sun.position_at(180.0 - ls);
        let deviation = mirrored.distance_to(Point::new(direct.x, -direct.y));
        if deviation > worst {
            worst = deviation;
            worst_ls = ls;
        }
    }
    MetamorphicResult::from_worst("mirror-symmetry", worst, worst_ls, 1e-7)
}

/// Relation 4: the solver commutes with a rigid rotation of the whole
/// configuration. The anchor at rotation `r - phi` queried at
/// `ls + phi`, turned forward by `phi`, must land on `position_at(ls)`.
///
/// Holds because the sun and the Ls ray both ride the ellipse frame
/// and the branch rule always picks the intersection in front of the
/// sun.
#[must_use]
pub fn check_rotation_conjugation(
    sun: &SunAnchor,
    phi_deg: f64,
    samples: usize,
) -> MetamorphicResult {
    let ellipse = sun.ellipse();
    let rotation = ellipse.rotation_deg();
    // Signed offset of the sun along the major axis recovers the
    // eccentricity without a branch at rotation = +-90.
    let axis_offset = sun.position().x * cos_deg(rotation) + sun.position().y * sin_deg(rotation);
    let conjugate = SunAnchor::new(
        OrbitEllipse::new(
            ellipse.semi_major(),
            ellipse.semi_minor(),
            rotation - phi_deg,
        ),
        axis_offset / ellipse.semi_major(),
    );

    let (cos_phi, sin_phi) = (cos_deg(phi_deg), sin_deg(phi_deg));
    let reach = ellipse.semi_major().abs().max(ellipse.semi_minor().abs());
    let tolerance = 1e-6 * reach;
    let step = 360.0 / samples.max(1) as f64;
    let mut worst = 0.0_f64;
    let mut worst_ls = 0.0;
    for i in 0..samples {
        let ls = i as f64 * step;
        let direct = sun.position_at(ls);
        let turned = conjugate.position_at((ls + phi_deg).rem_euclid(360.0));
        let expected = Point::new(
            turned.x * cos_phi - turned.y * sin_phi,
            turned.x * sin_phi + turned.y * cos_phi,
        );
        let deviation = direct.distance_to(expected);
        if !deviation.is_finite() {
            return MetamorphicResult::fail(
                "rotation-conjugation",
                f64::INFINITY,
                tolerance,
                &format!("non-finite position at ls={ls}"),
            );
        }
        if deviation > worst {
            worst = deviation;
            worst_ls = ls;
        }
    }
    MetamorphicResult::from_worst("rotation-conjugation", worst, worst_ls, tolerance)
}

/// Relation 5: vertical and horizontal chord roots land on the
/// boundary.
#[must_use]
pub fn check_chord_consistency(ellipse: &OrbitEllipse, samples: usize) -> MetamorphicResult {
    let reach = ellipse.semi_major().abs().max(ellipse.semi_minor().abs());
    let mut worst = 0.0_f64;
    let mut worst_at = 0.0;
    for i in 0..samples {
        // Sweep strictly inside the ellipse so every chord exists.
        let offset = reach * (i as f64 / samples.max(1) as f64 - 0.5) * 0.9;
        let roots = ellipse
            .chord_y(offset)
            .map(|y| Point::new(offset, y))
            .into_iter()
            .chain(ellipse.chord_x(offset).map(|x| Point::new(x, offset)));
        for root in roots {
            let deviation = ellipse.residual(root).abs();
            if !deviation.is_finite() {
                return MetamorphicResult::fail(
                    "chord-consistency",
                    f64::INFINITY,
                    DEFAULT_TOLERANCE,
                    &format!("chord at offset {offset} missed the ellipse"),
                );
            }
            if deviation > worst {
                worst = deviation;
                worst_at = offset;
            }
        }
    }
    MetamorphicResult::from_worst("chord-consistency", worst, worst_at, DEFAULT_TOLERANCE)
}

/// Relation 6: a coverage band's outline ends where its inner edge
/// starts.
#[must_use]
pub fn check_band_closure(sun: &SunAnchor, start_ls: f64, end_ls: f64) -> MetamorphicResult {
    let thickness = 30.0;
    let band = sun.coverage_band(start_ls, end_ls, thickness, None);
    let expected = sun
        .position_at(start_ls)
        .offset_by(sunward_direction(start_ls), thickness);
    let deviation = match band.path.last_endpoint() {
        Some(last) => last.distance_to(expected),
        None => f64::INFINITY,
    };
    MetamorphicResult::from_worst("band-closure", deviation, start_ls, DEFAULT_TOLERANCE)
}

/// Run every relation that applies to the given anchor.
#[must_use]
pub fn verify_anchor(sun: &SunAnchor, samples: usize) -> Vec<MetamorphicResult> {
    vec![
        check_on_orbit(sun, samples),
        check_chord_consistency(&sun.ellipse(), samples),
        check_rotation_conjugation(sun, 33.0, samples),
        check_band_closure(sun, 20.0, 110.0),
        check_band_closure(sun, 300.0, 160.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_orbit_passes_for_titan_shape() {
        let sun = SunAnchor::new(OrbitEllipse::new(200.0, 193.9, 10.1), 0.0558);
        let result = check_on_orbit(&sun, 720);
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_on_orbit_fails_for_outside_sun() {
        let sun = SunAnchor::new(OrbitEllipse::circle(100.0), 2.0);
        let result = check_on_orbit(&sun, 36);
        assert!(!result.passed);
        assert!(result.details.contains("non-finite"));
    }

    #[test]
    fn test_circle_reduction_passes() {
        let result = check_circle_reduction(150.0, 720);
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_mirror_symmetry_passes() {
        let result = check_mirror_symmetry(200.0, 160.0, 0.1, 180);
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_rotation_conjugation_passes() {
        let sun = SunAnchor::new(OrbitEllipse::new(200.0, 199.7, -10.1), 0.0558);
        for phi in [15.0, 90.0, 123.4, 270.0] {
            let result = check_rotation_conjugation(&sun, phi, 360);
            assert!(result.passed, "phi={phi}: {}", result.details);
        }
    }

    #[test]
    fn test_rotation_conjugation_handles_vertical_axis() {
        // rotation = 90 puts the sun on the y axis; the axis-offset
        // recovery must not divide by cos(rotation).
        let sun = SunAnchor::new(OrbitEllipse::new(180.0, 90.0, 90.0), 0.4);
        let result = check_rotation_conjugation(&sun, 40.0, 240);
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_chord_consistency_passes_rotated() {
        let ellipse = OrbitEllipse::new(200.0, 120.0, 33.0);
        let result = check_chord_consistency(&ellipse, 50);
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_band_closure_passes_across_wrap() {
        let sun = SunAnchor::new(OrbitEllipse::new(200.0, 193.9, 10.1), 0.0558);
        let result = check_band_closure(&sun, 350.0, 40.0);
        assert!(result.passed, "{}", result.details);
    }

    #[test]
    fn test_verify_anchor_all_pass() {
        let sun = SunAnchor::new(OrbitEllipse::new(200.0, 180.0, 15.0), 0.05);
        let results = verify_anchor(&sun, 360);
        assert_eq!(results.len(), 5);
        for result in results {
            assert!(result.passed, "{}: {}", result.relation, result.details);
        }
    }

    #[test]
    fn test_result_constructors() {
        let pass = MetamorphicResult::pass("on-orbit", 1e-12, 1e-9);
        assert!(pass.passed && pass.details.is_empty());
        let fail = MetamorphicResult::fail("on-orbit", 0.5, 1e-9, "worst at ls=90");
        assert!(!fail.passed);
        assert!(fail.details.contains("ls=90"));
    }
}
