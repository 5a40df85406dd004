//! Geometry property tests.
//!
//! Exact coordinates are only known for a handful of positions, so
//! most tests here falsify metamorphic relations instead: each states
//! a relation that must hold across a whole family of inputs and hunts
//! for a counterexample. The same relations back the CLI's verify
//! command.

use chrono::NaiveDate;
use orrery::geometry::metamorphic::{
    check_band_closure, check_chord_consistency, check_circle_reduction, check_mirror_symmetry,
    check_on_orbit, check_rotation_conjugation, verify_anchor,
};
use orrery::geometry::{OrbitEllipse, Point, SunAnchor};
use orrery::prelude::*;
use orrery::seasons::SeasonSpan;

fn date(text: &str) -> NaiveDate {
    text.parse()
        .unwrap_or_else(|_| panic!("bad test date {text}"))
}

/// Every sampled orbit position satisfies the ellipse equation, for a
/// family spanning circles, flattened and rotated ellipses, sun
/// offsets from zero to well off center.
///
/// Hypothesis to falsify: some shape/eccentricity pair puts a position
/// off the orbit.
#[test]
fn positions_stay_on_orbit_across_shapes() {
    let shapes = [
        (200.0, 200.0, 0.0, 0.0),
        (200.0, 199.7, -10.1, 0.0558),
        (200.0, 120.0, 45.0, 0.3),
        (150.0, 80.0, -77.0, 0.6),
        (300.0, 299.0, 180.0, 0.01),
    ];
    for (a, b, rotation, eccentricity) in shapes {
        let sun = SunAnchor::new(OrbitEllipse::new(a, b, rotation), eccentricity);
        let result = check_on_orbit(&sun, 720);
        assert!(
            result.passed,
            "on-orbit failed for a={a} b={b} rot={rotation} e={eccentricity}: error {:.3e}, {}",
            result.error, result.details
        );
    }
}

/// On a centered circle the quadratic machinery must collapse to the
/// closed parametric form `(-R sin ls, -R cos ls)`.
///
/// Hypothesis to falsify: the general solver disagrees with the
/// closed form somewhere on the circle.
#[test]
fn centered_circle_collapses_to_parametric_form() {
    for radius in [42.0, 150.0, 200.0] {
        let result = check_circle_reduction(radius, 1080);
        assert!(
            result.passed,
            "circle reduction failed at R={radius}: {}",
            result.details
        );
    }
}

/// With an axis-aligned ellipse the sun sits on the x axis, so the
/// diagram is symmetric across it: Ls maps to `180 - ls`.
///
/// Hypothesis to falsify: mirrored longitudes land off the mirrored
/// position.
#[test]
fn axis_aligned_sun_mirrors_across_horizontal() {
    let families = [
        (200.0, 160.0, 0.1),
        (200.0, 199.7, 0.0558),
        (180.0, 90.0, 0.45),
    ];
    for (a, b, eccentricity) in families {
        let result = check_mirror_symmetry(a, b, eccentricity, 240);
        assert!(
            result.passed,
            "mirror symmetry failed for a={a} b={b} e={eccentricity}: {}",
            result.details
        );
    }
}

/// Chord roots must land back on the ellipse boundary, whatever the
/// rotation.
///
/// Hypothesis to falsify: a vertical or horizontal chord produces a
/// root with a nonzero ellipse residual.
#[test]
fn chord_roots_land_on_boundary() {
    for rotation in [0.0, 15.0, 33.0, 60.0, 90.0] {
        let ellipse = OrbitEllipse::new(200.0, 120.0, rotation);
        let result = check_chord_consistency(&ellipse, 100);
        assert!(
            result.passed,
            "chord consistency failed at rotation {rotation}: {}",
            result.details
        );
    }
}

/// A coverage band's outline must end exactly where its inner edge
/// starts, including bands that wrap through Ls 0.
///
/// Hypothesis to falsify: the outline's last endpoint drifts from the
/// inset start position.
#[test]
fn coverage_bands_close_at_inner_start() {
    let sun = SunAnchor::new(OrbitEllipse::new(200.0, 199.7, -10.1), 0.0558);
    let spans = [
        (0.0, 90.0),
        (20.0, 110.0),
        (180.0, 180.5),
        (300.0, 160.0),
        (350.0, 40.0),
    ];
    for (start, end) in spans {
        let result = check_band_closure(&sun, start, end);
        assert!(
            result.passed,
            "band [{start}, {end}] did not close: error {:.3e}",
            result.error
        );
    }
}

/// The full verification sweep passes for the preset orbit shape.
///
/// Hypothesis to falsify: any of the bundled relations fails on the
/// shape the default diagram uses.
#[test]
fn verify_anchor_passes_for_preset_shape() {
    let sun = SunAnchor::new(OrbitEllipse::new(200.0, 199.7, -10.1), 0.0558);
    let results = verify_anchor(&sun, 360);
    assert_eq!(results.len(), 5);
    let failures: Vec<String> = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| format!("{}: error {:.2e} > tolerance {:.2e}", r.relation, r.error, r.tolerance))
        .collect();
    assert!(failures.is_empty(), "relations failed:\n  {}", failures.join("\n  "));
}

/// Spinning the ellipse by `-phi` while advancing Ls by `phi`, then
/// turning the answer forward by `phi`, reproduces the original
/// position. The sun anchor and the Ls ray both ride the ellipse
/// frame, so the solver must commute with rigid rotation.
///
/// Hypothesis to falsify: the quadratic branch rule breaks the
/// conjugation for some shape or rotation offset.
#[test]
fn solver_commutes_with_rigid_rotation() {
    let shapes = [
        (200.0, 199.7, -10.1, 0.0558),
        (200.0, 120.0, 45.0, 0.3),
        (150.0, 80.0, -77.0, 0.6),
        (300.0, 299.0, 180.0, 0.01),
    ];
    for (semi_major, semi_minor, rotation, eccentricity) in shapes {
        let sun = SunAnchor::new(
            OrbitEllipse::new(semi_major, semi_minor, rotation),
            eccentricity,
        );
        for phi in [15.0, 90.0, 123.4, 270.0] {
            let result = check_rotation_conjugation(&sun, phi, 720);
            assert!(
                result.passed,
                "shape ({semi_major}, {semi_minor}, {rotation}, {eccentricity}) phi={phi}: \
                 error {:.2e} > tolerance {:.2e} {}",
                result.error, result.tolerance, result.details
            );
        }
    }
}

/// Walking the orbit in half-degree steps never jumps: the branch
/// switch at Ls 180 and the wrap at 360 are seamless.
///
/// Hypothesis to falsify: successive positions are ever farther apart
/// than a few arc steps.
#[test]
fn orbit_walk_is_continuous() {
    let sun = SunAnchor::new(OrbitEllipse::new(200.0, 199.7, -10.1), 0.0558);
    let mut previous = sun.position_at(0.0);
    let mut largest = 0.0_f64;
    for i in 1..=720 {
        let ls = f64::from(i) * 0.5;
        let current = sun.position_at(ls);
        assert!(current.is_finite(), "non-finite position at ls={ls}");
        largest = largest.max(current.distance_to(previous));
        previous = current;
    }
    // A half-degree of a 200-unit orbit is under 2 units of arc.
    assert!(largest < 4.0, "largest step {largest:.3} exceeds 4 units");
    let wrapped = sun.position_at(360.0);
    assert!(
        wrapped.distance_to(sun.position_at(0.0)) < 1e-6,
        "orbit does not close at ls=360"
    );
}

/// For a near-circular orbit the sun distance sweeps from `a(1 - e)`
/// to `a(1 + e)`, the perihelion and aphelion distances of the
/// schematic.
///
/// Hypothesis to falsify: the sampled distance range misses the
/// expected extremes.
#[test]
fn sun_distance_spans_apsis_range() {
    let shapes = [(200.0, 199.7, -10.1, 0.0558), (300.0, 299.0, 25.0, 0.09)];
    for (a, b, rotation, eccentricity) in shapes {
        let sun = SunAnchor::new(OrbitEllipse::new(a, b, rotation), eccentricity);
        let mut nearest = f64::INFINITY;
        let mut farthest = 0.0_f64;
        for i in 0..1440 {
            let ls = 360.0 * f64::from(i) / 1440.0;
            let distance = sun.position_at(ls).distance_to(sun.position());
            nearest = nearest.min(distance);
            farthest = farthest.max(distance);
        }
        let perihelion = a * (1.0 - eccentricity);
        let aphelion = a * (1.0 + eccentricity);
        assert!(
            (nearest - perihelion).abs() < 0.05,
            "nearest {nearest:.4} vs a(1-e)={perihelion:.4} for a={a} b={b}"
        );
        assert!(
            (farthest - aphelion).abs() < 0.05,
            "farthest {farthest:.4} vs a(1+e)={aphelion:.4} for a={a} b={b}"
        );
    }
}

/// The season chords and the cardinal positions are two routes to the
/// same four points.
///
/// Hypothesis to falsify: chord endpoints disagree with
/// `position_at` at Ls 0, 90, 180, 270.
#[test]
fn season_chords_match_cardinal_positions() {
    let sun = SunAnchor::new(OrbitEllipse::new(180.0, 120.0, 33.0), 0.2);
    let (south, north) = sun.equinox_chord();
    assert!(north.distance_to(sun.position_at(0.0)) < 1e-9, "north disagrees");
    assert!(south.distance_to(sun.position_at(180.0)) < 1e-9, "south disagrees");
    let (east, west) = sun.solstice_chord();
    assert!(west.distance_to(sun.position_at(90.0)) < 1e-7, "west disagrees");
    assert!(east.distance_to(sun.position_at(270.0)) < 1e-7, "east disagrees");
}

/// A sun placed outside the orbit degrades to NaN everywhere instead
/// of panicking, and the verification sweep reports it as a failure.
///
/// Hypothesis to falsify: degenerate anchors crash or pass.
#[test]
fn outside_sun_degrades_to_nan() {
    let sun = SunAnchor::new(OrbitEllipse::circle(100.0), 2.0);
    for ls in [0.0, 45.0, 180.0, 300.0] {
        assert!(
            !sun.position_at(ls).is_finite(),
            "expected NaN position at ls={ls}"
        );
    }
    let result = check_on_orbit(&sun, 36);
    assert!(!result.passed, "on-orbit must fail for an outside sun");
    assert!(result.details.contains("non-finite"), "got: {}", result.details);
}

/// Converting a longitude to a date and back lands on the same
/// longitude, across the whole circle and consecutive orbits.
///
/// Hypothesis to falsify: day rounding or the Newton solve drifts by
/// more than a twentieth of a degree.
#[test]
fn calendar_round_trips_on_ls_grid() {
    let calendar = SeasonCalendar::titan();
    for orbit in 0..2 {
        for step in 0..24 {
            let ls = f64::from(step) * 15.0;
            let on_date = calendar
                .date_of_ls(ls, orbit)
                .unwrap_or_else(|e| panic!("date_of_ls({ls}, {orbit}): {e}"));
            let back = calendar
                .ls_of_date(on_date)
                .unwrap_or_else(|e| panic!("ls_of_date({on_date}): {e}"));
            let difference = (back - ls).abs();
            let wrapped = difference.min(360.0 - difference);
            assert!(
                wrapped < 0.05,
                "round trip at ls={ls} orbit={orbit} came back as {back:.4}"
            );
        }
    }
}

/// Season boundaries of orbit zero pin the fit: the epoch opens
/// northern spring, and the next orbit starts exactly one period
/// later.
///
/// Hypothesis to falsify: boundary dates drift from the fitted
/// equinox and solstice crossings.
#[test]
fn season_boundaries_pin_the_fit() {
    let calendar = SeasonCalendar::titan();
    let spans = calendar.season_spans(0).expect("orbit zero spans");
    assert_eq!(spans.len(), 4);
    assert_eq!(spans[0].season, Season::NorthernSpring);
    assert_eq!(spans[0].start, date("1980-02-22"));
    assert_eq!(spans[0].end, date("1987-11-25"));
    assert_eq!(spans[1].end, date("1995-11-07"));
    assert_eq!(spans[2].end, date("2002-10-23"));
    assert_eq!(spans[3].end, date("2009-07-30"));
    let total: i64 = spans.iter().map(SeasonSpan::length_days).sum();
    assert_eq!(total, 10_751, "seasons must tile one full orbit");
    for window in spans.windows(2) {
        assert_eq!(window[0].end, window[1].start, "spans must be contiguous");
    }
}

/// The recorded apsis passages sit where the fit says they should:
/// perihelia near Ls 280, aphelia near Ls 100, half an orbit apart.
///
/// Hypothesis to falsify: apsis dates resolve to longitudes far from
/// the fitted perihelion direction.
#[test]
fn apsis_dates_align_with_fit() {
    let calendar = SeasonCalendar::titan();
    for event in &calendar.perihelia {
        let ls = calendar
            .ls_of_date(event.date)
            .unwrap_or_else(|e| panic!("perihelion {}: {e}", event.date));
        assert!(
            (277.0..=282.0).contains(&ls),
            "perihelion {} resolved to ls={ls:.2}",
            event.date
        );
    }
    for event in &calendar.aphelia {
        let ls = calendar
            .ls_of_date(event.date)
            .unwrap_or_else(|e| panic!("aphelion {}: {e}", event.date));
        assert!(
            (97.0..=102.0).contains(&ls),
            "aphelion {} resolved to ls={ls:.2}",
            event.date
        );
    }
    assert!(
        calendar.perihelia[0].radius_au < calendar.aphelia[0].radius_au,
        "perihelion must be closer than aphelion"
    );
}

/// Tick marks in a group share the orbit boundary: the on-orbit end
/// of every tick has a zero ellipse residual, inward and outward
/// alike.
///
/// Hypothesis to falsify: tick anchoring drifts off the orbit for
/// some longitude or length sign.
#[test]
fn ticks_anchor_on_the_orbit() {
    let ellipse = OrbitEllipse::new(200.0, 199.7, -10.1);
    let sun = SunAnchor::new(ellipse, 0.0558);
    for step in 0..36 {
        let ls = f64::from(step) * 10.0;
        for length in [5.0, -10.0] {
            let tick = sun.tick_at(ls, length, None);
            assert!(
                ellipse.residual(tick.start).abs() < 1e-9,
                "tick start off orbit at ls={ls} length={length}"
            );
            let span = tick.start.distance_to(tick.end);
            assert!(
                (span - length.abs()).abs() < 1e-9,
                "tick at ls={ls} has length {span}, wanted {}",
                length.abs()
            );
        }
    }
}

/// The sun anchor itself sits on the rotated major axis at the
/// eccentric offset.
///
/// Hypothesis to falsify: rotation moves the sun off the axis line.
#[test]
fn sun_sits_on_rotated_major_axis() {
    for rotation in [0.0, -10.1, 45.0, 120.0] {
        let sun = SunAnchor::new(OrbitEllipse::new(200.0, 150.0, rotation), 0.25);
        let expected = Point::new(
            50.0 * rotation.to_radians().cos(),
            50.0 * rotation.to_radians().sin(),
        );
        assert!(
            sun.position().distance_to(expected) < 1e-9,
            "sun at {:?} for rotation {rotation}, wanted {expected:?}",
            sun.position()
        );
    }
}
