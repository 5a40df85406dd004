//! Degree-argument trigonometry and solar-longitude arithmetic.
//!
//! Solar longitude (Ls) is measured in degrees from the vernal equinox
//! of the northern hemisphere; every public interface in this crate
//! takes degrees, so the radian conversions stay confined to this
//! module.

/// Sine of an angle given in degrees.
#[must_use]
pub fn sin_deg(angle: f64) -> f64 {
    angle.to_radians().sin()
}

/// Cosine of an angle given in degrees.
#[must_use]
pub fn cos_deg(angle: f64) -> f64 {
    angle.to_radians().cos()
}

/// Normalize an angle to `[0, 360)`.
#[must_use]
pub fn normalize_ls(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Arc length in degrees from `start_ls` to `end_ls`, walking in the
/// direction of increasing Ls.
///
/// The result lies in `(0, 360]`: coincident endpoints mean a full
/// orbit, not an empty arc.
#[must_use]
pub fn arc_span(start_ls: f64, end_ls: f64) -> f64 {
    let span = (end_ls - start_ls).rem_euclid(360.0);
    if span == 0.0 {
        360.0
    } else {
        span
    }
}
