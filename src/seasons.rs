//! The season calendar: converting between civil dates and solar
//! longitude.
//!
//! Ls does not advance uniformly in time on an eccentric orbit. The
//! calendar models the deviation with a one-term sine fit
//!
//! ```text
//! 360 * (date - epoch) / orbit = Ls + A sin(2 pi (Ls - C) / 360) + B
//! ```
//!
//! where the epoch is a northern vernal equinox. Date-to-Ls inverts
//! the relation with Newton's method; the derivative term
//! `1 + A (pi/180) cos(...)` stays close to one for any sane
//! amplitude, so the iteration converges in a handful of steps.
//!
//! [`SeasonCalendar::titan`] carries the fitted Titan/Saturn constants
//! (10751-day orbit, epoch 1980-02-22) together with reference season
//! distances and apsis dates for the info listing.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::{OrreryError, OrreryResult};

/// Newton convergence threshold, degrees.
const NEWTON_EPSILON: f64 = 1e-7;

/// Newton iteration cap.
const MAX_NEWTON_ITERATIONS: u32 = 25;

/// For dates whose validity is fixed at compile time.
#[allow(clippy::unwrap_used)]
pub(crate) fn preset_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A northern-hemisphere season quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    /// Ls 0 to 90.
    NorthernSpring,
    /// Ls 90 to 180.
    NorthernSummer,
    /// Ls 180 to 270.
    NorthernAutumn,
    /// Ls 270 to 360.
    NorthernWinter,
}

impl Season {
    const ALL: [Self; 4] = [
        Self::NorthernSpring,
        Self::NorthernSummer,
        Self::NorthernAutumn,
        Self::NorthernWinter,
    ];

    /// The season containing a solar longitude.
    #[must_use]
    pub fn of_ls(ls: f64) -> Self {
        let quarter = (ls.rem_euclid(360.0) / 90.0) as usize;
        Self::ALL[quarter.min(3)]
    }

    /// Solar longitude at which the season begins.
    #[must_use]
    pub fn start_ls(&self) -> f64 {
        match self {
            Self::NorthernSpring => 0.0,
            Self::NorthernSummer => 90.0,
            Self::NorthernAutumn => 180.0,
            Self::NorthernWinter => 270.0,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NorthernSpring => "northern spring",
            Self::NorthernSummer => "northern summer",
            Self::NorthernAutumn => "northern autumn",
            Self::NorthernWinter => "northern winter",
        };
        f.pad(name)
    }
}

/// A perihelion or aphelion passage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApsisEvent {
    /// Date of the passage.
    pub date: NaiveDate,
    /// Sun distance at the passage, astronomical units.
    pub radius_au: f64,
}

/// One season of one orbit, with boundary dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonSpan {
    /// The season.
    pub season: Season,
    /// Date the season begins.
    pub start: NaiveDate,
    /// Date the season ends.
    pub end: NaiveDate,
    /// Sun distance at the season start, astronomical units.
    pub radius_au: f64,
}

impl SeasonSpan {
    /// Season length in Earth days.
    #[must_use]
    pub fn length_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Fitted Ls/date relation for one moon or planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    /// Body name.
    pub name: String,
    /// Northern vernal equinox anchoring orbit zero.
    pub epoch: NaiveDate,
    /// Orbit period, Earth days.
    pub orbit_days: f64,
    /// Sine-fit amplitude (A), degrees.
    pub amplitude_deg: f64,
    /// Sine-fit offset (B), degrees.
    pub offset_deg: f64,
    /// Sine-fit phase (C), degrees.
    pub phase_deg: f64,
    /// Axial tilt, degrees.
    pub obliquity_deg: f64,
    /// Length of the body's own day, Earth days.
    pub local_day_earth_days: f64,
    /// Sun distances at Ls 0, 90, 180, 270, astronomical units.
    pub season_radii_au: [f64; 4],
    /// Minimum-distance passages inside the fitted range.
    pub perihelia: Vec<ApsisEvent>,
    /// Maximum-distance passages inside the fitted range.
    pub aphelia: Vec<ApsisEvent>,
}

impl SeasonCalendar {
    /// The Titan calendar, fitted against NAIF kernel positions over
    /// 1980 to 2032.
    #[must_use]
    pub fn titan() -> Self {
        Self {
            name: "Titan".to_string(),
            epoch: preset_date(1980, 2, 22),
            orbit_days: 10_751.0,
            amplitude_deg: 6.166_483_080_551_235_4,
            offset_deg: 6.048_274_579_098_606_6,
            phase_deg: 101.035_354_162_928_33,
            obliquity_deg: 26.730_882_944_988_142,
            local_day_earth_days: 15.945,
            season_radii_au: [
                9.443_302_157_356_69,  // vernal equinox
                10.030_529_604_959_204, // summer solstice
                9.587_968_538_637_037, // autumnal equinox
                9.031_185_737_728_954, // winter solstice
            ],
            perihelia: vec![
                ApsisEvent {
                    date: preset_date(2003, 7, 21),
                    radius_au: 9.007_742_846_333_1,
                },
                ApsisEvent {
                    date: preset_date(2032, 11, 21),
                    radius_au: 9.007_742_846_333_1,
                },
            ],
            aphelia: vec![
                ApsisEvent {
                    date: preset_date(1988, 8, 31),
                    radius_au: 10.072_872_316_656,
                },
                ApsisEvent {
                    date: preset_date(2018, 4, 7),
                    radius_au: 10.072_872_316_656,
                },
            ],
        }
    }

    /// Orbit period in the body's own days.
    #[must_use]
    pub fn orbit_local_days(&self) -> f64 {
        self.orbit_days / self.local_day_earth_days
    }

    fn fit_correction(&self, ls: f64) -> f64 {
        self.amplitude_deg * (ls - self.phase_deg).to_radians().sin()
    }

    /// Solar longitude at a date, degrees in `[0, 360)`.
    ///
    /// # Errors
    ///
    /// [`OrreryError::Convergence`] if the Newton iteration fails to
    /// settle, which requires a fit amplitude far outside anything the
    /// one-term model is meant for.
    pub fn ls_of_date(&self, date: NaiveDate) -> OrreryResult<f64> {
        let days = (date - self.epoch).num_days() as f64;
        let target = (360.0 * days / self.orbit_days - self.offset_deg).rem_euclid(360.0);

        let mut ls = target;
        let mut step = f64::INFINITY;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let residual = ls - target + self.fit_correction(ls);
            let derivative = 1.0
                + self.amplitude_deg
                    * (ls - self.phase_deg).to_radians().cos()
                    * std::f64::consts::PI
                    / 180.0;
            step = -residual / derivative;
            ls += step;
            if step.abs() < NEWTON_EPSILON {
                return Ok(ls.rem_euclid(360.0));
            }
        }
        Err(OrreryError::Convergence {
            iterations: MAX_NEWTON_ITERATIONS,
            residual: step.abs(),
        })
    }

    /// Date at a solar longitude, `orbit_number` orbits past the
    /// epoch. Rounded to the nearest day.
    ///
    /// # Errors
    ///
    /// [`OrreryError::NonFinite`] for a non-finite `ls`, or
    /// [`OrreryError::InvalidDate`] when the result overflows the
    /// calendar.
    pub fn date_of_ls(&self, ls: f64, orbit_number: i32) -> OrreryResult<NaiveDate> {
        let days = (self.orbit_days / 360.0
            * (ls + self.fit_correction(ls) + self.offset_deg + 360.0 * f64::from(orbit_number)))
        .round();
        if !days.is_finite() {
            return Err(OrreryError::non_finite("solar longitude"));
        }
        let delta = TimeDelta::try_days(days as i64)
            .ok_or_else(|| OrreryError::invalid_date(format!("{days} days past the epoch")))?;
        self.epoch.checked_add_signed(delta).ok_or_else(|| {
            OrreryError::invalid_date(format!(
                "ls {ls} in orbit {orbit_number} leaves the representable range"
            ))
        })
    }

    /// Season boundary dates and reference distances for one orbit.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::date_of_ls`] failures.
    pub fn season_spans(&self, orbit_number: i32) -> OrreryResult<Vec<SeasonSpan>> {
        let mut boundaries = Vec::with_capacity(5);
        for quarter in 0..4 {
            boundaries.push(self.date_of_ls(f64::from(quarter) * 90.0, orbit_number)?);
        }
        boundaries.push(self.date_of_ls(0.0, orbit_number + 1)?);

        Ok(Season::ALL
            .iter()
            .enumerate()
            .map(|(i, season)| SeasonSpan {
                season: *season,
                start: boundaries[i],
                end: boundaries[i + 1],
                radius_au: self.season_radii_au[i],
            })
            .collect())
    }
}
