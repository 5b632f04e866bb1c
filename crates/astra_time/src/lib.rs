//! Civil time handling for chart computation.
//!
//! This crate provides:
//! - Civil date/time value types with birth-certificate-level validation
//! - Timezone resolution (IANA names and fixed offsets, DST-aware at the
//!   birth instant)
//! - Julian Day ↔ calendar conversions and the `JulianDay` instant type
//! - ΔT (UT → TT) and sidereal-time/obliquity polynomials

pub mod civil;
pub mod delta_t;
pub mod error;
pub mod julian;
pub mod sidereal;
pub mod zone;

pub use civil::{CivilDate, CivilTime, MAX_YEAR, MIN_YEAR, days_in_month, is_leap_year};
pub use delta_t::delta_t_seconds;
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, centuries_since_j2000, decimal_year,
    jd_to_calendar,
};
pub use sidereal::{
    earth_rotation_angle_rad, gmst_rad, local_sidereal_time_rad, mean_obliquity_rad,
};
pub use zone::{TimeWarning, TimezoneSpec, utc_offset_seconds};

/// A Universal Time instant as a Julian Date.
///
/// The output of birth-instant normalization and the input to every
/// downstream computation. Immutable once computed; copies are cheap.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct JulianDay(f64);

impl JulianDay {
    /// The J2000.0 reference epoch.
    pub const J2000: JulianDay = JulianDay(J2000_JD);

    /// Wrap a Julian Date already expressed in UT.
    pub fn from_ut(jd: f64) -> Self {
        Self(jd)
    }

    /// Build from a civil date/time read as UTC.
    pub fn from_civil_utc(date: CivilDate, time: CivilTime) -> Self {
        Self(calendar_to_jd(
            date.year,
            date.month,
            date.day as f64 + time.day_fraction(),
        ))
    }

    /// The raw Julian Date (UT).
    pub fn ut(&self) -> f64 {
        self.0
    }

    /// Julian Date on the TT scale, with ΔT applied. Ephemeris series are
    /// evaluated on this scale.
    pub fn tt(&self) -> f64 {
        self.0 + delta_t_seconds(decimal_year(self.0)) / SECONDS_PER_DAY
    }

    /// Julian centuries (UT) since J2000.0.
    pub fn centuries_ut(&self) -> f64 {
        centuries_since_j2000(self.0)
    }

    /// This instant rounded to the nearest whole second.
    ///
    /// Ephemeris results are stable at this resolution, so the rounded
    /// value doubles as a memoization key.
    pub fn rounded_to_second(&self) -> Self {
        Self((self.0 * SECONDS_PER_DAY).round() / SECONDS_PER_DAY)
    }

    /// The UTC calendar reading of this instant.
    pub fn to_civil_utc(&self) -> (CivilDate, CivilTime) {
        let (year, month, day_frac) = jd_to_calendar(self.0);
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * SECONDS_PER_DAY;
        let hour = (total_seconds / 3_600.0).floor() as u32;
        let minute = ((total_seconds % 3_600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        (
            CivilDate::new(year, month, day),
            CivilTime::new(hour, minute, second),
        )
    }
}

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {:.6} UT", self.0)
    }
}

/// Normalize a birth wall-clock reading to a UT instant.
///
/// `time == None` means the birth time is unknown: local noon is assumed
/// and [`TimeWarning::NoonAssumed`] is attached. Zone degradations surface
/// as warnings; only structurally invalid input is an error.
pub fn resolve_jd_ut(
    date: CivilDate,
    time: Option<CivilTime>,
    zone: &TimezoneSpec,
) -> Result<(JulianDay, Vec<TimeWarning>), TimeError> {
    date.validate()?;
    if let Some(t) = &time {
        t.validate()?;
    }

    let mut warnings = Vec::new();
    let wall = match time {
        Some(t) => t,
        None => {
            warnings.push(TimeWarning::NoonAssumed);
            CivilTime::NOON
        }
    };

    let offset = utc_offset_seconds(date, wall, zone, &mut warnings)?;
    let local_as_jd = JulianDay::from_civil_utc(date, wall);
    let jd = JulianDay::from_ut(local_as_jd.ut() - offset / SECONDS_PER_DAY);
    Ok((jd, warnings))
}
