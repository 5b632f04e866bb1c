//! Error and warning types for chart computation.
//!
//! Errors are reserved for structurally invalid input or a fully
//! exhausted ephemeris; everything else degrades to a warning carried on
//! the chart itself.

use std::error::Error;
use std::fmt::{Display, Formatter};

use astra_ephem::EphemError;
use astra_time::{TimeError, TimeWarning};

/// Errors from natal chart computation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// Error from date/time validation or conversion.
    Time(TimeError),
    /// Error from the ephemeris provider.
    Ephemeris(EphemError),
    /// Latitude or longitude outside its valid range.
    InvalidCoordinate { field: &'static str, value: f64 },
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
            Self::InvalidCoordinate { field, value } => {
                write!(f, "invalid coordinate: {field} = {value}")
            }
        }
    }
}

impl Error for ChartError {}

impl From<TimeError> for ChartError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<EphemError> for ChartError {
    fn from(e: EphemError) -> Self {
        Self::Ephemeris(e)
    }
}

/// Non-fatal conditions accumulated on the chart.
///
/// A warning never blocks the computation; it marks where a default or
/// substitution was applied so downstream consumers can qualify their
/// output.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartWarning {
    /// The timezone name could not be resolved; UTC was used.
    TimezoneUnresolved { name: String },
    /// The birth wall-clock time occurred twice (clocks rolled back);
    /// the first occurrence was used.
    AmbiguousBirthTime,
    /// The birth wall-clock time was skipped (clocks sprang forward);
    /// the pre-transition offset was used.
    NonexistentBirthTime,
    /// No birth time was given; local noon was assumed. House-dependent
    /// output is low-confidence.
    TimeUnknown,
    /// Latitude beyond the Placidus limit; Whole-Sign was substituted.
    PolarLatitude { latitude_deg: f64 },
    /// The Placidus iteration failed to settle; Whole-Sign was
    /// substituted.
    NoConvergence,
    /// Positions came from the approximate fallback backend.
    ApproximateEphemeris,
}

impl ChartWarning {
    /// Lift a time-layer warning into its chart-level image.
    pub fn from_time_warning(w: TimeWarning) -> ChartWarning {
        match w {
            TimeWarning::ZoneUnresolved { name } => ChartWarning::TimezoneUnresolved { name },
            TimeWarning::AmbiguousLocalTime => ChartWarning::AmbiguousBirthTime,
            TimeWarning::NonexistentLocalTime => ChartWarning::NonexistentBirthTime,
            TimeWarning::NoonAssumed => ChartWarning::TimeUnknown,
            // `TimeWarning` is `#[non_exhaustive]`, so a wildcard is required
            // here even though every variant is mapped above.
            _ => unreachable!("unmapped TimeWarning variant"),
        }
    }
}

impl Display for ChartWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimezoneUnresolved { name } => {
                write!(f, "timezone {name:?} not recognized, used UTC")
            }
            Self::AmbiguousBirthTime => {
                write!(f, "birth time occurred twice, used the first occurrence")
            }
            Self::NonexistentBirthTime => {
                write!(f, "birth time fell in a DST gap, used the pre-transition offset")
            }
            Self::TimeUnknown => write!(f, "birth time unknown, assumed local noon"),
            Self::PolarLatitude { latitude_deg } => {
                write!(
                    f,
                    "latitude {latitude_deg}° too polar for Placidus, used Whole-Sign"
                )
            }
            Self::NoConvergence => {
                write!(f, "Placidus cusps did not converge, used Whole-Sign")
            }
            Self::ApproximateEphemeris => {
                write!(f, "positions from the approximate ephemeris backend")
            }
        }
    }
}
