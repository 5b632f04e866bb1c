//! Error type for civil time validation and timezone resolution.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from birth date/time validation or offset resolution.
///
/// Unresolvable zone *names* are deliberately absent: they degrade to UTC
/// with a [`crate::TimeWarning`] instead of failing the request.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Year outside the supported 1800–2200 range.
    YearOutOfRange { year: i32 },
    /// Month outside 1–12.
    InvalidMonth { month: u32 },
    /// Day invalid for the given year/month (leap years accounted for).
    InvalidDay { year: i32, month: u32, day: u32 },
    /// Hour, minute, or second outside its range.
    InvalidTime { hour: u32, minute: u32, second: f64 },
    /// Fixed UTC offset outside -14..=+14 hours, or not finite.
    OffsetOutOfRange { hours: f64 },
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearOutOfRange { year } => {
                write!(f, "year {year} outside supported range 1800..=2200")
            }
            Self::InvalidMonth { month } => write!(f, "invalid month {month}"),
            Self::InvalidDay { year, month, day } => {
                write!(f, "invalid day {day} for {year}-{month:02}")
            }
            Self::InvalidTime {
                hour,
                minute,
                second,
            } => write!(f, "invalid time {hour:02}:{minute:02}:{second}"),
            Self::OffsetOutOfRange { hours } => {
                write!(f, "UTC offset {hours}h outside -14..=+14")
            }
        }
    }
}

impl Error for TimeError {}
