//! Civil (wall-clock) date and time as reported on a birth certificate.
//!
//! These are plain value types; [`validate`](CivilDate::validate) is called
//! by the chart pipeline before any conversion, so construction stays
//! infallible and literal-friendly.

use crate::error::TimeError;

/// First supported calendar year.
pub const MIN_YEAR: i32 = 1800;
/// Last supported calendar year.
pub const MAX_YEAR: i32 = 2200;

/// A calendar date in the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Check year range, month, and day (leap years included).
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(TimeError::YearOutOfRange { year: self.year });
        }
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidMonth { month: self.month });
        }
        if self.day < 1 || self.day > days_in_month(self.year, self.month) {
            return Err(TimeError::InvalidDay {
                year: self.year,
                month: self.month,
                day: self.day,
            });
        }
        Ok(())
    }

    /// ISO date string for horoscope output, e.g. `1990-06-15`.
    pub fn to_iso(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl std::fmt::Display for CivilDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_iso())
    }
}

/// A wall-clock time of day with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CivilTime {
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilTime {
    /// Local noon, the stand-in when the birth time is unknown.
    pub const NOON: CivilTime = CivilTime {
        hour: 12,
        minute: 0,
        second: 0.0,
    };

    pub fn new(hour: u32, minute: u32, second: f64) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn validate(&self) -> Result<(), TimeError> {
        let second_ok = self.second.is_finite() && (0.0..60.0).contains(&self.second);
        if self.hour >= 24 || self.minute >= 60 || !second_ok {
            return Err(TimeError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
                second: self.second,
            });
        }
        Ok(())
    }

    /// Fraction of a day elapsed since local midnight.
    pub fn day_fraction(&self) -> f64 {
        self.hour as f64 / 24.0 + self.minute as f64 / 1_440.0 + self.second / 86_400.0
    }
}

impl std::fmt::Display for CivilTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        if frac.abs() < 1e-9 {
            write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, whole)
        } else {
            write!(f, "{:02}:{:02}:{:09.6}", self.hour, self.minute, self.second)
        }
    }
}

/// True for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month, leap years accounted for.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}
