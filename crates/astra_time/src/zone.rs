//! Timezone resolution: birth wall-clock → UTC offset at that instant.
//!
//! IANA names resolve through the embedded tz database (`chrono-tz`), so
//! the offset honors the DST rule in force on the birth date, not today's.
//! A name the database does not know degrades to UTC with a warning; the
//! request is never failed over it.

use chrono::{Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::civil::{CivilDate, CivilTime};
use crate::error::TimeError;

/// How the birth timezone was specified.
#[derive(Debug, Clone, PartialEq)]
pub enum TimezoneSpec {
    Utc,
    /// Fixed offset east of Greenwich, in hours (e.g. `3.0`, `-5.5`).
    FixedHours(f64),
    /// IANA zone name, e.g. `Europe/Moscow`.
    Named(String),
}

impl TimezoneSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn validate(&self) -> Result<(), TimeError> {
        if let Self::FixedHours(h) = self
            && (!h.is_finite() || !(-14.0..=14.0).contains(h))
        {
            return Err(TimeError::OffsetOutOfRange { hours: *h });
        }
        Ok(())
    }
}

impl std::fmt::Display for TimezoneSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Utc => write!(f, "UTC"),
            Self::FixedHours(h) => write!(f, "UTC{h:+}"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// Non-fatal conditions met while normalizing a birth instant.
///
/// Carried as values next to the result; the chart attaches them to its
/// metadata instead of logging them away.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeWarning {
    /// Zone name not in the IANA database; UTC was used instead.
    ZoneUnresolved { name: String },
    /// Wall-clock time occurred twice (clocks rolled back); the first
    /// occurrence was used.
    AmbiguousLocalTime,
    /// Wall-clock time fell inside a spring-forward gap; the
    /// pre-transition offset was used.
    NonexistentLocalTime,
    /// No birth time given; local noon was assumed.
    NoonAssumed,
}

impl std::fmt::Display for TimeWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZoneUnresolved { name } => {
                write!(f, "unknown timezone {name:?}, treated as UTC")
            }
            Self::AmbiguousLocalTime => {
                write!(f, "ambiguous local time (DST rollback), first occurrence used")
            }
            Self::NonexistentLocalTime => {
                write!(f, "nonexistent local time (DST gap), pre-transition offset used")
            }
            Self::NoonAssumed => write!(f, "birth time unknown, local noon assumed"),
        }
    }
}

/// UTC offset in seconds for the given wall-clock instant.
///
/// Fixed offsets pass through; named zones go through the tz database.
/// Degradations surface in `warnings`, bound errors in the `Result`.
pub fn utc_offset_seconds(
    date: CivilDate,
    time: CivilTime,
    zone: &TimezoneSpec,
    warnings: &mut Vec<TimeWarning>,
) -> Result<f64, TimeError> {
    zone.validate()?;
    match zone {
        TimezoneSpec::Utc => Ok(0.0),
        TimezoneSpec::FixedHours(h) => Ok(h * 3_600.0),
        TimezoneSpec::Named(name) => match name.parse::<Tz>() {
            Ok(tz) => Ok(named_offset_seconds(tz, date, time, warnings)),
            Err(_) => {
                warnings.push(TimeWarning::ZoneUnresolved { name: name.clone() });
                Ok(0.0)
            }
        },
    }
}

fn named_offset_seconds(
    tz: Tz,
    date: CivilDate,
    time: CivilTime,
    warnings: &mut Vec<TimeWarning>,
) -> f64 {
    // Offset rules never depend on sub-second detail, so whole seconds are
    // enough for the lookup; the fraction stays in the JD math.
    let naive = NaiveDate::from_ymd_opt(date.year, date.month, date.day)
        .and_then(|d| d.and_hms_opt(time.hour, time.minute, (time.second as u32).min(59)));
    let Some(naive) = naive else {
        warnings.push(TimeWarning::ZoneUnresolved {
            name: tz.name().to_string(),
        });
        return 0.0;
    };

    match tz.offset_from_local_datetime(&naive) {
        LocalResult::Single(o) => o.fix().local_minus_utc() as f64,
        LocalResult::Ambiguous(a, b) => {
            warnings.push(TimeWarning::AmbiguousLocalTime);
            first_occurrence_seconds(&a, &b)
        }
        LocalResult::None => {
            warnings.push(TimeWarning::NonexistentLocalTime);
            pre_gap_offset_seconds(tz, naive)
        }
    }
}

/// The larger offset maps the wall clock to the earlier UTC instant, i.e.
/// the first time the clock showed that reading.
fn first_occurrence_seconds(a: &impl Offset, b: &impl Offset) -> f64 {
    let a = a.fix().local_minus_utc();
    let b = b.fix().local_minus_utc();
    a.max(b) as f64
}

/// Walk back out of a spring-forward gap to the offset in force before the
/// transition. Gaps are at most a few hours; 3h of 15-min steps covers
/// every zone in the database.
fn pre_gap_offset_seconds(tz: Tz, from: NaiveDateTime) -> f64 {
    let mut probe = from;
    for _ in 0..12 {
        probe -= Duration::minutes(15);
        match tz.offset_from_local_datetime(&probe) {
            LocalResult::Single(o) => return o.fix().local_minus_utc() as f64,
            LocalResult::Ambiguous(a, b) => return first_occurrence_seconds(&a, &b),
            LocalResult::None => {}
        }
    }
    0.0
}
