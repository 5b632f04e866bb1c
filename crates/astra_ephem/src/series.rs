//! The canonical series backend: Meeus solar theory, truncated ELP Moon,
//! Standish Keplerian planets, mean lunar node.
//!
//! Refuses instants outside its packaged coverage instead of extrapolating
//! silently; the provider chain degrades to the compact backend there.

use astra_time::{JulianDay, centuries_since_j2000, jd_to_calendar};

use crate::angle::normalize_pm180;
use crate::body::Body;
use crate::error::EphemError;
use crate::kepler;
use crate::moon;
use crate::provider::EphemerisBackend;
use crate::state::{EclipticState, EphemerisGrade, PositionSet};
use crate::sun;

/// Series coverage, padded past the civil 1800–2200 input range so that
/// transit lookups near the edges still resolve.
const MIN_YEAR: i32 = 1750;
const MAX_YEAR: i32 = 2250;

/// Half-window for the symmetric speed difference, days.
const SPEED_STEP_DAYS: f64 = 0.1;

#[derive(Debug, Default, Clone, Copy)]
pub struct SeriesBackend;

impl SeriesBackend {
    pub fn new() -> Self {
        Self
    }

    fn check_range(jd: JulianDay) -> Result<(), EphemError> {
        let (year, _, _) = jd_to_calendar(jd.ut());
        if (MIN_YEAR..=MAX_YEAR).contains(&year) {
            Ok(())
        } else {
            Err(EphemError::EpochOutOfRange { jd: jd.ut() })
        }
    }
}

impl EphemerisBackend for SeriesBackend {
    fn grade(&self) -> EphemerisGrade {
        EphemerisGrade::Primary
    }

    fn positions(&self, jd: JulianDay) -> Result<PositionSet, EphemError> {
        Self::check_range(jd)?;
        let t = centuries_since_j2000(jd.tt());
        let dt = SPEED_STEP_DAYS / 36_525.0;
        let now = lon_lat_all(t);
        let before = lon_lat_all(t - dt);
        let after = lon_lat_all(t + dt);

        let mut states = [EclipticState {
            lon_deg: 0.0,
            lat_deg: 0.0,
            speed_deg_per_day: 0.0,
        }; Body::COUNT];
        for body in Body::ALL {
            let i = body.index();
            let speed =
                normalize_pm180(after[i].0 - before[i].0) / (2.0 * SPEED_STEP_DAYS);
            states[i] = EclipticState::validated(body, now[i].0, now[i].1, speed)?;
        }
        Ok(PositionSet::new(jd, EphemerisGrade::Primary, states))
    }
}

/// One sweep: geocentric (longitude, latitude) of date for every body.
fn lon_lat_all(t: f64) -> [(f64, f64); Body::COUNT] {
    let earth = kepler::earth_heliocentric(t);
    Body::ALL.map(|body| match body {
        Body::Sun => (sun::solar_longitude_deg(t), 0.0),
        Body::Moon => (moon::lunar_longitude_deg(t), moon::lunar_latitude_deg(t)),
        Body::NorthNode => (moon::mean_node_deg(t), 0.0),
        planet => match kepler::planet_ecliptic_of_date(planet, t, &earth) {
            Some(pair) => pair,
            // Unreachable for the eight planets; NaN trips the validated()
            // boundary instead of panicking if the table ever regresses.
            None => (f64::NAN, f64::NAN),
        },
    })
}
