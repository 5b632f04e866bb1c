//! Per-body ecliptic state and the full position set one evaluation yields.

use astra_time::JulianDay;

use crate::angle::normalize_360;
use crate::body::Body;
use crate::error::EphemError;

/// Which backend produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EphemerisGrade {
    /// Canonical series backend.
    Primary,
    /// Compact fallback backend.
    Approximate,
}

impl EphemerisGrade {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Approximate => "approximate",
        }
    }
}

impl std::fmt::Display for EphemerisGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geocentric ecliptic state of one body: longitude and latitude of date,
/// plus the daily longitudinal rate (negative while retrograde).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticState {
    /// Ecliptic longitude, degrees in [0, 360).
    pub lon_deg: f64,
    /// Ecliptic latitude, degrees.
    pub lat_deg: f64,
    /// dλ/dt, degrees per day.
    pub speed_deg_per_day: f64,
}

/// Fastest the Moon ever moves is under 16°/day; anything past this bound
/// is a backend defect, not a position.
const MAX_SPEED_DEG_PER_DAY: f64 = 45.0;

impl EclipticState {
    /// Normalize and range-check raw backend output.
    ///
    /// Every backend funnels through here, so downstream code can rely on
    /// the invariants without re-checking.
    pub fn validated(
        body: Body,
        lon_deg: f64,
        lat_deg: f64,
        speed_deg_per_day: f64,
    ) -> Result<Self, EphemError> {
        if !lon_deg.is_finite() || !lat_deg.is_finite() || !speed_deg_per_day.is_finite() {
            return Err(EphemError::InvalidState {
                body,
                detail: "non-finite component",
            });
        }
        if lat_deg.abs() > 90.0 {
            return Err(EphemError::InvalidState {
                body,
                detail: "latitude out of range",
            });
        }
        if speed_deg_per_day.abs() > MAX_SPEED_DEG_PER_DAY {
            return Err(EphemError::InvalidState {
                body,
                detail: "implausible daily speed",
            });
        }
        Ok(Self {
            lon_deg: normalize_360(lon_deg),
            lat_deg,
            speed_deg_per_day,
        })
    }

    /// True while the body appears to move backward through the zodiac.
    pub fn is_retrograde(&self) -> bool {
        self.speed_deg_per_day < 0.0
    }
}

/// All tracked bodies evaluated at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSet {
    jd: JulianDay,
    grade: EphemerisGrade,
    states: [EclipticState; Body::COUNT],
}

impl PositionSet {
    pub fn new(jd: JulianDay, grade: EphemerisGrade, states: [EclipticState; Body::COUNT]) -> Self {
        Self { jd, grade, states }
    }

    pub fn jd(&self) -> JulianDay {
        self.jd
    }

    pub fn grade(&self) -> EphemerisGrade {
        self.grade
    }

    /// State of one body. Total over `Body`; no lookup can miss.
    pub fn state(&self, body: Body) -> EclipticState {
        self.states[body.index()]
    }

    /// Iterate `(body, state)` in fixed body order.
    pub fn iter(&self) -> impl Iterator<Item = (Body, EclipticState)> + '_ {
        Body::ALL.iter().map(|&b| (b, self.state(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_normalizes_longitude() {
        let s = EclipticState::validated(Body::Sun, 370.0, 0.0, 1.0).unwrap();
        assert_eq!(s.lon_deg, 10.0);
        let s = EclipticState::validated(Body::Sun, -10.0, 0.0, 1.0).unwrap();
        assert_eq!(s.lon_deg, 350.0);
    }

    #[test]
    fn validated_rejects_garbage() {
        assert!(EclipticState::validated(Body::Sun, f64::NAN, 0.0, 1.0).is_err());
        assert!(EclipticState::validated(Body::Sun, 0.0, 91.0, 1.0).is_err());
        assert!(EclipticState::validated(Body::Sun, 0.0, 0.0, 100.0).is_err());
        assert!(EclipticState::validated(Body::Sun, 0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn retrograde_is_negative_speed() {
        let direct = EclipticState::validated(Body::Mars, 100.0, 1.0, 0.5).unwrap();
        let retro = EclipticState::validated(Body::Mars, 100.0, 1.0, -0.3).unwrap();
        assert!(!direct.is_retrograde());
        assert!(retro.is_retrograde());
    }

    #[test]
    fn position_set_is_total() {
        let filler = EclipticState::validated(Body::Sun, 0.0, 0.0, 1.0).unwrap();
        let set = PositionSet::new(
            JulianDay::J2000,
            EphemerisGrade::Primary,
            [filler; Body::COUNT],
        );
        for body in Body::ALL {
            let _ = set.state(body);
        }
        assert_eq!(set.iter().count(), Body::COUNT);
    }
}
