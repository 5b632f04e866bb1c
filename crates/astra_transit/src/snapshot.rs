//! Sky state at a transit instant.

use astra_chart::{Sign, SignPosition, sign_position};
use astra_ephem::{Body, EclipticState, EphemError, EphemerisGrade, PositionSet, Provider};
use astra_time::JulianDay;

/// Positions of every tracked body at one "now" instant, the moving half
/// of transit detection.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitSnapshot {
    positions: PositionSet,
}

impl TransitSnapshot {
    /// Evaluate the provider at `jd`.
    pub fn capture(provider: &Provider, jd: JulianDay) -> Result<Self, EphemError> {
        Ok(Self {
            positions: provider.positions(jd)?,
        })
    }

    /// The instant the snapshot was evaluated at, rounded to the second.
    pub fn jd_ut(&self) -> JulianDay {
        self.positions.jd()
    }

    pub fn grade(&self) -> EphemerisGrade {
        self.positions.grade()
    }

    pub fn positions(&self) -> &PositionSet {
        &self.positions
    }

    /// State of one transiting body. Total over [`Body`].
    pub fn state(&self, body: Body) -> EclipticState {
        self.positions.state(body)
    }

    /// Zodiac placement of one transiting body.
    pub fn placement(&self, body: Body) -> SignPosition {
        sign_position(self.state(body).lon_deg)
    }

    /// Sign the transiting Moon occupies; the daily mood marker.
    pub fn moon_sign(&self) -> Sign {
        self.placement(Body::Moon).sign
    }
}
