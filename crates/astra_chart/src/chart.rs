//! Natal chart assembly.
//!
//! [`NatalChart::compute`] is the one entry point: birth data in, a
//! fully placed chart out. Degraded inputs (unknown birth time,
//! unresolvable zone, polar latitude, fallback ephemeris) surface as
//! warnings on the chart, never as errors.

use astra_ephem::{Body, EclipticState, EphemerisGrade, Provider};
use astra_time::{JulianDay, resolve_jd_ut};

use crate::aspects::{Aspect, natal_aspects};
use crate::assign::house_of;
use crate::error::{ChartError, ChartWarning};
use crate::houses::{Confidence, HouseWheel, compute_houses};
use crate::input::BirthInfo;
use crate::zodiac::{Sign, SignPosition, sign_position};

/// One body placed on the wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPlacement {
    pub body: Body,
    pub state: EclipticState,
    pub position: SignPosition,
    /// House 1..=12. `None` for placements made without a house wheel.
    pub house: Option<u8>,
}

impl BodyPlacement {
    pub fn sign(&self) -> Sign {
        self.position.sign
    }

    pub fn is_retrograde(&self) -> bool {
        self.state.is_retrograde()
    }
}

/// Sun, Moon and rising sign: the summary headline of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigThree {
    pub sun: Sign,
    pub moon: Sign,
    pub ascendant: Sign,
}

/// A computed natal chart.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalChart {
    /// The instant the chart was evaluated at, rounded to the second.
    pub jd_ut: JulianDay,
    pub birth: BirthInfo,
    /// One placement per tracked body, in [`Body::ALL`] order.
    pub placements: Vec<BodyPlacement>,
    pub houses: HouseWheel,
    pub aspects: Vec<Aspect>,
    pub big_three: BigThree,
    /// Which ephemeris backend grade produced the positions.
    pub source: EphemerisGrade,
    pub warnings: Vec<ChartWarning>,
}

impl NatalChart {
    /// Compute a full natal chart from birth data.
    ///
    /// Errors only on structurally invalid input or an exhausted
    /// ephemeris chain; every recoverable degradation becomes a
    /// [`ChartWarning`] instead.
    pub fn compute(provider: &Provider, birth: &BirthInfo) -> Result<NatalChart, ChartError> {
        birth.validate()?;

        let (jd_ut, time_warnings) = resolve_jd_ut(birth.date, birth.time, &birth.timezone)?;
        let mut warnings: Vec<ChartWarning> = time_warnings
            .into_iter()
            .map(ChartWarning::from_time_warning)
            .collect();

        let positions = provider.positions(jd_ut)?;
        if positions.grade() == EphemerisGrade::Approximate {
            warnings.push(ChartWarning::ApproximateEphemeris);
        }

        let confidence = if birth.time_unknown() {
            Confidence::Low
        } else {
            Confidence::Exact
        };
        let (houses, house_warnings) = compute_houses(
            positions.jd(),
            birth.latitude_deg,
            birth.longitude_deg,
            birth.house_system,
            confidence,
        );
        warnings.extend(house_warnings);

        let placements = Body::ALL
            .iter()
            .map(|&body| {
                let state = positions.state(body);
                BodyPlacement {
                    body,
                    state,
                    position: sign_position(state.lon_deg),
                    house: Some(house_of(&houses.cusps_deg, state.lon_deg)),
                }
            })
            .collect();

        let aspects = natal_aspects(&positions);

        let big_three = BigThree {
            sun: Sign::from_longitude(positions.state(Body::Sun).lon_deg),
            moon: Sign::from_longitude(positions.state(Body::Moon).lon_deg),
            ascendant: Sign::from_longitude(houses.ascendant_deg),
        };

        Ok(NatalChart {
            jd_ut: positions.jd(),
            birth: birth.clone(),
            placements,
            houses,
            aspects,
            big_three,
            source: positions.grade(),
            warnings,
        })
    }

    /// Placement of one body. Total over [`Body`]; placements are stored
    /// in enum order.
    pub fn placement(&self, body: Body) -> &BodyPlacement {
        &self.placements[body.index()]
    }

    pub fn sun_sign(&self) -> Sign {
        self.big_three.sun
    }

    /// True when any warning degrades house-dependent output.
    pub fn houses_degraded(&self) -> bool {
        self.houses.confidence == Confidence::Low
            || self.warnings.iter().any(|w| {
                matches!(
                    w,
                    ChartWarning::PolarLatitude { .. } | ChartWarning::NoConvergence
                )
            })
    }
}
