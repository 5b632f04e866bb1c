//! The provider facade: backend chain and fallback.

use astra_time::JulianDay;

use crate::angle::normalize_pm180;
use crate::body::Body;
use crate::compact::CompactBackend;
use crate::error::EphemError;
use crate::series::SeriesBackend;
use crate::state::{EphemerisGrade, PositionSet};

/// A positions source: pure function of the instant.
///
/// Implementations must be deterministic; callers are free to cache
/// results keyed by the rounded instant.
pub trait EphemerisBackend: Send + Sync + std::fmt::Debug {
    fn grade(&self) -> EphemerisGrade;
    fn positions(&self, jd: JulianDay) -> Result<PositionSet, EphemError>;
}

/// Chains backends in preference order.
///
/// A backend error is logged and the next backend tried; only when every
/// backend refuses does the provider error out. The returned set carries
/// the grade of whichever backend answered.
///
/// `Provider` holds no mutable state, so one instance can serve
/// concurrent chart computations without contention. Caching lives at
/// the application boundary, keyed by input fingerprint.
#[derive(Debug)]
pub struct Provider {
    backends: Vec<Box<dyn EphemerisBackend>>,
}

impl Provider {
    /// The default chain: canonical series first, compact fallback second.
    pub fn detect() -> Self {
        Self::with_backends(vec![
            Box::new(SeriesBackend::new()),
            Box::new(CompactBackend::new()),
        ])
    }

    /// Pin the compact fallback as the only backend.
    pub fn approximate_only() -> Self {
        Self::with_backends(vec![Box::new(CompactBackend::new())])
    }

    pub fn with_backends(backends: Vec<Box<dyn EphemerisBackend>>) -> Self {
        Self { backends }
    }

    /// Evaluate all bodies at `jd`.
    ///
    /// The instant is rounded to the nearest second first. Positions are
    /// stable at that resolution, so queries that agree to the second
    /// produce bit-identical sets and memoization by rounded JD is exact.
    pub fn positions(&self, jd: JulianDay) -> Result<PositionSet, EphemError> {
        let rounded = jd.rounded_to_second();
        for backend in &self.backends {
            match backend.positions(rounded) {
                Ok(set) => return Ok(set),
                Err(e) => {
                    log::warn!(
                        "{} ephemeris backend refused {}: {e}",
                        backend.grade(),
                        rounded
                    );
                }
            }
        }
        Err(EphemError::Exhausted { jd: rounded.ut() })
    }
}

/// Largest tolerated longitude disagreement between the canonical and
/// fallback backends, per body.
///
/// These bound what a chart can shift by when the provider degrades; the
/// cross-check tests hold both paths to them.
pub fn agreement_tolerance_deg(body: Body) -> f64 {
    match body {
        Body::Sun => 0.5,
        Body::Moon => 1.0,
        Body::Mercury => 3.5,
        Body::Venus => 2.0,
        Body::Mars => 2.5,
        Body::Jupiter => 2.0,
        Body::Saturn => 2.5,
        Body::Uranus => 2.0,
        Body::Neptune => 1.5,
        Body::Pluto => 5.0,
        Body::NorthNode => 0.5,
    }
}

/// Worst per-body disagreement between the two packaged backends at `jd`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossCheckReport {
    pub worst_body: Body,
    pub worst_diff_deg: f64,
    pub within_tolerance: bool,
}

/// Compare the canonical and fallback backends at one instant.
///
/// `within_tolerance` is false if any body drifts past its
/// [`agreement_tolerance_deg`] bound.
pub fn cross_check(jd: JulianDay) -> Result<CrossCheckReport, EphemError> {
    let primary = SeriesBackend::new().positions(jd)?;
    let fallback = CompactBackend::new().positions(jd)?;

    let mut worst_body = Body::Sun;
    let mut worst_diff = 0.0;
    let mut within = true;
    for body in Body::ALL {
        let diff =
            normalize_pm180(primary.state(body).lon_deg - fallback.state(body).lon_deg).abs();
        if diff > worst_diff {
            worst_diff = diff;
            worst_body = body;
        }
        if diff > agreement_tolerance_deg(body) {
            within = false;
        }
    }
    Ok(CrossCheckReport {
        worst_body,
        worst_diff_deg: worst_diff,
        within_tolerance: within,
    })
}
