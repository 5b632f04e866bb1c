//! House wheel computation: Ascendant, MC, Placidus and Whole-Sign cusps.
//!
//! The Ascendant and MC come from the standard spherical-astronomy
//! formulas (Meeus Ch. 13); Placidus intermediate cusps from fixed-point
//! iteration of the semi-arc equation. Polar latitudes and failed
//! iterations substitute Whole-Sign with a warning, never an error.

use std::f64::consts::{FRAC_PI_2, PI};

use astra_ephem::normalize_360;
use astra_time::{JulianDay, gmst_rad, local_sidereal_time_rad, mean_obliquity_rad};

use crate::error::ChartWarning;
use crate::input::HouseSystem;
use crate::zodiac::Sign;

/// Largest |latitude| where the Placidus semi-arc equations stay
/// well-behaved. Beyond it Whole-Sign is substituted.
pub const POLAR_LATITUDE_LIMIT_DEG: f64 = 66.5;

const MAX_ITERATIONS: usize = 50;
const CONVERGENCE_RAD: f64 = 1e-10;

/// How much to trust house-dependent output.
///
/// `Low` marks a wheel computed from an assumed birth time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Exact,
    Low,
}

/// The 12 house cusps plus the chart angles.
///
/// `cusps_deg[i]` opens house `i + 1`. For Placidus, `cusps_deg[0]` is
/// the Ascendant and `cusps_deg[9]` the MC; for Whole-Sign the cusps sit
/// on sign boundaries while `ascendant_deg`/`mc_deg` keep the true
/// angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseWheel {
    pub system: HouseSystem,
    pub cusps_deg: [f64; 12],
    pub ascendant_deg: f64,
    pub mc_deg: f64,
    pub confidence: Confidence,
}

/// Compute the house wheel for an instant and place.
///
/// ASC and MC are computed the same way regardless of the requested
/// system. Never fails: a polar latitude or a non-converging Placidus
/// iteration substitutes Whole-Sign and reports a [`ChartWarning`].
pub fn compute_houses(
    jd: JulianDay,
    latitude_deg: f64,
    longitude_deg: f64,
    requested: HouseSystem,
    confidence: Confidence,
) -> (HouseWheel, Vec<ChartWarning>) {
    let lst = local_sidereal_time_rad(gmst_rad(jd.ut()), longitude_deg.to_radians());
    let eps = mean_obliquity_rad(jd.tt());
    let lat = latitude_deg.to_radians();

    let (ascendant_deg, mc_deg) = angles_deg(lst, lat, eps);

    let mut warnings = Vec::new();
    let (system, cusps_deg) = match requested {
        HouseSystem::WholeSign => (HouseSystem::WholeSign, whole_sign_cusps(ascendant_deg)),
        HouseSystem::Placidus => {
            if latitude_deg.abs() > POLAR_LATITUDE_LIMIT_DEG {
                warnings.push(ChartWarning::PolarLatitude { latitude_deg });
                (HouseSystem::WholeSign, whole_sign_cusps(ascendant_deg))
            } else {
                match placidus_cusps(ascendant_deg, mc_deg, lst, lat, eps) {
                    Some(cusps) => (HouseSystem::Placidus, cusps),
                    None => {
                        warnings.push(ChartWarning::NoConvergence);
                        (HouseSystem::WholeSign, whole_sign_cusps(ascendant_deg))
                    }
                }
            }
        }
    };

    let wheel = HouseWheel {
        system,
        cusps_deg,
        ascendant_deg,
        mc_deg,
        confidence,
    };
    (wheel, warnings)
}

/// Ascendant and MC from local sidereal time, degrees in [0, 360).
///
/// The Ascendant is the eastern of the two ecliptic-horizon
/// intersections, from the horizon-crossing condition
/// `cos LST·cos λ + sin λ·(sin LST·cos ε + tan φ·sin ε) = 0`.
pub fn angles_deg(lst_rad: f64, latitude_rad: f64, eps_rad: f64) -> (f64, f64) {
    let asc = f64::atan2(
        lst_rad.cos(),
        -(lst_rad.sin() * eps_rad.cos() + latitude_rad.tan() * eps_rad.sin()),
    );
    let mc = f64::atan2(lst_rad.sin(), lst_rad.cos() * eps_rad.cos());
    (normalize_360(asc.to_degrees()), normalize_360(mc.to_degrees()))
}

/// Whole-Sign cusps: house 1 starts at the Ascendant's sign boundary,
/// each following house is the next 30° segment.
pub fn whole_sign_cusps(ascendant_deg: f64) -> [f64; 12] {
    let start = Sign::from_longitude(ascendant_deg).start_deg();
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = normalize_360(start + i as f64 * 30.0);
    }
    cusps
}

/// Placidus cusps: angles fixed, intermediate cusps 11/12/2/3 from the
/// semi-arc iteration, the rest by opposition.
fn placidus_cusps(
    asc_deg: f64,
    mc_deg: f64,
    ramc: f64,
    lat: f64,
    eps: f64,
) -> Option<[f64; 12]> {
    let mut cusps = [0.0; 12];
    cusps[0] = asc_deg;
    cusps[3] = normalize_360(mc_deg + 180.0);
    cusps[6] = normalize_360(asc_deg + 180.0);
    cusps[9] = mc_deg;

    // Above the horizon: thirds of the diurnal semi-arc past the MC.
    cusps[10] = placidus_cusp(ramc, lat, eps, 1.0 / 3.0, true)?;
    cusps[11] = placidus_cusp(ramc, lat, eps, 2.0 / 3.0, true)?;
    // Below the horizon: thirds of the nocturnal semi-arc short of the IC.
    cusps[1] = placidus_cusp(ramc, lat, eps, 2.0 / 3.0, false)?;
    cusps[2] = placidus_cusp(ramc, lat, eps, 1.0 / 3.0, false)?;
    // Remaining intermediate cusps by opposition.
    cusps[4] = normalize_360(cusps[10] + 180.0);
    cusps[5] = normalize_360(cusps[11] + 180.0);
    cusps[7] = normalize_360(cusps[1] + 180.0);
    cusps[8] = normalize_360(cusps[2] + 180.0);

    // A wheel that does not wind the circle exactly once cannot
    // partition it; treat it like a failed iteration.
    if is_ordered_ring(&cusps) { Some(cusps) } else { None }
}

/// One intermediate Placidus cusp by fixed-point iteration.
///
/// Diurnal cusps (11, 12) sit at `fraction` of the diurnal semi-arc past
/// the RAMC; nocturnal cusps (2, 3) at `fraction` of the nocturnal
/// semi-arc before the lower meridian. The semi-arc depends on the
/// cusp's own declination, hence the iteration.
fn placidus_cusp(ramc: f64, lat: f64, eps: f64, fraction: f64, diurnal: bool) -> Option<f64> {
    // Initial guess from the equal-division wheel.
    let mut ra = if diurnal {
        ramc + fraction * FRAC_PI_2
    } else {
        ramc + PI - fraction * FRAC_PI_2
    };

    for _ in 0..MAX_ITERATIONS {
        // Declination of the ecliptic point at this right ascension.
        let dec = (eps.tan() * ra.sin()).atan();
        let diurnal_arc = (-dec.tan() * lat.tan()).clamp(-1.0, 1.0).acos();
        let new_ra = if diurnal {
            ramc + fraction * diurnal_arc
        } else {
            ramc + PI - fraction * (PI - diurnal_arc)
        };
        if (new_ra - ra).abs() < CONVERGENCE_RAD {
            return Some(normalize_360(ecliptic_from_ra(new_ra, eps).to_degrees()));
        }
        ra = new_ra;
    }
    None
}

/// Ecliptic longitude of the ecliptic point with right ascension `ra`.
///
/// `tan λ = tan α / cos ε`, quadrant-correct via atan2.
fn ecliptic_from_ra(ra: f64, eps: f64) -> f64 {
    f64::atan2(ra.sin(), ra.cos() * eps.cos())
}

/// Forward (zodiacal) arc from `a` to `b`, degrees in [0, 360).
pub fn arc_forward(a: f64, b: f64) -> f64 {
    (b - a).rem_euclid(360.0)
}

/// True when walking cusp 1 → 2 → … → 12 → 1 by forward arcs winds the
/// circle exactly once.
fn is_ordered_ring(cusps: &[f64; 12]) -> bool {
    let mut total = 0.0;
    for i in 0..12 {
        total += arc_forward(cusps[i], cusps[(i + 1) % 12]);
    }
    (total - 360.0).abs() < 1e-6
}
