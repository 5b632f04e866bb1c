//! The low-footprint fallback backend.
//!
//! Strictly a fallback, never the canonical path: frozen J2000 elements
//! with only the mean longitude advancing, a single-step Kepler solve, a
//! three-term Moon, and no long-period corrections. Degree-class accuracy,
//! but it never refuses an instant, which is exactly the job.

use astra_time::{JulianDay, centuries_since_j2000};

use crate::angle::{normalize_360, normalize_pm180};
use crate::body::Body;
use crate::error::EphemError;
use crate::kepler::{EARTH_ROW, ELEMENTS, element_row};
use crate::provider::EphemerisBackend;
use crate::state::{EclipticState, EphemerisGrade, PositionSet};

/// Half-window for the symmetric speed difference, days.
const SPEED_STEP_DAYS: f64 = 0.1;

#[derive(Debug, Default, Clone, Copy)]
pub struct CompactBackend;

impl CompactBackend {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisBackend for CompactBackend {
    fn grade(&self) -> EphemerisGrade {
        EphemerisGrade::Approximate
    }

    fn positions(&self, jd: JulianDay) -> Result<PositionSet, EphemError> {
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
        Ok(PositionSet::new(jd, EphemerisGrade::Approximate, states))
    }
}

fn lon_lat_all(t: f64) -> [(f64, f64); Body::COUNT] {
    let earth = earth_compact(t);
    Body::ALL.map(|body| match body {
        Body::Sun => (sun_compact(t), 0.0),
        Body::Moon => moon_compact(t),
        Body::NorthNode => (normalize_360(125.0445479 - 1_934.1362891 * t), 0.0),
        planet => planet_compact(planet, t, &earth),
    })
}

fn sun_compact(t: f64) -> f64 {
    let l0 = 280.46646 + 36_000.76983 * t;
    let m = (357.52911 + 35_999.05029 * t).to_radians();
    normalize_360(l0 + 1.9146 * m.sin() + 0.0200 * (2.0 * m).sin())
}

fn moon_compact(t: f64) -> (f64, f64) {
    let lp = 218.3164477 + 481_267.88123421 * t;
    let d = (297.8501921 + 445_267.1114034 * t).to_radians();
    let mp = (134.9633964 + 477_198.8675055 * t).to_radians();
    let f = (93.2720950 + 483_202.0175233 * t).to_radians();

    let lon = lp + 6.289 * mp.sin() + 1.274 * (2.0 * d - mp).sin() + 0.658 * (2.0 * d).sin();
    let lat = 5.128 * f.sin();
    (normalize_360(lon), lat)
}

/// Frozen-element heliocentric vector with a single-step Kepler solve.
fn heliocentric_compact(row: usize, t: f64) -> [f64; 3] {
    let el = &ELEMENTS[row];
    let a = el.a[0];
    let e = el.e[0];
    let i = el.i[0].to_radians();
    let l = el.l[0] + el.l[1] * t;
    let peri = el.peri[0];
    let node = el.node[0];

    let m = normalize_pm180(l - peri).to_radians();
    let ecc = m + e * m.sin();
    let xp = a * (ecc.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ecc.sin();

    let w = (peri - node).to_radians();
    let n = node.to_radians();
    let (sw, cw) = w.sin_cos();
    let (sn, cn) = n.sin_cos();
    let (si, ci) = i.sin_cos();

    [
        (cw * cn - sw * sn * ci) * xp + (-sw * cn - cw * sn * ci) * yp,
        (cw * sn + sw * cn * ci) * xp + (-sw * sn + cw * cn * ci) * yp,
        sw * si * xp + cw * si * yp,
    ]
}

fn earth_compact(t: f64) -> [f64; 3] {
    heliocentric_compact(EARTH_ROW, t)
}

fn planet_compact(body: Body, t: f64, earth: &[f64; 3]) -> (f64, f64) {
    let Some(row) = element_row(body) else {
        // Only reachable for Sun/Moon/node, which never route here.
        return (f64::NAN, f64::NAN);
    };
    let p = heliocentric_compact(row, t);
    let g = [p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]];

    let lon = g[1].atan2(g[0]).to_degrees() + 5_029.0966 * t / 3_600.0;
    let lat = g[2].atan2(g[0].hypot(g[1])).to_degrees();
    (normalize_360(lon), lat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra_time::calendar_to_jd;

    #[test]
    fn never_refuses_any_instant() {
        for &(y, m, d) in &[(1700, 1, 1.0), (1990, 6, 15.5), (2300, 12, 31.0)] {
            let jd = JulianDay::from_ut(calendar_to_jd(y, m, d));
            let set = CompactBackend::new().positions(jd).unwrap();
            assert_eq!(set.grade(), EphemerisGrade::Approximate);
        }
    }

    #[test]
    fn sun_is_degree_class() {
        // Mid-June Sun sits well inside Gemini (60°..90°).
        let jd = JulianDay::from_ut(calendar_to_jd(1990, 6, 15.375));
        let set = CompactBackend::new().positions(jd).unwrap();
        let sun = set.state(Body::Sun).lon_deg;
        assert!((60.0..90.0).contains(&sun), "Sun at {sun}");
    }

    #[test]
    fn moon_moves_fast() {
        let jd = JulianDay::from_ut(calendar_to_jd(2020, 3, 1.0));
        let set = CompactBackend::new().positions(jd).unwrap();
        let moon = set.state(Body::Moon);
        assert!((11.0..16.0).contains(&moon.speed_deg_per_day), "{moon:?}");
    }

    #[test]
    fn node_speed_is_retrograde_constant() {
        let jd = JulianDay::from_ut(calendar_to_jd(2000, 1, 1.5));
        let set = CompactBackend::new().positions(jd).unwrap();
        let node = set.state(Body::NorthNode);
        assert!((node.speed_deg_per_day - (-0.0529)).abs() < 0.001, "{node:?}");
    }
}
