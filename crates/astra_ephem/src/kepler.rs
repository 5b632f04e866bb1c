//! Planetary positions from mean Keplerian elements.
//!
//! Elements and secular rates are the JPL approximate-ephemeris set fitted
//! for 3000 BC – 3000 AD (Standish), including the long-period correction
//! terms for Jupiter through Pluto. Heliocentric vectors are reduced to
//! geocentric ecliptic coordinates and precessed from J2000 to the equinox
//! of date. Accuracy is arc-minute class for the inner planets and a few
//! arc-minutes for the outer ones over the supported range.
//!
//! Light-time and aberration stay below that tolerance and are not applied.

use crate::angle::{normalize_360, normalize_pm180};
use crate::body::Body;

/// One planet's mean elements: value at J2000.0 and rate per Julian
/// century, in the order a (AU), e, I, L, ϖ, Ω (angles in degrees).
pub(crate) struct MeanElements {
    pub(crate) a: [f64; 2],
    pub(crate) e: [f64; 2],
    pub(crate) i: [f64; 2],
    pub(crate) l: [f64; 2],
    pub(crate) peri: [f64; 2],
    pub(crate) node: [f64; 2],
    /// Long-period corrections (b, c, s, f) added to the mean anomaly of
    /// the outer planets: b·t² + c·cos(f·t) + s·sin(f·t).
    pub(crate) extra: [f64; 4],
}

const NO_EXTRA: [f64; 4] = [0.0; 4];

#[rustfmt::skip]
pub(crate) static ELEMENTS: [MeanElements; 9] = [
    // Mercury
    MeanElements {
        a: [0.38709843, 0.0],            e: [0.20563661, 0.00002123],
        i: [7.00559432, -0.00590158],    l: [252.25166724, 149_472.67486623],
        peri: [77.45771895, 0.15940013], node: [48.33961819, -0.12214182],
        extra: NO_EXTRA,
    },
    // Venus
    MeanElements {
        a: [0.72332102, -0.00000026],     e: [0.00676399, -0.00005107],
        i: [3.39777545, 0.00043494],      l: [181.97970850, 58_517.81560260],
        peri: [131.76755713, 0.05679648], node: [76.67261496, -0.27274174],
        extra: NO_EXTRA,
    },
    // Earth-Moon barycenter
    MeanElements {
        a: [1.00000018, -0.00000003],     e: [0.01673163, -0.00003661],
        i: [-0.00054346, -0.01337178],    l: [100.46691572, 35_999.37306329],
        peri: [102.93005885, 0.31795260], node: [-5.11260389, -0.24123856],
        extra: NO_EXTRA,
    },
    // Mars
    MeanElements {
        a: [1.52371243, 0.00000097],       e: [0.09336511, 0.00009149],
        i: [1.85181869, -0.00724757],      l: [-4.56813164, 19_140.29934243],
        peri: [-23.91744784, 0.45223625],  node: [49.71320984, -0.26852431],
        extra: NO_EXTRA,
    },
    // Jupiter
    MeanElements {
        a: [5.20248019, -0.00002864],     e: [0.04853590, 0.00018026],
        i: [1.29861416, -0.00322699],     l: [34.33479152, 3_034.90371757],
        peri: [14.27495244, 0.18199196],  node: [100.29282654, 0.13024619],
        extra: [-0.00012452, 0.06064060, -0.35635438, 38.35125000],
    },
    // Saturn
    MeanElements {
        a: [9.54149883, -0.00003065],     e: [0.05550825, -0.00032044],
        i: [2.49424102, 0.00451969],      l: [50.07571329, 1_222.11494724],
        peri: [92.86136063, 0.54179478],  node: [113.63998702, -0.25015002],
        extra: [0.00025899, -0.13434469, 0.87320147, 38.35125000],
    },
    // Uranus
    MeanElements {
        a: [19.18797948, -0.00020455],    e: [0.04685740, -0.00001550],
        i: [0.77298127, -0.00180155],     l: [314.20276625, 428.49512595],
        peri: [172.43404441, 0.09266985], node: [73.96250215, 0.05739699],
        extra: [0.00058331, -0.97731848, 0.17689245, 7.67025000],
    },
    // Neptune
    MeanElements {
        a: [30.06952752, 0.00006447],    e: [0.00895439, 0.00000818],
        i: [1.77005520, 0.00022400],     l: [304.22289287, 218.46515314],
        peri: [46.68158724, 0.01009938], node: [131.78635853, -0.00606302],
        extra: [-0.00041348, 0.68346318, -0.10162547, 7.67025000],
    },
    // Pluto
    MeanElements {
        a: [39.48686035, 0.00449751],      e: [0.24885238, 0.00006016],
        i: [17.14104260, 0.00000501],      l: [238.96535011, 145.18042903],
        peri: [224.09702598, -0.00968827], node: [110.30167986, -0.00809981],
        extra: [-0.01262724, 0.0, 0.0, 0.0],
    },
];

pub(crate) const EARTH_ROW: usize = 2;

pub(crate) fn element_row(body: Body) -> Option<usize> {
    match body {
        Body::Mercury => Some(0),
        Body::Venus => Some(1),
        Body::Mars => Some(3),
        Body::Jupiter => Some(4),
        Body::Saturn => Some(5),
        Body::Uranus => Some(6),
        Body::Neptune => Some(7),
        Body::Pluto => Some(8),
        _ => None,
    }
}

/// Solve Kepler's equation M = E − e·sin(E) for E, everything in degrees.
///
/// Newton iteration; converges in a handful of rounds even at Pluto's
/// eccentricity. The 1e-8° tolerance is far past any use here.
fn eccentric_anomaly_deg(m_deg: f64, e: f64) -> f64 {
    let e_star = e.to_degrees();
    let m = normalize_pm180(m_deg);
    let mut ecc = m + e_star * m.to_radians().sin();
    for _ in 0..30 {
        let dm = m - (ecc - e_star * ecc.to_radians().sin());
        let de = dm / (1.0 - e * ecc.to_radians().cos());
        ecc += de;
        if de.abs() < 1e-8 {
            break;
        }
    }
    ecc
}

/// Heliocentric J2000-ecliptic position of one table row, AU.
fn heliocentric(row: usize, t: f64) -> [f64; 3] {
    let el = &ELEMENTS[row];
    let at = |pair: [f64; 2]| pair[0] + pair[1] * t;

    let a = at(el.a);
    let e = at(el.e);
    let i = at(el.i).to_radians();
    let l = at(el.l);
    let peri = at(el.peri);
    let node = at(el.node);

    let [b, c, s, f] = el.extra;
    let m = l - peri + b * t * t + c * (f * t).to_radians().cos() + s * (f * t).to_radians().sin();

    let ecc = eccentric_anomaly_deg(m, e).to_radians();
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

/// Heliocentric position of the Earth-Moon barycenter, AU (J2000 ecliptic).
pub(crate) fn earth_heliocentric(t: f64) -> [f64; 3] {
    heliocentric(EARTH_ROW, t)
}

/// Accumulated general precession in ecliptic longitude since J2000,
/// degrees. Carries J2000-frame longitudes to the equinox of date.
pub(crate) fn precession_longitude_deg(t: f64) -> f64 {
    (5_029.0966 * t + 1.11113 * t * t - 0.000006 * t * t * t) / 3_600.0
}

/// Geocentric ecliptic longitude/latitude of date for a Keplerian planet.
///
/// `earth` is the heliocentric Earth vector for the same `t`, computed once
/// per sweep and shared. Returns `None` for bodies outside the table.
pub(crate) fn planet_ecliptic_of_date(body: Body, t: f64, earth: &[f64; 3]) -> Option<(f64, f64)> {
    let row = element_row(body)?;
    let p = heliocentric(row, t);
    let g = [p[0] - earth[0], p[1] - earth[1], p[2] - earth[2]];

    let lon_j2000 = g[1].atan2(g[0]).to_degrees();
    let lat = g[2].atan2(g[0].hypot(g[1])).to_degrees();
    Some((normalize_360(lon_j2000 + precession_longitude_deg(t)), lat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sun::solar_longitude_deg;
    use astra_time::{calendar_to_jd, centuries_since_j2000};

    fn t_at(year: i32, month: u32, day: f64) -> f64 {
        centuries_since_j2000(calendar_to_jd(year, month, day))
    }

    #[test]
    fn earth_orbit_radius() {
        for &t in &[-1.0, 0.0, 0.5, 1.0] {
            let e = earth_heliocentric(t);
            let r = (e[0] * e[0] + e[1] * e[1] + e[2] * e[2]).sqrt();
            assert!((r - 1.0).abs() < 0.02, "t={t}: r={r} AU");
        }
    }

    #[test]
    fn geocentric_sun_matches_solar_theory() {
        // The Sun seen from Earth is the anti-Earth direction; it must
        // agree with the dedicated solar series.
        for &t in &[-0.5, 0.0, 0.25] {
            let e = earth_heliocentric(t);
            let lon = normalize_360((-e[1]).atan2(-e[0]).to_degrees() + precession_longitude_deg(t));
            let sun = solar_longitude_deg(t);
            let diff = (lon - sun + 540.0).rem_euclid(360.0) - 180.0;
            assert!(diff.abs() < 0.05, "t={t}: kepler {lon} vs series {sun}");
        }
    }

    #[test]
    fn great_conjunction_2020() {
        // 2020-Dec-21: Jupiter and Saturn within 0.1°, near 0°29′ Aquarius.
        let t = t_at(2020, 12, 21.75);
        let earth = earth_heliocentric(t);
        let (jup, _) = planet_ecliptic_of_date(Body::Jupiter, t, &earth).unwrap();
        let (sat, _) = planet_ecliptic_of_date(Body::Saturn, t, &earth).unwrap();
        let gap = (jup - sat + 540.0).rem_euclid(360.0) - 180.0;
        assert!(gap.abs() < 1.0, "Jupiter {jup} vs Saturn {sat}");
        assert!((jup - 300.5).abs() < 2.5, "Jupiter at {jup}");
    }

    #[test]
    fn venus_transit_2012() {
        // Venus crossed the solar disk on 2012-Jun-05/06 (inferior
        // conjunction): longitudes align.
        let t = t_at(2012, 6, 6.0);
        let earth = earth_heliocentric(t);
        let (venus, _) = planet_ecliptic_of_date(Body::Venus, t, &earth).unwrap();
        let sun = solar_longitude_deg(t);
        let gap = (venus - sun + 540.0).rem_euclid(360.0) - 180.0;
        assert!(gap.abs() < 1.0, "Venus {venus} vs Sun {sun}");
    }

    #[test]
    fn mars_opposition_2003() {
        // Closest approach in recorded history, 2003-Aug-28: Mars opposite
        // the Sun.
        let t = t_at(2003, 8, 28.75);
        let earth = earth_heliocentric(t);
        let (mars, _) = planet_ecliptic_of_date(Body::Mars, t, &earth).unwrap();
        let sun = solar_longitude_deg(t);
        let gap = (mars - sun + 540.0).rem_euclid(360.0) - 180.0;
        assert!((gap.abs() - 180.0).abs() < 1.5, "Mars {mars} vs Sun {sun}");
    }

    #[test]
    fn pluto_near_perihelion_in_2000() {
        // Perihelion passage was 1989; the heliocentric distance around
        // 2000 sits near 30 AU, far from the 39 AU semi-major axis.
        let p = heliocentric(8, 0.0);
        let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        assert!((29.0..33.0).contains(&r), "r = {r} AU");
    }

    #[test]
    fn kepler_solver_handles_high_eccentricity() {
        for m in [-170.0, -90.0, 0.0, 45.0, 179.0] {
            let e = 0.25;
            let ecc = eccentric_anomaly_deg(m, e);
            let back = ecc - e.to_degrees() * ecc.to_radians().sin();
            assert!(
                (normalize_pm180(back - m)).abs() < 1e-6,
                "M={m}: E={ecc}, back={back}"
            );
        }
    }

    #[test]
    fn precession_rate() {
        // ~50.3″ per year.
        let per_year = precession_longitude_deg(0.01) * 3_600.0;
        assert!((per_year - 50.3).abs() < 0.1, "{per_year}″/yr");
    }
}
