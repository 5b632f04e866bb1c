//! Lunar longitude/latitude from the truncated ELP-2000/82 series, and the
//! mean lunar node.
//!
//! The tables keep every periodic term with an amplitude of at least
//! 0.0003° (longitude) / 0.0004° (latitude), which holds truncation error
//! near 0.003°, two orders under the tightest aspect orb in use.
//!
//! Source: Meeus, Astronomical Algorithms, 2nd ed., Ch. 47
//! (Tables 47.A/47.B and the node expression).

use crate::angle::normalize_360;

/// Lunar fundamental arguments at `t` centuries TT since J2000, degrees.
struct LunarArgs {
    /// Mean longitude L'.
    lp: f64,
    /// Mean elongation from the Sun D.
    d: f64,
    /// Solar mean anomaly M.
    m: f64,
    /// Lunar mean anomaly M'.
    mp: f64,
    /// Argument of latitude F.
    f: f64,
    /// Eccentricity damping factor E.
    e: f64,
}

fn lunar_args(t: f64) -> LunarArgs {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    LunarArgs {
        lp: 218.3164477 + 481_267.88123421 * t - 0.0015786 * t2 + t3 / 538_841.0
            - t4 / 65_194_000.0,
        d: 297.8501921 + 445_267.1114034 * t - 0.0018819 * t2 + t3 / 545_868.0
            - t4 / 113_065_000.0,
        m: 357.5291092 + 35_999.0502909 * t - 0.0001536 * t2 + t3 / 24_490_000.0,
        mp: 134.9633964 + 477_198.8675055 * t + 0.0087414 * t2 + t3 / 69_699.0
            - t4 / 14_712_000.0,
        f: 93.2720950 + 483_202.0175233 * t - 0.0036539 * t2 - t3 / 3_526_000.0
            + t4 / 863_310_000.0,
        e: 1.0 - 0.002516 * t - 0.0000074 * t2,
    }
}

/// Periodic terms: multiples of (D, M, M', F) and the coefficient in
/// units of 1e-6 degree. Terms with M carry the E factor once per power.
#[rustfmt::skip]
const LON_TERMS: [(i8, i8, i8, i8, i32); 59] = [
    (0, 0, 1, 0, 6_288_774), (2, 0, -1, 0, 1_274_027), (2, 0, 0, 0, 658_314),
    (0, 0, 2, 0, 213_618),   (0, 1, 0, 0, -185_116),   (0, 0, 0, 2, -114_332),
    (2, 0, -2, 0, 58_793),   (2, -1, -1, 0, 57_066),   (2, 0, 1, 0, 53_322),
    (2, -1, 0, 0, 45_758),   (0, 1, -1, 0, -40_923),   (1, 0, 0, 0, -34_720),
    (0, 1, 1, 0, -30_383),   (2, 0, 0, -2, 15_327),    (0, 0, 1, 2, -12_528),
    (0, 0, 1, -2, 10_980),   (4, 0, -1, 0, 10_675),    (0, 0, 3, 0, 10_034),
    (4, 0, -2, 0, 8_548),    (2, 1, -1, 0, -7_888),    (2, 1, 0, 0, -6_766),
    (1, 0, -1, 0, -5_163),   (1, 1, 0, 0, 4_987),      (2, -1, 1, 0, 4_036),
    (2, 0, 2, 0, 3_994),     (4, 0, 0, 0, 3_861),      (2, 0, -3, 0, 3_665),
    (0, 1, -2, 0, -2_689),   (2, 0, -1, 2, -2_602),    (2, -1, -2, 0, 2_390),
    (1, 0, 1, 0, -2_348),    (2, -2, 0, 0, 2_236),     (0, 1, 2, 0, -2_120),
    (0, 2, 0, 0, -2_069),    (2, -2, -1, 0, 2_048),    (2, 0, 1, -2, -1_773),
    (2, 0, 0, 2, -1_595),    (4, -1, -1, 0, 1_215),    (0, 0, 2, 2, -1_110),
    (3, 0, -1, 0, -892),     (2, 1, 1, 0, -810),       (4, -1, -2, 0, 759),
    (0, 2, -1, 0, -713),     (2, 2, -1, 0, -700),      (2, 1, -2, 0, 691),
    (2, -1, 0, -2, 596),     (4, 0, 1, 0, 549),        (0, 0, 4, 0, 537),
    (4, -1, 0, 0, 520),      (1, 0, -2, 0, -487),      (2, 1, 0, -2, -399),
    (0, 0, 2, -2, -381),     (1, 1, 1, 0, 351),        (3, 0, -2, 0, -340),
    (4, 0, -3, 0, 330),      (2, -1, 2, 0, 327),       (0, 2, 1, 0, -323),
    (1, 1, -1, 0, 299),      (2, 0, 3, 0, 294),
];

#[rustfmt::skip]
const LAT_TERMS: [(i8, i8, i8, i8, i32); 39] = [
    (0, 0, 0, 1, 5_128_122), (0, 0, 1, 1, 280_602),   (0, 0, 1, -1, 277_693),
    (2, 0, 0, -1, 173_237),  (2, 0, -1, 1, 55_413),   (2, 0, -1, -1, 46_271),
    (2, 0, 0, 1, 32_573),    (0, 0, 2, 1, 17_198),    (2, 0, 1, -1, 9_266),
    (0, 0, 2, -1, 8_822),    (2, -1, 0, -1, 8_216),   (2, 0, -2, -1, 4_324),
    (2, 0, 1, 1, 4_200),     (2, 1, 0, -1, -3_359),   (2, -1, -1, 1, 2_463),
    (2, -1, 0, 1, 2_211),    (2, -1, -1, -1, 2_065),  (0, 1, -1, -1, -1_870),
    (4, 0, -1, -1, 1_828),   (0, 1, 0, 1, -1_794),    (0, 0, 0, 3, -1_749),
    (0, 1, -1, 1, -1_565),   (1, 0, 0, 1, -1_491),    (0, 1, 1, 1, -1_475),
    (0, 1, 1, -1, -1_410),   (0, 1, 0, -1, -1_344),   (1, 0, 0, -1, -1_335),
    (0, 0, 3, 1, 1_107),     (4, 0, 0, -1, 1_021),    (4, 0, -1, 1, 833),
    (0, 0, 1, -3, 777),      (4, 0, -2, 1, 671),      (2, 0, 0, -3, 607),
    (2, 0, 2, -1, 596),      (2, -1, 1, -1, 491),     (2, 0, -2, 1, -451),
    (0, 0, 3, -1, 439),      (2, 0, 2, 1, 422),       (2, 0, -3, -1, 421),
];

fn sum_terms(args: &LunarArgs, terms: &[(i8, i8, i8, i8, i32)]) -> f64 {
    let (d, m, mp, f) = (
        args.d.to_radians(),
        args.m.to_radians(),
        args.mp.to_radians(),
        args.f.to_radians(),
    );
    let mut total = 0.0;
    for &(cd, cm, cmp, cf, coef) in terms {
        let arg = cd as f64 * d + cm as f64 * m + cmp as f64 * mp + cf as f64 * f;
        let damping = match cm.abs() {
            0 => 1.0,
            1 => args.e,
            _ => args.e * args.e,
        };
        total += coef as f64 * damping * arg.sin();
    }
    total
}

/// Geocentric lunar ecliptic longitude of date, degrees in [0, 360).
pub fn lunar_longitude_deg(t: f64) -> f64 {
    let args = lunar_args(t);
    // Planetary perturbation arguments (Venus, Jupiter, flattening).
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.290 * t).to_radians();
    let lp = args.lp.to_radians();
    let f = args.f.to_radians();

    let periodic = sum_terms(&args, &LON_TERMS)
        + 3_958.0 * a1.sin()
        + 1_962.0 * (lp - f).sin()
        + 318.0 * a2.sin();
    normalize_360(args.lp + periodic / 1e6)
}

/// Geocentric lunar ecliptic latitude, degrees.
pub fn lunar_latitude_deg(t: f64) -> f64 {
    let args = lunar_args(t);
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();
    let lp = args.lp.to_radians();
    let mp = args.mp.to_radians();
    let f = args.f.to_radians();

    let periodic = sum_terms(&args, &LAT_TERMS) - 2_235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();
    periodic / 1e6
}

/// Mean longitude of the ascending lunar node, degrees in [0, 360).
///
/// The node regresses a full circle in ~18.6 years (-0.0529°/day).
pub fn mean_node_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    normalize_360(
        125.0445479 - 1_934.1362891 * t + 0.0020754 * t2 + t3 / 467_441.0 - t4 / 60_616_000.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra_time::{calendar_to_jd, centuries_since_j2000};

    #[test]
    fn meeus_worked_example() {
        // Meeus 47.a: 1992-Apr-12.0 TD → λ 133.162655°, β -3.229126°.
        let t = centuries_since_j2000(calendar_to_jd(1992, 4, 12.0));
        let lon = lunar_longitude_deg(t);
        let lat = lunar_latitude_deg(t);
        assert!((lon - 133.1627).abs() < 0.02, "λ = {lon}");
        assert!((lat - (-3.2291)).abs() < 0.02, "β = {lat}");
    }

    #[test]
    fn daily_motion_is_about_thirteen_degrees() {
        let t0 = centuries_since_j2000(calendar_to_jd(2000, 1, 1.0));
        let t1 = centuries_since_j2000(calendar_to_jd(2000, 1, 2.0));
        let motion = (lunar_longitude_deg(t1) - lunar_longitude_deg(t0)).rem_euclid(360.0);
        assert!((11.0..16.0).contains(&motion), "motion {motion}°/day");
    }

    #[test]
    fn latitude_stays_in_band() {
        // The orbit is inclined ~5.15°; perturbed latitude never leaves ±5.3°.
        for i in 0..200 {
            let t = -1.0 + i as f64 * 0.01;
            let lat = lunar_latitude_deg(t);
            assert!(lat.abs() < 5.35, "t={t}: β={lat}");
        }
    }

    #[test]
    fn node_at_j2000() {
        let node = mean_node_deg(0.0);
        assert!((node - 125.0445).abs() < 0.001, "Ω = {node}");
    }

    #[test]
    fn node_regresses() {
        let day = 1.0 / 36_525.0;
        let drift = mean_node_deg(day) - mean_node_deg(0.0);
        assert!((drift - (-0.0529)).abs() < 0.001, "dΩ/dt = {drift}°/day");
    }
}
