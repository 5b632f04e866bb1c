//! Solar longitude from the mean elements and equation of center.
//!
//! Geometric longitude referred to the mean equinox of date, which is what
//! the tropical zodiac wants. Accuracy ~0.01° over the supported range;
//! aberration and nutation (each under 0.006°) are left out.
//!
//! Source: Meeus, Astronomical Algorithms, 2nd ed., Ch. 25.

use crate::angle::normalize_360;

/// Geometric solar ecliptic longitude of date, degrees in [0, 360).
///
/// `t` is Julian centuries TT since J2000.0.
pub fn solar_longitude_deg(t: f64) -> f64 {
    let l0 = 280.46646 + 36_000.76983 * t + 0.0003032 * t * t;
    let m = mean_anomaly_deg(t);
    normalize_360(l0 + equation_of_center_deg(t, m))
}

/// Solar mean anomaly, degrees (not normalized).
pub fn mean_anomaly_deg(t: f64) -> f64 {
    357.52911 + 35_999.05029 * t - 0.0001537 * t * t
}

/// Equation of center, degrees.
pub fn equation_of_center_deg(t: f64, mean_anomaly_deg: f64) -> f64 {
    let m = mean_anomaly_deg.to_radians();
    (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin()
}
