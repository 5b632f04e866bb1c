//! Earth rotation: sidereal time and mean obliquity.
//!
//! The house calculator orients the ecliptic against the local horizon,
//! which takes the local sidereal time (how far the sky has turned at the
//! observer's meridian) and the obliquity of the ecliptic.
//!
//! Sidereal time here is mean (no nutation term); the equation of the
//! equinoxes is ~1s of time and far below chart house precision.
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.
//! - Mean obliquity: IAU 2006 (Hilton et al.), arcsecond polynomial.

use std::f64::consts::{PI, TAU};

use crate::julian::{J2000_JD, centuries_since_j2000};

/// Arcseconds to radians: 1″ = π / (180 × 3600).
const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth Rotation Angle at a UT Julian Date, radians in [0, 2π).
///
/// θ = 2π × (0.7790572732640 + 1.00273781191135448 × Du), Du = JD − J2000.
///
/// UT1−UTC is under 0.9s by definition and is ignored here; the resulting
/// angle error is below 14 arcseconds, invisible at house precision.
pub fn earth_rotation_angle_rad(jd_ut: f64) -> f64 {
    let du = jd_ut - J2000_JD;
    let theta = TAU * (0.779_057_273_264_0 + 1.002_737_811_911_354_6 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time at a UT Julian Date, radians in [0, 2π).
///
/// GMST = ERA + polynomial(T), T in Julian centuries from J2000.0.
pub fn gmst_rad(jd_ut: f64) -> f64 {
    let era = earth_rotation_angle_rad(jd_ut);
    let t = centuries_since_j2000(jd_ut);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let poly_arcsec = 0.014506 + 4612.156534 * t + 1.3915817 * t2
        - 0.00000044 * t3
        - 0.000029956 * t4
        - 0.0000000368 * t5;

    (era + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Local Sidereal Time: GMST plus the observer's east longitude.
/// Radians in [0, 2π).
pub fn local_sidereal_time_rad(gmst: f64, longitude_east_rad: f64) -> f64 {
    (gmst + longitude_east_rad).rem_euclid(TAU)
}

/// Mean obliquity of the ecliptic at a TT Julian Date, radians.
///
/// ε_A = 84381.406″ − 46.836769″T − 0.0001831″T² + 0.00200340″T³
///       − 0.000000576″T⁴ − 0.0000000434″T⁵
pub fn mean_obliquity_rad(jd_tt: f64) -> f64 {
    let t = centuries_since_j2000(jd_tt);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let eps_arcsec = 84_381.406 - 46.836769 * t - 0.0001831 * t2 + 0.00200340 * t3
        - 0.000000576 * t4
        - 0.0000000434 * t5;

    eps_arcsec * ARCSEC_TO_RAD
}
