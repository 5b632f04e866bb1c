//! ΔT = TT − UT, the drift between uniform Terrestrial Time and the
//! Earth-rotation-based Universal Time.
//!
//! The ephemeris series are formulated in TT; birth instants arrive in UT.
//! ΔT bridges the two. The polynomial expressions below are the
//! Espenak–Meeus fits ("Five Millennium Canon of Solar Eclipses", 2006),
//! restricted to the segments covering 1800–2200. Past 2015 the fit is an
//! extrapolation that can drift a few seconds from the observed value,
//! which moves the Moon by at most a couple of arcseconds.

/// ΔT in seconds at a decimal year (e.g. 1990.46).
///
/// Defined piecewise; continuous to well under a second at the seams over
/// the supported range. Inputs outside 1800–2200 use the long-range
/// parabola, so callers never get a panic for an odd year.
pub fn delta_t_seconds(year: f64) -> f64 {
    if year < 1800.0 || year >= 2150.0 {
        // Long-range parabola, -20 + 32 u^2 with u in centuries from 1820.
        let u = (year - 1820.0) / 100.0;
        return -20.0 + 32.0 * u * u;
    }
    if year < 1860.0 {
        let t = year - 1800.0;
        return 13.72 - 0.332447 * t + 0.0068612 * t.powi(2) + 0.0041116 * t.powi(3)
            - 0.00037436 * t.powi(4)
            + 0.0000121272 * t.powi(5)
            - 0.0000001699 * t.powi(6)
            + 0.000000000875 * t.powi(7);
    }
    if year < 1900.0 {
        let t = year - 1860.0;
        return 7.62 + 0.5737 * t - 0.251754 * t.powi(2) + 0.01680668 * t.powi(3)
            - 0.0004473624 * t.powi(4)
            + t.powi(5) / 233_174.0;
    }
    if year < 1920.0 {
        let t = year - 1900.0;
        return -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
            - 0.000197 * t.powi(4);
    }
    if year < 1941.0 {
        let t = year - 1920.0;
        return 21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3);
    }
    if year < 1961.0 {
        let t = year - 1950.0;
        return 29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0;
    }
    if year < 1986.0 {
        let t = year - 1975.0;
        return 45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0;
    }
    if year < 2005.0 {
        let t = year - 2000.0;
        return 63.86 + 0.3345 * t - 0.060374 * t.powi(2) + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5);
    }
    if year < 2050.0 {
        let t = year - 2000.0;
        return 62.92 + 0.32217 * t + 0.005589 * t.powi(2);
    }
    // 2050..2150
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_epoch_values() {
        // Observed ΔT: ~13.7s (1800), ~-2.7s (1900), ~63.8s (2000).
        assert!((delta_t_seconds(1800.0) - 13.7).abs() < 1.0);
        assert!((delta_t_seconds(1900.0) - (-2.8)).abs() < 1.0);
        assert!((delta_t_seconds(2000.0) - 63.8).abs() < 0.5);
    }

    #[test]
    fn nineteen_ninety() {
        // Observed ΔT in 1990 was about 56.9s.
        let dt = delta_t_seconds(1990.5);
        assert!((dt - 56.9).abs() < 1.5, "got {dt}");
    }

    #[test]
    fn segment_seams_are_continuous() {
        for &seam in &[
            1860.0, 1900.0, 1920.0, 1941.0, 1961.0, 1986.0, 2005.0, 2050.0, 2150.0,
        ] {
            let below = delta_t_seconds(seam - 1e-6);
            let above = delta_t_seconds(seam + 1e-6);
            assert!(
                (below - above).abs() < 1.0,
                "seam {seam}: {below} vs {above}"
            );
        }
    }

    #[test]
    fn monotonic_growth_after_2005() {
        assert!(delta_t_seconds(2100.0) > delta_t_seconds(2050.0));
        assert!(delta_t_seconds(2200.0) > delta_t_seconds(2100.0));
    }
}
