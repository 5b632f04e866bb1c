//! Degree-circle helpers shared by the chart math.

/// Normalize an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can return 360.0 exactly when deg is a tiny negative value.
    if r >= 360.0 { r - 360.0 } else { r }
}

/// Normalize an angle to (-180, 180].
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_360(deg);
    if r > 180.0 { r - 360.0 } else { r }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_into_circle() {
        assert_eq!(normalize_360(0.0), 0.0);
        assert_eq!(normalize_360(360.0), 0.0);
        assert_eq!(normalize_360(725.0), 5.0);
        assert_eq!(normalize_360(-30.0), 330.0);
        assert_eq!(normalize_360(-360.0), 0.0);
    }

    #[test]
    fn signed_form() {
        assert_eq!(normalize_pm180(190.0), -170.0);
        assert_eq!(normalize_pm180(180.0), 180.0);
        assert_eq!(normalize_pm180(-190.0), 170.0);
        assert_eq!(normalize_pm180(10.0), 10.0);
    }

    #[test]
    fn never_out_of_range() {
        let mut deg = -1000.0;
        while deg < 1000.0 {
            let n = normalize_360(deg);
            assert!((0.0..360.0).contains(&n), "{deg} -> {n}");
            let s = normalize_pm180(deg);
            assert!(s > -180.0 && s <= 180.0, "{deg} -> {s}");
            deg += 7.3;
        }
    }
}
