//! Placing a longitude into the house wheel.

use crate::houses::arc_forward;

/// House (1..=12) containing `lon_deg`.
///
/// A body sits in the house whose cusp lies closest behind it in
/// zodiacal order. Cusps are lower-inclusive: a body exactly on a cusp
/// belongs to the house that cusp opens.
pub fn house_of(cusps_deg: &[f64; 12], lon_deg: f64) -> u8 {
    let mut best = 0;
    let mut best_arc = f64::MAX;
    for (i, &cusp) in cusps_deg.iter().enumerate() {
        let arc = arc_forward(cusp, lon_deg);
        if arc < best_arc {
            best_arc = arc;
            best = i;
        }
    }
    best as u8 + 1
}
