//! Zodiac signs and DMS (degrees-minutes-seconds) formatting.
//!
//! The ecliptic circle divides into 12 equal signs of 30 degrees each,
//! starting from Aries at 0 degrees. Given an ecliptic longitude we
//! identify the sign and express the position as degrees within it.

use astra_ephem::normalize_360;

/// The 12 zodiac signs starting from Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All 12 signs in zodiacal order (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

/// The four classical elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Air => "Air",
            Self::Water => "Water",
        }
    }
}

/// The three modalities (quadruplicities).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Modality {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cardinal => "Cardinal",
            Self::Fixed => "Fixed",
            Self::Mutable => "Mutable",
        }
    }
}

impl Sign {
    /// English name of the sign.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Astrological glyph.
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Aries => "♈",
            Self::Taurus => "♉",
            Self::Gemini => "♊",
            Self::Cancer => "♋",
            Self::Leo => "♌",
            Self::Virgo => "♍",
            Self::Libra => "♎",
            Self::Scorpio => "♏",
            Self::Sagittarius => "♐",
            Self::Capricorn => "♑",
            Self::Aquarius => "♒",
            Self::Pisces => "♓",
        }
    }

    /// 0-based index (Aries=0 .. Pisces=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Aries => 0,
            Self::Taurus => 1,
            Self::Gemini => 2,
            Self::Cancer => 3,
            Self::Leo => 4,
            Self::Virgo => 5,
            Self::Libra => 6,
            Self::Scorpio => 7,
            Self::Sagittarius => 8,
            Self::Capricorn => 9,
            Self::Aquarius => 10,
            Self::Pisces => 11,
        }
    }

    /// Element, repeating Fire/Earth/Air/Water around the circle.
    pub const fn element(self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }

    /// Modality, repeating Cardinal/Fixed/Mutable around the circle.
    pub const fn modality(self) -> Modality {
        match self {
            Self::Aries | Self::Cancer | Self::Libra | Self::Capricorn => Modality::Cardinal,
            Self::Taurus | Self::Leo | Self::Scorpio | Self::Aquarius => Modality::Fixed,
            Self::Gemini | Self::Virgo | Self::Sagittarius | Self::Pisces => Modality::Mutable,
        }
    }

    /// Ecliptic longitude where the sign begins, degrees.
    pub const fn start_deg(self) -> f64 {
        self.index() as f64 * 30.0
    }

    /// Sign containing an ecliptic longitude.
    ///
    /// Each sign spans exactly 30 degrees: Aries = [0, 30), Taurus =
    /// [30, 60), and so on. Any finite longitude maps to a sign.
    pub fn from_longitude(lon_deg: f64) -> Sign {
        let lon = normalize_360(lon_deg);
        // Clamp for the floating point edge at exactly 360.0.
        let idx = ((lon / 30.0).floor() as usize).min(11);
        ALL_SIGNS[idx]
    }

    /// All 12 signs in order.
    pub const fn all() -> &'static [Sign; 12] {
        &ALL_SIGNS
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Sign {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ALL_SIGNS
            .iter()
            .copied()
            .find(|sign| sign.name().to_ascii_lowercase() == lower)
            .ok_or(())
    }
}

/// Degrees-minutes-seconds representation of an angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    /// Whole degrees (0..29 within a sign, or 0..359 standalone).
    pub degrees: u16,
    /// Arc-minutes (0..59).
    pub minutes: u8,
    /// Arc-seconds (0.0..60.0), may include a fractional part.
    pub seconds: f64,
}

impl std::fmt::Display for Dms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°{:02}′{:02.0}″", self.degrees, self.minutes, self.seconds)
    }
}

/// Convert decimal degrees to degrees-minutes-seconds.
///
/// Handles negative input by taking the absolute value.
pub fn deg_to_dms(deg: f64) -> Dms {
    let d = deg.abs();
    let total_degrees = d.floor() as u16;
    let remainder = (d - total_degrees as f64) * 60.0;
    let minutes = remainder.floor() as u8;
    let seconds = (remainder - minutes as f64) * 60.0;
    Dms {
        degrees: total_degrees,
        minutes,
        seconds,
    }
}

/// A longitude resolved into sign plus position within the sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignPosition {
    pub sign: Sign,
    /// Decimal degrees within the sign, [0.0, 30.0).
    pub degrees_in_sign: f64,
    /// Position within the sign as DMS.
    pub dms: Dms,
}

/// Resolve an ecliptic longitude into a [`SignPosition`].
pub fn sign_position(lon_deg: f64) -> SignPosition {
    let lon = normalize_360(lon_deg);
    let sign = Sign::from_longitude(lon);
    let degrees_in_sign = lon - sign.start_deg();
    SignPosition {
        sign,
        degrees_in_sign,
        dms: deg_to_dms(degrees_in_sign),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_in_order() {
        for (i, s) in ALL_SIGNS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
            assert!(!s.name().is_empty());
            assert!(!s.glyph().is_empty());
        }
    }

    #[test]
    fn sign_boundaries_are_lower_inclusive() {
        for i in 0..12u8 {
            let lon = i as f64 * 30.0;
            assert_eq!(Sign::from_longitude(lon).index(), i, "boundary at {lon}°");
        }
    }

    #[test]
    fn sign_is_periodic() {
        for k in [-2.0, -1.0, 0.0, 1.0, 3.0] {
            assert_eq!(Sign::from_longitude(84.2 + 360.0 * k), Sign::Gemini);
        }
    }

    #[test]
    fn negative_longitude_wraps() {
        assert_eq!(Sign::from_longitude(-10.0), Sign::Pisces);
    }

    #[test]
    fn exact_360_clamps_to_aries() {
        assert_eq!(Sign::from_longitude(360.0), Sign::Aries);
    }

    #[test]
    fn elements_cycle_in_fours() {
        assert_eq!(Sign::Aries.element(), Element::Fire);
        assert_eq!(Sign::Taurus.element(), Element::Earth);
        assert_eq!(Sign::Gemini.element(), Element::Air);
        assert_eq!(Sign::Cancer.element(), Element::Water);
        assert_eq!(Sign::Leo.element(), Element::Fire);
        assert_eq!(Sign::Pisces.element(), Element::Water);
    }

    #[test]
    fn modalities_cycle_in_threes() {
        assert_eq!(Sign::Aries.modality(), Modality::Cardinal);
        assert_eq!(Sign::Taurus.modality(), Modality::Fixed);
        assert_eq!(Sign::Gemini.modality(), Modality::Mutable);
        assert_eq!(Sign::Capricorn.modality(), Modality::Cardinal);
    }

    #[test]
    fn parse_sign_names() {
        assert_eq!("gemini".parse::<Sign>().unwrap(), Sign::Gemini);
        assert_eq!("  Scorpio ".parse::<Sign>().unwrap(), Sign::Scorpio);
        assert!("ophiuchus".parse::<Sign>().is_err());
    }

    #[test]
    fn dms_known_value() {
        // 23.853° = 23°51′10.8″
        let d = deg_to_dms(23.853);
        assert_eq!(d.degrees, 23);
        assert_eq!(d.minutes, 51);
        assert!((d.seconds - 10.8).abs() < 0.01);
    }

    #[test]
    fn dms_exact_minutes() {
        let d = deg_to_dms(10.5);
        assert_eq!(d.degrees, 10);
        assert_eq!(d.minutes, 30);
        assert!(d.seconds.abs() < 0.01);
    }

    #[test]
    fn sign_position_mid_sign() {
        let p = sign_position(45.5);
        assert_eq!(p.sign, Sign::Taurus);
        assert!((p.degrees_in_sign - 15.5).abs() < 1e-10);
        assert_eq!(p.dms.degrees, 15);
        assert_eq!(p.dms.minutes, 30);
    }

    #[test]
    fn sign_position_wraps() {
        let p = sign_position(365.0);
        assert_eq!(p.sign, Sign::Aries);
        assert!((p.degrees_in_sign - 5.0).abs() < 1e-10);
    }
}
