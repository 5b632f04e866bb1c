//! Major-aspect detection between chart bodies.

use std::fmt;
use std::str::FromStr;

use astra_ephem::{Body, PositionSet};

/// The five Ptolemaic aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const COUNT: usize = 5;

    pub const ALL: [AspectKind; AspectKind::COUNT] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle of the aspect in degrees.
    pub const fn angle_deg(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    /// Widest orb at which the aspect still registers.
    pub const fn max_orb_deg(self) -> f64 {
        match self {
            AspectKind::Conjunction => 8.0,
            AspectKind::Sextile => 4.0,
            AspectKind::Square => 6.0,
            AspectKind::Trine => 6.0,
            AspectKind::Opposition => 8.0,
        }
    }

    /// Hard aspects carry tension; soft ones ease. Conjunctions count
    /// as hard for ranking.
    pub const fn is_hard(self) -> bool {
        matches!(
            self,
            AspectKind::Conjunction | AspectKind::Square | AspectKind::Opposition
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "☌",
            AspectKind::Sextile => "⚹",
            AspectKind::Square => "□",
            AspectKind::Trine => "△",
            AspectKind::Opposition => "☍",
        }
    }

    /// Linear strength in [0, 1]: 1 at exact, 0 at the orb edge.
    pub fn strength(self, orb_deg: f64) -> f64 {
        (1.0 - orb_deg / self.max_orb_deg()).clamp(0.0, 1.0)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AspectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "conjunction" => Ok(AspectKind::Conjunction),
            "sextile" => Ok(AspectKind::Sextile),
            "square" => Ok(AspectKind::Square),
            "trine" => Ok(AspectKind::Trine),
            "opposition" => Ok(AspectKind::Opposition),
            other => Err(format!("unknown aspect {other:?}")),
        }
    }
}

/// Smallest angular separation between two longitudes, degrees [0, 180].
pub fn separation_deg(lon_a: f64, lon_b: f64) -> f64 {
    let d = (lon_a - lon_b).rem_euclid(360.0);
    if d > 180.0 { 360.0 - d } else { d }
}

/// Which aspect, if any, a separation falls into, with its orb.
///
/// The five orb windows are disjoint, so a separation matches at most
/// one aspect.
pub fn classify(separation_deg: f64) -> Option<(AspectKind, f64)> {
    for kind in AspectKind::ALL {
        let orb = (separation_deg - kind.angle_deg()).abs();
        if orb <= kind.max_orb_deg() {
            return Some((kind, orb));
        }
    }
    None
}

/// A detected aspect between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aspect {
    pub a: Body,
    pub b: Body,
    pub kind: AspectKind,
    pub orb_deg: f64,
    /// 1 at exact, fading linearly to 0 at the orb edge.
    pub strength: f64,
}

impl Aspect {
    /// Detect the aspect between two placed bodies, if their separation
    /// falls inside an orb window.
    pub fn detect(a: Body, lon_a: f64, b: Body, lon_b: f64) -> Option<Aspect> {
        let (kind, orb_deg) = classify(separation_deg(lon_a, lon_b))?;
        Some(Aspect {
            a,
            b,
            kind,
            orb_deg,
            strength: kind.strength(orb_deg),
        })
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (orb {:.2}°)",
            self.a, self.kind, self.b, self.orb_deg
        )
    }
}

/// All aspects among the ten chart planets, in fixed pair order
/// (Sun–Moon, Sun–Mercury, …), which keeps output deterministic.
pub fn natal_aspects(set: &PositionSet) -> Vec<Aspect> {
    let mut found = Vec::new();
    for (i, &a) in Body::CHART.iter().enumerate() {
        for &b in &Body::CHART[i + 1..] {
            let lon_a = set.state(a).lon_deg;
            let lon_b = set.state(b).lon_deg;
            if let Some(aspect) = Aspect::detect(a, lon_a, b, lon_b) {
                found.push(aspect);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_is_symmetric_and_bounded() {
        assert_eq!(separation_deg(10.0, 130.0), 120.0);
        assert_eq!(separation_deg(130.0, 10.0), 120.0);
        assert_eq!(separation_deg(350.0, 10.0), 20.0);
        assert_eq!(separation_deg(0.0, 180.0), 180.0);
        assert_eq!(separation_deg(42.0, 42.0), 0.0);
    }

    #[test]
    fn exact_trine_has_full_strength() {
        let aspect = Aspect::detect(Body::Sun, 10.0, Body::Moon, 130.0).unwrap();
        assert_eq!(aspect.kind, AspectKind::Trine);
        assert_eq!(aspect.orb_deg, 0.0);
        assert_eq!(aspect.strength, 1.0);
    }

    #[test]
    fn strength_fades_to_zero_at_the_orb_edge() {
        assert_eq!(AspectKind::Square.strength(0.0), 1.0);
        assert_eq!(AspectKind::Square.strength(3.0), 0.5);
        assert_eq!(AspectKind::Square.strength(6.0), 0.0);
        assert_eq!(AspectKind::Square.strength(7.0), 0.0);
    }

    #[test]
    fn orb_windows_are_disjoint() {
        // No separation can land in two windows at once.
        let mut sep = 0.0;
        while sep <= 180.0 {
            let hits = AspectKind::ALL
                .iter()
                .filter(|k| (sep - k.angle_deg()).abs() <= k.max_orb_deg())
                .count();
            assert!(hits <= 1, "separation {sep}° hits {hits} windows");
            sep += 0.05;
        }
    }

    #[test]
    fn classify_edges() {
        assert_eq!(classify(8.0), Some((AspectKind::Conjunction, 8.0)));
        assert_eq!(classify(8.1), None);
        assert_eq!(classify(56.0), Some((AspectKind::Sextile, 4.0)));
        assert_eq!(classify(50.0), None);
        assert_eq!(classify(172.0), Some((AspectKind::Opposition, 8.0)));
        assert_eq!(classify(100.0), None);
    }

    #[test]
    fn hardness_split() {
        assert!(AspectKind::Conjunction.is_hard());
        assert!(AspectKind::Square.is_hard());
        assert!(AspectKind::Opposition.is_hard());
        assert!(!AspectKind::Sextile.is_hard());
        assert!(!AspectKind::Trine.is_hard());
    }

    #[test]
    fn detection_order_is_pairwise_stable() {
        let a = Aspect::detect(Body::Sun, 0.0, Body::Moon, 121.0).unwrap();
        let b = Aspect::detect(Body::Sun, 0.0, Body::Moon, 121.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.a, Body::Sun);
        assert_eq!(a.b, Body::Moon);
    }

    #[test]
    fn parse_aspect_names() {
        assert_eq!("trine".parse::<AspectKind>(), Ok(AspectKind::Trine));
        assert_eq!("Square".parse::<AspectKind>(), Ok(AspectKind::Square));
        assert!("quincunx".parse::<AspectKind>().is_err());
    }
}
