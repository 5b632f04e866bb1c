//! End-to-end chart validation against independently known reference facts.
//!
//! The anchor scenario is Moscow, 1990-06-15 12:00 local (UTC+3, so
//! 09:00 UT, JD 2448057.875). Local sidereal time there is about
//! 5h08m (77.1°), which puts the MC near 78° (Gemini) with the Sun a
//! few degrees past it and Virgo rising near 171°. Angle tolerances
//! are loose enough to absorb almanac rounding in those references.

use astra_chart::{
    AspectKind, BirthInfo, ChartWarning, Confidence, HouseSystem, NatalChart, Sign, arc_forward,
};
use astra_ephem::{Body, EphemerisGrade, Provider};
use astra_time::{CivilDate, CivilTime, TimezoneSpec};

// ---------------------------------------------------------------------------
// Tolerances
// ---------------------------------------------------------------------------

/// Chart angles (ASC/MC) against hand-reduced sidereal-time references.
const ANGLE_TOL_DEG: f64 = 2.0;

/// Evaluated instant against the expected Julian day.
const JD_TOL_DAYS: f64 = 1.0 / 86_400.0;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn moscow_noon() -> BirthInfo {
    BirthInfo::new(
        CivilDate::new(1990, 6, 15),
        Some(CivilTime::new(12, 0, 0.0)),
        TimezoneSpec::FixedHours(3.0),
        55.7558,
        37.6173,
        HouseSystem::Placidus,
    )
}

fn provider() -> Provider {
    Provider::detect()
}

// ---------------------------------------------------------------------------
// Anchor scenario
// ---------------------------------------------------------------------------

#[test]
fn moscow_1990_chart_instant() {
    let chart = NatalChart::compute(&provider(), &moscow_noon()).unwrap();
    // 12:00 local at UTC+3 is 09:00 UT.
    assert!(
        (chart.jd_ut.ut() - 2_448_057.875).abs() < JD_TOL_DAYS,
        "jd = {}",
        chart.jd_ut
    );
    assert_eq!(chart.source, EphemerisGrade::Primary);
}

#[test]
fn moscow_1990_big_three() {
    let chart = NatalChart::compute(&provider(), &moscow_noon()).unwrap();
    assert_eq!(chart.big_three.sun, Sign::Gemini);
    assert_eq!(chart.big_three.moon, Sign::Pisces);
    assert_eq!(chart.big_three.ascendant, Sign::Virgo);
}

#[test]
fn moscow_1990_angles() {
    let chart = NatalChart::compute(&provider(), &moscow_noon()).unwrap();
    assert!(
        (chart.houses.mc_deg - 78.2).abs() < ANGLE_TOL_DEG,
        "mc = {}°",
        chart.houses.mc_deg
    );
    assert!(
        (chart.houses.ascendant_deg - 171.4).abs() < ANGLE_TOL_DEG,
        "asc = {}°",
        chart.houses.ascendant_deg
    );
    assert_eq!(chart.houses.system, HouseSystem::Placidus);
    assert_eq!(chart.houses.confidence, Confidence::Exact);
}

#[test]
fn moscow_1990_sun_culminates() {
    // Local noon: the Sun sits just past the MC, in house 10.
    let chart = NatalChart::compute(&provider(), &moscow_noon()).unwrap();
    let sun = chart.placement(Body::Sun);
    assert_eq!(sun.house, Some(10), "sun at {}°", sun.state.lon_deg);
    let past_mc = arc_forward(chart.houses.mc_deg, sun.state.lon_deg);
    assert!(past_mc < 15.0, "sun {past_mc}° past the MC");
}

// ---------------------------------------------------------------------------
// Structural properties
// ---------------------------------------------------------------------------

#[test]
fn placements_respect_their_house_intervals() {
    let chart = NatalChart::compute(&provider(), &moscow_noon()).unwrap();
    let cusps = &chart.houses.cusps_deg;
    for placement in &chart.placements {
        let house = placement.house.unwrap() as usize;
        let open = cusps[house - 1];
        let close = cusps[house % 12];
        let width = arc_forward(open, close);
        let offset = arc_forward(open, placement.state.lon_deg);
        assert!(
            offset < width,
            "{} at {}° outside house {house} [{open}°, {close}°)",
            placement.body,
            placement.state.lon_deg
        );
    }
}

#[test]
fn aspects_join_planets_only_within_orb() {
    let chart = NatalChart::compute(&provider(), &moscow_noon()).unwrap();
    for aspect in &chart.aspects {
        assert!(Body::CHART.contains(&aspect.a), "{aspect}");
        assert!(Body::CHART.contains(&aspect.b), "{aspect}");
        assert!(aspect.a.index() < aspect.b.index(), "{aspect}");
        assert!(aspect.orb_deg <= aspect.kind.max_orb_deg(), "{aspect}");
        assert!((0.0..=1.0).contains(&aspect.strength), "{aspect}");
    }
    // Sun and Mercury can never exceed a 28° elongation, so any aspect
    // between them is a conjunction.
    for aspect in &chart.aspects {
        if aspect.a == Body::Sun && aspect.b == Body::Mercury {
            assert_eq!(aspect.kind, AspectKind::Conjunction);
        }
    }
}

#[test]
fn chart_is_deterministic() {
    let p = provider();
    let a = NatalChart::compute(&p, &moscow_noon()).unwrap();
    let b = NatalChart::compute(&p, &moscow_noon()).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Degraded inputs
// ---------------------------------------------------------------------------

#[test]
fn unknown_time_assumes_noon() {
    let p = provider();
    let explicit = NatalChart::compute(&p, &moscow_noon()).unwrap();

    let mut birth = moscow_noon();
    birth.time = None;
    let assumed = NatalChart::compute(&p, &birth).unwrap();

    // Noon assumption lands on the same instant as the explicit chart.
    assert_eq!(assumed.jd_ut, explicit.jd_ut);
    assert_eq!(assumed.big_three.sun, explicit.big_three.sun);
    assert_eq!(assumed.big_three.moon, explicit.big_three.moon);
    // But the wheel is flagged, and the warning is carried.
    assert_eq!(assumed.houses.confidence, Confidence::Low);
    assert!(assumed.warnings.contains(&ChartWarning::TimeUnknown));
    assert!(explicit.warnings.is_empty());
}

#[test]
fn polar_birth_degrades_to_whole_sign() {
    let mut birth = moscow_noon();
    birth.latitude_deg = 80.0; // Longyearbyen latitude
    let chart = NatalChart::compute(&provider(), &birth).unwrap();

    assert_eq!(chart.houses.system, HouseSystem::WholeSign);
    assert!(
        chart
            .warnings
            .iter()
            .any(|w| matches!(w, ChartWarning::PolarLatitude { latitude_deg } if *latitude_deg == 80.0))
    );
    for cusp in chart.houses.cusps_deg {
        assert_eq!(cusp % 30.0, 0.0);
    }
    // Placements and aspects are unaffected by the substitution.
    assert_eq!(chart.placements.len(), Body::COUNT);
}

#[test]
fn whole_sign_request_is_honored_without_warnings() {
    let mut birth = moscow_noon();
    birth.house_system = HouseSystem::WholeSign;
    let chart = NatalChart::compute(&provider(), &birth).unwrap();

    assert_eq!(chart.houses.system, HouseSystem::WholeSign);
    assert!(chart.warnings.is_empty());
    // Virgo rising: house 1 opens at 150°.
    assert_eq!(chart.houses.cusps_deg[0], 150.0);
    // The true angles are kept even though cusps snap to boundaries.
    assert!((chart.houses.ascendant_deg - 171.4).abs() < ANGLE_TOL_DEG);
}

#[test]
fn unresolvable_zone_falls_back_to_utc_with_warning() {
    let mut birth = moscow_noon();
    birth.timezone = TimezoneSpec::Named("Mars/Olympus_Mons".into());
    let chart = NatalChart::compute(&provider(), &birth).unwrap();

    assert!(chart.warnings.iter().any(|w| matches!(
        w,
        ChartWarning::TimezoneUnresolved { name } if name == "Mars/Olympus_Mons"
    )));
    // Interpreted as UTC: three hours later than the +3 chart.
    assert!((chart.jd_ut.ut() - 2_448_058.0).abs() < JD_TOL_DAYS);
}

#[test]
fn southern_hemisphere_chart_is_well_formed() {
    // Sydney: -33.87, 151.21, UTC+10.
    let birth = BirthInfo::new(
        CivilDate::new(1985, 11, 3),
        Some(CivilTime::new(6, 30, 0.0)),
        TimezoneSpec::FixedHours(10.0),
        -33.8688,
        151.2093,
        HouseSystem::Placidus,
    );
    let chart = NatalChart::compute(&provider(), &birth).unwrap();

    assert_eq!(chart.houses.system, HouseSystem::Placidus);
    assert!(chart.warnings.is_empty());
    // Early November: Sun in Scorpio regardless of hemisphere.
    assert_eq!(chart.big_three.sun, Sign::Scorpio);
    let mut total = 0.0;
    for i in 0..12 {
        total += arc_forward(chart.houses.cusps_deg[i], chart.houses.cusps_deg[(i + 1) % 12]);
    }
    assert!((total - 360.0).abs() < 1e-6, "cusp ring sums to {total}°");
}
