//! Transit detection and ranking.
//!
//! Every transiting planet is tested against every natal planet with the
//! same orb windows as natal aspects, then filtered to a tighter
//! "active" threshold. The ranked list is a total order, so callers can
//! truncate it anywhere and still get stable output.

use std::cmp::Ordering;
use std::fmt;

use astra_chart::{AspectKind, NatalChart, classify, separation_deg};
use astra_ephem::Body;

use crate::snapshot::TransitSnapshot;

/// Default orb below which a transit counts as active.
///
/// Hosts may widen it up to each aspect's own orb window; separations
/// outside those windows never classify at all.
pub const ACTIVE_ORB_DEG: f64 = 3.0;

/// Forward step used to decide applying vs separating.
const APPLYING_STEP_DAYS: f64 = 0.01;

/// One transiting-to-natal contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transit {
    pub transiting: Body,
    pub natal: Body,
    pub kind: AspectKind,
    pub orb_deg: f64,
    /// 1 at exact, fading linearly to 0 at the aspect's orb edge.
    pub strength: f64,
    /// True while the transiting body's motion tightens the orb.
    pub applying: bool,
    pub transiting_retrograde: bool,
}

impl Transit {
    /// Ranking order: strongest first, ties broken by transiting-body
    /// importance, then natal-body importance, then hard aspects before
    /// soft. Total over distinct transits.
    pub fn rank_cmp(&self, other: &Transit) -> Ordering {
        other
            .strength
            .total_cmp(&self.strength)
            .then_with(|| self.transiting.importance().cmp(&other.transiting.importance()))
            .then_with(|| self.natal.importance().cmp(&other.natal.importance()))
            .then_with(|| other.kind.is_hard().cmp(&self.kind.is_hard()))
    }

    /// `"applying"` or `"separating"`, for display.
    pub fn motion_word(&self) -> &'static str {
        if self.applying { "applying" } else { "separating" }
    }
}

impl fmt::Display for Transit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} natal {} (orb {:.2}°, {})",
            self.transiting,
            self.kind,
            self.natal,
            self.orb_deg,
            self.motion_word()
        )
    }
}

/// Active transits of `snapshot` against `natal`, ranked.
pub fn active_transits(snapshot: &TransitSnapshot, natal: &NatalChart) -> Vec<Transit> {
    active_transits_within(snapshot, natal, ACTIVE_ORB_DEG)
}

/// Like [`active_transits`] with a caller-chosen orb ceiling.
pub fn active_transits_within(
    snapshot: &TransitSnapshot,
    natal: &NatalChart,
    max_orb_deg: f64,
) -> Vec<Transit> {
    let mut found = Vec::new();
    for &transiting in &Body::CHART {
        let state = snapshot.state(transiting);
        for &natal_body in &Body::CHART {
            let natal_lon = natal.placement(natal_body).state.lon_deg;
            let Some((kind, orb_deg)) = classify(separation_deg(state.lon_deg, natal_lon)) else {
                continue;
            };
            if orb_deg > max_orb_deg {
                continue;
            }
            found.push(Transit {
                transiting,
                natal: natal_body,
                kind,
                orb_deg,
                strength: kind.strength(orb_deg),
                applying: is_applying(state.lon_deg, state.speed_deg_per_day, natal_lon, kind),
                transiting_retrograde: state.is_retrograde(),
            });
        }
    }
    found.sort_by(Transit::rank_cmp);
    found
}

/// True when a short forward step of the transiting body tightens the
/// orb. The natal longitude never moves.
fn is_applying(transiting_lon: f64, speed_deg_per_day: f64, natal_lon: f64, kind: AspectKind) -> bool {
    let orb_now = (separation_deg(transiting_lon, natal_lon) - kind.angle_deg()).abs();
    let stepped_lon = transiting_lon + speed_deg_per_day * APPLYING_STEP_DAYS;
    let orb_next = (separation_deg(stepped_lon, natal_lon) - kind.angle_deg()).abs();
    orb_next < orb_now
}
