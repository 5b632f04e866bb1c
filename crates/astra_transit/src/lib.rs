//! Transit detection: today's sky against a natal chart.
//!
//! A [`TransitSnapshot`] captures where every tracked body stands at a
//! given instant; [`active_transits`] runs the snapshot against a natal
//! chart and returns the contacts within the active orb, ranked by a
//! total order so the head of the list is always the day's headline.

pub mod detect;
pub mod snapshot;

pub use detect::{ACTIVE_ORB_DEG, Transit, active_transits, active_transits_within};
pub use snapshot::TransitSnapshot;
