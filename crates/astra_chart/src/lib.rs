//! Natal chart construction: signs, houses, aspects, and the assembled
//! chart.
//!
//! The crate takes birth data ([`BirthInfo`]) and an ephemeris
//! [`Provider`](astra_ephem::Provider) and produces a [`NatalChart`]:
//! every tracked body placed by sign and house, the house wheel with its
//! angles, and the major aspects between planets. Degraded conditions
//! (unknown birth time, polar latitude, fallback ephemeris) are reported
//! as [`ChartWarning`] values on the chart rather than errors; only
//! structurally invalid input fails.
//!
//! House systems: Placidus (default) with automatic Whole-Sign
//! substitution above [`POLAR_LATITUDE_LIMIT_DEG`], or Whole-Sign on
//! request.

pub mod aspects;
pub mod assign;
pub mod chart;
pub mod error;
pub mod houses;
pub mod input;
pub mod zodiac;

pub use aspects::{Aspect, AspectKind, classify, natal_aspects, separation_deg};
pub use assign::house_of;
pub use chart::{BigThree, BodyPlacement, NatalChart};
pub use error::{ChartError, ChartWarning};
pub use houses::{
    Confidence, HouseWheel, POLAR_LATITUDE_LIMIT_DEG, arc_forward, compute_houses,
    whole_sign_cusps,
};
pub use input::{BirthInfo, HouseSystem};
pub use zodiac::{ALL_SIGNS, Dms, Element, Modality, Sign, SignPosition, deg_to_dms, sign_position};
