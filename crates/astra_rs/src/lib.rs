//! High-level astrology API.
//!
//! One [`init`] call installs the ephemeris provider; after that charts,
//! transits, horoscopes, and interpretations are plain function calls.
//! Chart computation is referentially transparent, so the bundled
//! [`ChartCache`] can be put in front of it; transit and horoscope
//! output depends on "now" and must not be cached beyond a short TTL.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use astra_rs::*;
//!
//! init_default();
//!
//! let birth = BirthInfo::new(
//!     CivilDate::new(1990, 6, 15),
//!     Some(CivilTime { hour: 12, minute: 0, second: 0.0 }),
//!     TimezoneSpec::FixedHours(3.0),
//!     55.7558,
//!     37.6173,
//!     HouseSystem::Placidus,
//! );
//! let chart = compute_chart(&birth).unwrap();
//! println!("Sun in {}", chart.sun_sign());
//!
//! let (snapshot, _transits) = compute_transits(&chart, None).unwrap();
//! let day = build_horoscope(&chart, &snapshot, &RuleTable::builtin());
//! let friendly = compose_friendly(&day, &Personalization::default());
//! println!("{}", friendly.tldr.join("\n"));
//! ```

pub mod cache;
pub mod convenience;
pub mod error;
pub mod global;
pub mod retry;

// Primary re-exports; callers should only need `use astra_rs::*`.
pub use cache::{ChartCache, Clock, SystemClock, fingerprint};
pub use convenience::{build_horoscope, compute_chart, compute_transits, jd_now, load_rules};
pub use error::AstraError;
pub use global::{init, init_default, is_initialized};
pub use retry::{RetryPolicy, Sleep, ThreadSleep};

// Re-export the layer types hosts handle directly.
pub use astra_chart::{
    Aspect, AspectKind, BigThree, BirthInfo, BodyPlacement, ChartError, ChartWarning, Confidence,
    HouseSystem, HouseWheel, NatalChart, Sign, SignPosition,
};
pub use astra_ephem::{Body, EclipticState, EphemError, EphemerisGrade, Provider};
pub use astra_horoscope::{
    Category, DailyHoroscope, FriendlyHoroscope, InterpretationMode, InterpretationSection,
    Personalization, RuleError, RuleTable, Timeline, Topic, compose_friendly,
    resolve_interpretation,
};
pub use astra_time::{CivilDate, CivilTime, JulianDay, TimeError, TimeWarning, TimezoneSpec};
pub use astra_transit::{ACTIVE_ORB_DEG, Transit, TransitSnapshot, active_transits};
