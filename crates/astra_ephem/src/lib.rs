//! Geocentric ecliptic ephemeris for the eleven chart bodies.
//!
//! Positions come from a chain of pluggable backends behind [`Provider`]:
//! a canonical series backend (Meeus solar theory, truncated ELP-2000/82
//! Moon, Standish mean elements for the planets) and a compact fallback
//! that trades accuracy for unlimited epoch coverage. Every backend is a
//! pure function of the Julian Date, which makes results memoizable and
//! referentially transparent.

pub mod angle;
pub mod body;
pub mod compact;
pub mod error;
pub mod provider;
pub mod series;
pub mod state;

mod kepler;
mod moon;
mod sun;

pub use angle::{normalize_360, normalize_pm180};
pub use body::Body;
pub use compact::CompactBackend;
pub use error::EphemError;
pub use provider::{
    CrossCheckReport, EphemerisBackend, Provider, agreement_tolerance_deg, cross_check,
};
pub use series::SeriesBackend;
pub use state::{EclipticState, EphemerisGrade, PositionSet};
