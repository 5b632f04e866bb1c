//! Facade error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

use astra_chart::ChartError;
use astra_ephem::EphemError;
use astra_horoscope::RuleError;

/// Errors surfaced by the high-level API.
#[derive(Debug)]
#[non_exhaustive]
pub enum AstraError {
    /// No provider installed; call [`crate::init`] or
    /// [`crate::init_default`] first.
    NotInitialized,
    Chart(ChartError),
    Ephemeris(EphemError),
    Rules(RuleError),
}

impl Display for AstraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotInitialized => {
                write!(f, "astra is not initialized; call init() or init_default()")
            }
            Self::Chart(e) => write!(f, "chart error: {e}"),
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
            Self::Rules(e) => write!(f, "rule table error: {e}"),
        }
    }
}

impl Error for AstraError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotInitialized => None,
            Self::Chart(e) => Some(e),
            Self::Ephemeris(e) => Some(e),
            Self::Rules(e) => Some(e),
        }
    }
}

impl From<ChartError> for AstraError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}

impl From<EphemError> for AstraError {
    fn from(e: EphemError) -> Self {
        Self::Ephemeris(e)
    }
}

impl From<RuleError> for AstraError {
    fn from(e: RuleError) -> Self {
        Self::Rules(e)
    }
}
