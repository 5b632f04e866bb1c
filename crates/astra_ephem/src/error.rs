//! Ephemeris error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::body::Body;

/// Errors from ephemeris evaluation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemError {
    /// Instant outside the backend's validity range.
    EpochOutOfRange { jd: f64 },
    /// A backend produced a non-finite or out-of-band state. Treated as a
    /// backend failure so the provider can fall through.
    InvalidState { body: Body, detail: &'static str },
    /// Every configured backend refused the instant.
    Exhausted { jd: f64 },
}

impl Display for EphemError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EpochOutOfRange { jd } => {
                write!(f, "JD {jd} outside the ephemeris validity range")
            }
            Self::InvalidState { body, detail } => {
                write!(f, "invalid state for {body}: {detail}")
            }
            Self::Exhausted { jd } => {
                write!(f, "no ephemeris backend could evaluate JD {jd}")
            }
        }
    }
}

impl Error for EphemError {}
