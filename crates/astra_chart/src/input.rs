//! Birth data input and validation.

use astra_time::{CivilDate, CivilTime, TimezoneSpec};

use crate::error::ChartError;

/// The two supported house division systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HouseSystem {
    /// Time-based semi-arc division; substituted by Whole-Sign at polar
    /// latitudes.
    #[default]
    Placidus,
    /// Each house is one full sign, house 1 starting at the Ascendant's
    /// sign boundary.
    WholeSign,
}

impl HouseSystem {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Placidus => "Placidus",
            Self::WholeSign => "Whole Sign",
        }
    }
}

impl std::fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HouseSystem {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placidus" => Ok(Self::Placidus),
            "wholesign" | "whole-sign" | "whole_sign" | "whole sign" => Ok(Self::WholeSign),
            _ => Err(()),
        }
    }
}

/// Everything a natal chart is computed from.
///
/// `time: None` means the birth time is unknown; local noon is assumed
/// and house-dependent output is marked low-confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthInfo {
    pub date: CivilDate,
    pub time: Option<CivilTime>,
    pub timezone: TimezoneSpec,
    /// Geodetic latitude in degrees, north positive. Range [-90, 90].
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive. Range [-180, 180].
    pub longitude_deg: f64,
    pub house_system: HouseSystem,
}

impl BirthInfo {
    pub fn new(
        date: CivilDate,
        time: Option<CivilTime>,
        timezone: TimezoneSpec,
        latitude_deg: f64,
        longitude_deg: f64,
        house_system: HouseSystem,
    ) -> Self {
        Self {
            date,
            time,
            timezone,
            latitude_deg,
            longitude_deg,
            house_system,
        }
    }

    /// Check every field that can be structurally invalid.
    ///
    /// Timezone names are deliberately not checked here; an unknown name
    /// degrades to UTC with a warning at resolution time.
    pub fn validate(&self) -> Result<(), ChartError> {
        self.date.validate()?;
        if let Some(time) = &self.time {
            time.validate()?;
        }
        self.timezone.validate()?;
        if !self.latitude_deg.is_finite() || self.latitude_deg.abs() > 90.0 {
            return Err(ChartError::InvalidCoordinate {
                field: "latitude",
                value: self.latitude_deg,
            });
        }
        if !self.longitude_deg.is_finite() || self.longitude_deg.abs() > 180.0 {
            return Err(ChartError::InvalidCoordinate {
                field: "longitude",
                value: self.longitude_deg,
            });
        }
        Ok(())
    }

    pub fn time_unknown(&self) -> bool {
        self.time.is_none()
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}
