//! High-level operations over the global provider.

use astra_chart::{BirthInfo, ChartWarning, NatalChart};
use astra_horoscope::{DailyHoroscope, RuleTable, build_daily};
use astra_time::{CivilDate, CivilTime, JulianDay};
use astra_transit::{Transit, TransitSnapshot, active_transits};
use chrono::{Datelike, Timelike, Utc};

use crate::error::AstraError;
use crate::global::provider;

/// Compute a natal chart with the global provider.
///
/// Degradations a host operator should see are logged; the full warning
/// list stays on the chart itself.
pub fn compute_chart(birth: &BirthInfo) -> Result<NatalChart, AstraError> {
    let chart = NatalChart::compute(provider()?, birth)?;
    for warning in &chart.warnings {
        if let ChartWarning::TimezoneUnresolved { name } = warning {
            log::warn!("timezone {name:?} not recognized, chart used UTC");
        }
    }
    Ok(chart)
}

/// Snapshot the sky and detect active transits against a chart.
///
/// `when` defaults to the current system time.
pub fn compute_transits(
    natal: &NatalChart,
    when: Option<JulianDay>,
) -> Result<(TransitSnapshot, Vec<Transit>), AstraError> {
    let jd = when.unwrap_or_else(jd_now);
    let snapshot = TransitSnapshot::capture(provider()?, jd)?;
    let transits = active_transits(&snapshot, natal);
    Ok((snapshot, transits))
}

/// Assemble the daily horoscope for a chart against a snapshot.
///
/// The document date is the snapshot's UTC calendar date.
pub fn build_horoscope(
    natal: &NatalChart,
    snapshot: &TransitSnapshot,
    table: &RuleTable,
) -> DailyHoroscope {
    let (date, _) = snapshot.jd_ut().to_civil_utc();
    build_daily(natal, snapshot, table, date)
}

/// Parse and validate a JSON rule table.
pub fn load_rules(json: &str) -> Result<RuleTable, AstraError> {
    Ok(RuleTable::from_json(json)?)
}

/// The current instant as a Julian Day (UT).
pub fn jd_now() -> JulianDay {
    let now = Utc::now();
    let date = CivilDate::new(now.year(), now.month(), now.day());
    let time = CivilTime {
        hour: now.hour(),
        minute: now.minute(),
        second: f64::from(now.second()),
    };
    JulianDay::from_civil_utc(date, time)
}
