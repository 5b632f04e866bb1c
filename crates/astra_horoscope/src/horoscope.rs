//! Daily horoscope assembly.
//!
//! Pulls the day's active transits, runs them through a rule table, and
//! lays the results out as a fixed document: headline lines, the ranked
//! key transits, one section per life category, a Moon tip, and a
//! morning/day/evening timeline. Same chart, same sky, same table give
//! byte-identical output.

use serde::Serialize;

use astra_chart::{NatalChart, Sign};
use astra_time::CivilDate;
use astra_transit::{Transit, TransitSnapshot, active_transits};

use crate::category::{Category, CategorySections};
use crate::content;
use crate::rules::RuleTable;

/// Headline lines kept per day.
pub const MAX_TLDR_LINES: usize = 3;

/// Ranked transits surfaced per day.
pub const MAX_KEY_TRANSITS: usize = 3;

/// Rough thirds of the waking day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub morning: String,
    pub day: String,
    pub evening: String,
}

/// One day of guidance, fully assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyHoroscope {
    /// Calendar date the guidance is for, `YYYY-MM-DD`.
    pub date_iso: String,
    /// Up to [`MAX_TLDR_LINES`] headline lines.
    pub tldr: Vec<String>,
    /// Up to [`MAX_KEY_TRANSITS`] ranked transit descriptions.
    pub key_transits: Vec<String>,
    pub sections: CategorySections,
    pub moon_tip: String,
    pub timeline: Timeline,
}

/// Assemble the day's horoscope for one chart.
pub fn build_daily(
    natal: &NatalChart,
    snapshot: &TransitSnapshot,
    table: &RuleTable,
    date: CivilDate,
) -> DailyHoroscope {
    let transits = active_transits(snapshot, natal);
    let moon = snapshot.moon_sign();
    DailyHoroscope {
        date_iso: format!("{:04}-{:02}-{:02}", date.year, date.month, date.day),
        tldr: tldr_lines(&transits, moon),
        key_transits: transits
            .iter()
            .take(MAX_KEY_TRANSITS)
            .map(|t| t.to_string())
            .collect(),
        sections: build_sections(table, &transits, natal, snapshot),
        moon_tip: content::moon_tip(moon),
        timeline: build_timeline(&transits, moon),
    }
}

fn tldr_lines(transits: &[Transit], moon: Sign) -> Vec<String> {
    let mut lines = Vec::new();
    match transits.first() {
        Some(top) => {
            lines.push(format!(
                "Today's headline: {} {} your natal {}.",
                top.transiting,
                content::aspect_verb(top.kind),
                top.natal
            ));
            lines.push(moon_line(moon));
            if transits.len() > 1 {
                lines.push(format!(
                    "{} sky contacts are in play; pick your battles.",
                    transits.len()
                ));
            }
        }
        None => {
            lines.push("A quiet sky today; the initiative is yours.".to_string());
            lines.push(moon_line(moon));
        }
    }
    lines.truncate(MAX_TLDR_LINES);
    lines
}

fn moon_line(moon: Sign) -> String {
    format!(
        "Moon in {moon} keeps the tone {}.",
        content::sign_keyword(moon)
    )
}

/// One section per category: highest-priority matching rule wins, the
/// category filler covers a silent sky.
fn build_sections(
    table: &RuleTable,
    transits: &[Transit],
    natal: &NatalChart,
    snapshot: &TransitSnapshot,
) -> CategorySections {
    let mut sections = CategorySections::default();
    for category in Category::ALL {
        let text = table
            .iter()
            .filter(|rule| rule.category == category)
            .find_map(|rule| {
                rule.pattern
                    .matches(transits, natal, snapshot)
                    .map(|outcome| outcome.fill(&rule.text))
            })
            .unwrap_or_else(|| content::category_filler(category).to_string());
        *sections.get_mut(category) = text;
    }
    sections
}

/// Top three transits take the morning, day, and evening slots in rank
/// order; empty slots fall back to Moon-flavored rest notes.
fn build_timeline(transits: &[Transit], moon: Sign) -> Timeline {
    Timeline {
        morning: slot_line(
            transits.first(),
            format!(
                "Ease in; the Moon in {moon} sets a {} undertone.",
                content::sign_keyword(moon)
            ),
        ),
        day: slot_line(
            transits.get(1),
            "No exact contact forces your hand midday; keep it simple.".to_string(),
        ),
        evening: slot_line(
            transits.get(2),
            "The evening sky makes no demands; wind down early.".to_string(),
        ),
    }
}

fn slot_line(transit: Option<&Transit>, fallback: String) -> String {
    match transit {
        Some(t) => format!(
            "{} {} your natal {}.",
            t.transiting,
            content::aspect_verb(t.kind),
            t.natal
        ),
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use astra_chart::{BirthInfo, HouseSystem};
    use astra_ephem::Provider;
    use astra_time::{CivilTime, TimezoneSpec};

    fn chart_and_snapshot() -> (NatalChart, TransitSnapshot) {
        let provider = Provider::detect();
        let birth = BirthInfo::new(
            CivilDate::new(1990, 6, 15),
            Some(CivilTime {
                hour: 12,
                minute: 0,
                second: 0.0,
            }),
            TimezoneSpec::FixedHours(3.0),
            55.7558,
            37.6173,
            HouseSystem::Placidus,
        );
        let chart = NatalChart::compute(&provider, &birth).unwrap();
        let snapshot = TransitSnapshot::capture(&provider, chart.jd_ut).unwrap();
        (chart, snapshot)
    }

    #[test]
    fn natal_instant_horoscope_is_fully_populated() {
        let (chart, snapshot) = chart_and_snapshot();
        let day = build_daily(
            &chart,
            &snapshot,
            &RuleTable::builtin(),
            CivilDate::new(1990, 6, 15),
        );

        assert_eq!(day.date_iso, "1990-06-15");
        // At the birth instant every planet conjoins itself, so all
        // three transit slots fill.
        assert_eq!(day.key_transits.len(), MAX_KEY_TRANSITS);
        assert!(day.key_transits[0].starts_with("Sun conjunction natal Sun"));
        assert!(!day.tldr.is_empty() && day.tldr.len() <= MAX_TLDR_LINES);
        for (_, text) in day.sections.iter() {
            assert!(!text.is_empty());
        }
        assert!(day.moon_tip.starts_with("Moon in "));
        assert!(!day.timeline.morning.is_empty());
        assert!(!day.timeline.day.is_empty());
        assert!(!day.timeline.evening.is_empty());
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let (chart, snapshot) = chart_and_snapshot();
        let table = RuleTable::builtin();
        let date = CivilDate::new(1990, 6, 15);
        let a = build_daily(&chart, &snapshot, &table, date);
        let b = build_daily(&chart, &snapshot, &table, date);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_table_leaves_the_fillers() {
        let (chart, snapshot) = chart_and_snapshot();
        let table = RuleTable::from_rules(Vec::new()).unwrap();
        let day = build_daily(&chart, &snapshot, &table, CivilDate::new(1990, 6, 15));
        for (category, text) in day.sections.iter() {
            assert_eq!(text, content::category_filler(category));
        }
    }

    #[test]
    fn quiet_sky_headline_and_timeline() {
        let lines = tldr_lines(&[], Sign::Aries);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("quiet sky"));
        assert!(lines[1].contains("Moon in Aries"));

        let timeline = build_timeline(&[], Sign::Aries);
        assert!(timeline.morning.contains("Moon in Aries"));
        assert!(timeline.day.contains("keep it simple"));
        assert!(timeline.evening.contains("wind down"));
    }

    #[test]
    fn busy_sky_mentions_the_contact_count() {
        let (chart, snapshot) = chart_and_snapshot();
        let day = build_daily(
            &chart,
            &snapshot,
            &RuleTable::builtin(),
            CivilDate::new(1990, 6, 15),
        );
        assert_eq!(day.tldr.len(), MAX_TLDR_LINES);
        assert!(day.tldr[0].starts_with("Today's headline:"));
        assert!(day.tldr[2].contains("sky contacts are in play"));
    }
}
