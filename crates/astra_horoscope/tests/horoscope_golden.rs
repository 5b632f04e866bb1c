//! End-to-end horoscope fixtures.
//!
//! The fixture chart is the Moscow noon birth (1990-06-15 12:00 UTC+3):
//! Gemini Sun in the 10th house, Pisces Moon, Virgo rising. Transits
//! are taken at the natal instant, where every planet conjoins its own
//! natal position, so the ranked transit list, the section matching,
//! and all three timeline slots are fully determined.

use astra_chart::{BirthInfo, HouseSystem, NatalChart};
use astra_ephem::Provider;
use astra_horoscope::{
    BLOCKLIST, Category, DailyHoroscope, InterpretationMode, MAX_KEY_TRANSITS, MAX_LINE_CHARS,
    MAX_TLDR_LINES, Personalization, RuleTable, Topic, build_daily, compose_friendly, content,
    resolve_interpretation,
};
use astra_time::{CivilDate, CivilTime, TimezoneSpec};
use astra_transit::TransitSnapshot;

fn moscow_chart() -> NatalChart {
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
    NatalChart::compute(&provider, &birth).unwrap()
}

fn natal_instant_day(chart: &NatalChart, table: &RuleTable) -> DailyHoroscope {
    let provider = Provider::detect();
    let snapshot = TransitSnapshot::capture(&provider, chart.jd_ut).unwrap();
    build_daily(chart, &snapshot, table, CivilDate::new(1990, 6, 15))
}

// --- daily assembly ---

#[test]
fn full_day_document_is_complete_and_stable() {
    let chart = moscow_chart();
    let table = RuleTable::builtin();
    let day = natal_instant_day(&chart, &table);

    assert_eq!(day.date_iso, "1990-06-15");
    assert_eq!(day.key_transits.len(), MAX_KEY_TRANSITS);
    assert!(day.key_transits[0].starts_with("Sun conjunction natal Sun"));
    assert!(!day.tldr.is_empty() && day.tldr.len() <= MAX_TLDR_LINES);
    assert!(day.moon_tip.starts_with("Moon in Pisces"));
    assert!(!day.timeline.morning.is_empty());
    assert!(!day.timeline.evening.is_empty());

    assert_eq!(day, natal_instant_day(&chart, &table));
}

#[test]
fn active_sky_beats_every_category_filler() {
    // The built-in table carries an unconstrained backstop rule per
    // category, so any day with at least one active transit gets rule
    // text everywhere, never a filler.
    let day = natal_instant_day(&moscow_chart(), &RuleTable::builtin());
    for (category, text) in day.sections.iter() {
        assert_ne!(text, content::category_filler(category), "{category}");
        assert!(!text.is_empty());
    }
}

#[test]
fn custom_rules_drive_the_sections() {
    let json = r#"{
        "rules": [
            {
                "id": "sun-return",
                "priority": 99,
                "category": "growth",
                "pattern": { "type": "aspect", "transiting": "sun", "natal": "sun",
                             "aspect": "conjunction", "min_strength": 0.9 },
                "text": "Solar return energy: the {aspect} lands in {sign}."
            },
            {
                "id": "tenth-house-sun",
                "priority": 99,
                "category": "work",
                "pattern": { "type": "placement", "body": "sun", "sign": null, "house": 10 },
                "text": "Born for the {house} house spotlight."
            }
        ]
    }"#;
    let table = RuleTable::from_json(json).unwrap();
    let day = natal_instant_day(&moscow_chart(), &table);

    // The aspect rule fills from the matched transit, the placement
    // rule from the natal chart.
    assert_eq!(
        day.sections.growth,
        "Solar return energy: the conjunction lands in Gemini."
    );
    assert_eq!(day.sections.work, "Born for the 10th house spotlight.");
    // No love/health rules in this table, so the fillers stay.
    assert_eq!(
        day.sections.love,
        content::category_filler(Category::Love)
    );
}

#[test]
fn later_date_changes_the_document() {
    let chart = moscow_chart();
    let provider = Provider::detect();
    let birthday_2024 = astra_time::resolve_jd_ut(
        CivilDate::new(2024, 6, 15),
        Some(CivilTime {
            hour: 12,
            minute: 0,
            second: 0.0,
        }),
        &TimezoneSpec::Utc,
    )
    .unwrap()
    .0;
    let snapshot = TransitSnapshot::capture(&provider, birthday_2024).unwrap();
    let day = build_daily(
        &chart,
        &snapshot,
        &RuleTable::builtin(),
        CivilDate::new(2024, 6, 15),
    );

    assert_eq!(day.date_iso, "2024-06-15");
    assert!(day.key_transits.len() <= MAX_KEY_TRANSITS);
    // The solar return keeps the birthday sky busy.
    assert!(!day.key_transits.is_empty());
    assert_ne!(day, natal_instant_day(&chart, &RuleTable::builtin()));
}

// --- friendly composition ---

#[test]
fn composed_output_is_capped_and_clean() {
    let chart = moscow_chart();
    let day = natal_instant_day(&chart, &RuleTable::builtin());
    let plain = Personalization {
        emoji: false,
        ..Personalization::default()
    };
    let out = compose_friendly(&day, &plain);

    let mut lines: Vec<&str> = Vec::new();
    lines.extend(out.tldr.iter().map(String::as_str));
    lines.extend(out.key_transits.iter().map(String::as_str));
    lines.extend(out.sections.iter().map(|(_, text)| text));
    lines.push(&out.moon_tip);
    lines.push(&out.timeline.morning);
    lines.push(&out.timeline.day);
    lines.push(&out.timeline.evening);

    for line in lines {
        assert!(!line.is_empty());
        assert!(
            line.chars().count() <= MAX_LINE_CHARS,
            "over cap: {line:?}"
        );
        let lower = line.to_ascii_lowercase();
        for term in BLOCKLIST {
            assert!(!lower.contains(term), "{term:?} in {line:?}");
        }
    }

    assert_eq!(out, compose_friendly(&day, &plain));
}

#[test]
fn emoji_and_greeting_when_asked() {
    let day = natal_instant_day(&moscow_chart(), &RuleTable::builtin());
    let who = Personalization {
        name: Some("Ana".to_string()),
        ..Personalization::default()
    };
    let out = compose_friendly(&day, &who);

    assert_eq!(out.tldr[0], "Hey Ana!");
    assert!(out.tldr.len() <= MAX_TLDR_LINES);
    for (category, text) in out.sections.iter() {
        assert!(text.starts_with(category.emoji()), "{category}: {text}");
    }
}

// --- interpretation ---

#[test]
fn interpretation_covers_the_chart_and_narrows_by_topic() {
    let chart = moscow_chart();
    let full = resolve_interpretation(&chart, InterpretationMode::Friendly, None);

    assert_eq!(full[0].title, "Sun in Gemini");
    assert_eq!(full[2].title, "Ascendant in Virgo");
    assert!(full.iter().any(|s| s.title == "Sun in the 10th house"));
    assert!(full.windows(2).all(|w| w[0].priority <= w[1].priority));

    for topic in Topic::ALL {
        let narrowed = resolve_interpretation(&chart, InterpretationMode::Friendly, Some(topic));
        assert!(narrowed.iter().all(|s| full.contains(s)), "{topic}");
    }

    let career = resolve_interpretation(&chart, InterpretationMode::Friendly, Some(Topic::Career));
    assert!(career.iter().all(|s| s.references(Topic::Career.referents())));
    assert!(career.iter().any(|s| s.title == "Sun in Gemini"));
}

// --- serialization ---

#[test]
fn documents_serialize_for_the_host() {
    let chart = moscow_chart();
    let day = natal_instant_day(&chart, &RuleTable::builtin());
    let json = serde_json::to_string(&day).unwrap();
    assert!(json.contains("\"date_iso\":\"1990-06-15\""));
    assert!(json.contains("\"tldr\""));
    assert!(json.contains("\"timeline\""));

    let sections = resolve_interpretation(&chart, InterpretationMode::Deep, None);
    let json = serde_json::to_string(&sections).unwrap();
    assert!(json.contains("\"priority\":1"));
    // Referents are an internal filtering detail.
    assert!(!json.contains("referents"));
}
