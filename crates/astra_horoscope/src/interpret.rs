//! Natal interpretation: ranked canned sections from a chart.
//!
//! Sections assemble in four priority tiers (the big three, the Sun's
//! house, the remaining planet placements, tight natal aspects), then
//! an optional topic filter narrows the list. Everything is a pure
//! function of the chart, the mode, and the topic.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use astra_chart::{Aspect, BodyPlacement, NatalChart, Sign};
use astra_ephem::Body;

use crate::compose::capitalize;
use crate::content::{
    aspect_verb, house_domain, ordinal, planet_clause, planet_theme, sign_essence, sign_keyword,
};

/// Natal aspects tighter than this get a priority-4 section.
pub const TIGHT_ASPECT_ORB_DEG: f64 = 5.0;

/// How much text each section carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterpretationMode {
    /// One keyword phrase.
    Easy,
    /// A warm sentence.
    #[default]
    Friendly,
    /// Essence plus what the placement works on.
    Deep,
}

impl InterpretationMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Friendly => "friendly",
            Self::Deep => "deep",
        }
    }
}

impl fmt::Display for InterpretationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InterpretationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "friendly" => Ok(Self::Friendly),
            "deep" => Ok(Self::Deep),
            other => Err(format!("unknown interpretation mode {other:?}")),
        }
    }
}

/// Life-area lens for narrowing an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Love,
    Career,
    Health,
    Growth,
}

impl Topic {
    pub const COUNT: usize = 4;

    pub const ALL: [Topic; Topic::COUNT] =
        [Topic::Love, Topic::Career, Topic::Health, Topic::Growth];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Love => "love",
            Self::Career => "career",
            Self::Health => "health",
            Self::Growth => "growth",
        }
    }

    /// Chart features the topic cares about. A section survives the
    /// filter when it references at least one of these.
    pub fn referents(self) -> &'static [Referent] {
        match self {
            Topic::Love => &[
                Referent::Body(Body::Venus),
                Referent::Body(Body::Moon),
                Referent::House(5),
                Referent::House(7),
            ],
            Topic::Career => &[
                Referent::Body(Body::Sun),
                Referent::Body(Body::Saturn),
                Referent::House(10),
                Referent::Mc,
            ],
            Topic::Health => &[
                Referent::Body(Body::Mars),
                Referent::Body(Body::Saturn),
                Referent::House(1),
                Referent::House(6),
            ],
            Topic::Growth => &[
                Referent::Body(Body::Jupiter),
                Referent::Body(Body::Saturn),
                Referent::House(9),
                Referent::House(12),
            ],
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Topic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "love" => Ok(Self::Love),
            "career" => Ok(Self::Career),
            "health" => Ok(Self::Health),
            "growth" => Ok(Self::Growth),
            other => Err(format!("unknown topic {other:?}")),
        }
    }
}

/// A chart feature a section talks about; the unit topic filters see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Referent {
    Body(Body),
    House(u8),
    Ascendant,
    Mc,
}

/// One interpretation entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterpretationSection {
    pub title: String,
    pub content: String,
    /// 1 is most fundamental; output sorts ascending.
    pub priority: u8,
    #[serde(skip)]
    pub referents: Vec<Referent>,
}

impl InterpretationSection {
    pub fn references(&self, wanted: &[Referent]) -> bool {
        self.referents.iter().any(|r| wanted.contains(r))
    }
}

/// Assemble the full ranked interpretation, then narrow by topic.
///
/// The ascendant entry is always present: charts fall back to
/// Whole-Sign houses rather than dropping the angle, even when the
/// birth time was unknown.
pub fn resolve_interpretation(
    chart: &NatalChart,
    mode: InterpretationMode,
    topic: Option<Topic>,
) -> Vec<InterpretationSection> {
    let mut sections = Vec::new();

    let sun = chart.placement(Body::Sun);
    sections.push(body_sign_section(sun, 1, mode));
    sections.push(body_sign_section(chart.placement(Body::Moon), 1, mode));
    sections.push(ascendant_section(chart.big_three.ascendant, mode));

    if let Some(house) = sun.house {
        sections.push(sun_house_section(house, mode));
    }

    for &body in &Body::CHART[2..] {
        sections.push(body_sign_section(chart.placement(body), 3, mode));
    }

    for aspect in &chart.aspects {
        if aspect.orb_deg < TIGHT_ASPECT_ORB_DEG {
            sections.push(aspect_section(aspect, mode));
        }
    }

    // Assembly order is already ascending priority and stable within a
    // tier; the topic filter only narrows.
    if let Some(topic) = topic {
        let wanted = topic.referents();
        sections.retain(|s| s.references(wanted));
    }
    sections
}

fn body_sign_section(
    placement: &BodyPlacement,
    priority: u8,
    mode: InterpretationMode,
) -> InterpretationSection {
    let body = placement.body;
    let sign = placement.sign();
    let content = match mode {
        InterpretationMode::Easy => sentence(sign_keyword(sign)),
        InterpretationMode::Friendly => format!(
            "Your {body} in {sign} reads as {}; it colors your {}.",
            sign_keyword(sign),
            planet_theme(body)
        ),
        InterpretationMode::Deep => format!(
            "{sign} {}. {} here shapes {}.",
            sign_essence(sign),
            subject(body),
            planet_clause(body)
        ),
    };
    let mut referents = vec![Referent::Body(body)];
    if let Some(house) = placement.house {
        referents.push(Referent::House(house));
    }
    InterpretationSection {
        title: format!("{body} in {sign}"),
        content,
        priority,
        referents,
    }
}

fn ascendant_section(sign: Sign, mode: InterpretationMode) -> InterpretationSection {
    let content = match mode {
        InterpretationMode::Easy => sentence(sign_keyword(sign)),
        InterpretationMode::Friendly => format!(
            "With {sign} rising you come across as {}.",
            sign_keyword(sign)
        ),
        InterpretationMode::Deep => format!(
            "{sign} {}. Rising, it sets the first impression you make before you say a word.",
            sign_essence(sign)
        ),
    };
    InterpretationSection {
        title: format!("Ascendant in {sign}"),
        content,
        priority: 1,
        referents: vec![Referent::Ascendant, Referent::House(1)],
    }
}

fn sun_house_section(house: u8, mode: InterpretationMode) -> InterpretationSection {
    let domain = house_domain(house);
    let nth = ordinal(house);
    let content = match mode {
        InterpretationMode::Easy => sentence(domain),
        InterpretationMode::Friendly => {
            format!("Your Sun does its daily work in the {nth} house: {domain}.")
        }
        InterpretationMode::Deep => format!(
            "Your Sun sits in the {nth} house, so {} routes through {domain}.",
            planet_clause(Body::Sun)
        ),
    };
    InterpretationSection {
        title: format!("Sun in the {nth} house"),
        content,
        priority: 2,
        referents: vec![Referent::Body(Body::Sun), Referent::House(house)],
    }
}

fn aspect_section(aspect: &Aspect, mode: InterpretationMode) -> InterpretationSection {
    let verb = aspect_verb(aspect.kind);
    let content = match mode {
        InterpretationMode::Easy => {
            format!("{} {verb} {}.", subject(aspect.a), with_article(aspect.b))
        }
        InterpretationMode::Friendly => format!(
            "Your {} {verb} your {}: {} and {} negotiate daily.",
            aspect.a,
            aspect.b,
            planet_theme(aspect.a),
            planet_theme(aspect.b)
        ),
        InterpretationMode::Deep => format!(
            "From birth your {} {verb} your {} (orb {:.1}°). {} keeps bumping into {}.",
            aspect.a,
            aspect.b,
            aspect.orb_deg,
            capitalize(planet_clause(aspect.a)),
            planet_clause(aspect.b)
        ),
    };
    InterpretationSection {
        title: format!("{} {} {}", aspect.a, aspect.kind, aspect.b),
        content,
        priority: 4,
        referents: vec![Referent::Body(aspect.a), Referent::Body(aspect.b)],
    }
}

fn sentence(phrase: &str) -> String {
    format!("{}.", capitalize(phrase))
}

/// Sentence-leading name: luminaries and the node take an article.
fn subject(body: Body) -> String {
    match body {
        Body::Sun | Body::Moon | Body::NorthNode => format!("The {body}"),
        _ => body.to_string(),
    }
}

fn with_article(body: Body) -> String {
    match body {
        Body::Sun | Body::Moon | Body::NorthNode => format!("the {body}"),
        _ => body.to_string(),
    }
}
