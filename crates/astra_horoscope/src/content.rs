//! Built-in phrase tables.
//!
//! Everything the default horoscope and interpretation text is assembled
//! from lives here, so the output is deterministic and the rest of the
//! crate stays free of string literals. Tables are total over their key
//! enums; there is no missing-content path inside this module.

use astra_chart::{AspectKind, Sign};
use astra_ephem::Body;

use crate::category::Category;

/// Fallback for any slot nothing else filled.
pub const NEUTRAL_FILLER: &str = "Take the day at your own pace.";

#[rustfmt::skip]
const SIGN_KEYWORDS: [&str; 12] = [
    "bold and direct",        // Aries
    "steady and sensual",     // Taurus
    "curious and quick",      // Gemini
    "caring and protective",  // Cancer
    "warm and expressive",    // Leo
    "precise and helpful",    // Virgo
    "graceful and fair",      // Libra
    "intense and loyal",      // Scorpio
    "candid and roving",      // Sagittarius
    "patient and ambitious",  // Capricorn
    "original and detached",  // Aquarius
    "dreamy and empathic",    // Pisces
];

#[rustfmt::skip]
const SIGN_ESSENCES: [&str; 12] = [
    "acts first and asks questions later, thriving on fresh starts",
    "builds slowly and holds on, trusting what lasts",
    "collects ideas and people, connecting everything to everything",
    "leads with feeling and remembers every kindness",
    "wants to be seen and returns the spotlight generously",
    "improves whatever it touches, one detail at a time",
    "weighs every side and looks for the elegant middle",
    "goes all in or not at all, and keeps its own counsel",
    "needs a horizon to chase and a truth to tell",
    "climbs the long way because the long way holds",
    "stands a step outside the group it quietly serves",
    "absorbs every mood in the room and turns it into art",
];

#[rustfmt::skip]
const MOON_TIPS: [&str; 12] = [
    "start the thing, momentum is on your side",
    "slow down and make it comfortable",
    "talk it out, answers arrive mid-sentence",
    "stay close to home base if you can",
    "let yourself be seen a little",
    "tidy one corner and the mind follows",
    "company improves everything today",
    "keep the important thing private a while longer",
    "say yes to the detour",
    "one solid brick beats three sketches",
    "the odd idea is the good one",
    "leave margins in the schedule for drifting",
];

#[rustfmt::skip]
const HOUSE_DOMAINS: [&str; 12] = [
    "self and first impressions",
    "money and what you value",
    "errands, words, and neighbors",
    "home and family",
    "play, romance, and creation",
    "work, habits, and health",
    "partners and one-to-one bonds",
    "shared resources and deep trust",
    "travel, study, and belief",
    "career and public standing",
    "friends and the wider circle",
    "rest, solitude, and the inner world",
];

pub fn sign_keyword(sign: Sign) -> &'static str {
    SIGN_KEYWORDS[usize::from(sign.index())]
}

pub fn sign_essence(sign: Sign) -> &'static str {
    SIGN_ESSENCES[usize::from(sign.index())]
}

/// One-line Moon mood for the day.
pub fn moon_tip(sign: Sign) -> String {
    format!("Moon in {sign}: {}.", MOON_TIPS[usize::from(sign.index())])
}

/// Life area a house rules. Out-of-range input clamps to the wheel.
pub fn house_domain(house: u8) -> &'static str {
    HOUSE_DOMAINS[usize::from(house.clamp(1, 12)) - 1]
}

/// `1` → `"1st"`, `2` → `"2nd"`, `12` → `"12th"`.
pub fn ordinal(house: u8) -> String {
    let suffix = match house {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{house}{suffix}")
}

pub fn planet_theme(body: Body) -> &'static str {
    match body {
        Body::Sun => "core identity",
        Body::Moon => "inner life",
        Body::Mercury => "thinking and talk",
        Body::Venus => "affection and taste",
        Body::Mars => "drive",
        Body::Jupiter => "luck and growth",
        Body::Saturn => "discipline",
        Body::Uranus => "surprises",
        Body::Neptune => "imagination",
        Body::Pluto => "deep change",
        Body::NorthNode => "direction of growth",
    }
}

/// Longer clause for deep-mode phrasing.
pub fn planet_clause(body: Body) -> &'static str {
    match body {
        Body::Sun => "the self you are building",
        Body::Moon => "the needs that steer you when no one is watching",
        Body::Mercury => "how you gather and share ideas",
        Body::Venus => "what you reach for when you want comfort or beauty",
        Body::Mars => "how you push and what makes you fight",
        Body::Jupiter => "where you expect things to work out",
        Body::Saturn => "where you hold yourself to account",
        Body::Uranus => "where you refuse to follow the script",
        Body::Neptune => "where the edges blur and longing lives",
        Body::Pluto => "what you are slowly being remade by",
        Body::NorthNode => "the unfamiliar ground you grow on",
    }
}

/// Verb phrase connecting a transiting body to a natal one.
pub fn aspect_verb(kind: AspectKind) -> &'static str {
    match kind {
        AspectKind::Conjunction => "merges with",
        AspectKind::Sextile => "opens a door for",
        AspectKind::Square => "pushes against",
        AspectKind::Trine => "flows easily with",
        AspectKind::Opposition => "faces off with",
    }
}

/// Default section text when no rule matched the category.
pub fn category_filler(category: Category) -> &'static str {
    match category {
        Category::Love => {
            "No big sky news for your heart today; small gestures carry the most weight."
        }
        Category::Work => {
            "A routine day on the work front; finish something small and call it a win."
        }
        Category::Health => "Energy runs even today; keep meals and movement simple.",
        Category::Growth => "Growth is quiet today; reread something that once changed your mind.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astra_chart::zodiac::ALL_SIGNS;

    #[test]
    fn tables_are_total_and_non_empty() {
        for sign in ALL_SIGNS {
            assert!(!sign_keyword(sign).is_empty());
            assert!(!sign_essence(sign).is_empty());
            assert!(moon_tip(sign).starts_with("Moon in "));
        }
        for body in Body::ALL {
            assert!(!planet_theme(body).is_empty());
            assert!(!planet_clause(body).is_empty());
        }
        for house in 1..=12u8 {
            assert!(!house_domain(house).is_empty());
        }
        for category in Category::ALL {
            assert!(!category_filler(category).is_empty());
        }
    }

    #[test]
    fn house_domain_clamps_out_of_range() {
        assert_eq!(house_domain(0), house_domain(1));
        assert_eq!(house_domain(13), house_domain(12));
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(12), "12th");
    }

    #[test]
    fn tenth_house_is_career() {
        assert!(house_domain(10).contains("career"));
    }
}
