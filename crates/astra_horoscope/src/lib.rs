//! Horoscope text generation.
//!
//! Turns the numeric layers ([`astra_chart`], [`astra_transit`]) into
//! reader-facing guidance: a daily horoscope driven by a validated rule
//! table, a ranked natal interpretation, and a friendly composition
//! pass that sanitizes and polishes every line. All output is a pure
//! function of its inputs; nothing here consults a clock or a random
//! source.

pub mod category;
pub mod compose;
pub mod content;
pub mod horoscope;
pub mod interpret;
pub mod rules;

pub use category::{Category, CategorySections};
pub use compose::{
    BLOCKLIST, FriendlyHoroscope, MAX_LINE_CHARS, Personalization, compose_friendly,
};
pub use horoscope::{DailyHoroscope, MAX_KEY_TRANSITS, MAX_TLDR_LINES, Timeline, build_daily};
pub use interpret::{
    InterpretationMode, InterpretationSection, Referent, TIGHT_ASPECT_ORB_DEG, Topic,
    resolve_interpretation,
};
pub use rules::{MatchOutcome, RuleEntry, RuleError, RulePattern, RuleTable};
