//! Friendly composition: the last pass before text reaches a person.
//!
//! Every line runs the same pipeline: strip blocklisted terms, collapse
//! whitespace, cap the length, fall back to a filler if nothing is
//! left, capitalize, then (for sections) prefix the category emoji.
//! The pipeline is pure string work, so composed output is exactly as
//! deterministic as its input.

use serde::Serialize;

use crate::category::{Category, CategorySections};
use crate::content::{self, NEUTRAL_FILLER};
use crate::horoscope::{DailyHoroscope, MAX_TLDR_LINES, Timeline};

/// Longest composed line, in characters, counting the ellipsis.
pub const MAX_LINE_CHARS: usize = 100;

/// Terms that never reach a reader, matched case-insensitively.
pub const BLOCKLIST: [&str; 8] = [
    "disaster",
    "doom",
    "catastrophe",
    "terrible",
    "hopeless",
    "beware",
    "fatal",
    "curse",
];

/// Reader-side knobs for the composed output.
#[derive(Debug, Clone, PartialEq)]
pub struct Personalization {
    /// Greeting name; `None` skips the greeting line.
    pub name: Option<String>,
    /// Prefix sections with their category emoji.
    pub emoji: bool,
    /// Formal greeting instead of the casual one.
    pub formal: bool,
    /// Additional terms to strip on top of [`BLOCKLIST`].
    pub extra_blocklist: Vec<String>,
}

impl Default for Personalization {
    fn default() -> Self {
        Self {
            name: None,
            emoji: true,
            formal: false,
            extra_blocklist: Vec::new(),
        }
    }
}

/// A [`DailyHoroscope`] after the friendly pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendlyHoroscope {
    pub date_iso: String,
    pub tldr: Vec<String>,
    pub key_transits: Vec<String>,
    pub sections: CategorySections,
    pub moon_tip: String,
    pub timeline: Timeline,
}

/// Run the friendly pipeline over a whole day.
pub fn compose_friendly(day: &DailyHoroscope, who: &Personalization) -> FriendlyHoroscope {
    let extra = who.extra_blocklist.as_slice();

    let mut tldr = Vec::new();
    if let Some(name) = &who.name {
        let name = collapse_whitespace(name);
        if !name.is_empty() {
            tldr.push(cap_chars(&greeting(&name, who.formal)));
        }
    }
    for line in &day.tldr {
        let line = polish(line, extra);
        if !line.is_empty() {
            tldr.push(line);
        }
    }
    if tldr.is_empty() {
        tldr.push(NEUTRAL_FILLER.to_string());
    }
    tldr.truncate(MAX_TLDR_LINES);

    let key_transits = day
        .key_transits
        .iter()
        .map(|line| polish(line, extra))
        .filter(|line| !line.is_empty())
        .collect();

    let mut sections = CategorySections::default();
    for category in Category::ALL {
        let mut text = polish_or(
            day.sections.get(category),
            extra,
            content::category_filler(category),
        );
        if who.emoji {
            let emoji = category.emoji();
            if !text.starts_with(emoji) {
                text = format!("{emoji} {text}");
            }
        }
        *sections.get_mut(category) = text;
    }

    FriendlyHoroscope {
        date_iso: day.date_iso.clone(),
        tldr,
        key_transits,
        sections,
        moon_tip: polish_or(&day.moon_tip, extra, NEUTRAL_FILLER),
        timeline: Timeline {
            morning: polish_or(&day.timeline.morning, extra, NEUTRAL_FILLER),
            day: polish_or(&day.timeline.day, extra, NEUTRAL_FILLER),
            evening: polish_or(&day.timeline.evening, extra, NEUTRAL_FILLER),
        },
    }
}

fn greeting(name: &str, formal: bool) -> String {
    if formal {
        format!("Good day, {name}.")
    } else {
        format!("Hey {name}!")
    }
}

/// Strip, collapse, cap, capitalize. May come back empty.
fn polish(text: &str, extra: &[String]) -> String {
    let stripped = strip_blocked(text, extra);
    let collapsed = collapse_whitespace(&stripped);
    capitalize(&cap_chars(&collapsed))
}

/// [`polish`], substituting `fallback` when nothing survives.
fn polish_or(text: &str, extra: &[String], fallback: &str) -> String {
    let line = polish(text, extra);
    if line.is_empty() {
        fallback.to_string()
    } else {
        line
    }
}

fn strip_blocked(text: &str, extra: &[String]) -> String {
    let mut out = text.to_string();
    let terms = BLOCKLIST
        .iter()
        .copied()
        .chain(extra.iter().map(String::as_str));
    for term in terms {
        if term.is_empty() {
            continue;
        }
        out = remove_ignore_ascii_case(&out, term);
    }
    out
}

fn remove_ignore_ascii_case(haystack: &str, needle: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut rest = haystack;
    while let Some(at) = find_ignore_ascii_case(rest, needle) {
        out.push_str(&rest[..at]);
        rest = &rest[at + needle.len()..];
    }
    out.push_str(rest);
    out
}

/// Byte offset of the first ASCII-case-insensitive occurrence.
///
/// ASCII case folding preserves length, and continuation bytes never
/// compare equal to ASCII, so a hit always spans whole characters.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let n = needle.len();
    if n == 0 || haystack.len() < n {
        return None;
    }
    haystack
        .char_indices()
        .map(|(i, _)| i)
        .filter(|&i| i + n <= haystack.len())
        .find(|&i| haystack.as_bytes()[i..i + n].eq_ignore_ascii_case(needle.as_bytes()))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cap to [`MAX_LINE_CHARS`] characters, ellipsis included, never
/// splitting a character.
fn cap_chars(text: &str) -> String {
    if text.chars().count() <= MAX_LINE_CHARS {
        return text.to_string();
    }
    let mut out: String = text.chars().take(MAX_LINE_CHARS - 1).collect();
    while out.ends_with(' ') {
        out.pop();
    }
    out.push('…');
    out
}

pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
