//! Rule tables: validated patterns mapping sky conditions to text.
//!
//! Rules load from JSON through raw serde DTOs, then promote into typed
//! patterns so malformed tables fail at load time with the offending
//! rule id and field, never at request time. A built-in table ships so
//! hosts without a curated one still get real output.

use std::fmt;

use serde::Deserialize;

use astra_chart::{AspectKind, NatalChart, Sign};
use astra_ephem::Body;
use astra_transit::{Transit, TransitSnapshot};

use crate::category::Category;
use crate::compose::collapse_whitespace;
use crate::content::ordinal;

/// What a rule watches for.
#[derive(Debug, Clone, PartialEq)]
pub enum RulePattern {
    /// Matches the first ranked transit satisfying every given
    /// constraint. All-`None` matches the day's top transit.
    Aspect {
        transiting: Option<Body>,
        natal: Option<Body>,
        aspect: Option<AspectKind>,
        min_strength: f64,
    },
    /// Matches a natal placement by sign and/or house.
    Placement {
        body: Body,
        sign: Option<Sign>,
        house: Option<u8>,
    },
}

impl RulePattern {
    /// Test the pattern and capture placeholder values on a hit.
    pub fn matches(
        &self,
        transits: &[Transit],
        natal: &NatalChart,
        snapshot: &TransitSnapshot,
    ) -> Option<MatchOutcome> {
        match self {
            RulePattern::Aspect {
                transiting,
                natal: natal_body,
                aspect,
                min_strength,
            } => {
                let hit = transits.iter().find(|t| {
                    transiting.is_none_or(|b| t.transiting == b)
                        && natal_body.is_none_or(|b| t.natal == b)
                        && aspect.is_none_or(|k| t.kind == k)
                        && t.strength >= *min_strength
                })?;
                Some(MatchOutcome {
                    transiting: Some(hit.transiting),
                    natal: Some(hit.natal),
                    aspect: Some(hit.kind),
                    sign: Some(snapshot.placement(hit.transiting).sign),
                    house: natal.placement(hit.natal).house,
                })
            }
            RulePattern::Placement { body, sign, house } => {
                let placement = natal.placement(*body);
                if sign.is_some_and(|s| s != placement.sign()) {
                    return None;
                }
                if house.is_some() && *house != placement.house {
                    return None;
                }
                Some(MatchOutcome {
                    transiting: None,
                    natal: Some(*body),
                    aspect: None,
                    sign: Some(placement.sign()),
                    house: placement.house,
                })
            }
        }
    }
}

/// Placeholder values captured by a successful match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome {
    pub transiting: Option<Body>,
    pub natal: Option<Body>,
    pub aspect: Option<AspectKind>,
    pub sign: Option<Sign>,
    pub house: Option<u8>,
}

impl MatchOutcome {
    /// Fill `{transiting}`, `{natal}`, `{aspect}`, `{sign}` and `{house}`
    /// in a template. Placeholders without a captured value vanish, and
    /// the result is whitespace-collapsed so no seams show.
    pub fn fill(&self, template: &str) -> String {
        let filled = template
            .replace("{transiting}", self.transiting.map(Body::name).unwrap_or(""))
            .replace("{natal}", self.natal.map(Body::name).unwrap_or(""))
            .replace("{aspect}", self.aspect.map(AspectKind::name).unwrap_or(""))
            .replace("{sign}", self.sign.map(Sign::name).unwrap_or(""))
            .replace(
                "{house}",
                &self.house.map(ordinal).unwrap_or_default(),
            );
        collapse_whitespace(&filled)
    }
}

/// One validated rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleEntry {
    pub id: String,
    /// Higher priority is tried first; ties keep load order.
    pub priority: i32,
    pub category: Category,
    pub pattern: RulePattern,
    pub text: String,
}

/// A validated rule set, ordered by descending priority.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<RuleEntry>,
}

impl RuleTable {
    /// Validate and order a rule list.
    pub fn from_rules(rules: Vec<RuleEntry>) -> Result<Self, RuleError> {
        for (i, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(RuleError::InvalidField {
                    id: rule.id.clone(),
                    field: "id",
                    value: rule.id.clone(),
                });
            }
            if rule.text.trim().is_empty() {
                return Err(RuleError::EmptyText {
                    id: rule.id.clone(),
                });
            }
            if rules[..i].iter().any(|r| r.id == rule.id) {
                return Err(RuleError::DuplicateId {
                    id: rule.id.clone(),
                });
            }
            if let RulePattern::Aspect { min_strength, .. } = rule.pattern {
                if !(0.0..=1.0).contains(&min_strength) {
                    return Err(RuleError::InvalidField {
                        id: rule.id.clone(),
                        field: "min_strength",
                        value: min_strength.to_string(),
                    });
                }
            }
            if let RulePattern::Placement {
                house: Some(house), ..
            } = rule.pattern
            {
                if !(1..=12).contains(&house) {
                    return Err(RuleError::InvalidField {
                        id: rule.id.clone(),
                        field: "house",
                        value: house.to_string(),
                    });
                }
            }
        }
        let mut rules = rules;
        rules.sort_by_key(|r| std::cmp::Reverse(r.priority));
        Ok(Self { rules })
    }

    /// Load and validate a JSON table.
    pub fn from_json(json: &str) -> Result<Self, RuleError> {
        let dto: TableDto = serde_json::from_str(json)?;
        let rules = dto
            .rules
            .into_iter()
            .map(RuleDto::promote)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_rules(rules)
    }

    /// The default table shipped with the crate.
    pub fn builtin() -> Self {
        let mut rules = builtin_rules();
        rules.sort_by_key(|r| std::cmp::Reverse(r.priority));
        Self { rules }
    }

    /// Rules in match order (descending priority, stable).
    pub fn iter(&self) -> impl Iterator<Item = &RuleEntry> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Why a rule table failed to load.
#[derive(Debug)]
#[non_exhaustive]
pub enum RuleError {
    /// The document is not valid JSON at all.
    Parse(serde_json::Error),
    /// A field failed validation; names the rule and field.
    InvalidField {
        id: String,
        field: &'static str,
        value: String,
    },
    DuplicateId {
        id: String,
    },
    EmptyText {
        id: String,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "rule table is not valid JSON: {e}"),
            Self::InvalidField { id, field, value } => {
                write!(f, "rule {id:?}: invalid {field}: {value:?}")
            }
            Self::DuplicateId { id } => write!(f, "duplicate rule id {id:?}"),
            Self::EmptyText { id } => write!(f, "rule {id:?} has empty text"),
        }
    }
}

impl std::error::Error for RuleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RuleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// JSON DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TableDto {
    rules: Vec<RuleDto>,
}

#[derive(Deserialize)]
struct RuleDto {
    id: String,
    priority: i32,
    category: String,
    pattern: PatternDto,
    text: String,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PatternDto {
    Aspect {
        transiting: Option<String>,
        natal: Option<String>,
        aspect: Option<String>,
        #[serde(default)]
        min_strength: f64,
    },
    Placement {
        body: String,
        sign: Option<String>,
        house: Option<u8>,
    },
}

impl RuleDto {
    fn promote(self) -> Result<RuleEntry, RuleError> {
        let invalid = |field: &'static str, value: &str| RuleError::InvalidField {
            id: self.id.clone(),
            field,
            value: value.to_string(),
        };

        let category: Category = self
            .category
            .parse()
            .map_err(|_| invalid("category", &self.category))?;

        let pattern = match &self.pattern {
            PatternDto::Aspect {
                transiting,
                natal,
                aspect,
                min_strength,
            } => RulePattern::Aspect {
                transiting: parse_opt(transiting, "transiting", &invalid)?,
                natal: parse_opt(natal, "natal", &invalid)?,
                aspect: parse_opt(aspect, "aspect", &invalid)?,
                min_strength: *min_strength,
            },
            PatternDto::Placement { body, sign, house } => RulePattern::Placement {
                body: body.parse().map_err(|_| invalid("body", body))?,
                sign: parse_opt(sign, "sign", &invalid)?,
                house: *house,
            },
        };

        Ok(RuleEntry {
            id: self.id,
            priority: self.priority,
            category,
            pattern,
            text: self.text,
        })
    }
}

fn parse_opt<T: std::str::FromStr>(
    value: &Option<String>,
    field: &'static str,
    invalid: &impl Fn(&'static str, &str) -> RuleError,
) -> Result<Option<T>, RuleError> {
    match value {
        None => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|_| invalid(field, s)),
    }
}

// ---------------------------------------------------------------------------
// Built-in table
// ---------------------------------------------------------------------------

fn rule(
    id: &str,
    priority: i32,
    category: Category,
    pattern: RulePattern,
    text: &str,
) -> RuleEntry {
    RuleEntry {
        id: id.to_string(),
        priority,
        category,
        pattern,
        text: text.to_string(),
    }
}

fn aspect_pattern(
    transiting: Option<Body>,
    natal: Option<Body>,
    aspect: Option<AspectKind>,
    min_strength: f64,
) -> RulePattern {
    RulePattern::Aspect {
        transiting,
        natal,
        aspect,
        min_strength,
    }
}

fn builtin_rules() -> Vec<RuleEntry> {
    vec![
        // Specific contacts first.
        rule(
            "saturn-pressure",
            90,
            Category::Work,
            aspect_pattern(Some(Body::Saturn), None, Some(AspectKind::Square), 0.2),
            "{transiting} {aspect} your natal {natal}: expect friction on the job; \
             trim the plan, keep the deadline.",
        ),
        rule(
            "jupiter-reaches-venus",
            80,
            Category::Love,
            aspect_pattern(Some(Body::Jupiter), Some(Body::Venus), None, 0.25),
            "Jupiter reaches your natal Venus: generosity comes back doubled today.",
        ),
        rule(
            "mars-charge",
            75,
            Category::Health,
            aspect_pattern(Some(Body::Mars), None, None, 0.4),
            "Mars {aspect} your natal {natal}: burn the extra energy on purpose, \
             not on people.",
        ),
        rule(
            "jupiter-opens-sun",
            72,
            Category::Growth,
            aspect_pattern(Some(Body::Jupiter), Some(Body::Sun), None, 0.25),
            "Jupiter {aspect} your natal Sun: say yes to the bigger room.",
        ),
        rule(
            "venus-softens-moon",
            70,
            Category::Love,
            aspect_pattern(Some(Body::Venus), Some(Body::Moon), None, 0.3),
            "Venus {aspect} your natal Moon: comfort given now is remembered long.",
        ),
        rule(
            "saturn-steadies-mars",
            65,
            Category::Health,
            aspect_pattern(Some(Body::Saturn), Some(Body::Mars), None, 0.3),
            "Saturn {aspect} your natal Mars: pace beats intensity this week.",
        ),
        rule(
            "sun-spotlight",
            60,
            Category::Growth,
            aspect_pattern(Some(Body::Sun), None, None, 0.5),
            "The Sun lights up your natal {natal}: a good day to be seen trying.",
        ),
        // Natal placements, below the transit rules.
        rule(
            "sun-in-tenth",
            45,
            Category::Work,
            RulePattern::Placement {
                body: Body::Sun,
                sign: None,
                house: Some(10),
            },
            "With the Sun in your 10th house, ambition is a feature; aim it at \
             one visible thing today.",
        ),
        rule(
            "venus-in-fifth",
            40,
            Category::Love,
            RulePattern::Placement {
                body: Body::Venus,
                sign: None,
                house: Some(5),
            },
            "Venus in your {house} house prefers play to plans; keep tonight loose.",
        ),
        rule(
            "moon-in-sixth",
            40,
            Category::Health,
            RulePattern::Placement {
                body: Body::Moon,
                sign: None,
                house: Some(6),
            },
            "Your Moon lives in the 6th house: routine is self-care, not a cage.",
        ),
        // Generic backstops so an active sky always says something.
        rule(
            "any-transit-love",
            10,
            Category::Love,
            aspect_pattern(None, None, None, 0.0),
            "{transiting} {aspect} your natal {natal}; let the mood pass before \
             replying to that message.",
        ),
        rule(
            "any-transit-work",
            10,
            Category::Work,
            aspect_pattern(None, None, None, 0.0),
            "{transiting} {aspect} your natal {natal}; fold what it stirs up into \
             the workday instead of fighting it.",
        ),
        rule(
            "any-transit-health",
            10,
            Category::Health,
            aspect_pattern(None, None, None, 0.0),
            "With {transiting} {aspect} your natal {natal}, your body keeps the \
             score; give it a walk.",
        ),
        rule(
            "any-transit-growth",
            10,
            Category::Growth,
            aspect_pattern(None, None, None, 0.0),
            "{transiting} {aspect} your natal {natal} is a nudge, not a verdict; \
             take the lesson, skip the drama.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "rules": [
            {
                "id": "test-saturn",
                "priority": 50,
                "category": "work",
                "pattern": { "type": "aspect", "transiting": "saturn",
                             "natal": null, "aspect": "square", "min_strength": 0.5 },
                "text": "Saturn day."
            },
            {
                "id": "test-venus-leo",
                "priority": 20,
                "category": "love",
                "pattern": { "type": "placement", "body": "venus",
                             "sign": "leo", "house": null },
                "text": "Venus in {sign} loves loudly."
            }
        ]
    }"#;

    #[test]
    fn json_table_loads_and_orders_by_priority() {
        let table = RuleTable::from_json(SAMPLE_JSON).unwrap();
        assert_eq!(table.len(), 2);
        let ids: Vec<_> = table.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["test-saturn", "test-venus-leo"]);
    }

    #[test]
    fn bad_body_name_reports_rule_and_field() {
        let json = SAMPLE_JSON.replace("\"saturn\"", "\"vulcan\"");
        let err = RuleTable::from_json(&json).unwrap_err();
        match err {
            RuleError::InvalidField { id, field, value } => {
                assert_eq!(id, "test-saturn");
                assert_eq!(field, "transiting");
                assert_eq!(value, "vulcan");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_ids_fail() {
        let json = SAMPLE_JSON.replace("test-venus-leo", "test-saturn");
        assert!(matches!(
            RuleTable::from_json(&json),
            Err(RuleError::DuplicateId { .. })
        ));
    }

    #[test]
    fn empty_text_fails() {
        let json = SAMPLE_JSON.replace("Saturn day.", "  ");
        assert!(matches!(
            RuleTable::from_json(&json),
            Err(RuleError::EmptyText { .. })
        ));
    }

    #[test]
    fn min_strength_must_be_a_fraction() {
        let json = SAMPLE_JSON.replace("0.5", "1.5");
        assert!(matches!(
            RuleTable::from_json(&json),
            Err(RuleError::InvalidField { field: "min_strength", .. })
        ));
    }

    #[test]
    fn house_must_be_on_the_wheel() {
        let json = SAMPLE_JSON.replace("\"house\": null", "\"house\": 13");
        assert!(matches!(
            RuleTable::from_json(&json),
            Err(RuleError::InvalidField { field: "house", .. })
        ));
    }

    #[test]
    fn garbage_json_is_a_parse_error() {
        assert!(matches!(
            RuleTable::from_json("{"),
            Err(RuleError::Parse(_))
        ));
    }

    #[test]
    fn builtin_table_passes_its_own_validation() {
        let table = RuleTable::builtin();
        assert!(!table.is_empty());
        let revalidated = RuleTable::from_rules(builtin_rules()).unwrap();
        assert_eq!(table, revalidated);
        // Every category has at least one backstop rule.
        for category in Category::ALL {
            assert!(table.iter().any(|r| r.category == category));
        }
    }

    #[test]
    fn fill_replaces_known_and_drops_unknown() {
        let outcome = MatchOutcome {
            transiting: Some(Body::Saturn),
            natal: Some(Body::Sun),
            aspect: Some(AspectKind::Square),
            sign: None,
            house: Some(10),
        };
        assert_eq!(
            outcome.fill("{transiting} {aspect} {natal} in the {house} house"),
            "Saturn square Sun in the 10th house"
        );
        assert_eq!(outcome.fill("sign {sign} gone"), "sign gone");
    }
}
