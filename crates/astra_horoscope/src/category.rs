//! Horoscope content categories.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The four daily-guidance categories every horoscope fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Love,
    Work,
    Health,
    Growth,
}

impl Category {
    pub const COUNT: usize = 4;

    pub const ALL: [Category; Category::COUNT] = [
        Category::Love,
        Category::Work,
        Category::Health,
        Category::Growth,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Category::Love => "love",
            Category::Work => "work",
            Category::Health => "health",
            Category::Growth => "growth",
        }
    }

    /// Prefix emoji used by the friendly composer.
    pub const fn emoji(self) -> &'static str {
        match self {
            Category::Love => "❤️",
            Category::Work => "💼",
            Category::Health => "🌿",
            Category::Growth => "🌱",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "love" => Ok(Category::Love),
            "work" => Ok(Category::Work),
            "health" => Ok(Category::Health),
            "growth" => Ok(Category::Growth),
            other => Err(format!("unknown category {other:?}")),
        }
    }
}

/// One text slot per category. Every horoscope carries all four,
/// populated either by a matched rule or a default filler.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategorySections {
    pub love: String,
    pub work: String,
    pub health: String,
    pub growth: String,
}

impl CategorySections {
    pub fn get(&self, category: Category) -> &str {
        match category {
            Category::Love => &self.love,
            Category::Work => &self.work,
            Category::Health => &self.health,
            Category::Growth => &self.growth,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut String {
        match category {
            Category::Love => &mut self.love,
            Category::Work => &mut self.work,
            Category::Health => &mut self.health,
            Category::Growth => &mut self.growth,
        }
    }

    /// Iterate `(category, text)` in fixed category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str)> {
        Category::ALL.iter().map(|&c| (c, self.get(c)))
    }
}
