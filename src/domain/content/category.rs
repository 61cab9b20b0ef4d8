use crate::domain::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Faith,
    Family,
    Youth,
    Testimony,
    Theology,
    Culture,
    News,
    Devotional,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Faith,
        Category::Family,
        Category::Youth,
        Category::Testimony,
        Category::Theology,
        Category::Culture,
        Category::News,
        Category::Devotional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Faith => "faith",
            Category::Family => "family",
            Category::Youth => "youth",
            Category::Testimony => "testimony",
            Category::Theology => "theology",
            Category::Culture => "culture",
            Category::News => "news",
            Category::Devotional => "devotional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Faith => "Faith",
            Category::Family => "Family",
            Category::Youth => "Youth",
            Category::Testimony => "Testimony",
            Category::Theology => "Theology",
            Category::Culture => "Culture",
            Category::News => "News",
            Category::Devotional => "Devotional",
        }
    }

    pub fn label_am(&self) -> &'static str {
        match self {
            Category::Faith => "እምነት",
            Category::Family => "ቤተሰብ",
            Category::Youth => "ወጣቶች",
            Category::Testimony => "ምስክርነት",
            Category::Theology => "ሥነ መለኮት",
            Category::Culture => "ባህል",
            Category::News => "ዜና",
            Category::Devotional => "የዕለት ጥሞና",
        }
    }

    /// Badge colour used by the front end.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Faith => "#2563eb",
            Category::Family => "#16a34a",
            Category::Youth => "#f59e0b",
            Category::Testimony => "#db2777",
            Category::Theology => "#7c3aed",
            Category::Culture => "#ea580c",
            Category::News => "#0891b2",
            Category::Devotional => "#4f46e5",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DomainError::Validation(format!("unknown category '{needle}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Theology".parse::<Category>().unwrap(), Category::Theology);
        assert!("sports".parse::<Category>().is_err());
    }

    #[test]
    fn every_category_has_a_distinct_color() {
        let mut colors: Vec<_> = Category::ALL.iter().map(Category::color).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), Category::ALL.len());
    }
}
