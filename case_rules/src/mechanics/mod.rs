//! Case mechanics: rarity tiers, evidentiary categories, narrative time and tokens.

mod ledger;
mod time;

pub use ledger::*;
pub use time::*;

use serde::{Deserialize, Serialize};

/// How much an object matters to the case once unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Irrelevant,
    Circumstantial,
    Material,
    Critical,
}

/// The three evidentiary categories scored per suspect (Motive / Means / Opportunity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MmoCategory {
    Motive,
    Means,
    Opportunity,
}

impl MmoCategory {
    pub const ALL: [MmoCategory; 3] = [
        MmoCategory::Motive,
        MmoCategory::Means,
        MmoCategory::Opportunity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MmoCategory::Motive => "motive",
            MmoCategory::Means => "means",
            MmoCategory::Opportunity => "opportunity",
        }
    }
}

impl std::fmt::Display for MmoCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of cards that can be placed on the evidence timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    /// A physical object found at a location.
    #[default]
    Object,
    /// A statement obtained during an interrogation.
    Testimony,
    /// A portrait derived from a suspect's physical description.
    Mugshot,
    /// A document, letter or record.
    Document,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Critical > Rarity::Material);
        assert!(Rarity::Material > Rarity::Circumstantial);
        assert!(Rarity::Circumstantial > Rarity::Irrelevant);
    }

    #[test]
    fn test_mmo_category_names() {
        let names: Vec<_> = MmoCategory::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["motive", "means", "opportunity"]);
    }
}
