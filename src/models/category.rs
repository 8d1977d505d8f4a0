use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Provider category code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub u32);

impl Category {
    pub const GENERAL_KNOWLEDGE: Category = Category(9);

    /// The categories offered on the start screen.
    pub const KNOWN: [(Category, &'static str); 7] = [
        (Category(9), "General Knowledge"),
        (Category(11), "Movies"),
        (Category(12), "Music"),
        (Category(17), "Science"),
        (Category(21), "Sports"),
        (Category(22), "Geography"),
        (Category(23), "History"),
    ];

    pub fn code(self) -> u32 {
        self.0
    }

    pub fn label(self) -> &'static str {
        Self::KNOWN
            .iter()
            .find(|(category, _)| *category == self)
            .map(|(_, label)| *label)
            .unwrap_or("Other")
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::GENERAL_KNOWLEDGE
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Value sent to the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels() {
        assert_eq!(Category(9).label(), "General Knowledge");
        assert_eq!(Category(23).label(), "History");
        assert_eq!(Category(10).label(), "Other");
        assert_eq!(Category(0).label(), "Other");
    }

    #[test]
    fn test_difficulty_serialization() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let parsed: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(parsed, Difficulty::Hard);
        assert_eq!(Difficulty::Hard.label(), "Hard");
    }
}
