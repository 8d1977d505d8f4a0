use serde::{Deserialize, Serialize};

use super::{Category, Difficulty, Player};

/// Terminal output of a session, emitted exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SessionResult {
    Single {
        score: i32,
        difficulty: Difficulty,
        category: Category,
    },
    Versus {
        p1_score: i32,
        p2_score: i32,
        difficulty: Difficulty,
        category: Category,
    },
}

impl SessionResult {
    pub fn difficulty(&self) -> Difficulty {
        match self {
            SessionResult::Single { difficulty, .. } | SessionResult::Versus { difficulty, .. } => {
                *difficulty
            }
        }
    }

    pub fn category(&self) -> Category {
        match self {
            SessionResult::Single { category, .. } | SessionResult::Versus { category, .. } => {
                *category
            }
        }
    }

    /// Winner of a versus session; `None` on a draw or for single-player results.
    pub fn winner(&self) -> Option<Player> {
        match self {
            SessionResult::Versus {
                p1_score, p2_score, ..
            } => match p1_score.cmp(p2_score) {
                std::cmp::Ordering::Greater => Some(Player::One),
                std::cmp::Ordering::Less => Some(Player::Two),
                std::cmp::Ordering::Equal => None,
            },
            SessionResult::Single { .. } => None,
        }
    }
}

/// Title awarded for a final single-player score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub title: &'static str,
    pub description: &'static str,
}

const RANKS: [(i32, Rank); 6] = [
    (
        900,
        Rank {
            title: "Supreme Quiz Mind",
            description: "You answer as if search engines call you when they get stuck.",
        },
    ),
    (
        800,
        Rank {
            title: "Almost Complete Encyclopedia",
            description: "A few pages are missing, but you clearly know plenty.",
        },
    ),
    (
        700,
        Rank {
            title: "Resident Geek",
            description: "Your friends probably ask you before they look anything up.",
        },
    ),
    (
        500,
        Rank {
            title: "Serious Trivia Player",
            description: "Solid base. A bit more practice and you become a legend.",
        },
    ),
    (
        300,
        Rank {
            title: "Question Explorer",
            description: "Plenty of courage, you just need a few more right answers.",
        },
    ),
    (
        0,
        Rank {
            title: "Quiz Survivor",
            description: "You made it out alive, which is a promising start.",
        },
    ),
];

const CHAOS_AGENT: Rank = Rank {
    title: "Agent of Answer Chaos",
    description: "You managed to annoy the scoreboard itself. Respect for the style.",
};

impl Rank {
    pub fn for_score(score: i32) -> Rank {
        RANKS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|(_, rank)| *rank)
            .unwrap_or(CHAOS_AGENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versus(p1_score: i32, p2_score: i32) -> SessionResult {
        SessionResult::Versus {
            p1_score,
            p2_score,
            difficulty: Difficulty::Easy,
            category: Category::default(),
        }
    }

    #[test]
    fn test_winner() {
        assert_eq!(versus(500, -250).winner(), Some(Player::One));
        assert_eq!(versus(0, 100).winner(), Some(Player::Two));
        assert_eq!(versus(150, 150).winner(), None);
    }

    #[test]
    fn test_rank_thresholds() {
        assert_eq!(Rank::for_score(1000).title, "Supreme Quiz Mind");
        assert_eq!(Rank::for_score(900).title, "Supreme Quiz Mind");
        assert_eq!(Rank::for_score(899).title, "Almost Complete Encyclopedia");
        assert_eq!(Rank::for_score(500).title, "Serious Trivia Player");
        assert_eq!(Rank::for_score(0).title, "Quiz Survivor");
        assert_eq!(Rank::for_score(-50).title, "Agent of Answer Chaos");
    }

    #[test]
    fn test_result_serialization() {
        let result = SessionResult::Single {
            score: 300,
            difficulty: Difficulty::Hard,
            category: Category(17),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"mode\":\"single\""));
        assert!(json.contains("\"difficulty\":\"hard\""));
    }
}
