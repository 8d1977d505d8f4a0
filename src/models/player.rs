use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two seats in a versus session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Player whose turn it is on the question at `index`.
    pub fn for_turn(index: usize) -> Self {
        if index % 2 == 0 { Player::One } else { Player::Two }
    }

    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Trims the name and capitalizes it as "First letter upper, rest lower".
///
/// Returns `None` when nothing but whitespace was entered.
pub fn normalize_player_name(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;

    let mut name: String = first.to_uppercase().collect();
    name.extend(chars.flat_map(char::to_lowercase));
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_parity() {
        assert_eq!(Player::for_turn(0), Player::One);
        assert_eq!(Player::for_turn(1), Player::Two);
        assert_eq!(Player::for_turn(8), Player::One);
        assert_eq!(Player::One.other(), Player::Two);
    }

    #[test]
    fn test_normalize_player_name() {
        assert_eq!(normalize_player_name("  aLICE "), Some("Alice".to_string()));
        assert_eq!(normalize_player_name("émile"), Some("Émile".to_string()));
        assert_eq!(normalize_player_name("   "), None);
        assert_eq!(normalize_player_name(""), None);
    }
}
