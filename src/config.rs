//! Gameplay constants and how they are loaded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Category, Difficulty};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid rules file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunable gameplay constants. Missing fields in a rules file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameRules {
    pub question_amount: usize,
    pub question_seconds: u32,
    pub correct_points: i32,
    pub wrong_penalty: i32,
    pub tick_ms: u64,
    pub answer_delay_ms: u64,
    pub skip_delay_ms: u64,
    pub versus_delay_ms: u64,
    pub score_animation_ms: u64,
    pub score_animation_steps: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            question_amount: 10,
            question_seconds: 15,
            correct_points: 100,
            wrong_penalty: 50,
            tick_ms: 1000,
            answer_delay_ms: 1500,
            skip_delay_ms: 1200,
            versus_delay_ms: 900,
            score_animation_ms: 400,
            score_animation_steps: 20,
        }
    }
}

impl GameRules {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn answer_delay(&self) -> Duration {
        Duration::from_millis(self.answer_delay_ms)
    }

    pub fn skip_delay(&self) -> Duration {
        Duration::from_millis(self.skip_delay_ms)
    }

    pub fn versus_delay(&self) -> Duration {
        Duration::from_millis(self.versus_delay_ms)
    }

    pub fn score_animation(&self) -> Duration {
        Duration::from_millis(self.score_animation_ms)
    }

    /// Best possible single-player score for a set of `questions`.
    pub fn max_score(&self, questions: usize) -> i32 {
        i32::try_from(questions).unwrap_or(i32::MAX).saturating_mul(self.correct_points)
    }

    /// Score change for a resolved answer.
    pub fn delta(&self, correct: bool) -> i32 {
        if correct {
            self.correct_points
        } else {
            -self.wrong_penalty
        }
    }
}

/// Everything a session needs besides its questions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub difficulty: Difficulty,
    pub category: Category,
    pub rules: GameRules,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_rules_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!("quizly-rules-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{"question_seconds": 20, "wrong_penalty": 25}"#).unwrap();

        let rules = GameRules::from_json_file(&path).unwrap();
        assert_eq!(rules.question_seconds, 20);
        assert_eq!(rules.wrong_penalty, 25);
        assert_eq!(rules.correct_points, 100);
        assert_eq!(rules.skip_delay(), Duration::from_millis(1200));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_invalid_rules_file() {
        let path = std::env::temp_dir().join(format!("quizly-rules-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, r#"{"question_seconds": "soon"}"#).unwrap();
        assert!(matches!(
            GameRules::from_json_file(&path),
            Err(ConfigError::Json { .. })
        ));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_deltas_and_max_score() {
        let rules = GameRules::default();
        assert_eq!(rules.delta(true), 100);
        assert_eq!(rules.delta(false), -50);
        assert_eq!(rules.max_score(10), 1000);
    }
}
