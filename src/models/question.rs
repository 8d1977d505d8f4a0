use std::ops::Index;
use std::sync::Arc;

use serde::Deserialize;

/// A trivia record as the provider sends it, still HTML-escaped.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    #[serde(default)]
    pub incorrect_answers: Vec<String>,
}

/// A normalized question with a fixed answer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub answers: Vec<String>,
    pub correct: String,
}

impl Question {
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct == answer
    }

    /// Answers other than the correct one, in display order.
    pub fn incorrect_answers(&self) -> impl Iterator<Item = &String> {
        self.answers.iter().filter(|a| **a != self.correct)
    }
}

/// Immutable, shared sequence of questions for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Arc<[Question]>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }
}

impl Index<usize> for QuestionSet {
    type Output = Question;

    fn index(&self, index: usize) -> &Question {
        &self.questions[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_question_tolerates_missing_fields() {
        let raw: RawQuestion = serde_json::from_str(r#"{"question":"Q?"}"#).unwrap();
        assert_eq!(raw.correct_answer, None);
        assert!(raw.incorrect_answers.is_empty());
    }

    #[test]
    fn test_incorrect_answers_keep_display_order() {
        let question = Question {
            text: "Q?".to_string(),
            answers: vec!["b".into(), "right".into(), "a".into(), "c".into()],
            correct: "right".to_string(),
        };
        let wrong: Vec<_> = question.incorrect_answers().cloned().collect();
        assert_eq!(wrong, vec!["b", "a", "c"]);
        assert!(question.is_correct("right"));
    }
}
