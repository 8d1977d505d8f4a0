//! Turns raw provider records into a playable [`QuestionSet`].

use log::warn;

use crate::models::{Question, QuestionSet, RawQuestion};

use super::decode::decode_html;
use super::error::DataError;
use super::shuffle::Shuffle;

const INCORRECT_ANSWERS: usize = 3;

/// Output of [`normalize`]: the playable set plus the records that were dropped.
#[derive(Debug)]
pub struct Normalized {
    pub questions: QuestionSet,
    /// Position in the raw batch and the reason the record was excluded.
    pub rejected: Vec<(usize, DataError)>,
}

/// Decodes and shuffles every record once.
///
/// Malformed records are excluded individually; the rest of the batch survives.
pub fn normalize(raw: Vec<RawQuestion>, shuffle: &mut dyn Shuffle) -> Normalized {
    let mut questions = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for (position, record) in raw.into_iter().enumerate() {
        match normalize_one(record, shuffle) {
            Ok(question) => questions.push(question),
            Err(err) => {
                warn!("Dropping trivia record {}: {}", position, err);
                rejected.push((position, err));
            }
        }
    }

    Normalized {
        questions: QuestionSet::new(questions),
        rejected,
    }
}

/// Every playable question has exactly four distinct, non-blank answers.
fn normalize_one(record: RawQuestion, shuffle: &mut dyn Shuffle) -> Result<Question, DataError> {
    let correct = record
        .correct_answer
        .as_deref()
        .map(decode_html)
        .filter(|answer| !answer.trim().is_empty())
        .ok_or(DataError::MissingCorrectAnswer)?;

    let found = record.incorrect_answers.len();
    if found != INCORRECT_ANSWERS {
        return Err(DataError::IncorrectCount { found });
    }

    let mut answers: Vec<String> = Vec::with_capacity(INCORRECT_ANSWERS + 1);
    for answer in record.incorrect_answers.iter().map(|answer| decode_html(answer)) {
        if answer.trim().is_empty() {
            return Err(DataError::BlankAnswer);
        }
        if answer == correct || answers.contains(&answer) {
            return Err(DataError::DuplicateAnswer(answer));
        }
        answers.push(answer);
    }
    answers.push(correct.clone());
    shuffle.shuffle(&mut answers);

    Ok(Question {
        text: decode_html(&record.question),
        answers,
        correct,
    })
}
