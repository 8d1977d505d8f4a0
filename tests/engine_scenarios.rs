//! Whole-session scenarios driven directly through the state machines.

use std::time::Duration;

use quizly::config::{GameRules, SessionConfig};
use quizly::engine::{Effect, Phase, SinglePlayerSession, VersusSession};
use quizly::models::{Category, Difficulty, Player, Question, QuestionSet, SessionResult};

fn question_set(count: usize) -> QuestionSet {
    QuestionSet::new(
        (0..count)
            .map(|i| Question {
                text: format!("Question {}", i + 1),
                answers: vec![
                    format!("right {}", i),
                    format!("wrong a{}", i),
                    format!("wrong b{}", i),
                    format!("wrong c{}", i),
                ],
                correct: format!("right {}", i),
            })
            .collect(),
    )
}

fn config() -> SessionConfig {
    SessionConfig {
        difficulty: Difficulty::Medium,
        category: Category(17),
        rules: GameRules::default(),
    }
}

fn single(count: usize) -> SinglePlayerSession {
    SinglePlayerSession::new(question_set(count), config(), Box::new(|_: &mut [String]| {}))
        .unwrap()
}

fn advance_epoch(effects: &[Effect]) -> Option<(u64, Duration)> {
    effects.iter().find_map(|effect| match effect {
        Effect::ScheduleAdvance { epoch, after } => Some((*epoch, *after)),
        _ => None,
    })
}

fn finished(effects: &[Effect]) -> Vec<SessionResult> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Finished(result) => Some(result.clone()),
            _ => None,
        })
        .collect()
}

/// Locks with `act`, then fires the scheduled advance; returns every result emitted.
fn resolve(
    session: &mut SinglePlayerSession,
    act: impl FnOnce(&mut SinglePlayerSession) -> Vec<Effect>,
) -> Vec<SessionResult> {
    let effects = act(session);
    let mut results = finished(&effects);
    let (epoch, _) = advance_epoch(&effects).expect("answer should schedule an advance");
    results.extend(finished(&session.advance(epoch)));
    results
}

#[test]
fn test_all_correct_scores_thousand() {
    let mut session = single(10);
    let mut results = Vec::new();

    for i in 0..10 {
        assert_eq!(session.index(), i);
        results.extend(resolve(&mut session, |s| {
            s.submit_answer(Some(format!("right {}", i)))
        }));
    }

    assert!(session.is_finished());
    assert_eq!(
        results,
        vec![SessionResult::Single {
            score: 1000,
            difficulty: Difficulty::Medium,
            category: Category(17),
        }]
    );
}

#[test]
fn test_all_wrong_scores_minus_five_hundred() {
    let mut session = single(10);
    let mut results = Vec::new();

    for i in 0..10 {
        results.extend(resolve(&mut session, |s| {
            s.submit_answer(Some(format!("wrong a{}", i)))
        }));
    }

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], SessionResult::Single { score: -500, .. }));
}

#[test]
fn test_timeouts_on_every_question() {
    let mut session = single(3);
    let mut results = Vec::new();

    for _ in 0..3 {
        let mut effects = Vec::new();
        for _ in 0..15 {
            effects = session.tick(session.epoch());
        }
        assert_eq!(session.time_remaining(), 0);
        assert_eq!(session.phase(), Phase::Locked);
        results.extend(finished(&effects));

        let (epoch, _) = advance_epoch(&effects).unwrap();
        results.extend(finished(&session.advance(epoch)));
    }

    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], SessionResult::Single { score: -150, .. }));
}

#[test]
fn test_mixed_final_paths_emit_once() {
    let mut session = single(4);
    let mut results = Vec::new();

    results.extend(resolve(&mut session, |s| s.submit_answer(Some("right 0".into()))));

    let disabled = session.use_fifty_fifty();
    assert!(disabled.is_empty());
    assert_eq!(session.disabled_answers().len(), 2);
    results.extend(resolve(&mut session, |s| s.submit_answer(Some("wrong c1".into()))));

    results.extend(resolve(&mut session, |s| s.submit_answer(None)));

    let effects = session.use_skip();
    let (_, delay) = advance_epoch(&effects).unwrap();
    assert_eq!(delay, GameRules::default().answer_delay());
    results.extend(finished(&effects));
    results.extend(finished(&session.advance(session.epoch())));

    // Late events after the end change nothing.
    assert!(session.submit_answer(Some("right 3".into())).is_empty());
    assert!(session.advance(session.epoch()).is_empty());

    assert_eq!(session.score(), 100 - 50 - 50 + 100);
    assert_eq!(results.len(), 1);
}

#[test]
fn test_double_submit_scores_once() {
    let mut session = single(2);

    let first = session.submit_answer(Some("right 0".into()));
    let second = session.submit_answer(Some("wrong a0".into()));

    assert!(advance_epoch(&first).is_some());
    assert!(second.is_empty());
    assert_eq!(session.score(), 100);
}

#[test]
fn test_stale_advance_is_ignored() {
    let mut session = single(3);

    let effects = session.submit_answer(Some("right 0".into()));
    let (epoch, _) = advance_epoch(&effects).unwrap();
    session.advance(epoch);
    assert_eq!(session.index(), 1);

    // Delivering the same advance again must not skip question 2.
    assert!(session.advance(epoch).is_empty());
    assert_eq!(session.index(), 1);
}

#[test]
fn test_versus_alternating_example() {
    let mut session = VersusSession::new(question_set(10), config()).unwrap();
    let mut results = Vec::new();

    for i in 0..10 {
        let expected = if i % 2 == 0 { Player::One } else { Player::Two };
        assert_eq!(session.active_player(), expected);

        let answer = if i % 2 == 0 {
            format!("right {}", i)
        } else {
            format!("wrong a{}", i)
        };
        let effects = session.submit_answer(Some(answer));
        let (epoch, after) = advance_epoch(&effects).unwrap();
        assert_eq!(after, GameRules::default().versus_delay());
        results.extend(finished(&effects));
        results.extend(finished(&session.advance(epoch)));
    }

    assert_eq!(session.score(Player::One), 500);
    assert_eq!(session.score(Player::Two), -250);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].winner(), Some(Player::One));
}

#[test]
fn test_versus_rejects_power_ups() {
    use quizly::engine::{Event, InvalidOperation, Machine};

    let mut session = VersusSession::new(question_set(2), config()).unwrap();
    assert_eq!(
        session.try_handle(Event::FiftyFifty),
        Err(InvalidOperation::Unsupported)
    );
    assert_eq!(session.try_handle(Event::Skip), Err(InvalidOperation::Unsupported));
    assert_eq!(session.score(Player::One), 0);
}

#[test]
fn test_fifty_fifty_on_normalized_batch_hides_two_distinct_answers() {
    use quizly::data::normalize;
    use quizly::models::RawQuestion;

    let record = |question: &str, incorrect: [&str; 3]| RawQuestion {
        question: question.to_string(),
        correct_answer: Some("a".to_string()),
        incorrect_answers: incorrect.iter().map(|s| s.to_string()).collect(),
    };
    let batch = vec![record("repeated", ["b", "b", "d"]), record("clean", ["b", "c", "d"])];
    let mut keep = |_: &mut [String]| {};
    let normalized = normalize(batch, &mut keep);
    assert_eq!(normalized.questions.len(), 1);

    let mut session =
        SinglePlayerSession::new(normalized.questions, config(), Box::new(|_: &mut [String]| {}))
            .unwrap();
    assert!(session.use_fifty_fifty().is_empty());

    let disabled = session.disabled_answers();
    assert_eq!(disabled.len(), 2);
    assert_ne!(disabled[0], disabled[1]);
    assert!(!disabled.contains(&"a".to_string()));
}
