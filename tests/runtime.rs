//! Session tasks on a paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{oneshot, watch};

use quizly::config::{GameRules, SessionConfig};
use quizly::data::{LoadError, QuestionRequest, QuestionSource};
use quizly::engine::{Phase, SessionView};
use quizly::models::{Player, RawQuestion, SessionResult};
use quizly::runtime::{self, SessionHandle, SessionStatus};

struct StaticSource {
    records: Vec<RawQuestion>,
}

impl StaticSource {
    fn with_questions(count: usize) -> Arc<dyn QuestionSource> {
        let records = (0..count)
            .map(|i| RawQuestion {
                question: format!("Question &#35;{}", i + 1),
                correct_answer: Some(format!("right {}", i)),
                incorrect_answers: vec![
                    format!("wrong a{}", i),
                    format!("wrong b{}", i),
                    format!("wrong c{}", i),
                ],
            })
            .collect();
        Arc::new(Self { records })
    }
}

#[async_trait]
impl QuestionSource for StaticSource {
    async fn fetch(&self, request: &QuestionRequest) -> Result<Vec<RawQuestion>, LoadError> {
        Ok(self.records.iter().take(request.amount).cloned().collect())
    }
}

struct BrokenSource;

#[async_trait]
impl QuestionSource for BrokenSource {
    async fn fetch(&self, _request: &QuestionRequest) -> Result<Vec<RawQuestion>, LoadError> {
        Err(LoadError::Provider(1))
    }
}

fn result_channel(handle: &SessionHandle) -> oneshot::Receiver<SessionResult> {
    let (tx, rx) = oneshot::channel();
    handle.on_result(move |result| {
        let _ = tx.send(result);
    });
    rx
}

/// Waits until question `index` is open for answers and returns its correct answer.
async fn wait_for_active(status: &mut watch::Receiver<SessionStatus>, index: usize) -> String {
    let status = status
        .wait_for(|status| match status {
            SessionStatus::Running(view) => view.index() == index && view.phase() == Phase::Active,
            _ => false,
        })
        .await
        .unwrap();
    match &*status {
        SessionStatus::Running(view) => view.question().correct.clone(),
        _ => unreachable!(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeouts_finish_the_session() {
    let handle = runtime::start_single(SessionConfig::default(), StaticSource::with_questions(10));
    let result = result_channel(&handle);

    let result = result.await.unwrap();
    assert!(matches!(result, SessionResult::Single { score: -500, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_countdown_ticks_once_per_second() {
    let handle = runtime::start_single(SessionConfig::default(), StaticSource::with_questions(3));
    let mut status = handle.subscribe();
    wait_for_active(&mut status, 0).await;

    tokio::time::sleep(Duration::from_millis(3500)).await;

    match handle.status() {
        SessionStatus::Running(SessionView::Single(view)) => {
            assert_eq!(view.time_remaining, 12);
            assert_eq!(view.question.text, "Question #1");
        }
        other => panic!("unexpected status {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_correct_answers_through_handle() {
    let handle = runtime::start_single(SessionConfig::default(), StaticSource::with_questions(10));
    let result = result_channel(&handle);
    let mut status = handle.subscribe();

    for index in 0..10 {
        let correct = wait_for_active(&mut status, index).await;
        handle.submit_answer(Some(correct.clone()));
        // Locked: the second tap must not count.
        handle.submit_answer(Some(correct));
    }

    let result = result.await.unwrap();
    assert!(matches!(result, SessionResult::Single { score: 1000, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_amount_limits_question_count() {
    let config = SessionConfig {
        rules: GameRules {
            question_amount: 2,
            ..GameRules::default()
        },
        ..SessionConfig::default()
    };
    let handle = runtime::start_single(config, StaticSource::with_questions(10));
    let result = result_channel(&handle);
    let mut status = handle.subscribe();

    let correct = wait_for_active(&mut status, 0).await;
    handle.submit_answer(Some(correct));
    wait_for_active(&mut status, 1).await;
    handle.use_skip();

    let result = result.await.unwrap();
    assert!(matches!(result, SessionResult::Single { score: 200, .. }));
}

#[tokio::test(start_paused = true)]
async fn test_exit_suppresses_result() {
    let handle = runtime::start_single(SessionConfig::default(), StaticSource::with_questions(10));
    let result = result_channel(&handle);
    let mut status = handle.subscribe();
    wait_for_active(&mut status, 0).await;

    handle.exit();
    status
        .wait_for(|status| *status == SessionStatus::Closed)
        .await
        .unwrap();

    // The callback is dropped without being called.
    assert!(result.await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_failing_source_never_starts() {
    let handle = runtime::start_single(SessionConfig::default(), Arc::new(BrokenSource));
    let result = result_channel(&handle);
    let mut status = handle.subscribe();

    let failed = status
        .wait_for(|status| matches!(status, SessionStatus::Failed(_)))
        .await
        .map(|status| status.clone())
        .unwrap();

    assert!(matches!(failed, SessionStatus::Failed(reason) if reason.contains('1')));
    assert!(result.await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_result_reaches_late_callback() {
    let handle = runtime::start_versus(SessionConfig::default(), StaticSource::with_questions(2));
    let mut status = handle.subscribe();

    let correct = wait_for_active(&mut status, 0).await;
    handle.submit_answer(Some(correct));
    wait_for_active(&mut status, 1).await;
    handle.submit_answer(Some("wrong a1".to_string()));

    status
        .wait_for(|status| {
            matches!(status, SessionStatus::Running(view) if view.phase() == Phase::Finished)
        })
        .await
        .unwrap();

    let result = result_channel(&handle).await.unwrap();
    assert_eq!(
        result,
        SessionResult::Versus {
            p1_score: 100,
            p2_score: -50,
            difficulty: Default::default(),
            category: Default::default(),
        }
    );
    assert_eq!(result.winner(), Some(Player::One));
}

#[tokio::test(start_paused = true)]
async fn test_dropping_every_handle_closes_session() {
    let handle = runtime::start_single(SessionConfig::default(), StaticSource::with_questions(3));
    let mut status = handle.subscribe();
    wait_for_active(&mut status, 0).await;

    drop(handle);
    status
        .wait_for(|status| *status == SessionStatus::Closed)
        .await
        .unwrap();
}
