use std::future;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, sleep_until};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::data::{LoadError, QuestionRequest, QuestionSource, RandomShuffle, normalize};
use crate::engine::{Effect, Event, Machine};
use crate::models::{QuestionSet, SessionResult};

use super::{Command, ResultCallback, SessionStatus};

/// The two timer slots a session can have armed.
#[derive(Debug, Default)]
struct Timers {
    tick: Option<(Instant, u64)>,
    advance: Option<(Instant, u64)>,
}

/// Resolves with the slot's epoch once its deadline passes; never, if empty.
async fn expiry(slot: Option<(Instant, u64)>) -> u64 {
    match slot {
        Some((deadline, epoch)) => {
            sleep_until(deadline).await;
            epoch
        }
        None => future::pending().await,
    }
}

/// Holds the result until a callback is there to take it, and hands it over once.
#[derive(Default)]
struct ResultSlot {
    callback: Option<ResultCallback>,
    pending: Option<SessionResult>,
    delivered: bool,
}

impl ResultSlot {
    fn register(&mut self, callback: ResultCallback) {
        if self.delivered {
            debug!("Result already delivered, dropping late callback");
            return;
        }
        match self.pending.take() {
            Some(result) => {
                self.delivered = true;
                callback(result);
            }
            None => self.callback = Some(callback),
        }
    }

    fn deliver(&mut self, result: SessionResult) {
        if self.delivered {
            return;
        }
        match self.callback.take() {
            Some(callback) => {
                self.delivered = true;
                callback(result);
            }
            None => self.pending = Some(result),
        }
    }
}

fn apply(effects: Vec<Effect>, timers: &mut Timers, results: &mut ResultSlot) {
    let now = Instant::now();
    for effect in effects {
        match effect {
            Effect::ScheduleTick { epoch, after } => timers.tick = Some((now + after, epoch)),
            Effect::CancelTick => timers.tick = None,
            Effect::ScheduleAdvance { epoch, after } => {
                timers.advance = Some((now + after, epoch));
            }
            Effect::Finished(result) => results.deliver(result),
        }
    }
}

async fn load_questions(
    source: &dyn QuestionSource,
    request: QuestionRequest,
) -> Result<QuestionSet, LoadError> {
    let raw = source.fetch(&request).await?;
    let normalized = normalize(raw, &mut RandomShuffle::new());
    if !normalized.rejected.is_empty() {
        warn!(
            "Dropped {} malformed trivia records",
            normalized.rejected.len()
        );
    }
    if normalized.questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(normalized.questions)
}

pub(super) async fn run_session<M, F>(
    id: Uuid,
    config: SessionConfig,
    source: Arc<dyn QuestionSource>,
    build: F,
    mut commands: mpsc::UnboundedReceiver<Command>,
    status: watch::Sender<SessionStatus>,
) where
    M: Machine,
    F: FnOnce(QuestionSet, SessionConfig) -> Result<M, LoadError> + Send + 'static,
{
    let mut results = ResultSlot::default();
    let request = QuestionRequest {
        amount: config.rules.question_amount,
        category: config.category,
        difficulty: config.difficulty,
    };

    let fetch = load_questions(source.as_ref(), request);
    tokio::pin!(fetch);
    let loaded = loop {
        tokio::select! {
            loaded = &mut fetch => break loaded,
            command = commands.recv() => match command {
                None | Some(Command::Exit) => {
                    info!("Session {} exited while loading", id);
                    status.send_replace(SessionStatus::Closed);
                    return;
                }
                Some(Command::OnResult(callback)) => results.register(callback),
                Some(Command::Event(_)) => debug!("Session {} is still loading", id),
            },
        }
    };

    let mut machine = match loaded.and_then(|questions| build(questions, config)) {
        Ok(machine) => machine,
        Err(err) => {
            warn!("Session {} could not start: {}", id, err);
            status.send_replace(SessionStatus::Failed(err.to_string()));
            return;
        }
    };

    info!("Session {} started", id);
    let mut timers = Timers::default();
    apply(machine.start(), &mut timers, &mut results);
    status.send_replace(SessionStatus::Running(machine.view()));

    loop {
        let effects = tokio::select! {
            command = commands.recv() => match command {
                None | Some(Command::Exit) => break,
                Some(Command::OnResult(callback)) => {
                    results.register(callback);
                    continue;
                }
                Some(Command::Event(event)) => machine.handle(event),
            },
            epoch = expiry(timers.tick) => {
                timers.tick = None;
                machine.handle(Event::Tick { epoch })
            }
            epoch = expiry(timers.advance) => {
                timers.advance = None;
                machine.handle(Event::Advance { epoch })
            }
        };

        apply(effects, &mut timers, &mut results);
        status.send_replace(SessionStatus::Running(machine.view()));
    }

    info!("Session {} closed", id);
    status.send_replace(SessionStatus::Closed);
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    use crate::models::{Category, Difficulty};

    fn result(score: i32) -> SessionResult {
        SessionResult::Single {
            score,
            difficulty: Difficulty::Easy,
            category: Category::default(),
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<SessionResult>>>, impl Fn() -> ResultCallback) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let make = move || -> ResultCallback {
            let sink = Arc::clone(&sink);
            Box::new(move |result| sink.lock().unwrap().push(result))
        };
        (seen, make)
    }

    #[test]
    fn test_result_waits_for_callback() {
        let (seen, callback) = recorder();
        let mut slot = ResultSlot::default();

        slot.deliver(result(300));
        assert!(seen.lock().unwrap().is_empty());

        slot.register(callback());
        slot.register(callback());
        assert_eq!(*seen.lock().unwrap(), vec![result(300)]);
    }

    #[test]
    fn test_result_delivered_once() {
        let (seen, callback) = recorder();
        let mut slot = ResultSlot::default();

        slot.register(callback());
        slot.deliver(result(100));
        slot.deliver(result(200));
        assert_eq!(*seen.lock().unwrap(), vec![result(100)]);
    }
}
