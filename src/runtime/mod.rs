//! Host boundary: one tokio task per session, addressed through a [`SessionHandle`].
//!
//! Player actions and timer expiries are both delivered to the session task as
//! messages, so a tap that races the countdown is resolved by whichever message
//! the task sees first; the session lock turns the loser into a no-op.

mod driver;

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::data::{LoadError, QuestionSource, RandomShuffle};
use crate::engine::{Event, Machine, SessionView, SinglePlayerSession, VersusSession};
use crate::models::{QuestionSet, SessionResult};

pub(crate) type ResultCallback = Box<dyn FnOnce(SessionResult) + Send>;

/// Lifecycle of a session as seen by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Questions are being fetched.
    Loading,
    /// No question set could be obtained; the session never started.
    Failed(String),
    Running(SessionView),
    /// The session was torn down.
    Closed,
}

pub(crate) enum Command {
    Event(Event),
    OnResult(ResultCallback),
    Exit,
}

/// Cloneable handle to a running session.
///
/// Operations are fire-and-forget. Dropping every handle tears the session down.
#[derive(Clone)]
pub struct SessionHandle {
    id: Uuid,
    commands: mpsc::UnboundedSender<Command>,
    status: watch::Receiver<SessionStatus>,
}

impl SessionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn submit_answer(&self, answer: Option<String>) {
        self.send(Command::Event(Event::SubmitAnswer(answer)));
    }

    pub fn use_fifty_fifty(&self) {
        self.send(Command::Event(Event::FiftyFifty));
    }

    pub fn use_skip(&self) {
        self.send(Command::Event(Event::Skip));
    }

    /// Registers the callback that receives the session result.
    ///
    /// It runs exactly once; if the session already finished it runs right away
    /// with the stored result. It never runs for a session that was exited or
    /// failed to load.
    pub fn on_result<F>(&self, callback: F)
    where
        F: FnOnce(SessionResult) + Send + 'static,
    {
        self.send(Command::OnResult(Box::new(callback)));
    }

    /// Tears the session down and cancels every pending timer.
    pub fn exit(&self) {
        self.send(Command::Exit);
    }

    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.clone()
    }

    fn send(&self, command: Command) {
        // The task is gone once the session was exited; nothing left to do.
        let _ = self.commands.send(command);
    }
}

/// Fetches questions and starts a timed single-player session.
pub fn start_single(config: SessionConfig, source: Arc<dyn QuestionSource>) -> SessionHandle {
    spawn(config, source, |questions, config| {
        SinglePlayerSession::new(questions, config, Box::new(RandomShuffle::new()))
    })
}

/// Fetches questions and starts a two-player versus session.
pub fn start_versus(config: SessionConfig, source: Arc<dyn QuestionSource>) -> SessionHandle {
    spawn(config, source, VersusSession::new)
}

fn spawn<M, F>(config: SessionConfig, source: Arc<dyn QuestionSource>, build: F) -> SessionHandle
where
    M: Machine,
    F: FnOnce(QuestionSet, SessionConfig) -> Result<M, LoadError> + Send + 'static,
{
    let id = Uuid::new_v4();
    let (commands, command_rx) = mpsc::unbounded_channel();
    let (status_tx, status) = watch::channel(SessionStatus::Loading);

    tokio::spawn(driver::run_session(
        id, config, source, build, command_rx, status_tx,
    ));

    SessionHandle {
        id,
        commands,
        status,
    }
}
