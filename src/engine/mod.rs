//! Quiz session state machines.
//!
//! Sessions never touch a clock. Every transition returns the [`Effect`]s the
//! owner must carry out (arm a timer, cancel one, hand over the result), and
//! every timer expiry comes back in as an [`Event`] through the same entry point
//! as player input. Timer events carry the `epoch` they were scheduled in; once
//! the session has moved on (answer locked, next question) they are ignored.

mod score;
mod single;
mod versus;

use std::fmt;
use std::time::Duration;

use log::debug;
use thiserror::Error;

use crate::models::{Player, Question, SessionResult};

pub use score::ScorePresenter;
pub use single::SinglePlayerSession;
pub use versus::VersusSession;

/// Input to a session: player actions and timer expiries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `None` means no answer was given in time.
    SubmitAnswer(Option<String>),
    FiftyFifty,
    Skip,
    Tick { epoch: u64 },
    Advance { epoch: u64 },
}

impl Event {
    fn label(&self) -> &'static str {
        match self {
            Event::SubmitAnswer(_) => "submit",
            Event::FiftyFifty => "50/50",
            Event::Skip => "skip",
            Event::Tick { .. } => "tick",
            Event::Advance { .. } => "advance",
        }
    }
}

/// Work a session asks its owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the countdown; replaces any countdown already armed.
    ScheduleTick { epoch: u64, after: Duration },
    CancelTick,
    ScheduleAdvance { epoch: u64, after: Duration },
    /// Emitted at most once per session.
    Finished(SessionResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUp {
    FiftyFifty,
    Skip,
}

impl fmt::Display for PowerUp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerUp::FiftyFifty => f.write_str("50/50"),
            PowerUp::Skip => f.write_str("skip"),
        }
    }
}

/// Why an action was refused. Never surfaced to the caller as a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    #[error("the current answer is locked")]
    Locked,
    #[error("the session is finished")]
    Finished,
    #[error("the {0} power-up was already used")]
    PowerUpSpent(PowerUp),
    #[error("the answer was removed by 50/50")]
    DisabledAnswer,
    #[error("not available in this mode")]
    Unsupported,
    #[error("timer event from an earlier state")]
    StaleTimer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Locked,
    Finished,
}

/// What was chosen for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Answer(String),
    /// Time ran out or an empty answer was submitted.
    NoAnswer,
    Skipped,
}

impl Selection {
    pub fn answer(&self) -> Option<&str> {
        match self {
            Selection::Answer(answer) => Some(answer),
            Selection::NoAnswer | Selection::Skipped => None,
        }
    }
}

/// Snapshot of a single-player session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleView {
    pub question: Question,
    pub index: usize,
    pub total: usize,
    pub score: i32,
    pub time_remaining: u32,
    pub question_seconds: u32,
    pub phase: Phase,
    pub selected: Option<Selection>,
    pub disabled: Vec<String>,
    pub fifty_fifty_used: bool,
    pub skip_used: bool,
}

/// Snapshot of a versus session for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersusView {
    pub question: Question,
    pub index: usize,
    pub total: usize,
    pub p1_score: i32,
    pub p2_score: i32,
    pub active_player: Player,
    pub phase: Phase,
    pub selected: Option<Selection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    Single(SingleView),
    Versus(VersusView),
}

impl SessionView {
    pub fn index(&self) -> usize {
        match self {
            SessionView::Single(view) => view.index,
            SessionView::Versus(view) => view.index,
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            SessionView::Single(view) => view.phase,
            SessionView::Versus(view) => view.phase,
        }
    }

    pub fn question(&self) -> &Question {
        match self {
            SessionView::Single(view) => &view.question,
            SessionView::Versus(view) => &view.question,
        }
    }
}

/// A session state machine driven by [`Event`]s.
pub trait Machine: Send + 'static {
    /// Effects needed once the session becomes active.
    fn start(&mut self) -> Vec<Effect>;

    fn try_handle(&mut self, event: Event) -> Result<Vec<Effect>, InvalidOperation>;

    fn view(&self) -> SessionView;

    /// Applies an event; refused events are logged and produce no effects.
    fn handle(&mut self, event: Event) -> Vec<Effect> {
        let label = event.label();
        self.try_handle(event).unwrap_or_else(|reason| {
            debug!("Ignoring {} event: {}", label, reason);
            Vec::new()
        })
    }
}
