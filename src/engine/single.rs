//! Timed single-player session with two single-use power-ups.

use std::time::Duration;

use log::info;

use crate::config::{GameRules, SessionConfig};
use crate::data::{LoadError, Shuffle};
use crate::models::{Category, Difficulty, Question, QuestionSet, SessionResult};

use super::{
    Effect, Event, InvalidOperation, Machine, Phase, PowerUp, Selection, SessionView, SingleView,
};

/// How many incorrect answers 50/50 removes.
const FIFTY_FIFTY_HIDDEN: usize = 2;

pub struct SinglePlayerSession {
    questions: QuestionSet,
    rules: GameRules,
    difficulty: Difficulty,
    category: Category,
    shuffle: Box<dyn Shuffle>,
    index: usize,
    score: i32,
    time_remaining: u32,
    phase: Phase,
    selected: Option<Selection>,
    fifty_fifty_used: bool,
    skip_used: bool,
    disabled: Vec<String>,
    epoch: u64,
    result_emitted: bool,
}

impl SinglePlayerSession {
    /// Fails with [`LoadError::Empty`] when there is nothing to play.
    pub fn new(
        questions: QuestionSet,
        config: SessionConfig,
        shuffle: Box<dyn Shuffle>,
    ) -> Result<Self, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }

        let SessionConfig {
            difficulty,
            category,
            rules,
        } = config;

        Ok(Self {
            questions,
            time_remaining: rules.question_seconds,
            rules,
            difficulty,
            category,
            shuffle,
            index: 0,
            score: 0,
            phase: Phase::Active,
            selected: None,
            fifty_fifty_used: false,
            skip_used: false,
            disabled: Vec::new(),
            epoch: 0,
            result_emitted: false,
        })
    }

    pub fn submit_answer(&mut self, answer: Option<String>) -> Vec<Effect> {
        self.handle(Event::SubmitAnswer(answer))
    }

    pub fn use_fifty_fifty(&mut self) -> Vec<Effect> {
        self.handle(Event::FiftyFifty)
    }

    pub fn use_skip(&mut self) -> Vec<Effect> {
        self.handle(Event::Skip)
    }

    pub fn tick(&mut self, epoch: u64) -> Vec<Effect> {
        self.handle(Event::Tick { epoch })
    }

    pub fn advance(&mut self, epoch: u64) -> Vec<Effect> {
        self.handle(Event::Advance { epoch })
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<&Selection> {
        self.selected.as_ref()
    }

    pub fn disabled_answers(&self) -> &[String] {
        &self.disabled
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn is_last(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    fn ensure_active(&self) -> Result<(), InvalidOperation> {
        match self.phase {
            Phase::Active => Ok(()),
            Phase::Locked => Err(InvalidOperation::Locked),
            Phase::Finished => Err(InvalidOperation::Finished),
        }
    }

    fn schedule_tick(&self) -> Effect {
        Effect::ScheduleTick {
            epoch: self.epoch,
            after: self.rules.tick(),
        }
    }

    fn try_submit(&mut self, answer: Option<String>) -> Result<Vec<Effect>, InvalidOperation> {
        self.ensure_active()?;
        if answer.as_ref().is_some_and(|a| self.disabled.contains(a)) {
            return Err(InvalidOperation::DisabledAnswer);
        }

        let correct = answer
            .as_deref()
            .is_some_and(|a| self.current_question().is_correct(a));
        let selection = answer.map_or(Selection::NoAnswer, Selection::Answer);
        let delay = self.rules.answer_delay();
        Ok(self.lock(selection, self.rules.delta(correct), delay))
    }

    fn try_fifty_fifty(&mut self) -> Result<Vec<Effect>, InvalidOperation> {
        if self.fifty_fifty_used {
            return Err(InvalidOperation::PowerUpSpent(PowerUp::FiftyFifty));
        }
        self.ensure_active()?;

        let mut wrong: Vec<String> = self.current_question().incorrect_answers().cloned().collect();
        self.shuffle.shuffle(&mut wrong);
        wrong.truncate(FIFTY_FIFTY_HIDDEN);

        self.disabled = wrong;
        self.fifty_fifty_used = true;
        Ok(Vec::new())
    }

    fn try_skip(&mut self) -> Result<Vec<Effect>, InvalidOperation> {
        if self.skip_used {
            return Err(InvalidOperation::PowerUpSpent(PowerUp::Skip));
        }
        self.ensure_active()?;

        self.skip_used = true;
        let delay = self.rules.skip_delay();
        Ok(self.lock(Selection::Skipped, self.rules.correct_points, delay))
    }

    fn try_tick(&mut self, epoch: u64) -> Result<Vec<Effect>, InvalidOperation> {
        if epoch != self.epoch {
            return Err(InvalidOperation::StaleTimer);
        }
        self.ensure_active()?;

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            return self.try_submit(None);
        }
        Ok(vec![self.schedule_tick()])
    }

    fn try_advance(&mut self, epoch: u64) -> Result<Vec<Effect>, InvalidOperation> {
        if epoch != self.epoch {
            return Err(InvalidOperation::StaleTimer);
        }
        match self.phase {
            Phase::Locked => {}
            Phase::Active => return Err(InvalidOperation::StaleTimer),
            Phase::Finished => return Err(InvalidOperation::Finished),
        }

        self.epoch += 1;
        if self.is_last() {
            self.phase = Phase::Finished;
            return Ok(self.emit_result());
        }

        self.index += 1;
        self.time_remaining = self.rules.question_seconds;
        self.disabled.clear();
        self.selected = None;
        self.phase = Phase::Active;
        Ok(vec![self.schedule_tick()])
    }

    /// Commits the one score change allowed for the current question.
    ///
    /// The result of the last question is always revealed after the regular
    /// answer delay, even when it was skipped.
    fn lock(&mut self, selection: Selection, delta: i32, delay: Duration) -> Vec<Effect> {
        self.phase = Phase::Locked;
        self.selected = Some(selection);
        self.score += delta;
        self.epoch += 1;

        let after = if self.is_last() {
            self.rules.answer_delay()
        } else {
            delay
        };
        vec![
            Effect::CancelTick,
            Effect::ScheduleAdvance {
                epoch: self.epoch,
                after,
            },
        ]
    }

    fn emit_result(&mut self) -> Vec<Effect> {
        if self.result_emitted {
            return Vec::new();
        }
        self.result_emitted = true;
        info!("Single-player session finished with score {}", self.score);
        vec![Effect::Finished(SessionResult::Single {
            score: self.score,
            difficulty: self.difficulty,
            category: self.category,
        })]
    }
}

impl Machine for SinglePlayerSession {
    fn start(&mut self) -> Vec<Effect> {
        match self.phase {
            Phase::Active => vec![self.schedule_tick()],
            Phase::Locked | Phase::Finished => Vec::new(),
        }
    }

    fn try_handle(&mut self, event: Event) -> Result<Vec<Effect>, InvalidOperation> {
        match event {
            Event::SubmitAnswer(answer) => self.try_submit(answer),
            Event::FiftyFifty => self.try_fifty_fifty(),
            Event::Skip => self.try_skip(),
            Event::Tick { epoch } => self.try_tick(epoch),
            Event::Advance { epoch } => self.try_advance(epoch),
        }
    }

    fn view(&self) -> SessionView {
        SessionView::Single(SingleView {
            question: self.current_question().clone(),
            index: self.index,
            total: self.questions.len(),
            score: self.score,
            time_remaining: self.time_remaining,
            question_seconds: self.rules.question_seconds,
            phase: self.phase,
            selected: self.selected.clone(),
            disabled: self.disabled.clone(),
            fifty_fifty_used: self.fifty_fifty_used,
            skip_used: self.skip_used,
        })
    }
}
