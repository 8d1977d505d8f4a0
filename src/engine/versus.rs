//! Two players taking alternate turns on one question set. No countdown.

use log::info;

use crate::config::{GameRules, SessionConfig};
use crate::data::LoadError;
use crate::models::{Category, Difficulty, Player, Question, QuestionSet, SessionResult};

use super::{Effect, Event, InvalidOperation, Machine, Phase, Selection, SessionView, VersusView};

pub struct VersusSession {
    questions: QuestionSet,
    rules: GameRules,
    difficulty: Difficulty,
    category: Category,
    index: usize,
    p1_score: i32,
    p2_score: i32,
    phase: Phase,
    selected: Option<Selection>,
    epoch: u64,
    result_emitted: bool,
}

impl VersusSession {
    pub fn new(questions: QuestionSet, config: SessionConfig) -> Result<Self, LoadError> {
        if questions.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(Self {
            questions,
            rules: config.rules,
            difficulty: config.difficulty,
            category: config.category,
            index: 0,
            p1_score: 0,
            p2_score: 0,
            phase: Phase::Active,
            selected: None,
            epoch: 0,
            result_emitted: false,
        })
    }

    pub fn submit_answer(&mut self, answer: Option<String>) -> Vec<Effect> {
        self.handle(Event::SubmitAnswer(answer))
    }

    pub fn advance(&mut self, epoch: u64) -> Vec<Effect> {
        self.handle(Event::Advance { epoch })
    }

    /// Player 1 answers even-indexed questions, player 2 odd ones.
    pub fn active_player(&self) -> Player {
        Player::for_turn(self.index)
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self, player: Player) -> i32 {
        match player {
            Player::One => self.p1_score,
            Player::Two => self.p2_score,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn try_submit(&mut self, answer: Option<String>) -> Result<Vec<Effect>, InvalidOperation> {
        match self.phase {
            Phase::Active => {}
            Phase::Locked => return Err(InvalidOperation::Locked),
            Phase::Finished => return Err(InvalidOperation::Finished),
        }

        let correct = answer
            .as_deref()
            .is_some_and(|a| self.current_question().is_correct(a));
        let delta = self.rules.delta(correct);
        match self.active_player() {
            Player::One => self.p1_score += delta,
            Player::Two => self.p2_score += delta,
        }

        self.phase = Phase::Locked;
        self.selected = Some(answer.map_or(Selection::NoAnswer, Selection::Answer));
        self.epoch += 1;
        Ok(vec![Effect::ScheduleAdvance {
            epoch: self.epoch,
            after: self.rules.versus_delay(),
        }])
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
        if self.index + 1 >= self.questions.len() {
            self.phase = Phase::Finished;
            return Ok(self.emit_result());
        }

        self.index += 1;
        self.selected = None;
        self.phase = Phase::Active;
        Ok(Vec::new())
    }

    fn emit_result(&mut self) -> Vec<Effect> {
        if self.result_emitted {
            return Vec::new();
        }
        self.result_emitted = true;
        info!(
            "Versus session finished: {} to {}",
            self.p1_score, self.p2_score
        );
        vec![Effect::Finished(SessionResult::Versus {
            p1_score: self.p1_score,
            p2_score: self.p2_score,
            difficulty: self.difficulty,
            category: self.category,
        })]
    }
}

impl Machine for VersusSession {
    fn start(&mut self) -> Vec<Effect> {
        Vec::new()
    }

    fn try_handle(&mut self, event: Event) -> Result<Vec<Effect>, InvalidOperation> {
        match event {
            Event::SubmitAnswer(answer) => self.try_submit(answer),
            Event::Advance { epoch } => self.try_advance(epoch),
            Event::FiftyFifty | Event::Skip | Event::Tick { .. } => {
                Err(InvalidOperation::Unsupported)
            }
        }
    }

    fn view(&self) -> SessionView {
        SessionView::Versus(VersusView {
            question: self.current_question().clone(),
            index: self.index,
            total: self.questions.len(),
            p1_score: self.p1_score,
            p2_score: self.p2_score,
            active_player: self.active_player(),
            phase: self.phase,
            selected: self.selected.clone(),
        })
    }
}
