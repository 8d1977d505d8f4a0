//! Host state for the terminal UI.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::KeyCode;
use log::info;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::config::{GameRules, SessionConfig};
use crate::data::QuestionSource;
use crate::engine::{Phase, ScorePresenter, SessionView};
use crate::models::{Category, Difficulty, SessionResult, normalize_player_name};
use crate::runtime::{self, SessionHandle, SessionStatus};
use crate::storage::{LeaderboardEntry, LocalStore};

const LEADERBOARD_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    Versus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Category,
    Difficulty,
    Mode,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Name, Field::Category, Field::Difficulty, Field::Mode];

    fn next(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + 1) % Self::ORDER.len()]
    }

    fn previous(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Start screen form.
#[derive(Debug, Clone)]
pub struct StartForm {
    pub name: String,
    /// Known categories, plus the one given on the command line if it is not among them.
    pub categories: Vec<Category>,
    pub category: usize,
    pub difficulty: usize,
    pub mode: Mode,
    pub focus: Field,
    pub error: Option<String>,
}

impl StartForm {
    pub fn category(&self) -> Category {
        self.categories
            .get(self.category)
            .copied()
            .unwrap_or_default()
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.difficulty]
    }

    fn cycle(&mut self, forward: bool) {
        fn step(value: usize, len: usize, forward: bool) -> usize {
            if forward { (value + 1) % len } else { (value + len - 1) % len }
        }
        match self.focus {
            Field::Name => {}
            Field::Category => {
                self.category = step(self.category, self.categories.len(), forward);
            }
            Field::Difficulty => {
                self.difficulty = step(self.difficulty, Difficulty::ALL.len(), forward);
            }
            Field::Mode => {
                self.mode = match self.mode {
                    Mode::Single => Mode::Versus,
                    Mode::Versus => Mode::Single,
                };
            }
        }
    }
}

/// A session being played on screen.
pub struct ActiveSession {
    pub handle: SessionHandle,
    pub player: Option<String>,
    pub status: SessionStatus,
    pub cursor: usize,
    pub displayed_score: i32,
    /// Versus verdict, once delivered.
    pub outcome: Option<SessionResult>,
    presenter: ScorePresenter,
    question_index: usize,
}

impl ActiveSession {
    fn new(handle: SessionHandle, player: Option<String>, rules: &GameRules) -> Self {
        Self {
            status: handle.status(),
            handle,
            player,
            cursor: 0,
            displayed_score: 0,
            outcome: None,
            presenter: ScorePresenter::from_rules(rules),
            question_index: 0,
        }
    }

    pub fn view(&self) -> Option<&SessionView> {
        match &self.status {
            SessionStatus::Running(view) => Some(view),
            _ => None,
        }
    }

    fn refresh(&mut self, now: Instant) {
        self.status = self.handle.status();
        let (index, score) = match self.view() {
            Some(SessionView::Single(view)) => (view.index, Some(view.score)),
            Some(view) => (view.index(), None),
            None => return,
        };

        if let Some(score) = score {
            self.presenter.retarget(score, now);
        }
        if index != self.question_index {
            self.question_index = index;
            self.cursor = 0;
        }
        self.displayed_score = self.presenter.display_at(now);
    }

    fn answer_count(&self) -> usize {
        self.view().map_or(0, |view| view.question().answers.len())
    }

    fn answer_at(&self, position: usize) -> Option<String> {
        self.view()?.question().answers.get(position).cloned()
    }
}

/// Data shown after a single-player session.
#[derive(Debug, Clone)]
pub struct Finished {
    pub player: String,
    pub result: SessionResult,
    pub max_score: i32,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub enum Screen {
    Start,
    Single(ActiveSession),
    Versus(ActiveSession),
    Result(Finished),
}

pub struct App {
    pub form: StartForm,
    pub screen: Screen,
    source: Arc<dyn QuestionSource>,
    store: LocalStore,
    rules: GameRules,
    results_tx: mpsc::UnboundedSender<(Uuid, SessionResult)>,
    results_rx: mpsc::UnboundedReceiver<(Uuid, SessionResult)>,
}

impl App {
    pub fn new(
        source: Arc<dyn QuestionSource>,
        store: LocalStore,
        rules: GameRules,
        defaults: SessionConfig,
        name: Option<String>,
    ) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        let name = name.or_else(|| store.last_player()).unwrap_or_default();
        let mut categories: Vec<Category> =
            Category::KNOWN.iter().map(|(category, _)| *category).collect();
        let category = match categories.iter().position(|c| *c == defaults.category) {
            Some(position) => position,
            None => {
                categories.push(defaults.category);
                categories.len() - 1
            }
        };
        let difficulty = Difficulty::ALL
            .iter()
            .position(|d| *d == defaults.difficulty)
            .unwrap_or(0);

        Self {
            form: StartForm {
                name,
                categories,
                category,
                difficulty,
                mode: Mode::Single,
                focus: Field::Name,
                error: None,
            },
            screen: Screen::Start,
            source,
            store,
            rules,
            results_tx,
            results_rx,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Pulls session status and delivered results; call once per frame.
    pub fn refresh(&mut self, now: Instant) {
        match &mut self.screen {
            Screen::Single(session) | Screen::Versus(session) => session.refresh(now),
            Screen::Start | Screen::Result(_) => {}
        }

        while let Ok((id, result)) = self.results_rx.try_recv() {
            self.on_result(id, result);
        }
    }

    fn on_result(&mut self, id: Uuid, result: SessionResult) {
        match &mut self.screen {
            Screen::Single(session) if session.handle.id() == id => {
                let player = session.player.clone().unwrap_or_default();
                let total = match session.view() {
                    Some(SessionView::Single(view)) => view.total,
                    _ => self.rules.question_amount,
                };
                session.handle.exit();
                self.store.record(&player, &result);
                info!("{} finished with {:?}", player, result);

                self.screen = Screen::Result(Finished {
                    player,
                    max_score: self.rules.max_score(total),
                    result,
                    leaderboard: self.store.top(LEADERBOARD_SIZE),
                });
            }
            Screen::Versus(session) if session.handle.id() == id => {
                session.outcome = Some(result);
            }
            _ => info!("Discarding result of session {}", id),
        }
    }

    /// Returns true if the app should exit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.screen {
            Screen::Start => self.handle_start_key(key),
            Screen::Single(_) => {
                self.handle_single_key(key);
                false
            }
            Screen::Versus(_) => {
                self.handle_versus_key(key);
                false
            }
            Screen::Result(_) => self.handle_result_key(key),
        }
    }

    fn handle_start_key(&mut self, key: KeyCode) -> bool {
        let form = &mut self.form;
        match key {
            KeyCode::Esc => return true,
            KeyCode::Enter => self.start_game(),
            KeyCode::Tab | KeyCode::Down => form.focus = form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => form.focus = form.focus.previous(),
            KeyCode::Left => form.cycle(false),
            KeyCode::Right => form.cycle(true),
            KeyCode::Backspace if form.focus == Field::Name => {
                form.name.pop();
                form.error = None;
            }
            KeyCode::Char(c) if form.focus == Field::Name => {
                form.name.push(c);
                form.error = None;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Char(' ') => form.cycle(true),
            _ => {}
        }
        false
    }

    fn start_game(&mut self) {
        let config = SessionConfig {
            difficulty: self.form.difficulty(),
            category: self.form.category(),
            rules: self.rules.clone(),
        };

        match self.form.mode {
            Mode::Single => {
                let Some(player) = normalize_player_name(&self.form.name) else {
                    self.form.error = Some("Please enter your name!".to_string());
                    self.form.focus = Field::Name;
                    return;
                };
                self.form.name = player.clone();
                self.form.error = None;

                let handle = runtime::start_single(config, Arc::clone(&self.source));
                self.forward_result(&handle);
                info!("{} started a single-player game", player);
                self.screen = Screen::Single(ActiveSession::new(handle, Some(player), &self.rules));
            }
            Mode::Versus => {
                let handle = runtime::start_versus(config, Arc::clone(&self.source));
                self.forward_result(&handle);
                info!("Versus game started");
                self.screen = Screen::Versus(ActiveSession::new(handle, None, &self.rules));
            }
        }
    }

    fn forward_result(&self, handle: &SessionHandle) {
        let tx = self.results_tx.clone();
        let id = handle.id();
        handle.on_result(move |result| {
            let _ = tx.send((id, result));
        });
    }

    fn leave_session(&mut self) {
        if let Screen::Single(session) | Screen::Versus(session) = &self.screen {
            session.handle.exit();
        }
        self.screen = Screen::Start;
    }

    fn handle_single_key(&mut self, key: KeyCode) {
        let Screen::Single(session) = &mut self.screen else {
            return;
        };

        if !matches!(session.status, SessionStatus::Running(_)) {
            if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.leave_session();
            }
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.leave_session(),
            KeyCode::Char('f') | KeyCode::Char('5') => session.handle.use_fifty_fifty(),
            KeyCode::Char('s') => session.handle.use_skip(),
            _ => answer_key(session, key),
        }
    }

    fn handle_versus_key(&mut self, key: KeyCode) {
        let Screen::Versus(session) = &mut self.screen else {
            return;
        };

        let finished = session.view().is_some_and(|view| view.phase() == Phase::Finished);
        if finished || !matches!(session.status, SessionStatus::Running(_)) {
            if matches!(key, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.leave_session();
            }
            return;
        }

        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.leave_session(),
            _ => answer_key(session, key),
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('b') => {
                self.screen = Screen::Start;
                false
            }
            _ => false,
        }
    }
}

/// Cursor movement and answer submission shared by both modes.
fn answer_key(session: &mut ActiveSession, key: KeyCode) {
    let count = session.answer_count();
    if count == 0 {
        return;
    }

    match key {
        KeyCode::Up | KeyCode::Char('k') => session.cursor = (session.cursor + count - 1) % count,
        KeyCode::Down | KeyCode::Char('j') => session.cursor = (session.cursor + 1) % count,
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(answer) = session.answer_at(session.cursor) {
                session.handle.submit_answer(Some(answer));
            }
        }
        KeyCode::Char(c @ '1'..='4') => {
            let position = c as usize - '1' as usize;
            if let Some(answer) = session.answer_at(position) {
                session.cursor = position;
                session.handle.submit_answer(Some(answer));
            }
        }
        _ => {}
    }
}
