//! # quizly
//!
//! A terminal trivia game: timed single-player sessions with power-ups and
//! turn-based two-player versus sessions over questions fetched from Open
//! Trivia DB or a local JSON file.
//!
//! The session engine in [`engine`] is a set of pure state machines; the
//! [`runtime`] drives each one on its own tokio task and owns the clock.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use quizly::config::SessionConfig;
//! use quizly::data::OpenTdbSource;
//! use quizly::runtime;
//!
//! # async fn demo() {
//! let handle = runtime::start_single(SessionConfig::default(), Arc::new(OpenTdbSource::new()));
//! handle.on_result(|result| println!("finished: {:?}", result));
//! # }
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod engine;
pub mod models;
pub mod runtime;
pub mod storage;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use log::{LevelFilter, info};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use thiserror::Error;

pub use app::App;
pub use config::{ConfigError, GameRules, SessionConfig};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Top-level error for the binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to set up logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Sends every log record to `path` so nothing is printed over the TUI.
pub fn init_file_logger<P: AsRef<Path>>(path: P, level: LevelFilter) -> Result<(), QuizError> {
    let logfile = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} {t} - {m}{n}",
        )))
        .build(path)
        .map_err(|e| QuizError::Logging(Box::new(e)))?;

    let config = Config::builder()
        .appender(Appender::builder().build("logfile", Box::new(logfile)))
        .build(Root::builder().appender("logfile").build(level))
        .map_err(|e| QuizError::Logging(Box::new(e)))?;

    log4rs::init_config(config).map_err(|e| QuizError::Logging(Box::new(e)))?;
    Ok(())
}

/// The quiz running in the terminal.
pub struct Quizly {
    app: App,
}

impl Quizly {
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// Takes over the terminal until the player quits.
    ///
    /// Must be awaited inside a tokio runtime: sessions run as tasks on it.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        info!("Terminal UI started");
        let result = run_event_loop(guard.terminal(), &mut self.app).await;
        drop(guard);
        info!("Terminal UI closed");
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    loop {
        app.refresh(Instant::now());
        terminal.draw(|frame| ui::render(frame, app))?;

        // Give session tasks a chance to run between frames on a current-thread runtime.
        tokio::task::yield_now().await;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if app.handle_key(key.code) {
                    break;
                }
            }
        }
    }

    Ok(())
}
