use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, error, info};

use quizly::data::{FileSource, OpenTdbSource, QuestionSource};
use quizly::models::{Category, Difficulty};
use quizly::storage::LocalStore;
use quizly::{App, GameRules, QuizError, Quizly, SessionConfig, init_file_logger};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// File that receives the log output
    #[arg(long, global = true, default_value = "quizly.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play in the terminal (the default)
    Play(PlayArgs),
    /// Print the saved leaderboard
    Leaderboard {
        /// Store file holding the leaderboard
        #[arg(long, default_value = "quizly.json")]
        store: PathBuf,

        /// Number of entries to print
        #[arg(short, long, default_value_t = 10)]
        top: usize,
    },
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Player name, defaults to the last one saved
    #[arg(short, long)]
    name: Option<String>,

    /// Open Trivia DB category code
    #[arg(short, long, default_value_t = Category::GENERAL_KNOWLEDGE.code())]
    category: u32,

    #[arg(short, long, value_enum, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Number of questions per session
    #[arg(short, long)]
    amount: Option<usize>,

    /// Local JSON file to read questions from instead of Open Trivia DB
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Store file for the last player and the leaderboard
    #[arg(long, default_value = "quizly.json")]
    store: PathBuf,

    /// Do not read or write the store file
    #[arg(long)]
    no_store: bool,

    /// JSON file overriding gameplay rules
    #[arg(long)]
    rules: Option<PathBuf>,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            name: None,
            category: Category::GENERAL_KNOWLEDGE.code(),
            difficulty: Difficulty::Easy,
            amount: None,
            questions: None,
            store: PathBuf::from("quizly.json"),
            no_store: false,
            rules: None,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_file_logger(&cli.log_file, cli.log_level) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        Some(Command::Leaderboard { store, top }) => {
            print_leaderboard(LocalStore::open(store), top);
            Ok(())
        }
        Some(Command::Play(args)) => play(args).await,
        None => play(PlayArgs::default()).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error running quiz: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn play(args: PlayArgs) -> Result<(), QuizError> {
    let mut rules = match &args.rules {
        Some(path) => GameRules::from_json_file(path)?,
        None => GameRules::default(),
    };
    if let Some(amount) = args.amount {
        rules.question_amount = amount;
    }

    let source: Arc<dyn QuestionSource> = match args.questions {
        Some(path) => {
            info!("Reading questions from {}", path.display());
            Arc::new(FileSource::new(path))
        }
        None => Arc::new(OpenTdbSource::new()),
    };

    let store = if args.no_store {
        LocalStore::disabled()
    } else {
        LocalStore::open(args.store)
    };

    let defaults = SessionConfig {
        difficulty: args.difficulty,
        category: Category(args.category),
        rules: rules.clone(),
    };

    let app = App::new(source, store, rules, defaults, args.name);
    Quizly::new(app).run().await
}

fn print_leaderboard(store: LocalStore, top: usize) {
    let entries = store.top(top);
    if entries.is_empty() {
        println!("No saved scores");
        return;
    }

    for (index, entry) in entries.iter().enumerate() {
        println!(
            "{:2}. {:<16} {:>6}  {} · {}",
            index + 1,
            entry.name,
            entry.score,
            entry.category,
            entry.difficulty.label()
        );
    }
}
