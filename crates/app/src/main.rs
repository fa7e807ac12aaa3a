use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::model::{ChapterId, StarThresholds, StarThresholdsError};
use services::{Clock, QuizLoopService};
use storage::repository::Storage;
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidChapter { raw: String },
    InvalidContentPath { raw: String },
    InvalidThresholds { source: StarThresholdsError },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidChapter { raw } => write!(f, "invalid --chapter value: {raw}"),
            ArgsError::InvalidContentPath { raw } => write!(f, "invalid --content value: {raw:?}"),
            ArgsError::InvalidThresholds { source } => write!(f, "invalid --stars value: {source}"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::InvalidThresholds { source } => Some(source),
            _ => None,
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Clone, PartialEq)]
struct Args {
    content: Option<PathBuf>,
    chapter: ChapterId,
    thresholds: StarThresholds,
    list: bool,
    help: bool,
}

impl Args {
    /// Flags win over environment variables, which win over defaults.
    fn parse(
        args: impl IntoIterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut content = env("QUIZ_CONTENT_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut chapter = match env("QUIZ_CHAPTER") {
            Some(value) => value
                .parse::<ChapterId>()
                .map_err(|_| ArgsError::InvalidChapter { raw: value.clone() })?,
            None => ChapterId::new(1),
        };
        let mut thresholds = match env("QUIZ_STAR_THRESHOLDS") {
            Some(value) => value
                .parse::<StarThresholds>()
                .map_err(|source| ArgsError::InvalidThresholds { source })?,
            None => StarThresholds::default(),
        };
        let mut list = false;
        let mut help = false;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(&mut args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidContentPath { raw: value });
                    }
                    content = Some(PathBuf::from(value));
                }
                "--chapter" => {
                    let value = require_value(&mut args, "--chapter")?;
                    chapter = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidChapter { raw: value.clone() })?;
                }
                "--stars" => {
                    let value = require_value(&mut args, "--stars")?;
                    thresholds = value
                        .parse()
                        .map_err(|source| ArgsError::InvalidThresholds { source })?;
                }
                "--list" => list = true,
                "--help" | "-h" => help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            content,
            chapter,
            thresholds,
            list,
            help,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--chapter <id>] [--content <path>] [--stars <two>,<one>]");
    eprintln!("  cargo run -p app -- --list [--content <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --chapter 1");
    eprintln!("  --content <bundled robotaxi chapters>");
    eprintln!("  --stars 60,30   (three stars always needs 90%)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CHAPTER, QUIZ_CONTENT_PATH, QUIZ_STAR_THRESHOLDS, RUST_LOG");
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr_layer = log_fmt::layer().with_writer(io::stderr).with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1), |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_logging();

    // Content is loaded once at startup; sessions only ever see parsed definitions.
    let storage = match &args.content {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading quiz content");
            Storage::from_json_file(path)?
        }
        None => Storage::bundled()?,
    };

    if args.list {
        let stdout = io::stdout();
        return terminal::list_chapters(storage.quizzes.as_ref(), &mut stdout.lock()).await;
    }

    let service = QuizLoopService::new(Clock::default_clock(), Arc::clone(&storage.quizzes))
        .with_thresholds(args.thresholds);

    let stdin = io::stdin();
    let stdout = io::stdout();
    terminal::play(&service, args.chapter, &mut stdin.lock(), &mut stdout.lock()).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
