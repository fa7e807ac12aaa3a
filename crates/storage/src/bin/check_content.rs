use std::fmt;

use storage::json;

#[derive(Debug, Clone)]
struct Args {
    path: Option<String>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPath { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPath { raw } => write!(f, "invalid --content value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut path = std::env::var("QUIZ_CONTENT_PATH").ok();

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(&mut args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidPath { raw: value });
                    }
                    path = Some(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { path })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin check_content -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --content <path>   JSON quiz bundle to validate (default: bundled content)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_CONTENT_PATH");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        print_usage();
        e
    })?;

    let (source, raw) = match &args.path {
        Some(path) => (path.clone(), std::fs::read_to_string(path)?),
        None => ("<bundled>".to_string(), json::BUNDLED_QUIZZES.to_string()),
    };
    let quizzes = json::parse_bundle(&raw)?;

    for quiz in &quizzes {
        println!(
            "chapter {:>3}  {:>2} questions  {}",
            quiz.chapter_id(),
            quiz.question_count(),
            quiz.title().unwrap_or("(untitled)")
        );
    }
    println!("{source}: {} quizzes OK", quizzes.len());

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
