//! readscore CLI: timed reading with auto-generated comprehension quizzes.

use std::path::PathBuf;
use std::process;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "readscore",
    version,
    about = "Measure reading speed and comprehension of any English passage"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the words of a passage
    Count {
        /// Passage text file, or "-" for stdin
        #[arg(long)]
        passage: PathBuf,
    },

    /// Generate a True/False quiz from a passage
    Quiz {
        /// Passage text file, or "-" for stdin
        #[arg(long)]
        passage: PathBuf,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Seed for a reproducible quiz
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Print the answer key with the text format
        #[arg(long)]
        show_answers: bool,

        /// Also save the quiz as JSON to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score answers to a saved quiz
    Score {
        /// Quiz JSON produced by `readscore quiz --output`
        #[arg(long)]
        quiz: PathBuf,

        /// Comma-separated answers, e.g. "t,f,t,t"
        #[arg(long)]
        answers: String,

        /// Total words in the passage
        #[arg(long)]
        words: usize,

        /// When reading started (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        start: DateTime<Utc>,

        /// When reading ended (RFC 3339)
        #[arg(long, value_parser = parse_timestamp)]
        end: DateTime<Utc>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Read a passage in the terminal, then answer its quiz
    Read {
        /// Passage text file
        #[arg(long)]
        passage: PathBuf,

        /// Number of questions (default from config)
        #[arg(long)]
        count: Option<usize>,

        /// Seed for a reproducible quiz
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter readscore.toml
    Init,
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp '{s}': {e}"))
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("readscore_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Count { passage } => commands::count::execute(passage),
        Commands::Quiz {
            passage,
            count,
            seed,
            format,
            show_answers,
            output,
            config,
        } => commands::quiz::execute(passage, count, seed, format, show_answers, output, config),
        Commands::Score {
            quiz,
            answers,
            words,
            start,
            end,
            format,
            config,
        } => commands::score::execute(quiz, answers, words, start, end, format, config),
        Commands::Read {
            passage,
            count,
            seed,
            config,
        } => commands::read::execute(passage, count, seed, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
