mod backend;
mod commands;
mod serve;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use quizgen_core::Config;
use tracing_subscriber::EnvFilter;

use self::backend::StoreKind;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// AI-generated quiz question service.
#[derive(Parser)]
#[command(name = "quizgen", version, about = "AI-generated quiz question service")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Question store backend
    #[arg(long, global = true, default_value = "mongo", value_enum)]
    store: StoreKind,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Generate questions for a topic with the AI model and store them as pending
    Generate {
        /// Topic to write questions about (2-140 characters)
        #[arg(long)]
        topic: String,
        /// Number of questions to generate (1-10)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..=10))]
        amount: u64,
    },

    /// Print random reviewed questions from the store
    Sample {
        /// Number of questions to draw
        #[arg(long, default_value = "10")]
        amount: i64,
        /// Only questions of this difficulty (easy, medium, hard)
        #[arg(long)]
        difficulty: Option<String>,
    },

    /// Insert questions from a JSON file (an array or a single object)
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("error: failed to create tokio runtime: {}", e),
                cli.output,
                cli.quiet,
            );
            process::exit(1);
        }
    };

    let store = match rt.block_on(backend::open_store(cli.store, &config.store)) {
        Ok(s) => s,
        Err(e) => {
            report_error(&format!("error: {}", e), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            if let Err(e) = rt.block_on(serve::start_server(&config, store, port)) {
                tracing::error!("server error: {}", e);
                process::exit(1);
            }
        }
        Commands::Generate { topic, amount } => {
            let amount = usize::try_from(amount).unwrap_or(quizgen_core::MAX_BATCH_AMOUNT);
            rt.block_on(commands::generate::cmd_generate(
                &config, store, &topic, amount, cli.output, cli.quiet,
            ));
        }
        Commands::Sample { amount, difficulty } => {
            rt.block_on(commands::sample::cmd_sample(
                store,
                amount,
                difficulty.as_deref(),
                cli.output,
                cli.quiet,
            ));
        }
        Commands::Import { file } => {
            rt.block_on(commands::import::cmd_import(
                store, &file, cli.output, cli.quiet,
            ));
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}

/// Print questions to stdout in the selected format.
pub(crate) fn print_questions(questions: &[quizgen_storage::Question], output: OutputFormat) {
    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(questions) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("error: failed to serialize questions: {}", e),
        },
        OutputFormat::Text => {
            for (i, q) in questions.iter().enumerate() {
                let difficulty = q.difficulty.map(|d| d.as_str()).unwrap_or("-");
                println!("{}. [{}] [{}] {}", i + 1, difficulty, q.status, q.question);
                for option in &q.options {
                    let marker = if *option == q.correct_answer { "*" } else { " " };
                    println!("   {} {}", marker, option);
                }
            }
        }
    }
}
