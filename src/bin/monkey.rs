#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use monkey::error::MonkeyError;
use monkey::frontend::parse;
use monkey::runtime::{Environment, Interpreter, Outcome};

#[derive(Parser)]
#[command(name = "monkey")]
#[command(author, version, about = "The Monkey scripting language", long_about = None)]
struct Cli {
    /// Raise log verbosity (parser/eval tracing); repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL (also the default with no subcommand).
    Repl,

    /// Parse and evaluate a script file once, then exit.
    Run {
        /// The file to execute.
        file: PathBuf,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            monkey::repl::run()?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Run { file } => run_file(&file),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run_file(path: &PathBuf) -> Result<ExitCode> {
    let source = std::fs::read_to_string(path).map_err(MonkeyError::from)?;
    let program = parse(&source);

    if !program.errors.is_empty() {
        eprintln!("{}", MonkeyError::parse(program.errors));
        return Ok(ExitCode::FAILURE);
    }

    let interpreter = Interpreter::new();
    let env = Environment::new();
    match interpreter.eval_program(&program, &env) {
        Outcome::Error(message) => {
            eprintln!("{}", MonkeyError::eval(message));
            Ok(ExitCode::FAILURE)
        }
        Outcome::Value(_) | Outcome::Return(_) => Ok(ExitCode::SUCCESS),
    }
}
