//! Read-eval-print loop: persists one top-level environment across inputs.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::frontend::{parse, Program};
use crate::runtime::{Environment, Interpreter};

const PROMPT: &str = ">> ";

/// Runs the interactive REPL on stdin/stdout until EOF, `exit`, or `quit`.
///
/// # Errors
///
/// Returns an error if the line editor itself fails (not on ordinary parse
/// or evaluation errors, which are reported to the user and looped past).
pub fn run() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    let env = Environment::new();
    let interpreter = Interpreter::new();

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "exit" || trimmed == "quit" {
                    break;
                }
                let _ = editor.add_history_entry(line.as_str());
                eval_line(&line, &env, &interpreter);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn eval_line(line: &str, env: &Environment, interpreter: &Interpreter) {
    let program: Program = parse(line);
    if !program.errors.is_empty() {
        tracing::warn!(count = program.errors.len(), "parser errors in REPL input");
        println!("Parser errors:\n{}", program.errors.join("\n"));
        return;
    }
    tracing::debug!(statements = program.statements.len(), "evaluating input");
    match interpreter.eval_program(&program, env) {
        crate::runtime::Outcome::Value(value) | crate::runtime::Outcome::Return(value) => {
            println!("{value}");
        }
        crate::runtime::Outcome::Error(message) => {
            tracing::debug!(%message, "evaluation error");
            println!("Error: {message}");
        }
    }
}
