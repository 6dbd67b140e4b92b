//! Structured wrapper around the interpreter core's plain-string errors, for
//! the CLI/REPL boundary. The core (lexer/parser/evaluator) keeps returning
//! `String`/`Vec<String>` since the literal wording is part of the tested
//! contract; this enum only gives the binary one `anyhow`-compatible type to
//! report alongside I/O failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonkeyError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Parser errors:\n{}", .messages.join("\n"))]
    Parse { messages: Vec<String> },

    #[error("Error: {message}")]
    Eval { message: String },
}

impl MonkeyError {
    #[must_use]
    pub fn parse(messages: Vec<String>) -> Self {
        Self::Parse { messages }
    }

    #[must_use]
    pub fn eval(message: String) -> Self {
        Self::Eval { message }
    }
}
