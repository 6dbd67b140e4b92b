//! A tree-walking interpreter for the Monkey scripting language.
//!
//! ```text
//! source text -> Lexer -> tokens -> Parser -> Program (+ parser errors)
//!             -> Interpreter::eval_program(Program, Environment) -> Outcome
//! ```
//!
//! [`frontend`] owns lexing and parsing; [`runtime`] owns the environment,
//! values, builtins, and the evaluator itself. [`repl`] is a thin shell
//! over both, persisting one [`runtime::Environment`] across inputs.

pub mod error;
pub mod frontend;
pub mod repl;
pub mod runtime;
