//! Property-based tests for the invariants listed in the interpreter's
//! testable-properties section: exactly-one-eof, deterministic evaluation,
//! and AST round-tripping through the canonical printed form.

use proptest::prelude::*;

use monkey::frontend::lexer::tokenize;
use monkey::frontend::parser::parse;
use monkey::frontend::token::TokenKind;
use monkey::runtime::eval;

const RESERVED: &[&str] = &[
    "fn", "let", "true", "false", "if", "else", "return",
];

/// Lowercase identifiers that never collide with a reserved keyword.
fn identifier() -> impl Strategy<Value = String> {
    "[a-z]{1,5}".prop_filter("must not be a reserved word", |s| !RESERVED.contains(&s.as_str()))
}

proptest! {
    #[test]
    fn tokenize_always_ends_with_exactly_one_eof(source in "\\PC{0,200}") {
        let tokens = tokenize(&source);
        prop_assert_eq!(tokens.last().unwrap().kind.clone(), TokenKind::Eof);
        prop_assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
            1
        );
    }

    #[test]
    fn evaluation_of_pure_integer_arithmetic_is_deterministic(
        a in -1_000_i64..1_000,
        b in 1_i64..1_000,
    ) {
        let source = format!("{a} + {b} * 2 - {a}");
        let program = parse(&source);
        prop_assert!(program.errors.is_empty());
        let first = eval(&program);
        let second = eval(&program);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn printed_infix_expression_reparses_to_an_equal_ast(
        a in identifier(),
        b in identifier(),
        op in prop::sample::select(vec!["+", "-", "*", "/", "<", ">", "==", "!="]),
    ) {
        let source = format!("{a} {op} {b}");
        let original = parse(&source);
        prop_assert!(original.errors.is_empty());
        let printed = original.to_string();
        let reparsed = parse(&printed);
        prop_assert!(reparsed.errors.is_empty());
        prop_assert_eq!(original.statements, reparsed.statements);
    }
}
