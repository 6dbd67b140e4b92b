//! Black-box parser error-accumulation and synchronization behavior.

use monkey::frontend::parse;

#[test]
fn malformed_let_statements_are_all_collected() {
    let program = parse(
        "let x 5;
         let = 10;
         let 838383;",
    );
    assert_eq!(program.errors.len(), 3);
}

#[test]
fn valid_statements_around_a_bad_one_still_parse() {
    let program = parse("let x = 1; let = 5; let y = 2;");
    assert_eq!(program.errors.len(), 1);
    assert_eq!(program.statements.len(), 2);
}

#[test]
fn unclosed_function_call_is_reported() {
    let program = parse("add(1, 2");
    assert!(program
        .errors
        .iter()
        .any(|e| e == "malformed function call missing ')'"));
}

#[test]
fn no_prefix_handler_for_a_bare_infix_operator() {
    let program = parse("* 5;");
    assert_eq!(program.errors[0], "no prefix parse fn for '*' found");
}
