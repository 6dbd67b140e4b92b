//! Pratt (operator-precedence) parser: tokens to `Program`.

use super::ast::{BlockStmt, Expr, Program, Stmt};
use super::lexer::Lexer;
use super::token::{Token, TokenKind};

/// Binding power of an operator position. Higher binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
}

fn precedence_of(kind: &TokenKind) -> Precedence {
    match kind {
        TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
        TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
        TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
        TokenKind::Star | TokenKind::Slash => Precedence::Product,
        TokenKind::LParen | TokenKind::LBracket => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// Parses a token stream into a `Program`, accumulating errors rather than
/// aborting on the first one.
pub struct Parser {
    current: Token,
    peek: Token,
    lexer: Lexer,
    errors: Vec<String>,
}

impl Parser {
    #[must_use]
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            current,
            peek,
            lexer,
            errors: Vec::new(),
        }
    }

    fn advance(&mut self) {
        std::mem::swap(&mut self.current, &mut self.peek);
        self.peek = self.lexer.next_token();
    }

    fn current_is(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    fn peek_is(&self, kind: &TokenKind) -> bool {
        &self.peek.kind == kind
    }

    /// Consumes the peek token if it matches `kind`, else records an error
    /// and leaves the stream where it is.
    fn expect_peek(&mut self, kind: &TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            self.errors.push(format!(
                "expected next token to be {kind}, got {} instead",
                self.peek.kind
            ));
            false
        }
    }

    /// Skips tokens until the statement that failed to parse has been
    /// consumed: after the next `;`, or at the next statement-starter
    /// keyword, or at `eof`. Deterministic so error counts stay stable.
    fn synchronize(&mut self) {
        // Always consume at least the token that caused the failure, so a
        // parse error sitting exactly on a statement-starter keyword can't
        // stall the parser in place.
        loop {
            if self.current_is(&TokenKind::Eof) {
                return;
            }
            let was_semicolon = self.current_is(&TokenKind::Semicolon);
            self.advance();
            if was_semicolon {
                return;
            }
            if self.current_is(&TokenKind::Eof)
                || self.current_is(&TokenKind::Let)
                || self.current_is(&TokenKind::Return)
                || self.current_is(&TokenKind::RBrace)
            {
                return;
            }
        }
    }

    #[must_use]
    pub fn parse_program(mut self) -> Program {
        let mut statements = Vec::new();
        while !self.current_is(&TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => {
                    statements.push(stmt);
                    self.advance();
                }
                None => self.synchronize(),
            }
        }
        Program {
            statements,
            errors: self.errors,
        }
    }

    fn parse_statement(&mut self) -> Option<Stmt> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Stmt> {
        let name = match &self.peek.kind {
            TokenKind::Identifier(name) => name.clone(),
            _ => {
                self.errors.push(format!(
                    "expected next token to be IDENT, got {} instead",
                    self.peek.kind
                ));
                return None;
            }
        };
        self.advance(); // onto identifier

        if !self.expect_peek(&TokenKind::Assign) {
            return None;
        }
        self.advance(); // onto the value's first token

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(&TokenKind::Semicolon) {
            self.advance();
        }

        Some(Stmt::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Stmt> {
        self.advance(); // past `return`
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(&TokenKind::Semicolon) {
            self.advance();
        }

        Some(Stmt::Return { value })
    }

    fn parse_expression_statement(&mut self) -> Option<Stmt> {
        let expr = self.parse_expression(Precedence::Lowest)?;
        if self.peek_is(&TokenKind::Semicolon) {
            self.advance();
        }
        Some(Stmt::Expression(expr))
    }

    fn parse_block_statement(&mut self) -> BlockStmt {
        // caller has already positioned `current` on the opening `{`.
        self.advance();
        let mut statements = Vec::new();
        while !self.current_is(&TokenKind::RBrace) && !self.current_is(&TokenKind::Eof) {
            match self.parse_statement() {
                Some(stmt) => {
                    statements.push(stmt);
                    self.advance();
                }
                None => self.synchronize(),
            }
        }
        if !self.current_is(&TokenKind::RBrace) {
            self.errors.push("expected '}' to close block".to_string());
        }
        BlockStmt { statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expr> {
        let mut left = self.parse_prefix()?;

        while !self.peek_is(&TokenKind::Semicolon) && precedence < precedence_of(&self.peek.kind)
        {
            if !Self::has_infix(&self.peek.kind) {
                break;
            }
            self.advance();
            left = self.parse_infix(left)?;
        }

        Some(left)
    }

    fn has_infix(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Eq
                | TokenKind::NotEq
                | TokenKind::LParen
                | TokenKind::LBracket
        )
    }

    fn parse_prefix(&mut self) -> Option<Expr> {
        match self.current.kind.clone() {
            TokenKind::Identifier(name) => Some(Expr::Identifier(name)),
            TokenKind::Integer(digits) => match digits.parse::<i64>() {
                Ok(n) => Some(Expr::IntLiteral(n)),
                Err(_) => {
                    self.errors
                        .push(format!("could not parse {digits} as integer"));
                    None
                }
            },
            TokenKind::StringLiteral(s) => Some(Expr::StringLiteral(s)),
            TokenKind::True => Some(Expr::BoolLiteral(true)),
            TokenKind::False => Some(Expr::BoolLiteral(false)),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            ref other => {
                self.errors
                    .push(format!("no prefix parse fn for '{other}' found"));
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expr) -> Option<Expr> {
        match self.current.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_access_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expr> {
        let operator = self.current.kind.lexeme();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        Some(Expr::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expr) -> Option<Expr> {
        let operator = self.current.kind.lexeme();
        let precedence = precedence_of(&self.current.kind);
        self.advance();
        let right = self.parse_expression(precedence)?;
        Some(Expr::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expr> {
        self.advance(); // past `(`
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.peek_is(&TokenKind::RParen) {
            self.errors
                .push("unmatched '(' in group expression".to_string());
            return None;
        }
        self.advance();
        Some(expr)
    }

    fn parse_array_literal(&mut self) -> Option<Expr> {
        let elements = self.parse_expression_list(&TokenKind::RBracket)?;
        Some(Expr::Array(elements))
    }

    fn parse_if_expression(&mut self) -> Option<Expr> {
        if !self.expect_peek(&TokenKind::LParen) {
            return None;
        }
        self.advance(); // past `(` onto condition
        let condition = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(&TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(&TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(&TokenKind::Else) {
            self.advance();
            if !self.expect_peek(&TokenKind::LBrace) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    fn parse_function_literal(&mut self) -> Option<Expr> {
        if !self.expect_peek(&TokenKind::LParen) {
            return None;
        }
        let params = self.parse_function_params()?;
        if !self.expect_peek(&TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block_statement();
        Some(Expr::Function { params, body })
    }

    fn parse_function_params(&mut self) -> Option<Vec<String>> {
        let mut params = Vec::new();
        if self.peek_is(&TokenKind::RParen) {
            self.advance();
            return Some(params);
        }
        self.advance();
        loop {
            match &self.current.kind {
                TokenKind::Identifier(name) => params.push(name.clone()),
                other => {
                    self.errors
                        .push(format!("expected parameter name, got {other} instead"));
                    return None;
                }
            }
            if self.peek_is(&TokenKind::Comma) {
                self.advance();
                self.advance();
            } else {
                break;
            }
        }
        if !self.expect_peek(&TokenKind::RParen) {
            return None;
        }
        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expr) -> Option<Expr> {
        let args = self.parse_expression_list(&TokenKind::RParen)?;
        Some(Expr::Call {
            function: Box::new(function),
            args,
        })
    }

    fn parse_access_expression(&mut self, array: Expr) -> Option<Expr> {
        self.advance(); // past `[`
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(&TokenKind::RBracket) {
            return None;
        }
        Some(Expr::Access {
            array: Box::new(array),
            index: Box::new(index),
        })
    }

    /// Parses a comma-separated expression list up to (and consuming)
    /// `terminator`. Used for array literals, call arguments.
    fn parse_expression_list(&mut self, terminator: &TokenKind) -> Option<Vec<Expr>> {
        let mut list = Vec::new();
        if self.peek_is(terminator) {
            self.advance();
            return Some(list);
        }
        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(&TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.peek_is(terminator) {
            if *terminator == TokenKind::RParen {
                self.errors
                    .push("malformed function call missing ')'".to_string());
            } else {
                self.errors.push(format!(
                    "expected next token to be {terminator}, got {} instead",
                    self.peek.kind
                ));
            }
            return None;
        }
        self.advance();
        Some(list)
    }
}

/// Convenience wrapper: lex and parse source text in one call.
#[must_use]
pub fn parse(source: &str) -> Program {
    Parser::new(Lexer::new(source)).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Program {
        let program = parse(source);
        assert!(
            program.errors.is_empty(),
            "unexpected parser errors: {:?}",
            program.errors
        );
        program
    }

    #[test]
    fn parses_let_statements() {
        let program = parse_ok("let x = 5; let y = true; let foobar = y;");
        assert_eq!(program.statements.len(), 3);
        assert_eq!(
            program.statements[0],
            Stmt::Let {
                name: "x".to_string(),
                value: Expr::IntLiteral(5)
            }
        );
    }

    #[test]
    fn parses_return_statements() {
        let program = parse_ok("return 5; return 10; return 993322;");
        assert_eq!(program.statements.len(), 3);
        assert_eq!(
            program.statements[2],
            Stmt::Return {
                value: Expr::IntLiteral(993_322)
            }
        );
    }

    #[test]
    fn reports_error_for_malformed_let() {
        let program = parse("let = 5;");
        assert!(!program.errors.is_empty());
    }

    #[test]
    fn precedence_printing_matches_expected_forms() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b * c - d / e - f", "(((a + (b * c)) - (d / e)) - f)"),
            ("add(a, b, add(6 * 7))", "add(a, b, add((6 * 7)))"),
        ];
        for (input, expected) in cases {
            let program = parse_ok(input);
            assert_eq!(program.statements[0].to_string(), *expected);
        }
    }

    #[test]
    fn parses_if_else_expression() {
        let program = parse_ok("if (x < y) { x } else { y }");
        match &program.statements[0] {
            Stmt::Expression(Expr::If {
                condition,
                alternative,
                ..
            }) => {
                assert_eq!(condition.to_string(), "(x < y)");
                assert!(alternative.is_some());
            }
            other => panic!("expected if expression, got {other:?}"),
        }
    }

    #[test]
    fn parses_function_literal_params() {
        let program = parse_ok("fn(x, y) { x + y; }");
        match &program.statements[0] {
            Stmt::Expression(Expr::Function { params, .. }) => {
                assert_eq!(params, &vec!["x".to_string(), "y".to_string()]);
            }
            other => panic!("expected function literal, got {other:?}"),
        }
    }

    #[test]
    fn parses_array_and_access_expressions() {
        let program = parse_ok(r#"[1, 2 * 2, 3 + 3][1 + 1]"#);
        assert_eq!(
            program.statements[0].to_string(),
            "([1, (2 * 2), (3 + 3)][(1 + 1)])"
        );
    }

    #[test]
    fn no_prefix_parse_fn_error_for_bare_operator() {
        let program = parse("*5;");
        assert_eq!(
            program.errors[0],
            "no prefix parse fn for '*' found"
        );
    }

    #[test]
    fn unmatched_paren_is_reported() {
        let program = parse("(1 + 2");
        assert!(program
            .errors
            .iter()
            .any(|e| e == "unmatched '(' in group expression"));
    }

    #[test]
    fn integer_literal_overflowing_i64_is_a_parser_error_not_a_clamp() {
        let program = parse("99999999999999999999;");
        assert!(program.statements.is_empty());
        assert_eq!(
            program.errors,
            vec!["could not parse 99999999999999999999 as integer"]
        );
    }

    #[test]
    fn error_recovery_continues_past_next_statement() {
        let program = parse("let = 5; let y = 10;");
        assert_eq!(program.statements.len(), 1);
        assert_eq!(program.errors.len(), 1);
        assert_eq!(
            program.statements[0],
            Stmt::Let {
                name: "y".to_string(),
                value: Expr::IntLiteral(10)
            }
        );
    }
}
