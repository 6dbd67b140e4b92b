//! Hand-rolled scanner: source text to a flat token sequence.

use super::token::{Token, TokenKind};

/// Scans source text one token at a time. Never fails: unrecognized bytes
/// become `TokenKind::Illegal` rather than an error.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            input: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.advance();
        }
    }

    /// Produces the next token, advancing past it. Returns an `Eof` token
    /// forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let (line, column) = (self.line, self.column);

        let Some(c) = self.peek() else {
            return Token::new(TokenKind::Eof, line, column);
        };

        let kind = match c {
            '=' if self.peek_at(1) == Some('=') => {
                self.advance();
                self.advance();
                TokenKind::Eq
            }
            '!' if self.peek_at(1) == Some('=') => {
                self.advance();
                self.advance();
                TokenKind::NotEq
            }
            '=' => {
                self.advance();
                TokenKind::Assign
            }
            '!' => {
                self.advance();
                TokenKind::Bang
            }
            '+' => {
                self.advance();
                TokenKind::Plus
            }
            '-' => {
                self.advance();
                TokenKind::Minus
            }
            '*' => {
                self.advance();
                TokenKind::Star
            }
            '/' => {
                self.advance();
                TokenKind::Slash
            }
            '<' => {
                self.advance();
                TokenKind::Lt
            }
            '>' => {
                self.advance();
                TokenKind::Gt
            }
            ',' => {
                self.advance();
                TokenKind::Comma
            }
            ';' => {
                self.advance();
                TokenKind::Semicolon
            }
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '{' => {
                self.advance();
                TokenKind::LBrace
            }
            '}' => {
                self.advance();
                TokenKind::RBrace
            }
            '[' => {
                self.advance();
                TokenKind::LBracket
            }
            ']' => {
                self.advance();
                TokenKind::RBracket
            }
            '"' => self.read_string(),
            c if c.is_ascii_digit() => self.read_integer(),
            c if c.is_ascii_alphabetic() => self.read_identifier(),
            other => {
                self.advance();
                TokenKind::Illegal(other.to_string())
            }
        };

        Token::new(kind, line, column)
    }

    /// Opening `"` is consumed by the caller's match arm only in spirit: here
    /// we consume it explicitly, then read up to (not including) the closing
    /// `"`. An unterminated string reads to end of input.
    fn read_string(&mut self) -> TokenKind {
        self.advance(); // opening quote
        let mut s = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
                None => break,
            }
        }
        TokenKind::StringLiteral(s)
    }

    fn read_integer(&mut self) -> TokenKind {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        // Kept as the raw digit lexeme; the parser does the `i64` parse so an
        // overflowing literal becomes a reported parser error, not a clamp.
        TokenKind::Integer(s)
    }

    /// Identifiers are a maximal run of ASCII letters only - no digits, no
    /// underscores, matching the language's lexical grammar.
    fn read_identifier(&mut self) -> TokenKind {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        TokenKind::lookup_keyword(&s).unwrap_or(TokenKind::Identifier(s))
    }
}

/// Drains a `Lexer` to a vector, terminated by exactly one `Eof` token.
/// Convenience for tests and tooling that want the whole sequence at once.
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_punctuation_and_operators() {
        let tokens = tokenize("=+(){},;![]-*/<>==!=");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Bang,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Lt,
                TokenKind::Gt,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_keywords_and_identifiers() {
        let tokens = tokenize("let five = fn(x) { return true; } else false foobar");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Identifier("five".to_string()),
                TokenKind::Assign,
                TokenKind::Function,
                TokenKind::LParen,
                TokenKind::Identifier("x".to_string()),
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::Return,
                TokenKind::True,
                TokenKind::Semicolon,
                TokenKind::RBrace,
                TokenKind::Else,
                TokenKind::False,
                TokenKind::Identifier("foobar".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn identifiers_do_not_absorb_digits_or_underscores() {
        let tokens = tokenize("foo123 bar_baz");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier("foo".to_string()),
                TokenKind::Integer("123".to_string()),
                TokenKind::Identifier("bar".to_string()),
                TokenKind::Illegal("_".to_string()),
                TokenKind::Identifier("baz".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_string_literals() {
        let tokens = tokenize(r#""hello world" "foo""#);
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::StringLiteral("hello world".to_string()),
                TokenKind::StringLiteral("foo".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_reads_to_end_of_input() {
        let tokens = tokenize(r#""unterminated"#);
        assert_eq!(
            tokens[0].kind,
            TokenKind::StringLiteral("unterminated".to_string())
        );
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn ends_with_exactly_one_eof_and_no_interior_eof() {
        let tokens = tokenize("let x = 5; x + 1");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
            1
        );
    }

    #[test]
    fn illegal_byte_carries_the_offending_character() {
        let tokens = tokenize("@");
        assert_eq!(tokens[0].kind, TokenKind::Illegal("@".to_string()));
    }
}
