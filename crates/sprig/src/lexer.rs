//! Lexical analysis for sprig expressions.
//!
//! Tokenization is driven by a logos-derived raw token enum; the [`Lexer`]
//! wrapper attaches spans, resolves number literal values, and reports
//! malformed literals and unrecognized characters without ever stalling.
//!
//! # Design
//!
//! - Whitespace is a real token (filtered later by the parser), so token
//!   positions always tile the input exactly
//! - A digit run consumes digits and periods as one token; a literal with a
//!   period resolves as a Decimal, otherwise as an Int32. Resolution failures
//!   become diagnostics and the token keeps `value: None`
//! - Unrecognized characters yield a `Bad` token covering exactly one
//!   character, so the lexer always advances
//! - Past the end of input, [`Lexer::next_token`] returns `Eof` forever

use crate::diagnostics::DiagnosticBag;
use crate::text::TextSpan;
use bigdecimal::BigDecimal;
use logos::Logos;
use sprig_ext::Value;
use std::fmt;

/// What logos matches directly. `TokenKind` adds the `Bad` and `Eof` kinds
/// the pattern set cannot express.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[regex(r"[0-9][0-9.]*")]
    Number,

    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"[A-Za-z][A-Za-z0-9]*")]
    Ident,

    #[token("true")]
    True,
    #[token("false")]
    False,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("&&")]
    #[token("and")]
    And,
    #[token("||")]
    #[token("or")]
    Or,
    #[token("!")]
    #[token("not")]
    Not,

    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
}

/// Kind of a lexical token.
///
/// Word operators and their symbolic forms share a kind: `and`/`&&`,
/// `or`/`||`, and `not`/`!` are indistinguishable past the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Numeric literal; digits and periods, e.g. `42`, `3.14`
    Number,
    /// A run of whitespace
    Whitespace,
    /// Identifier, e.g. a function name
    Ident,
    /// Boolean literal `true`
    True,
    /// Boolean literal `false`
    False,
    /// Operator `+`
    Plus,
    /// Operator `-`
    Minus,
    /// Operator `*`
    Star,
    /// Operator `/`
    Slash,
    /// Logical and, written `&&` or `and`
    And,
    /// Logical or, written `||` or `or`
    Or,
    /// Logical negation, written `!` or `not`
    Not,
    /// Operator `==`
    EqEq,
    /// Operator `!=`
    BangEq,
    /// Operator `<`
    Lt,
    /// Operator `<=`
    LtEq,
    /// Operator `>`
    Gt,
    /// Operator `>=`
    GtEq,
    /// Delimiter `(`
    LParen,
    /// Delimiter `)`
    RParen,
    /// Delimiter `,`
    Comma,
    /// Unrecognized character
    Bad,
    /// End of input
    Eof,
}

impl From<RawToken> for TokenKind {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Number => TokenKind::Number,
            RawToken::Whitespace => TokenKind::Whitespace,
            RawToken::Ident => TokenKind::Ident,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::And => TokenKind::And,
            RawToken::Or => TokenKind::Or,
            RawToken::Not => TokenKind::Not,
            RawToken::EqEq => TokenKind::EqEq,
            RawToken::BangEq => TokenKind::BangEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::Comma => TokenKind::Comma,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "Number",
            TokenKind::Whitespace => "Whitespace",
            TokenKind::Ident => "Ident",
            TokenKind::True => "True",
            TokenKind::False => "False",
            TokenKind::Plus => "Plus",
            TokenKind::Minus => "Minus",
            TokenKind::Star => "Star",
            TokenKind::Slash => "Slash",
            TokenKind::And => "And",
            TokenKind::Or => "Or",
            TokenKind::Not => "Not",
            TokenKind::EqEq => "EqEq",
            TokenKind::BangEq => "BangEq",
            TokenKind::Lt => "Lt",
            TokenKind::LtEq => "LtEq",
            TokenKind::Gt => "Gt",
            TokenKind::GtEq => "GtEq",
            TokenKind::LParen => "LParen",
            TokenKind::RParen => "RParen",
            TokenKind::Comma => "Comma",
            TokenKind::Bad => "Bad",
            TokenKind::Eof => "Eof",
        };
        write!(f, "{}", name)
    }
}

/// A lexical token: kind, source span, raw text, and the resolved literal
/// value for well-formed number literals.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxToken {
    pub kind: TokenKind,
    pub span: TextSpan,
    pub text: String,
    pub value: Option<Value>,
}

impl SyntaxToken {
    /// Byte offset where the token starts.
    pub fn position(&self) -> usize {
        self.span.start
    }
}

/// Stateful cursor producing one token per call, diagnostics on the side.
pub struct Lexer<'src, 'bag> {
    inner: logos::Lexer<'src, RawToken>,
    source_len: usize,
    diagnostics: &'bag mut DiagnosticBag,
}

impl<'src, 'bag> Lexer<'src, 'bag> {
    /// Creates a lexer over `text`, reporting into `diagnostics`.
    pub fn new(text: &'src str, diagnostics: &'bag mut DiagnosticBag) -> Self {
        Self {
            inner: RawToken::lexer(text),
            source_len: text.len(),
            diagnostics,
        }
    }

    /// Produces the next token. Once the input is exhausted this returns
    /// `Eof` tokens indefinitely.
    pub fn next_token(&mut self) -> SyntaxToken {
        let raw = match self.inner.next() {
            Some(Ok(raw)) => raw,
            Some(Err(())) => {
                let span = self.inner.span();
                if let Some(character) = self.inner.slice().chars().next() {
                    self.diagnostics.report_bad_character(character, span.start);
                }
                return SyntaxToken {
                    kind: TokenKind::Bad,
                    span: TextSpan::from_bounds(span.start, span.end),
                    text: self.inner.slice().to_string(),
                    value: None,
                };
            }
            None => {
                return SyntaxToken {
                    kind: TokenKind::Eof,
                    span: TextSpan::new(self.source_len, 0),
                    text: String::new(),
                    value: None,
                };
            }
        };

        let span = TextSpan::from_bounds(self.inner.span().start, self.inner.span().end);
        let text = self.inner.slice();
        let value = match raw {
            RawToken::Number => self.resolve_number(text, span),
            _ => None,
        };

        SyntaxToken {
            kind: raw.into(),
            span,
            text: text.to_string(),
            value,
        }
    }

    /// Resolves a number literal's value, reporting a diagnostic on failure.
    fn resolve_number(&mut self, text: &str, span: TextSpan) -> Option<Value> {
        if text.contains('.') {
            match text.parse::<BigDecimal>() {
                Ok(decimal) => Some(Value::Decimal(decimal)),
                Err(_) => {
                    self.diagnostics.report_invalid_decimal(text, span);
                    None
                }
            }
        } else {
            match text.parse::<i32>() {
                Ok(int) => Some(Value::Int32(int)),
                Err(_) => {
                    self.diagnostics.report_invalid_int32(text, span);
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    fn lex(source: &str) -> (Vec<SyntaxToken>, DiagnosticBag) {
        let mut bag = DiagnosticBag::new();
        let mut tokens = Vec::new();
        let mut lexer = Lexer::new(source, &mut bag);
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
        (tokens, bag)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("+-*/"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_two_character_operators() {
        assert_eq!(
            kinds("== != <= >= && ||"),
            vec![
                TokenKind::EqEq,
                TokenKind::Whitespace,
                TokenKind::BangEq,
                TokenKind::Whitespace,
                TokenKind::LtEq,
                TokenKind::Whitespace,
                TokenKind::GtEq,
                TokenKind::Whitespace,
                TokenKind::And,
                TokenKind::Whitespace,
                TokenKind::Or,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_character_fallbacks() {
        assert_eq!(
            kinds("! < >"),
            vec![
                TokenKind::Not,
                TokenKind::Whitespace,
                TokenKind::Lt,
                TokenKind::Whitespace,
                TokenKind::Gt,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            kinds("true and false or not HELLO"),
            vec![
                TokenKind::True,
                TokenKind::Whitespace,
                TokenKind::And,
                TokenKind::Whitespace,
                TokenKind::False,
                TokenKind::Whitespace,
                TokenKind::Or,
                TokenKind::Whitespace,
                TokenKind::Not,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keyword_prefixed_identifier() {
        // Longest match wins: an identifier that merely starts with a
        // keyword stays an identifier.
        assert_eq!(kinds("android"), vec![TokenKind::Ident, TokenKind::Eof]);
        assert_eq!(kinds("truest"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_int_literal_value() {
        let (tokens, bag) = lex("42");
        assert!(bag.is_empty());
        assert_eq!(tokens[0].value, Some(Value::Int32(42)));
        assert_eq!(tokens[0].span, TextSpan::new(0, 2));
    }

    #[test]
    fn test_decimal_literal_value() {
        let (tokens, bag) = lex("3.14");
        assert!(bag.is_empty());
        assert_eq!(
            tokens[0].value,
            Some(Value::Decimal("3.14".parse().unwrap()))
        );
    }

    #[test]
    fn test_int_overflow_reports_and_continues() {
        let (tokens, bag) = lex("2147483648");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].value, None);
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.as_slice()[0].kind, DiagnosticKind::InvalidLiteral);
    }

    #[test]
    fn test_malformed_decimal_is_one_token() {
        let (tokens, bag) = lex("1.2.3");
        assert_eq!(tokens[0].kind, TokenKind::Number);
        assert_eq!(tokens[0].text, "1.2.3");
        assert_eq!(tokens[0].value, None);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_bad_character() {
        let (tokens, bag) = lex("1 @ 2");
        assert_eq!(tokens[2].kind, TokenKind::Bad);
        assert_eq!(tokens[2].span, TextSpan::new(2, 1));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.as_slice()[0].kind, DiagnosticKind::BadCharacter);
        assert!(bag.as_slice()[0].message.contains('@'));
    }

    #[test]
    fn test_lone_ampersand_is_bad() {
        let (tokens, bag) = lex("1 & 2");
        assert_eq!(tokens[2].kind, TokenKind::Bad);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut bag = DiagnosticBag::new();
        let mut lexer = Lexer::new("1", &mut bag);
        assert_eq!(lexer.next_token().kind, TokenKind::Number);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_spans_tile_the_input() {
        let (tokens, _) = lex("1 + 23");
        let mut cursor = 0;
        for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
            assert_eq!(token.span.start, cursor);
            cursor = token.span.end();
        }
        assert_eq!(cursor, 6);
    }
}
