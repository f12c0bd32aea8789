//! Recursive descent parser with precedence climbing for infix operators.

use crate::diagnostics::DiagnosticBag;
use crate::lexer::{Lexer, SyntaxToken, TokenKind};
use crate::syntax::ast::{ExprSyntax, FunctionResolution};
use crate::text::TextSpan;
use sprig_ext::{FunctionRegistry, Value};
use tracing::trace;

/// Binding strength of a prefix operator, or 0 if `kind` is not one.
///
/// Unary operators bind tighter than every infix operator.
fn unary_precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Plus | TokenKind::Minus | TokenKind::Not => 6,
        _ => 0,
    }
}

/// Binding strength of an infix operator, or 0 if `kind` is not one.
fn binary_precedence(kind: TokenKind) -> u8 {
    match kind {
        TokenKind::Star | TokenKind::Slash => 5,
        TokenKind::Plus | TokenKind::Minus => 4,
        TokenKind::EqEq
        | TokenKind::BangEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq => 3,
        TokenKind::And => 2,
        TokenKind::Or => 1,
        _ => 0,
    }
}

pub(crate) struct Parser<'reg, 'bag> {
    tokens: Vec<SyntaxToken>,
    position: usize,
    source_len: usize,
    registry: &'reg FunctionRegistry,
    diagnostics: &'bag mut DiagnosticBag,
}

impl<'reg, 'bag> Parser<'reg, 'bag> {
    /// Lexes `text` up front, dropping whitespace and bad tokens so the
    /// grammar only ever sees meaningful kinds.
    pub(crate) fn new(
        text: &str,
        registry: &'reg FunctionRegistry,
        diagnostics: &'bag mut DiagnosticBag,
    ) -> Self {
        let mut tokens = Vec::new();
        let mut lexer = Lexer::new(text, diagnostics);
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            if !matches!(token.kind, TokenKind::Whitespace | TokenKind::Bad) {
                tokens.push(token);
            }
            if done {
                break;
            }
        }
        Self {
            tokens,
            position: 0,
            source_len: text.len(),
            registry,
            diagnostics,
        }
    }

    fn peek(&self, offset: usize) -> &SyntaxToken {
        let index = self.position + offset;
        // The token list always ends with Eof.
        self.tokens
            .get(index)
            .unwrap_or_else(|| self.tokens.last().unwrap())
    }

    fn current(&self) -> &SyntaxToken {
        self.peek(0)
    }

    /// Consumes the current token and returns it.
    fn advance(&mut self) -> SyntaxToken {
        let token = self.current().clone();
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
        token
    }

    /// Consumes the current token if it has the expected kind. Otherwise
    /// reports an unexpected token, fabricates a zero-length token of the
    /// expected kind at the current position, and does not advance.
    fn expect(&mut self, kind: TokenKind) -> SyntaxToken {
        if self.current().kind == kind {
            return self.advance();
        }
        let current = self.current().clone();
        self.diagnostics
            .report_unexpected_token(current.span, current.kind, kind);
        SyntaxToken {
            kind,
            span: TextSpan::new(current.span.start, 0),
            text: String::new(),
            value: None,
        }
    }

    /// Parses the whole input as one expression followed by end of input.
    pub(crate) fn parse(&mut self) -> (ExprSyntax, SyntaxToken) {
        let expr = self.parse_expression(0);
        let eof = self.expect(TokenKind::Eof);
        (expr, eof)
    }

    /// Precedence climbing over infix operators; prefix operators are folded
    /// in when they bind at least as tightly as the surrounding context.
    fn parse_expression(&mut self, parent_precedence: u8) -> ExprSyntax {
        let unary = unary_precedence(self.current().kind);
        let mut left = if unary != 0 && unary >= parent_precedence {
            let operator = self.advance();
            let operand = self.parse_expression(unary);
            ExprSyntax::Unary {
                operator,
                operand: Box::new(operand),
            }
        } else {
            self.parse_primary()
        };

        loop {
            let precedence = binary_precedence(self.current().kind);
            if precedence == 0 || precedence <= parent_precedence {
                break;
            }
            let operator = self.advance();
            let right = self.parse_expression(precedence);
            left = ExprSyntax::Binary {
                left: Box::new(left),
                operator,
                right: Box::new(right),
            };
        }
        left
    }

    fn parse_primary(&mut self) -> ExprSyntax {
        match self.current().kind {
            TokenKind::LParen => self.parse_parenthesized(),
            TokenKind::True | TokenKind::False => {
                let token = self.advance();
                let value = Value::Boolean(token.kind == TokenKind::True);
                ExprSyntax::Literal { token, value }
            }
            TokenKind::Ident => self.parse_call(),
            _ => {
                let token = self.expect(TokenKind::Number);
                // A malformed literal was already reported by the lexer;
                // degrade to zero so binding and typing can continue.
                let value = token.value.clone().unwrap_or(Value::Int32(0));
                ExprSyntax::Literal { token, value }
            }
        }
    }

    /// Parses `( expr )`. A missing `)` is a structural failure: it is
    /// reported once, as a critical diagnostic spanning from the opening
    /// parenthesis to the end of the input, with no trailing unexpected-token
    /// noise.
    fn parse_parenthesized(&mut self) -> ExprSyntax {
        let open = self.advance();
        let expr = self.parse_expression(0);
        let close = if self.current().kind == TokenKind::RParen {
            self.advance()
        } else {
            self.diagnostics.report_missing_closing_parenthesis(
                TextSpan::from_bounds(open.span.start, self.source_len),
            );
            SyntaxToken {
                kind: TokenKind::RParen,
                span: TextSpan::new(self.current().span.start, 0),
                text: String::new(),
                value: None,
            }
        };
        ExprSyntax::Parenthesized {
            open,
            expr: Box::new(expr),
            close,
        }
    }

    fn parse_call(&mut self) -> ExprSyntax {
        let name = self.advance();
        let function = match self.registry.get(&name.text) {
            Some(function) => FunctionResolution::Resolved(function.clone()),
            None => {
                self.diagnostics.report_unknown_function(&name.text, name.span);
                FunctionResolution::Unresolved(name.text.clone())
            }
        };
        trace!(function = %name.text, resolved = matches!(function, FunctionResolution::Resolved(_)), "parsing call");

        let open = self.expect(TokenKind::LParen);
        let mut arguments = Vec::new();
        if !matches!(self.current().kind, TokenKind::RParen | TokenKind::Eof) {
            arguments.push(self.parse_expression(0));
            while self.current().kind == TokenKind::Comma {
                self.advance();
                arguments.push(self.parse_expression(0));
            }
        }
        let close = self.expect(TokenKind::RParen);

        ExprSyntax::Call {
            name,
            function,
            open,
            arguments,
            close,
        }
    }
}
